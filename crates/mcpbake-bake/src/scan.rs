//! Builds a [`BakeFile`] from a directory of buildable submodules.

use std::path::Path;

use mcpbake_common::constants::{
    DEFAULT_GROUP, DEFAULT_TAG, DOCKERFILE_NAME, TAG_PLACEHOLDER, TAG_VARIABLE,
};
use mcpbake_common::error::{BakeError, Result};

use crate::model::{BakeFile, Group, Target, Variable};

/// Scans `mcp_dir` for subdirectories containing a `Dockerfile`.
///
/// Each match becomes a target with context `./<context_prefix>/<name>` and
/// a single `<name>:${TAG}` tag. All targets are collected into the
/// `default` group and a `TAG` variable defaulting to `latest` is declared.
/// Directories are visited in name order so the result does not depend on
/// filesystem iteration order.
///
/// # Errors
///
/// Returns an error if `mcp_dir` does not exist or cannot be listed.
pub fn scan_submodules(mcp_dir: &Path, context_prefix: &str) -> Result<BakeFile> {
    tracing::info!(path = %mcp_dir.display(), "scanning submodules");

    if !mcp_dir.is_dir() {
        return Err(BakeError::MissingInput {
            kind: "submodule directory",
            path: mcp_dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(mcp_dir).map_err(|e| BakeError::io(mcp_dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BakeError::io(mcp_dir, e))?;
        let path = entry.path();
        if !path.is_dir() || !path.join(DOCKERFILE_NAME).is_file() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    let prefix = context_prefix.trim_matches('/');
    let targets: Vec<Target> = names
        .iter()
        .map(|name| {
            tracing::debug!(name = %name, "found submodule");
            Target {
                tags: vec![format!("{name}:{TAG_PLACEHOLDER}")],
                ..Target::new(name.clone(), format!("./{prefix}/{name}"))
            }
        })
        .collect();

    Ok(BakeFile {
        variables: vec![Variable {
            name: TAG_VARIABLE.into(),
            default: DEFAULT_TAG.into(),
        }],
        groups: vec![Group {
            name: DEFAULT_GROUP.into(),
            targets: names,
        }],
        targets,
    })
}
