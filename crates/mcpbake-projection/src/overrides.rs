//! Operator-authored registry inputs: the blacklist and custom server entries.
//!
//! Both files are YAML (JSON is accepted too) and optional: a missing or
//! empty file means "no blacklist" or "no overrides".

use std::collections::BTreeSet;
use std::path::Path;

use mcpbake_common::error::{BakeError, Result};
use serde::Deserialize;

use crate::ordered::OrderedMap;

/// Custom registry entries keyed by server name, passed through verbatim.
pub type CustomServers = OrderedMap<serde_json::Value>;

/// Shape of the blacklist file.
#[derive(Debug, Default, Deserialize)]
struct BlacklistConfig {
    #[serde(default)]
    blacklist: Vec<String>,
}

/// Loads the set of target names excluded from the registry.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or does not
/// contain a `blacklist` list of strings.
pub fn load_blacklist(path: &Path) -> Result<BTreeSet<String>> {
    let Some(content) = read_optional(path)? else {
        return Ok(BTreeSet::new());
    };
    let config: BlacklistConfig = serde_yaml::from_str(&content).map_err(|e| invalid(path, &e))?;
    tracing::debug!(path = %path.display(), entries = config.blacklist.len(), "loaded blacklist");
    Ok(config.blacklist.into_iter().collect())
}

/// Loads custom registry entries that replace derived ones.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or its top level
/// is not a mapping.
pub fn load_custom_servers(path: &Path) -> Result<CustomServers> {
    let Some(content) = read_optional(path)? else {
        return Ok(CustomServers::new());
    };
    let custom: CustomServers = serde_yaml::from_str(&content).map_err(|e| invalid(path, &e))?;
    tracing::debug!(path = %path.display(), entries = custom.len(), "loaded custom servers");
    Ok(custom)
}

/// Reads `path`, returning `None` when it is missing or blank.
fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "optional config not present");
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| BakeError::io(path, e))?;
    Ok((!content.trim().is_empty()).then_some(content))
}

fn invalid(path: &Path, err: &serde_yaml::Error) -> BakeError {
    BakeError::InvalidConfig {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
