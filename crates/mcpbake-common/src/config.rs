//! Workspace layout: every input and output location used by the commands.
//!
//! Paths are explicit values rather than process-wide constants so that the
//! scanners and projectors can run against synthetic directory trees.

use std::path::{Component, Path, PathBuf};

use crate::constants;

/// Input and output locations for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    /// Repository root all defaults are derived from.
    pub root: PathBuf,
    /// Directory whose immediate children are candidate targets.
    pub mcp_dir: PathBuf,
    /// Bake descriptor path (written by `bake`, read by the projectors).
    pub bake_file: PathBuf,
    /// Compose output path.
    pub compose_file: PathBuf,
    /// Base directory that target contexts are resolved against.
    pub dockerfiles_root: PathBuf,
    /// Directory holding `<target>/.env` files.
    pub envs_dir: PathBuf,
    /// Blacklist config path.
    pub blacklist_file: PathBuf,
    /// Custom server overrides path.
    pub custom_file: PathBuf,
}

impl WorkspaceLayout {
    /// Derives the default layout for a repository rooted at `root`.
    #[must_use]
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            mcp_dir: root.join(constants::DEFAULT_MCP_DIR),
            bake_file: root.join(constants::DEFAULT_BAKE_FILE),
            compose_file: root.join(constants::DEFAULT_COMPOSE_FILE),
            dockerfiles_root: root.clone(),
            envs_dir: root.join(constants::DEFAULT_ENVS_DIR),
            blacklist_file: root.join(constants::DEFAULT_BLACKLIST_FILE),
            custom_file: root.join(constants::DEFAULT_CUSTOM_FILE),
            root,
        }
    }

    /// Returns the `mcp_dir` as written into target contexts, relative to the root.
    ///
    /// `.` components are ignored on both sides, so `services/mcp` under the
    /// root `.` yields `services/mcp`. Falls back to the directory's final
    /// component when `mcp_dir` does not live under `root`.
    #[must_use]
    pub fn context_prefix(&self) -> String {
        let root = without_cur_dir(&self.root);
        let dir = without_cur_dir(&self.mcp_dir);

        let relative = if dir.is_absolute() == root.is_absolute() {
            dir.strip_prefix(&root).ok()
        } else {
            None
        }
        .filter(|p| {
            !p.as_os_str().is_empty() && p.components().all(|c| matches!(c, Component::Normal(_)))
        })
        .or_else(|| dir.file_name().map(Path::new))
        .unwrap_or_else(|| Path::new(constants::DEFAULT_MCP_DIR));

        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self::from_root(".")
    }
}
