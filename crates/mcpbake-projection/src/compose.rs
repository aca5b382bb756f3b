//! Compose projection: one host-networked service per target of a group.

use std::path::PathBuf;

use mcpbake_bake::BakeFile;
use mcpbake_common::constants::{DEFAULT_GROUP, NETWORK_MODE};
use mcpbake_common::error::Result;
use serde::Serialize;

use crate::dockerfile;
use crate::ordered::OrderedMap;

/// Inputs for [`project_compose`].
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Group whose targets become services.
    pub group: String,
    /// Base directory target contexts are resolved against.
    pub dockerfiles_root: PathBuf,
}

impl ComposeOptions {
    /// Options for the `default` group with contexts under `dockerfiles_root`.
    #[must_use]
    pub fn new(dockerfiles_root: impl Into<PathBuf>) -> Self {
        Self {
            group: DEFAULT_GROUP.into(),
            dockerfiles_root: dockerfiles_root.into(),
        }
    }
}

/// A compose service entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposeService {
    /// Resolved image reference.
    pub image: String,
    /// Container name, equal to the target name.
    pub container_name: String,
    /// Always `host`.
    pub network_mode: String,
    /// `<port>:<port>` when the Dockerfile exposes a port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
}

/// A compose document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposeFile {
    /// Services keyed by target name, in group order.
    pub services: OrderedMap<ComposeService>,
}

impl ComposeFile {
    /// Renders the document as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Projects the targets of `options.group` into compose services.
///
/// Each target's Dockerfile is read from
/// `dockerfiles_root/<context>/<dockerfile>` to find its exposed port.
///
/// # Errors
///
/// Returns an error if an existing Dockerfile cannot be read.
pub fn project_compose(bake: &BakeFile, options: &ComposeOptions) -> Result<ComposeFile> {
    tracing::info!(group = %options.group, "projecting compose services");
    let tag = bake.tag();
    let mut services = OrderedMap::new();

    for target in bake.resolve_group(&options.group) {
        let dockerfile_path = options
            .dockerfiles_root
            .join(&target.context)
            .join(&target.dockerfile);
        let port = dockerfile::exposed_port(&dockerfile_path)?;

        let service = ComposeService {
            image: target.image(tag),
            container_name: target.name.clone(),
            network_mode: NETWORK_MODE.into(),
            ports: port.map(|p| vec![format!("{p}:{p}")]),
        };
        tracing::debug!(service = %target.name, image = %service.image, "compose service");
        let _ = services.insert(target.name.clone(), service);
    }

    Ok(ComposeFile { services })
}
