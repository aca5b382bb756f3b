//! MCP client server registry projection.
//!
//! Every non-blacklisted target of a group becomes a `docker run` launch
//! entry. Environment variable names are passed with `-e` and their values
//! travel in the entry's `env` map. Custom entries then replace derived
//! entries of the same name, or are appended.

use std::collections::BTreeSet;
use std::path::PathBuf;

use mcpbake_bake::{BakeFile, Target};
use mcpbake_common::constants::{DEFAULT_GROUP, DOCKER_COMMAND};
use mcpbake_common::error::Result;
use serde::Serialize;

use crate::env::{self, EnvMap};
use crate::ordered::OrderedMap;
use crate::overrides::CustomServers;

/// Inputs for [`project_registry`].
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Group whose targets become servers.
    pub group: String,
    /// Directory holding `<target>/.env` files.
    pub envs_dir: PathBuf,
    /// Target names to leave out.
    pub blacklist: BTreeSet<String>,
    /// Entries that replace or extend the derived ones.
    pub custom: CustomServers,
}

impl RegistryOptions {
    /// Options for the `default` group with no blacklist or overrides.
    #[must_use]
    pub fn new(envs_dir: impl Into<PathBuf>) -> Self {
        Self {
            group: DEFAULT_GROUP.into(),
            envs_dir: envs_dir.into(),
            blacklist: BTreeSet::new(),
            custom: CustomServers::new(),
        }
    }
}

/// A derived launch entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerEntry {
    /// Launcher executable.
    pub command: String,
    /// Launcher arguments.
    pub args: Vec<String>,
    /// Environment supplied to the launcher.
    pub env: EnvMap,
}

impl ServerEntry {
    /// Builds the `docker run` entry for `target` with `image` and `env`.
    #[must_use]
    pub fn docker_run(target: &Target, image: String, env: EnvMap) -> Self {
        let mut args: Vec<String> = ["run", "-i", "--name", target.name.as_str(), "--rm"]
            .into_iter()
            .map(str::to_string)
            .collect();
        for key in env.keys() {
            args.push("-e".into());
            args.push(key.to_string());
        }
        args.push(image);

        Self {
            command: DOCKER_COMMAND.into(),
            args,
            env,
        }
    }
}

/// A registry entry: derived from a target or supplied verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegistryEntry {
    /// Derived from a bake target.
    Derived(ServerEntry),
    /// Taken unchanged from the custom overrides.
    Custom(serde_json::Value),
}

/// The registry document, `{"mcpServers": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Registry {
    /// Server entries by name.
    #[serde(rename = "mcpServers")]
    pub servers: OrderedMap<RegistryEntry>,
}

impl Registry {
    /// Renders the document as pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

/// Projects the targets of `options.group` into a server registry.
///
/// # Errors
///
/// Returns an error if an existing env file cannot be read.
pub fn project_registry(bake: &BakeFile, options: &RegistryOptions) -> Result<Registry> {
    tracing::info!(group = %options.group, "projecting server registry");
    let tag = bake.tag();
    let mut servers = OrderedMap::new();

    for target in bake.resolve_group(&options.group) {
        if options.blacklist.contains(&target.name) {
            tracing::info!(server = %target.name, "skipping blacklisted target");
            continue;
        }
        let env = env::load_env_file(&env::env_file_path(&options.envs_dir, &target.name))?;
        let entry = ServerEntry::docker_run(target, target.image(tag), env);
        let _ = servers.insert(target.name.clone(), RegistryEntry::Derived(entry));
    }

    for (name, value) in options.custom.iter() {
        if servers
            .insert(name, RegistryEntry::Custom(value.clone()))
            .is_some()
        {
            tracing::info!(server = name, "custom entry replaces derived entry");
        } else {
            tracing::debug!(server = name, "custom entry added");
        }
    }

    Ok(Registry { servers })
}
