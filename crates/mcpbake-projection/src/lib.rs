//! # mcpbake-projection
//!
//! Lossy, deterministic projections of a [`mcpbake_bake::BakeFile`] into
//! downstream artifact formats.
//!
//! Handles:
//! - **Env**: per-target `KEY=VALUE` override files.
//! - **Dockerfile**: `EXPOSE` introspection.
//! - **Compose**: compose service mapping for a group.
//! - **Registry**: MCP client server registry for a group, with blacklist
//!   and custom overrides.
//! - **Overrides**: loading the blacklist and custom override files.

pub mod compose;
pub mod dockerfile;
pub mod env;
pub mod ordered;
pub mod overrides;
pub mod registry;

pub use compose::{ComposeFile, ComposeOptions, ComposeService, project_compose};
pub use ordered::OrderedMap;
pub use registry::{Registry, RegistryEntry, RegistryOptions, ServerEntry, project_registry};
