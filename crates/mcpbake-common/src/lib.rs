//! # mcpbake-common
//!
//! Shared error definitions, the workspace layout configuration, constants,
//! and the atomic artifact writer used across the mcpbake workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod output;
