//! # mcpbake-bake
//!
//! The build-target model and its text form.
//!
//! Handles:
//! - **Model**: groups, variables, and targets in insertion order.
//! - **Scan**: building a model from a directory of submodules.
//! - **Serializer**: rendering a model as a bake descriptor.
//! - **Parser**: lexing and parsing a bake descriptor back into a model.

pub mod model;
pub mod parser;
pub mod scan;
pub mod serializer;

pub use model::{BakeFile, Group, Target, Variable};
pub use parser::{load_bake_file, parse_bake};
pub use serializer::render;
