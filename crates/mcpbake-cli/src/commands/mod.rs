//! CLI command definitions and dispatch.

pub mod bake;
pub mod compose;
pub mod servers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mcpbake_common::config::WorkspaceLayout;

/// mcpbake — derive deployment artifacts from MCP server submodules.
#[derive(Parser, Debug)]
#[command(name = "mcpbake", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Repository root that default paths are derived from.
    #[arg(long, global = true, env = "MCPBAKE_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan submodules and write the bake descriptor.
    Bake(bake::BakeArgs),
    /// Generate a compose file from the bake descriptor.
    Compose(compose::ComposeArgs),
    /// Generate the MCP server registry from the bake descriptor.
    Servers(servers::ServersArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let layout = WorkspaceLayout::from_root(&cli.root);
    tracing::debug!(root = %layout.root.display(), "resolved workspace layout");
    match cli.command {
        Command::Bake(args) => bake::execute(&args, layout),
        Command::Compose(args) => compose::execute(&args, layout),
        Command::Servers(args) => servers::execute(&args, layout),
    }
}
