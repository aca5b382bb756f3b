//! `mcpbake compose` — Generate a compose file from the bake descriptor.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use mcpbake_bake::load_bake_file;
use mcpbake_common::config::WorkspaceLayout;
use mcpbake_common::output::write_atomic;
use mcpbake_projection::{ComposeOptions, project_compose};

/// Arguments for the `compose` subcommand.
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Path to the bake descriptor.
    #[arg(long)]
    pub bake_file: Option<PathBuf>,

    /// Output path for the compose file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base directory that target contexts are resolved against.
    #[arg(long)]
    pub dockerfiles_root: Option<PathBuf>,

    /// Group to generate services for.
    #[arg(short, long, default_value = mcpbake_common::constants::DEFAULT_GROUP)]
    pub group: String,
}

impl ComposeArgs {
    fn apply(&self, layout: &mut WorkspaceLayout) {
        if let Some(ref path) = self.bake_file {
            layout.bake_file.clone_from(path);
        }
        if let Some(ref path) = self.output {
            layout.compose_file.clone_from(path);
        }
        if let Some(ref path) = self.dockerfiles_root {
            layout.dockerfiles_root.clone_from(path);
        }
    }
}

/// Executes the `compose` command.
///
/// # Errors
///
/// Returns an error if the descriptor is missing or malformed, a Dockerfile
/// cannot be read, or the compose file cannot be written.
pub fn execute(args: &ComposeArgs, mut layout: WorkspaceLayout) -> anyhow::Result<()> {
    args.apply(&mut layout);

    let bake = load_bake_file(&layout.bake_file)?;
    let options = ComposeOptions {
        group: args.group.clone(),
        dockerfiles_root: layout.dockerfiles_root.clone(),
    };
    let compose = project_compose(&bake, &options)?;
    let yaml = compose.to_yaml()?;
    write_atomic(&layout.compose_file, &yaml)
        .with_context(|| format!("failed to write {}", layout.compose_file.display()))?;

    tracing::info!(services = compose.services.len(), "compose file written");
    println!(
        "docker-compose.yaml generated at {}",
        layout.compose_file.display()
    );
    Ok(())
}
