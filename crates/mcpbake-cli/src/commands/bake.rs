//! `mcpbake bake` — Scan submodules and write the bake descriptor.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use mcpbake_bake::{render, scan::scan_submodules};
use mcpbake_common::config::WorkspaceLayout;
use mcpbake_common::output::write_atomic;

/// Arguments for the `bake` subcommand.
#[derive(Args, Debug)]
pub struct BakeArgs {
    /// Directory whose subdirectories are scanned for Dockerfiles.
    #[arg(long)]
    pub mcp_dir: Option<PathBuf>,

    /// Path of the bake descriptor to write.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl BakeArgs {
    fn apply(&self, layout: &mut WorkspaceLayout) {
        if let Some(ref dir) = self.mcp_dir {
            layout.mcp_dir.clone_from(dir);
        }
        if let Some(ref out) = self.output {
            layout.bake_file.clone_from(out);
        }
    }
}

/// Executes the `bake` command.
///
/// # Errors
///
/// Returns an error if the submodule directory cannot be scanned or the
/// descriptor cannot be written.
pub fn execute(args: &BakeArgs, mut layout: WorkspaceLayout) -> anyhow::Result<()> {
    args.apply(&mut layout);

    let bake = scan_submodules(&layout.mcp_dir, &layout.context_prefix())
        .with_context(|| format!("failed to scan {}", layout.mcp_dir.display()))?;
    write_atomic(&layout.bake_file, &render(&bake))
        .with_context(|| format!("failed to write {}", layout.bake_file.display()))?;

    tracing::info!(targets = bake.targets.len(), "bake descriptor written");
    println!("docker-bake.hcl generated at {}", layout.bake_file.display());
    Ok(())
}
