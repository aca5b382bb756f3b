//! `mcpbake servers` — Generate the MCP server registry from the bake descriptor.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use mcpbake_bake::load_bake_file;
use mcpbake_common::config::WorkspaceLayout;
use mcpbake_common::output::write_atomic;
use mcpbake_projection::overrides::{load_blacklist, load_custom_servers};
use mcpbake_projection::{Registry, RegistryOptions, project_registry};

/// Arguments for the `servers` subcommand.
#[derive(Args, Debug)]
pub struct ServersArgs {
    /// Path to the bake descriptor.
    #[arg(long)]
    pub bake_file: Option<PathBuf>,

    /// Directory holding `<target>/.env` files.
    #[arg(long)]
    pub envs_dir: Option<PathBuf>,

    /// Blacklist config file.
    #[arg(long)]
    pub blacklist: Option<PathBuf>,

    /// Custom server overrides file.
    #[arg(long)]
    pub custom: Option<PathBuf>,

    /// Group to generate servers for.
    #[arg(short, long, default_value = mcpbake_common::constants::DEFAULT_GROUP)]
    pub group: String,

    /// Write the registry to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ServersArgs {
    fn apply(&self, layout: &mut WorkspaceLayout) {
        if let Some(ref path) = self.bake_file {
            layout.bake_file.clone_from(path);
        }
        if let Some(ref path) = self.envs_dir {
            layout.envs_dir.clone_from(path);
        }
        if let Some(ref path) = self.blacklist {
            layout.blacklist_file.clone_from(path);
        }
        if let Some(ref path) = self.custom {
            layout.custom_file.clone_from(path);
        }
    }
}

/// Executes the `servers` command.
///
/// # Errors
///
/// Returns an error if the descriptor is missing or malformed, a config or
/// env file cannot be read, or the output cannot be written.
pub fn execute(args: &ServersArgs, mut layout: WorkspaceLayout) -> anyhow::Result<()> {
    args.apply(&mut layout);

    let registry = build_registry(args, &layout)?;
    let json = registry.to_json()?;

    if let Some(ref out_path) = args.output {
        write_atomic(out_path, &json)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        tracing::info!(servers = registry.servers.len(), "server registry written");
        println!("Wrote JSON to {}", out_path.display());
    } else {
        print!("{json}");
    }

    Ok(())
}

fn build_registry(args: &ServersArgs, layout: &WorkspaceLayout) -> anyhow::Result<Registry> {
    let bake = load_bake_file(&layout.bake_file)?;
    let options = RegistryOptions {
        group: args.group.clone(),
        envs_dir: layout.envs_dir.clone(),
        blacklist: load_blacklist(&layout.blacklist_file)?,
        custom: load_custom_servers(&layout.custom_file)?,
    };
    Ok(project_registry(&bake, &options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAKE: &str = r#"variable "TAG" {
    default = "v1"
}

group "default" {
    targets = ["alpha", "beta"]
}

target "alpha" {
    context = "./mcp/alpha"
    tags = ["alpha:${TAG}"]
}

target "beta" {
    context = "./mcp/beta"
    tags = ["beta:${TAG}"]
}
"#;

    fn args(output: Option<PathBuf>) -> ServersArgs {
        ServersArgs {
            bake_file: None,
            envs_dir: None,
            blacklist: None,
            custom: None,
            group: "default".into(),
            output,
        }
    }

    fn layout_with_blacklist(root: &std::path::Path) -> WorkspaceLayout {
        let layout = WorkspaceLayout::from_root(root);
        std::fs::write(&layout.bake_file, BAKE).expect("write bake");
        std::fs::write(&layout.blacklist_file, "blacklist: [beta]\n").expect("write");
        layout
    }

    #[test]
    fn execute_writes_registry_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = layout_with_blacklist(dir.path());

        let out = dir.path().join("mcp.json");
        execute(&args(Some(out.clone())), layout).expect("execute");

        let text = std::fs::read_to_string(&out).expect("read");
        assert!(text.contains("\"alpha:v1\""), "got: {text}");
        assert!(!text.contains("\"beta\""), "got: {text}");
    }

    #[test]
    fn registry_without_output_is_the_printed_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = layout_with_blacklist(dir.path());
        std::fs::write(&layout.custom_file, "remote:\n  url: https://mcp.example/sse\n")
            .expect("write custom");

        let json = build_registry(&args(None), &layout)
            .expect("registry")
            .to_json()
            .expect("json");

        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(
            value,
            serde_json::json!({
                "mcpServers": {
                    "alpha": {
                        "command": "docker",
                        "args": ["run", "-i", "--name", "alpha", "--rm", "alpha:v1"],
                        "env": {}
                    },
                    "remote": {"url": "https://mcp.example/sse"}
                }
            })
        );
        assert!(json.ends_with("}\n"));
        assert!(!dir.path().join("mcp.json").exists());
    }
}
