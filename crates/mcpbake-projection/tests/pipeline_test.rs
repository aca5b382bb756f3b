//! End-to-end tests for the artifact pipeline.
//!
//! These tests exercise both paths over a synthetic repository:
//! 1. Scan submodules and write the bake descriptor
//! 2. Load the descriptor and project compose services
//! 3. Load the descriptor, env files, blacklist, and overrides and project
//!    the server registry

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use mcpbake_bake::{load_bake_file, render, scan::scan_submodules};
use mcpbake_common::config::WorkspaceLayout;
use mcpbake_common::output::write_atomic;
use mcpbake_projection::overrides::{load_blacklist, load_custom_servers};
use mcpbake_projection::{ComposeOptions, RegistryOptions, project_compose, project_registry};
use serde_json::json;

fn submodule(layout: &WorkspaceLayout, name: &str, dockerfile: &str) {
    let dir = layout.mcp_dir.join(name);
    std::fs::create_dir_all(&dir).expect("mkdir");
    std::fs::write(dir.join("Dockerfile"), dockerfile).expect("write");
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(path, content).expect("write");
}

fn bake(layout: &WorkspaceLayout) {
    let model = scan_submodules(&layout.mcp_dir, &layout.context_prefix()).expect("scan");
    write_atomic(&layout.bake_file, &render(&model)).expect("write bake");
}

fn repo() -> (tempfile::TempDir, WorkspaceLayout) {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = WorkspaceLayout::from_root(dir.path());
    submodule(&layout, "alpha", "FROM python:3.12-slim\nEXPOSE 8080\nCMD [\"alpha\"]\n");
    submodule(&layout, "beta", "FROM node:20\nCMD [\"beta\"]\n");
    std::fs::create_dir_all(layout.mcp_dir.join("notes")).expect("mkdir");
    (dir, layout)
}

// ── Compose ──────────────────────────────────────────────────────────

#[test]
fn pipeline_compose_from_scanned_repo() {
    let (_dir, layout) = repo();
    bake(&layout);

    let model = load_bake_file(&layout.bake_file).expect("load");
    let compose =
        project_compose(&model, &ComposeOptions::new(&layout.dockerfiles_root)).expect("compose");
    write_atomic(&layout.compose_file, &compose.to_yaml().expect("yaml")).expect("write");

    let text = std::fs::read_to_string(&layout.compose_file).expect("read");
    let yaml: serde_yaml::Value = serde_yaml::from_str(&text).expect("reparse");
    let alpha = &yaml["services"]["alpha"];
    assert_eq!(alpha["image"].as_str(), Some("alpha:latest"));
    assert_eq!(alpha["container_name"].as_str(), Some("alpha"));
    assert_eq!(alpha["network_mode"].as_str(), Some("host"));
    assert_eq!(alpha["ports"][0].as_str(), Some("8080:8080"));
    let beta = &yaml["services"]["beta"];
    assert_eq!(beta["image"].as_str(), Some("beta:latest"));
    assert!(beta.get("ports").is_none());
    assert!(yaml["services"].get("notes").is_none());
}

#[test]
fn pipeline_compose_uses_edited_tag_variable() {
    let (_dir, layout) = repo();
    bake(&layout);
    let text = std::fs::read_to_string(&layout.bake_file).expect("read");
    write(
        &layout.bake_file,
        &text.replace("default = \"latest\"", "default = \"v1\""),
    );

    let model = load_bake_file(&layout.bake_file).expect("load");
    let compose =
        project_compose(&model, &ComposeOptions::new(&layout.dockerfiles_root)).expect("compose");
    assert_eq!(
        compose.services.get("alpha").map(|s| s.image.as_str()),
        Some("alpha:v1")
    );
}

// ── Registry ─────────────────────────────────────────────────────────

#[test]
fn pipeline_registry_with_blacklist_env_and_custom() {
    let (_dir, layout) = repo();
    submodule(&layout, "gamma", "FROM alpine\n");
    bake(&layout);
    write(&layout.envs_dir.join("alpha").join(".env"), "TOKEN=abc\n");
    write(&layout.blacklist_file, "blacklist:\n  - beta\n");
    write(
        &layout.custom_file,
        "gamma:\n  command: uvx\n  args: [gamma-mcp]\n",
    );

    let model = load_bake_file(&layout.bake_file).expect("load");
    let options = RegistryOptions {
        blacklist: load_blacklist(&layout.blacklist_file).expect("blacklist"),
        custom: load_custom_servers(&layout.custom_file).expect("custom"),
        ..RegistryOptions::new(&layout.envs_dir)
    };
    let registry = project_registry(&model, &options).expect("registry");
    let value: serde_json::Value =
        serde_json::from_str(&registry.to_json().expect("json")).expect("reparse");

    assert_eq!(
        value,
        json!({
            "mcpServers": {
                "alpha": {
                    "command": "docker",
                    "args": ["run", "-i", "--name", "alpha", "--rm", "-e", "TOKEN", "alpha:latest"],
                    "env": {"TOKEN": "abc"}
                },
                "gamma": {"command": "uvx", "args": ["gamma-mcp"]}
            }
        })
    );
}

#[test]
fn pipeline_registry_is_byte_identical_on_rerun() {
    let (_dir, layout) = repo();
    bake(&layout);
    let first = std::fs::read_to_string(&layout.bake_file).expect("read");
    bake(&layout);
    let second = std::fs::read_to_string(&layout.bake_file).expect("read");
    assert_eq!(first, second);

    let model = load_bake_file(&layout.bake_file).expect("load");
    let options = RegistryOptions::new(&layout.envs_dir);
    let a = project_registry(&model, &options).expect("registry").to_json().expect("json");
    let b = project_registry(&model, &options).expect("registry").to_json().expect("json");
    assert_eq!(a, b);
}

#[test]
fn pipeline_missing_bake_file_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = WorkspaceLayout::from_root(dir.path());
    let err = load_bake_file(&layout.bake_file).unwrap_err();
    assert!(err.to_string().contains("docker-bake.hcl"), "got: {err}");
}
