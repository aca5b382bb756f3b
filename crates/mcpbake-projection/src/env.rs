//! Per-target environment files in a minimal `KEY=VALUE` format.
//!
//! Blank lines, `#` comments, and lines without `=` are skipped. The first
//! `=` separates key from value; both are trimmed. There is no quoting,
//! escaping, or multi-line support.

use std::path::{Path, PathBuf};

use mcpbake_common::constants::ENV_FILE_NAME;
use mcpbake_common::error::{BakeError, Result};

use crate::ordered::OrderedMap;

/// Environment variables in file order.
pub type EnvMap = OrderedMap<String>;

/// Returns `<envs_dir>/<target>/.env`.
#[must_use]
pub fn env_file_path(envs_dir: &Path, target: &str) -> PathBuf {
    envs_dir.join(target).join(ENV_FILE_NAME)
}

/// Parses `KEY=VALUE` lines.
///
/// A repeated key keeps its first position and takes the last value.
#[must_use]
pub fn parse_env(content: &str) -> EnvMap {
    let mut env = EnvMap::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            tracing::warn!(line = lineno + 1, "skipping env line with empty key");
            continue;
        }
        let _ = env.insert(key, value.trim().to_string());
    }
    env
}

/// Loads the environment file at `path`. A missing file yields an empty map.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_env_file(path: &Path) -> Result<EnvMap> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no env file");
        return Ok(EnvMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| BakeError::io(path, e))?;
    let env = parse_env(&content);
    tracing::debug!(path = %path.display(), vars = env.len(), "loaded env file");
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_basic_pairs() {
        let env = parse_env("API_KEY=abc\nREGION=eu-west-1\n");
        assert_eq!(env.keys().collect::<Vec<_>>(), vec!["API_KEY", "REGION"]);
        assert_eq!(env.get("REGION").map(String::as_str), Some("eu-west-1"));
    }

    #[test]
    fn parse_env_skips_blank_comment_and_bare_lines() {
        let env = parse_env("\n   \n# comment\n   # indented comment\nJUSTAWORD\nA=1\n");
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("A").map(String::as_str), Some("1"));
    }

    #[test]
    fn parse_env_splits_on_first_equals() {
        let env = parse_env("URL=postgres://u:p@h/db?sslmode=require");
        assert_eq!(
            env.get("URL").map(String::as_str),
            Some("postgres://u:p@h/db?sslmode=require")
        );
    }

    #[test]
    fn parse_env_trims_key_and_value() {
        let env = parse_env("  TOKEN   =   secret value  ");
        assert_eq!(env.get("TOKEN").map(String::as_str), Some("secret value"));
    }

    #[test]
    fn parse_env_keeps_quotes_verbatim() {
        let env = parse_env(r#"NAME="quoted""#);
        assert_eq!(env.get("NAME").map(String::as_str), Some(r#""quoted""#));
    }

    #[test]
    fn parse_env_empty_value() {
        let env = parse_env("EMPTY=");
        assert_eq!(env.get("EMPTY").map(String::as_str), Some(""));
    }

    #[test]
    fn parse_env_repeated_key_last_value_wins() {
        let env = parse_env("A=1\nB=2\nA=3");
        assert_eq!(env.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(env.get("A").map(String::as_str), Some("3"));
    }

    #[test]
    fn load_env_file_missing_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let env = load_env_file(&env_file_path(dir.path(), "alpha")).expect("load");
        assert!(env.is_empty());
    }

    #[test]
    fn load_env_file_reads_target_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = env_file_path(dir.path(), "alpha");
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(&path, "GITHUB_TOKEN=ghp_x\n").expect("write");
        let env = load_env_file(&path).expect("load");
        assert_eq!(env.get("GITHUB_TOKEN").map(String::as_str), Some("ghp_x"));
    }
}
