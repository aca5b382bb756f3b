//! Dockerfile introspection.

use std::path::Path;

use mcpbake_common::error::{BakeError, Result};

/// Returns the port of the first `EXPOSE` instruction in `content`.
///
/// Only the first token after `EXPOSE` is taken, verbatim, so
/// `EXPOSE 8080 9090` yields `8080` and `EXPOSE 53/udp` yields `53/udp`.
/// An `EXPOSE` with no argument is skipped.
#[must_use]
pub fn parse_exposed_port(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("EXPOSE") => tokens.next().map(str::to_string),
            _ => None,
        }
    })
}

/// Reads the Dockerfile at `path` and returns its first exposed port.
///
/// A missing Dockerfile has no exposed port.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn exposed_port(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "dockerfile not found, no port exposed");
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| BakeError::io(path, e))?;
    Ok(parse_exposed_port(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_expose() {
        let content = "FROM python:3.12\nEXPOSE 8080\nEXPOSE 9090\nCMD [\"serve\"]\n";
        assert_eq!(parse_exposed_port(content).as_deref(), Some("8080"));
    }

    #[test]
    fn indented_expose_is_found() {
        assert_eq!(
            parse_exposed_port("FROM node\n    EXPOSE 3000\n").as_deref(),
            Some("3000")
        );
    }

    #[test]
    fn multi_port_expose_keeps_first() {
        assert_eq!(
            parse_exposed_port("EXPOSE 8000 8001/udp").as_deref(),
            Some("8000")
        );
    }

    #[test]
    fn bare_expose_is_skipped() {
        assert_eq!(
            parse_exposed_port("EXPOSE\nEXPOSE 7000\n").as_deref(),
            Some("7000")
        );
    }

    #[test]
    fn no_expose_is_none() {
        assert!(parse_exposed_port("FROM alpine\nRUN echo EXPOSE 80\n").is_none());
    }

    #[test]
    fn similar_instruction_is_not_expose() {
        assert!(parse_exposed_port("EXPOSED 80\n").is_none());
    }

    #[test]
    fn missing_dockerfile_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let port = exposed_port(&dir.path().join("Dockerfile")).expect("read");
        assert!(port.is_none());
    }

    #[test]
    fn reads_dockerfile_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Dockerfile");
        std::fs::write(&path, "FROM scratch\nEXPOSE 4000\n").expect("write");
        assert_eq!(exposed_port(&path).expect("read").as_deref(), Some("4000"));
    }
}
