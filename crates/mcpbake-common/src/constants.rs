//! Well-known file names, default relative paths, and fixed values.

/// Dockerfile name a submodule directory must contain to become a target.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Name of the group generated from a directory scan.
pub const DEFAULT_GROUP: &str = "default";

/// Name of the variable substituted into image tags.
pub const TAG_VARIABLE: &str = "TAG";

/// Placeholder replaced by the `TAG` value when resolving images.
pub const TAG_PLACEHOLDER: &str = "${TAG}";

/// Default value of the `TAG` variable.
pub const DEFAULT_TAG: &str = "latest";

/// Default submodule directory, relative to the repository root.
pub const DEFAULT_MCP_DIR: &str = "mcp";

/// Default bake descriptor path, relative to the repository root.
pub const DEFAULT_BAKE_FILE: &str = "docker-bake.hcl";

/// Default compose output path, relative to the repository root.
pub const DEFAULT_COMPOSE_FILE: &str = "server/docker-compose.yaml";

/// Default per-target environment directory, relative to the repository root.
pub const DEFAULT_ENVS_DIR: &str = "envs";

/// Name of the environment file inside each per-target env directory.
pub const ENV_FILE_NAME: &str = ".env";

/// Default blacklist config path, relative to the repository root.
pub const DEFAULT_BLACKLIST_FILE: &str = "blacklist.yaml";

/// Default custom server overrides path, relative to the repository root.
pub const DEFAULT_CUSTOM_FILE: &str = "custom.yaml";

/// Network mode assigned to every compose service.
pub const NETWORK_MODE: &str = "host";

/// Launcher executable for registry entries.
pub const DOCKER_COMMAND: &str = "docker";
