//! In-memory bake descriptor: groups, variables, and targets.
//!
//! Collections keep insertion order; it is the render order of the
//! descriptor and the iteration order of every projection.

use mcpbake_common::constants::{DEFAULT_TAG, DOCKERFILE_NAME, TAG_PLACEHOLDER, TAG_VARIABLE};

/// One buildable unit, mapping to one container image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Unique target name.
    pub name: String,
    /// Build context path.
    pub context: String,
    /// Dockerfile name inside the context.
    pub dockerfile: String,
    /// Image reference templates, possibly containing `${TAG}`.
    pub tags: Vec<String>,
}

impl Target {
    /// Creates a target with the default Dockerfile name and no tags.
    #[must_use]
    pub fn new(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context: context.into(),
            dockerfile: DOCKERFILE_NAME.into(),
            tags: Vec::new(),
        }
    }

    /// Resolves the image reference for this target.
    ///
    /// The first tag is used with `${TAG}` replaced by `tag`. A target without
    /// tags gets `<name>:<tag>`.
    #[must_use]
    pub fn image(&self, tag: &str) -> String {
        self.tags.first().map_or_else(
            || format!("{}:{tag}", self.name),
            |template| template.replace(TAG_PLACEHOLDER, tag),
        )
    }
}

/// A named, ordered list of target names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Group name.
    pub name: String,
    /// Referenced target names. Not checked against the target set.
    pub targets: Vec<String>,
}

/// A named default value used for tag substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Variable name.
    pub name: String,
    /// Default value.
    pub default: String,
}

/// Root of a bake descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BakeFile {
    /// Variable blocks, in declaration order.
    pub variables: Vec<Variable>,
    /// Group blocks, in declaration order.
    pub groups: Vec<Group>,
    /// Target blocks, in declaration order.
    pub targets: Vec<Target>,
}

impl BakeFile {
    /// Looks up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Looks up a target by name.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Returns the `TAG` default, or `latest` when the variable is absent.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.variable(TAG_VARIABLE)
            .map_or(DEFAULT_TAG, |v| v.default.as_str())
    }

    /// Resolves a group to its targets, in group order.
    ///
    /// An unknown group resolves to nothing. Names with no matching target
    /// are skipped with a warning.
    #[must_use]
    pub fn resolve_group(&self, name: &str) -> Vec<&Target> {
        let Some(group) = self.group(name) else {
            tracing::warn!(group = name, "group not found, nothing to project");
            return Vec::new();
        };

        group
            .targets
            .iter()
            .filter_map(|target_name| {
                let target = self.target(target_name);
                if target.is_none() {
                    tracing::warn!(
                        group = name,
                        target_name = %target_name,
                        "group references unknown target, skipping"
                    );
                }
                target
            })
            .collect()
    }
}
