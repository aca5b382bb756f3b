//! Maps the generic block tree onto the bake model.
//!
//! The grammar allows the same `kind "label"` block to appear more than
//! once. Such repeats are gathered as a list of 1..n bodies per label and
//! collapsed to the first body here, so the model and everything built on
//! it only ever sees one body per name.

use mcpbake_common::constants::DOCKERFILE_NAME;
use mcpbake_common::error::{BakeError, Result};

use super::ast::{Body, Expr};
use crate::model::{BakeFile, Group, Target, Variable};

const KNOWN_KINDS: [&str; 3] = ["variable", "group", "target"];

/// Bodies of one block kind, grouped by label in first-seen order.
struct LabeledBlocks<'a> {
    kind: &'static str,
    entries: Vec<(String, Vec<&'a Body>)>,
}

impl<'a> LabeledBlocks<'a> {
    /// Gathers every block of `kind` from the top level of `root`.
    ///
    /// Besides `kind "label" { ... }`, the unlabeled nesting form
    /// `kind { label { ... } }` is accepted.
    fn collect(root: &'a Body, kind: &'static str) -> Self {
        let mut blocks = Self {
            kind,
            entries: Vec::new(),
        };

        for block in root.blocks.iter().filter(|b| b.kind == kind) {
            match block.labels.as_slice() {
                [] => {
                    for inner in &block.body.blocks {
                        blocks.push(inner.kind.clone(), &inner.body);
                    }
                    if !block.body.attributes.is_empty() {
                        tracing::warn!(kind, "ignoring attributes of unlabeled block");
                    }
                }
                [label] => blocks.push(label.clone(), &block.body),
                [label, extra @ ..] => {
                    tracing::warn!(kind, label = %label, extra = extra.len(), "ignoring extra block labels");
                    blocks.push(label.clone(), &block.body);
                }
            }
        }

        blocks
    }

    fn push(&mut self, label: String, body: &'a Body) {
        if let Some((_, bodies)) = self.entries.iter_mut().find(|(l, _)| *l == label) {
            bodies.push(body);
        } else {
            self.entries.push((label, vec![body]));
        }
    }

    /// Keeps the first body for each label.
    fn collapse(self) -> Vec<(String, &'a Body)> {
        let kind = self.kind;
        self.entries
            .into_iter()
            .filter_map(|(label, bodies)| {
                if bodies.len() > 1 {
                    tracing::warn!(
                        kind,
                        label = %label,
                        count = bodies.len(),
                        "duplicate block, keeping the first"
                    );
                }
                bodies.first().map(|body| (label, *body))
            })
            .collect()
    }
}

/// Decodes the known block kinds of `root` into a [`BakeFile`].
///
/// # Errors
///
/// Returns [`BakeError::Syntax`] if a known attribute has the wrong type.
pub fn decode(root: &Body) -> Result<BakeFile> {
    for block in &root.blocks {
        if !KNOWN_KINDS.contains(&block.kind.as_str()) {
            tracing::debug!(kind = %block.kind, "ignoring unknown block kind");
        }
    }
    for attr in &root.attributes {
        tracing::debug!(key = %attr.key, "ignoring top-level attribute");
    }

    let variables = LabeledBlocks::collect(root, "variable")
        .collapse()
        .into_iter()
        .map(|(name, body)| decode_variable(name, body))
        .collect::<Result<Vec<_>>>()?;

    let groups = LabeledBlocks::collect(root, "group")
        .collapse()
        .into_iter()
        .map(|(name, body)| decode_group(name, body))
        .collect::<Result<Vec<_>>>()?;

    let targets = LabeledBlocks::collect(root, "target")
        .collapse()
        .into_iter()
        .map(|(name, body)| decode_target(name, body))
        .collect::<Result<Vec<_>>>()?;

    Ok(BakeFile {
        variables,
        groups,
        targets,
    })
}

fn decode_variable(name: String, body: &Body) -> Result<Variable> {
    let default = match body.attribute("default") {
        None => String::new(),
        Some(expr) => expr.scalar_text().ok_or_else(|| {
            type_err("variable", &name, "default", "scalar", expr)
        })?,
    };
    Ok(Variable { name, default })
}

fn decode_group(name: String, body: &Body) -> Result<Group> {
    let targets = string_list(body, "group", &name, "targets")?;
    Ok(Group { name, targets })
}

fn decode_target(name: String, body: &Body) -> Result<Target> {
    let context = string_attr(body, "target", &name, "context")?.unwrap_or_else(|| ".".into());
    let dockerfile = string_attr(body, "target", &name, "dockerfile")?
        .unwrap_or_else(|| DOCKERFILE_NAME.into());
    let tags = string_list(body, "target", &name, "tags")?;

    for attr in &body.attributes {
        if !["context", "dockerfile", "tags"].contains(&attr.key.as_str()) {
            tracing::debug!(target_name = %name, key = %attr.key, "ignoring target attribute");
        }
    }

    Ok(Target {
        name,
        context,
        dockerfile,
        tags,
    })
}

fn string_attr(body: &Body, kind: &str, name: &str, key: &str) -> Result<Option<String>> {
    match body.attribute(key) {
        None => Ok(None),
        Some(Expr::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(type_err(kind, name, key, "string", other)),
    }
}

fn string_list(body: &Body, kind: &str, name: &str, key: &str) -> Result<Vec<String>> {
    match body.attribute(key) {
        None => Ok(Vec::new()),
        Some(Expr::List(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| type_err(kind, name, key, "list of strings", item))
            })
            .collect(),
        Some(other) => Err(type_err(kind, name, key, "list of strings", other)),
    }
}

fn type_err(kind: &str, name: &str, key: &str, expected: &str, got: &Expr) -> BakeError {
    BakeError::Syntax {
        message: format!(
            "{kind} \"{name}\": attribute `{key}` must be a {expected}, got {}",
            got.kind()
        ),
    }
}
