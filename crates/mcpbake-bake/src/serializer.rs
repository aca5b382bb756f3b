//! Renders a [`BakeFile`] as bake descriptor text.
//!
//! Blocks are emitted as variables, then groups, then targets, each in model
//! order, separated by one blank line. The output depends only on the model,
//! so regenerating from unchanged inputs yields identical bytes.

use std::fmt::Write;

use crate::model::{BakeFile, Group, Target, Variable};

const INDENT: &str = "    ";

/// Renders the descriptor text for `bake`.
#[must_use]
pub fn render(bake: &BakeFile) -> String {
    let mut blocks: Vec<String> = Vec::new();
    blocks.extend(bake.variables.iter().map(render_variable));
    blocks.extend(bake.groups.iter().map(render_group));
    blocks.extend(bake.targets.iter().map(render_target));
    blocks.join("\n")
}

fn render_variable(var: &Variable) -> String {
    let mut out = open_block("variable", &var.name);
    push_string(&mut out, "default", &var.default);
    close_block(out)
}

fn render_group(group: &Group) -> String {
    let mut out = open_block("group", &group.name);
    push_list(&mut out, "targets", &group.targets);
    close_block(out)
}

fn render_target(target: &Target) -> String {
    let mut out = open_block("target", &target.name);
    push_string(&mut out, "context", &target.context);
    push_string(&mut out, "dockerfile", &target.dockerfile);
    push_list(&mut out, "tags", &target.tags);
    close_block(out)
}

fn open_block(kind: &str, label: &str) -> String {
    format!("{kind} {} {{\n", quote(label))
}

fn close_block(mut out: String) -> String {
    out.push_str("}\n");
    out
}

fn push_string(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "{INDENT}{key} = {}", quote(value));
}

fn push_list(out: &mut String, key: &str, values: &[String]) {
    let items: Vec<String> = values.iter().map(String::as_str).map(quote).collect();
    let _ = writeln!(out, "{INDENT}{key} = [{}]", items.join(", "));
}

/// Wraps `value` in double quotes, escaping characters the lexer unescapes.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
