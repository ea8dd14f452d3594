//! Dot output for package graphs.
//!
//! Nodes are declared in [`GraphResult::sorted`] order and edges follow
//! [`GraphResult::edges`], so output is byte-for-byte reproducible for an
//! unchanged graph. Imports pointing outside the graph produce no edge.

use std::io::Write;

use thiserror::Error;

use crate::graph::{GraphResult, PackageNode};

pub const DEFAULT_LABEL_FORMAT: &str = "{{.ID}}";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write graph: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid label format {format:?}: {reason}")]
    Template { format: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    ImportCount,
    Imports,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(Field),
}

/// Node label template.
///
/// Literal text mixed with `{{.ID}}` (package id), `{{.ImportCount}}`
/// (number of declared imports) and `{{.Imports}}` (imports joined with
/// `, `). Whitespace inside the braces is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    segments: Vec<Segment>,
}

impl Default for Label {
    fn default() -> Self {
        Self { segments: vec![Segment::Field(Field::Id)] }
    }
}

impl Label {
    pub fn parse(format: &str) -> Result<Self, RenderError> {
        let invalid = |reason: String| RenderError::Template { format: format.to_string(), reason };

        let mut segments = Vec::new();
        let mut rest = format;
        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| invalid("unterminated `{{`".to_string()))?;
            let field = match after[..end].trim() {
                ".ID" => Field::Id,
                ".ImportCount" => Field::ImportCount,
                ".Imports" => Field::Imports,
                other => return Err(invalid(format!("unknown field {other:?}"))),
            };
            segments.push(Segment::Field(field));
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    pub fn render(&self, node: &PackageNode) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field(Field::Id) => out.push_str(&node.id),
                Segment::Field(Field::ImportCount) => out.push_str(&node.imports.len().to_string()),
                Segment::Field(Field::Imports) => out.push_str(&node.imports.join(", ")),
            }
        }
        out
    }
}

/// Map an identifier to a valid dot node name: every character outside
/// `[A-Za-z0-9]` becomes `_`.
pub fn escape_id(id: &str) -> String {
    id.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}

/// Double-quote a label; control characters are written as escapes.
fn quote(label: &str) -> String {
    let mut out = String::with_capacity(label.len() + 2);
    out.push('"');
    for c in label.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && (c as u32) < 0x80 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Write `graph` as a left-to-right dot digraph.
pub fn render_dot<W: Write + ?Sized>(
    graph: &GraphResult,
    label: &Label,
    out: &mut W,
) -> Result<(), RenderError> {
    writeln!(out, "digraph G {{")?;
    writeln!(out, "    node [shape=rectangle];")?;
    writeln!(out, "    rankdir=LR;")?;

    for node in graph.sorted() {
        writeln!(out, "    {} [label={}];", escape_id(&node.id), quote(&label.render(node)))?;
    }
    for (src, dst) in graph.edges() {
        writeln!(out, "    {} -> {};", escape_id(src), escape_id(dst))?;
    }

    writeln!(out, "}}")?;
    Ok(())
}
