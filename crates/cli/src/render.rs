//! Output renderers: plain text, Ipe document, JSON.
//!
//! All renderers take a finished `Cartogram`; nothing is written until the
//! computation has succeeded.

use std::fmt::Display;
use std::hash::Hash;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use linca::Cartogram;
use serde::Serialize;

/// Minimal sheet defining the marker and sizes used by `write_ipe`.
pub const DEFAULT_STYLE: &str = r#"<ipestyle name="linca">
<symbol name="mark/disk(sx)" transformations="translations">
<path fill="sym-stroke">
0.6 0 0 0.6 0 0 e
</path>
</symbol>
<pen name="normal" value="0.4"/>
<symbolsize name="normal" value="3"/>
<textsize name="normal" value="\normalsize"/>
</ipestyle>"#;

pub enum Format {
    Text,
    Ipe { style: String },
    Json,
}

pub fn render<Id, W>(c: &Cartogram<Id>, format: &Format, out: &mut W) -> Result<()>
where
    Id: Hash + Eq + Display + Serialize,
    W: Write,
{
    match format {
        Format::Text => write_text(c, out)?,
        Format::Ipe { style } => write_ipe(c, style, out)?,
        Format::Json => write_json(c, out)?,
    }
    Ok(())
}

/// `identifier x y` per vertex, in index order.
pub fn write_text<Id: Hash + Eq + Display, W: Write>(c: &Cartogram<Id>, out: &mut W) -> io::Result<()> {
    for (id, p) in c.vertices() {
        writeln!(out, "{} {} {}", id, p.x, p.y)?;
    }
    Ok(())
}

/// Ipe document with three layers: `edges`, `nodes`, `labels`.
pub fn write_ipe<Id: Hash + Eq + Display, W: Write>(
    c: &Cartogram<Id>,
    style: &str,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0"?>"#)?;
    writeln!(out, r#"<!DOCTYPE ipe SYSTEM "ipe.dtd">"#)?;
    writeln!(
        out,
        r#"<ipe version="70218" creator="linca {}">"#,
        linca::VERSION
    )?;
    writeln!(out, "{}", style.trim())?;
    writeln!(out, "<page>")?;
    for layer in ["edges", "nodes", "labels"] {
        writeln!(out, r#"<layer name="{layer}"/>"#)?;
    }
    writeln!(out, r#"<view layers="edges nodes labels" active="edges"/>"#)?;
    for (a, b) in c.segments() {
        writeln!(out, r#"<path layer="edges" stroke="black">"#)?;
        writeln!(out, "{} {} m", a.x, a.y)?;
        writeln!(out, "{} {} l", b.x, b.y)?;
        writeln!(out, "</path>")?;
    }
    for (_, p) in c.vertices() {
        writeln!(
            out,
            r#"<use layer="nodes" name="mark/disk(sx)" pos="{} {}" size="normal" stroke="black"/>"#,
            p.x, p.y
        )?;
    }
    for (id, p) in c.vertices() {
        writeln!(
            out,
            r#"<text layer="labels" transformations="translations" pos="{} {}" stroke="black" type="label" valign="baseline">{}</text>"#,
            p.x,
            p.y,
            escape_xml(&id.to_string())
        )?;
    }
    writeln!(out, "</page>")?;
    writeln!(out, "</ipe>")?;
    Ok(())
}

#[derive(Serialize)]
struct JsonVertex<'a, Id> {
    id: &'a Id,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct JsonDoc<'a, Id> {
    vertices: Vec<JsonVertex<'a, Id>>,
    edges: Vec<[usize; 2]>,
}

/// `{"vertices": [{"id", "x", "y"}...], "edges": [[u, v]...]}`.
pub fn write_json<Id: Hash + Eq + Serialize, W: Write>(c: &Cartogram<Id>, out: &mut W) -> Result<()> {
    let doc = JsonDoc {
        vertices: c
            .vertices()
            .map(|(id, p)| JsonVertex { id, x: p.x, y: p.y })
            .collect(),
        edges: c.edges.iter().map(|e| [e.source.0, e.target.0]).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}

/// Read an Ipe stylesheet (`.isy`), dropping its XML prolog so it can be
/// embedded in a document.
pub fn load_style(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading stylesheet {}", path.display()))?;
    let body = strip_prolog(&raw);
    if !body.starts_with("<ipestyle") {
        bail!("{} does not look like an Ipe stylesheet", path.display());
    }
    Ok(body.to_string())
}

fn strip_prolog(raw: &str) -> &str {
    let mut rest = raw.trim_start();
    for open in ["<?xml", "<!DOCTYPE"] {
        if rest.starts_with(open) {
            if let Some(end) = rest.find('>') {
                rest = rest[end + 1..].trim_start();
            }
        }
    }
    rest.trim_end()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
