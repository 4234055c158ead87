//! Edge-list reader: `source target dx dy` per line, whitespace separated.
//!
//! Lines with fewer than four tokens are skipped; extra tokens are ignored.

use std::io::BufRead;

use anyhow::{Context, Result};
use linca::{LincaError, RawEdge};

pub fn read_edges<R: BufRead>(reader: R) -> Result<Vec<RawEdge<i64>>> {
    let mut edges = Vec::new();
    for (k, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", k + 1))?;
        if let Some(edge) = parse_line(k + 1, &line)? {
            edges.push(edge);
        }
    }
    Ok(edges)
}

/// Parse one 1-based line. `Ok(None)` for lines with fewer than four tokens.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<RawEdge<i64>>, LincaError> {
    let tokens: Vec<&str> = line.split_whitespace().take(4).collect();
    if tokens.len() < 4 {
        return Ok(None);
    }
    let vertex = |tok: &str| {
        tok.parse::<i64>()
            .map_err(|e| LincaError::malformed(line_no, format!("vertex `{tok}`: {e}")))
    };
    let real = |tok: &str| match tok.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(v) => Err(LincaError::malformed(
            line_no,
            format!("displacement `{tok}` is not finite ({v})"),
        )),
        Err(e) => Err(LincaError::malformed(
            line_no,
            format!("displacement `{tok}`: {e}"),
        )),
    };
    Ok(Some(RawEdge::new(
        vertex(tokens[0])?,
        vertex(tokens[1])?,
        real(tokens[2])?,
        real(tokens[3])?,
    )))
}
