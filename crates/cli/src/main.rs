use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use linca::Params;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod render;

use render::Format;

#[derive(Parser, Debug)]
#[command(name = "linca")]
#[command(about = "Draws a linear cartogram from `source target dx dy` edge lines")]
struct Cmd {
    /// Write an Ipe document
    #[arg(long, conflicts_with = "json")]
    ipe: bool,

    /// Write JSON (vertices with ids and coordinates, index edges)
    #[arg(long)]
    json: bool,

    /// Scale all coordinates by a constant factor
    #[arg(short, long, default_value = "1", value_parser = linca::parse_scale)]
    scale: f64,

    /// Focus on direction rather than length
    #[arg(long, default_value = "10", value_parser = linca::parse_straightness)]
    straightness: f64,

    /// Ipe stylesheet (.isy) to embed instead of the built-in one
    #[arg(long, requires = "ipe")]
    style: Option<PathBuf>,

    /// Read edges from a file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// More stderr logging: -v for solver details, -vv for refinement steps
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(log_level(cmd.verbose))
        .with_writer(io::stderr)
        .init();

    let mut out = Vec::new();
    run(&cmd, &mut out)?;
    io::stdout().lock().write_all(&out)?;
    Ok(())
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Read, solve and render into `out`. On error nothing has been written.
fn run<W: Write>(cmd: &Cmd, out: &mut W) -> Result<()> {
    let params = Params::new(cmd.scale, cmd.straightness)?;
    let format = if cmd.ipe {
        let style = match &cmd.style {
            Some(path) => render::load_style(path)?,
            None => render::DEFAULT_STYLE.to_string(),
        };
        Format::Ipe { style }
    } else if cmd.json {
        Format::Json
    } else {
        Format::Text
    };

    let edges = match &cmd.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            input::read_edges(BufReader::new(file))?
        }
        None => input::read_edges(io::stdin().lock())?,
    };
    tracing::info!(edges = edges.len(), "read input");

    let carto = linca::cartogram(&edges, params).context("computing cartogram")?;

    let mut buf = Vec::new();
    render::render(&carto, &format, &mut buf)?;
    out.write_all(&buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linca::LincaError;

    fn cmd(args: &[&str]) -> Cmd {
        Cmd::try_parse_from(std::iter::once("linca").chain(args.iter().copied())).unwrap()
    }

    fn edge_file(text: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(text.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_match_documented_values() {
        let c = cmd(&[]);
        assert_eq!(c.scale, 1.0);
        assert_eq!(c.straightness, 10.0);
        assert!(!c.ipe && !c.json);
    }

    #[test]
    fn verbosity_raises_the_log_level() {
        assert_eq!(log_level(cmd(&[]).verbose), Level::INFO);
        assert_eq!(log_level(cmd(&["-v"]).verbose), Level::DEBUG);
        assert_eq!(log_level(cmd(&["-vv"]).verbose), Level::TRACE);
        assert_eq!(log_level(cmd(&["-v", "-v", "-v"]).verbose), Level::TRACE);
    }

    #[test]
    fn unparseable_parameters_are_rejected() {
        assert!(Cmd::try_parse_from(["linca", "--scale", "big"]).is_err());
        assert!(Cmd::try_parse_from(["linca", "--straightness", "-1"]).is_err());
        assert!(Cmd::try_parse_from(["linca", "--ipe", "--json"]).is_err());
        assert!(Cmd::try_parse_from(["linca", "--style", "x.isy"]).is_err());
    }

    #[test]
    fn text_output_from_file() {
        let f = edge_file("0 1 3 4\n1 2 0 -4\n");
        let path = f.path().to_str().unwrap();
        let mut out = Vec::new();
        run(&cmd(&["--input", path, "-s", "2"]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "0 0 0");
        let last: Vec<f64> = lines[2]
            .split(' ')
            .skip(1)
            .map(|t| t.parse().unwrap())
            .collect();
        assert!((last[0] - 6.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }

    #[test]
    fn ipe_output_from_file() {
        let f = edge_file("3 4 1 0\n");
        let path = f.path().to_str().unwrap();
        let mut out = Vec::new();
        run(&cmd(&["--input", path, "--ipe"]), &mut out).unwrap();
        let doc = String::from_utf8(out).unwrap();
        assert!(doc.contains(r#"<layer name="labels"/>"#));
        assert!(doc.contains(">4</text>"));
    }

    #[test]
    fn singular_input_writes_nothing() {
        let f = edge_file("0 1 1 0\n2 3 1 0\n");
        let path = f.path().to_str().unwrap();
        let mut out = Vec::new();
        let err = run(&cmd(&["--input", path]), &mut out).unwrap_err();
        assert!(out.is_empty());
        assert!(matches!(
            err.downcast_ref::<LincaError>(),
            Some(LincaError::SingularSystem(_))
        ));
    }

    #[test]
    fn malformed_input_is_fatal() {
        let f = edge_file("0 1 1 0\n1 2 one 0\n");
        let path = f.path().to_str().unwrap();
        let mut out = Vec::new();
        let err = run(&cmd(&["--input", path]), &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LincaError>(),
            Some(LincaError::MalformedInput { line: 2, .. })
        ));
    }
}
