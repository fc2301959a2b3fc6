mod cli;
mod util;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::io::{self, Write};
use text_rope::{Rope, RopeConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::util::TreeView;

fn run<W>(command: Command, rope: &Rope, w: &mut W) -> Result<()>
where
    W: Write,
{
    debug!(?command, chars = rope.len(), "running command");

    match command {
        Command::Length => writeln!(w, "{}", rope.len())?,
        Command::CharAt { index } => {
            let c = rope.char_at(index).wrap_err_with(|| format!("cannot read char {index}"))?;
            writeln!(w, "{c}")?;
        }
        Command::Substring { start, end } => {
            let text = match end {
                Some(end) => rope.substring(start, end),
                None => rope.substring_from(start),
            }
            .wrap_err("cannot take substring")?;
            writeln!(w, "{text}")?;
        }
        Command::Insert { index, text } => {
            let edited = rope.insert(index, &text).wrap_err_with(|| format!("cannot insert at {index}"))?;
            writeln!(w, "{edited}")?;
        }
        Command::Delete { start, end } => {
            let edited = rope.delete(start, end).wrap_err_with(|| format!("cannot delete {start}..{end}"))?;
            writeln!(w, "{edited}")?;
        }
        Command::Replace { start, end, text } => {
            let edited =
                rope.replace(start, end, &text).wrap_err_with(|| format!("cannot replace {start}..{end}"))?;
            writeln!(w, "{edited}")?;
        }
        Command::Split { index } => {
            let (left, right) = rope.split(index);
            writeln!(w, "{left}")?;
            writeln!(w, "{right}")?;
        }
        Command::Stats => {
            writeln!(w, "length: {}", rope.len())?;
            writeln!(w, "depth: {}", rope.depth())?;
            writeln!(w, "leaves: {}", rope.leaf_count())?;
            writeln!(w, "chunk size: {}", rope.chunk_size())?;
            writeln!(w, "balanced: {}", rope.is_balanced())?;
        }
        Command::Tree => TreeView::new(w).render(rope)?,
    }

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.chunk_size {
        Some(chunk_size) => RopeConfig::new(chunk_size)?,
        None => RopeConfig::from_env()?,
    };

    let text = cli.source.read()?;
    let rope = Rope::with_config(&text, &config);
    info!(chars = rope.len(), chunk_size = config.chunk_size(), "loaded document");

    let mut stdout = io::stdout().lock();
    run(cli.command, &rope, &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(command: Command, text: &str) -> Result<String> {
        let rope = Rope::with_chunk_size(text, 4)?;
        let mut out = Vec::new();
        run(command, &rope, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_run_edits() {
        let insert = Command::Insert { index: 5, text: "!!".to_string() };
        assert_eq!(output(insert, "hello world").unwrap(), "hello!! world\n");
        assert_eq!(output(Command::Delete { start: 0, end: 6 }, "hello world").unwrap(), "world\n");
        assert_eq!(output(Command::Split { index: 5 }, "hello world").unwrap(), "hello\n world\n");
    }

    #[test]
    fn test_run_queries() {
        assert_eq!(output(Command::Length, "hello").unwrap(), "5\n");
        assert_eq!(output(Command::CharAt { index: 1 }, "hello").unwrap(), "e\n");
        assert_eq!(output(Command::Substring { start: 1, end: None }, "hello").unwrap(), "ello\n");
        assert!(output(Command::Stats, "hello world").unwrap().contains("depth: 2"));
    }

    #[test]
    fn test_run_reports_range_errors() {
        let err = output(Command::CharAt { index: 3 }, "abc").unwrap_err();
        assert!(format!("{err:?}").contains("out of range"));
    }
}
