use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

#[derive(Parser, Debug)]
#[command(name = "text-rope", version, about = "Load a document into a rope and apply one operation to it")]
pub struct Cli {
    #[command(flatten)]
    pub source: Source,

    /// Maximum chars per leaf. Falls back to TEXT_ROPE_CHUNK_SIZE, then 512
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the document comes from. Stdin is read when neither flag is given.
#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct Source {
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[arg(short, long)]
    pub text: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the number of chars
    Length,
    /// Print the char at INDEX
    CharAt { index: usize },
    /// Print the chars in [START, END), END defaults to the end of the document
    Substring { start: usize, end: Option<usize> },
    /// Insert TEXT before INDEX and print the result
    Insert { index: usize, text: String },
    /// Delete [START, END) and print the result
    Delete { start: usize, end: usize },
    /// Replace [START, END) with TEXT and print the result
    Replace { start: usize, end: usize, text: String },
    /// Print both halves of a split at INDEX, one per line
    Split { index: usize },
    /// Print length, depth, and leaf count
    Stats,
    /// Dump the node structure
    Tree,
}

impl Source {
    pub fn read(&self) -> Result<String> {
        match (&self.file, &self.text) {
            (Some(path), _) => fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display())),
            (None, Some(text)) => Ok(text.clone()),
            (None, None) => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer).wrap_err("failed to read document from stdin")?;
                Ok(buffer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_replace() {
        let cli = Cli::try_parse_from(["text-rope", "--text", "hello world", "replace", "0", "5", "HELLO"]).unwrap();
        assert_eq!(cli.command, Command::Replace { start: 0, end: 5, text: "HELLO".to_string() });
        assert_eq!(cli.source.read().unwrap(), "hello world");
        assert_eq!(cli.chunk_size, None);
    }

    #[test]
    fn test_parse_optional_end() {
        let cli = Cli::try_parse_from(["text-rope", "-t", "abc", "--chunk-size", "2", "substring", "1"]).unwrap();
        assert_eq!(cli.command, Command::Substring { start: 1, end: None });
        assert_eq!(cli.chunk_size, Some(2));
    }

    #[test]
    fn test_file_and_text_conflict() {
        assert!(Cli::try_parse_from(["text-rope", "-t", "abc", "-f", "doc.txt", "length"]).is_err());
    }
}
