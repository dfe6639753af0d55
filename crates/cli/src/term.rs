//! Terminal prompting over a single buffered stdin reader.
//!
//! One `Prompt` lives for the whole session so input typed ahead of a
//! prompt stays buffered for the next read instead of being discarded
//! with a throwaway reader.

use std::io::Write;
use std::sync::Arc;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Shared handle so the approval gate and the wizard loop read from the
/// same buffered stdin.
pub type SharedPrompt = Arc<Mutex<Prompt>>;

pub fn shared() -> SharedPrompt {
    Arc::new(Mutex::new(Prompt::new()))
}

pub struct Prompt<R: AsyncBufRead + Unpin = BufReader<Stdin>> {
    lines: Lines<R>,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(io::stdin()).lines(),
        }
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Print a label and read one trimmed line.
    pub async fn line(&mut self, label: &str) -> io::Result<String> {
        print!("{label}");
        std::io::stdout().flush()?;

        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed",
            )),
        }
    }

    /// Prompt until the user enters a non-empty line.
    pub async fn required(&mut self, label: &str) -> io::Result<String> {
        loop {
            let line = self.line(label).await?;
            if !line.is_empty() {
                return Ok(line);
            }
            eprintln!("  Please enter a value.");
        }
    }
}
