//! Stdin-backed command source.

use contracts::CommandSource;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

/// Reads commands line-by-line from standard input.
///
/// Blank lines are skipped; EOF or a read error ends the stream.
pub struct StdinCommandSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinCommandSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinCommandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSource for StdinCommandSource {
    async fn next_command(&mut self) -> Option<String> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed.to_string());
                    }
                }
                Ok(None) => return None,
                Err(e) => {
                    warn!(error = %e, "Failed to read command input");
                    return None;
                }
            }
        }
    }
}
