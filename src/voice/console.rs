//! Terminal voice I/O for headless use

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use super::{VoiceIo, normalize_utterance};

/// Prints what would be spoken and reads typed replies from stdin
pub struct ConsoleVoice {
    lines: Lines<BufReader<Stdin>>,
    closed: bool,
}

impl ConsoleVoice {
    /// Attach to the process's stdin and stdout
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            closed: false,
        }
    }
}

impl Default for ConsoleVoice {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl VoiceIo for ConsoleVoice {
    async fn speak(&mut self, text: &str) {
        write_flushed(format!("{text}\n").as_bytes()).await;
    }

    async fn listen(&mut self) -> String {
        write_flushed(b"> ").await;

        match self.lines.next_line().await {
            Ok(Some(line)) => normalize_utterance(&line),
            Ok(None) => {
                tracing::info!("stdin closed");
                self.closed = true;
                String::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stdin");
                String::new()
            }
        }
    }

    fn is_open(&self) -> bool {
        !self.closed
    }
}

async fn write_flushed(bytes: &[u8]) {
    let mut stdout = tokio::io::stdout();
    let written = match stdout.write_all(bytes).await {
        Ok(()) => stdout.flush().await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        tracing::warn!(error = %e, "failed to write to stdout");
    }
}
