//! Console over async byte streams.

use super::Console;
use crate::error::ConsoleError;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

/// Console reading lines from `R` and writing to `W`.
///
/// [`TerminalConsole::stdio`] is the real terminal; tests plug in in-memory
/// streams.
#[derive(Debug)]
pub struct TerminalConsole<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl TerminalConsole<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> TerminalConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    /// Give back the streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input.into_inner(), self.output.into_inner())
    }

    async fn write(&self, text: &str) -> Result<(), ConsoleError> {
        let mut output = self.output.lock().await;
        output.write_all(text.as_bytes()).await?;
        output.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<R, W> Console for TerminalConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn question(&self, prompt: &str) -> Result<String, ConsoleError> {
        self.write(prompt).await?;

        let mut line = String::new();
        let read = self.input.lock().await.read_line(&mut line).await?;
        if read == 0 {
            return Err(ConsoleError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    async fn print(&self, text: &str) -> Result<(), ConsoleError> {
        self.write(&format!("{text}\n")).await
    }
}
