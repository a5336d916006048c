//! Line input read on a plain OS thread.
//!
//! tokio's `Stdin` parks its read on the blocking pool, and runtime shutdown
//! waits for that read to finish. A detached thread feeding a channel lets the
//! REPL stop waiting at any time and lets the process exit without another
//! line of input.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;

/// Lines read from a single reader, in order.
#[derive(Debug)]
pub struct LineReader {
    lines: mpsc::Receiver<io::Result<String>>,
}

impl LineReader {
    pub fn stdin() -> io::Result<Self> {
        Self::spawn(io::BufReader::new(io::stdin()))
    }

    pub fn spawn<R>(reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (sender, lines) = mpsc::channel(1);
        thread::Builder::new()
            .name("commandr-input".to_string())
            .spawn(move || {
                for line in reader.lines() {
                    let failed = line.is_err();
                    if sender.blocking_send(line).is_err() || failed {
                        break;
                    }
                }
            })?;

        Ok(Self { lines })
    }

    /// The next line, or `None` once the reader hits end of input.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.recv().await.transpose()
    }
}
