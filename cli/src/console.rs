//! Human-readable output of a smoke run.
//!
//! Checks write through a [`Console`] instead of `println!` so tests can
//! capture the exact lines printed.

use std::io::{self, Stdout, Write};
use tracing::debug;

pub const SEPARATOR_WIDTH: usize = 60;

pub struct Console<W: Write> {
    out: W,
}

impl Console<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Console<Vec<u8>> {
    /// In-memory console, mostly for tests
    pub fn buffered() -> Self {
        Self::new(Vec::new())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one line. A broken stdout must not fail a check, so write
    /// errors are only logged.
    pub fn line(&mut self, text: impl AsRef<str>) {
        if let Err(e) = writeln!(self.out, "{}", text.as_ref()) {
            debug!("Failed to write console line: {}", e);
        }
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn separator(&mut self) {
        self.line("=".repeat(SEPARATOR_WIDTH));
    }

    /// Blank line followed by a separator, printed between checks
    pub fn section(&mut self) {
        self.blank();
        self.separator();
    }

    pub fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            debug!("Failed to flush console: {}", e);
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
