use std::fs::File;
use std::io::Write;
use std::path::Path;
use log::warn;
use crate::error::Result;
use crate::matcher::{CloseCall, GroupingObserver};

const FLUSH_AT: usize = 64 * 1024;

/// Buffered line log for close calls that need a human look.
pub struct ReviewLogger {
    file: Option<File>,
    buffer: Vec<u8>,
    entries: usize,
}

impl ReviewLogger {
    /// A logger that only counts entries.
    pub fn new() -> Self {
        ReviewLogger {
            file: None,
            buffer: Vec::with_capacity(FLUSH_AT),
            entries: 0,
        }
    }

    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(ReviewLogger {
            file: Some(File::create(path)?),
            buffer: Vec::with_capacity(FLUSH_AT),
            entries: 0,
        })
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn log(&mut self, message: &str) -> Result<()> {
        self.entries += 1;
        if let Some(ref mut file) = self.file {
            self.buffer.extend_from_slice(message.as_bytes());
            self.buffer.push(b'\n');

            if self.buffer.len() >= FLUSH_AT {
                file.write_all(&self.buffer)?;
                file.flush()?;
                self.buffer.clear();
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            if !self.buffer.is_empty() {
                file.write_all(&self.buffer)?;
                file.flush()?;
                self.buffer.clear();
            }
        }
        Ok(())
    }
}

impl Default for ReviewLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupingObserver for ReviewLogger {
    fn on_close_call(&mut self, event: &CloseCall) {
        if let Err(e) = self.log(&event.to_string()) {
            warn!("Failed to record close call {} / {}: {}", event.raw_key, event.representative, e);
        }
    }
}

impl Drop for ReviewLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!("Failed to flush review log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Verdict;

    #[test]
    fn close_calls_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("close_calls.log");
        {
            let mut logger = ReviewLogger::with_file(&path).unwrap();
            logger.on_close_call(&CloseCall {
                raw_key: "acmeinc".into(),
                representative: "acme".into(),
                raw_attributes: vec!["x".into()],
                representative_attributes: vec!["y".into()],
                score: 0.7272,
                verdict: Verdict::Similar,
            });
            assert_eq!(logger.entries(), 1);
            logger.flush().unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("similar - close call, score = 0.7272"));
        assert!(text.contains("acmeinc"));
        assert_eq!(text.lines().count(), 1);
    }
}
