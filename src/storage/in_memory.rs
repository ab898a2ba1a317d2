//! In-memory implementation of OrderLog for testing and development

use crate::core::OrderLog;
use async_trait::async_trait;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory order log
///
/// Keeps every appended line in a vector. Can be switched into a failing mode
/// to exercise the "unable to save" path.
#[derive(Clone, Default)]
pub struct InMemoryOrderLog {
    lines: Arc<RwLock<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryOrderLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log whose appends always fail
    pub fn failing() -> Self {
        let log = Self::new();
        log.set_failing(true);
        log
    }

    /// Make subsequent appends fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of every line appended so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl OrderLog for InMemoryOrderLog {
    async fn append(&self, line: &str) -> io::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io::Error::other("in-memory order log is set to fail"));
        }

        let mut lines = self
            .lines
            .write()
            .map_err(|e| io::Error::other(format!("Failed to acquire write lock: {}", e)))?;

        lines.push(line.to_string());

        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
