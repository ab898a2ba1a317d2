//! Flat-file order log

use crate::core::OrderLog;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Appends order lines to a text file
///
/// The file is opened in append mode for every write and the whole line,
/// terminator included, goes out in one `write_all`. Concurrent requests rely
/// on the OS keeping such appends whole; their relative order is unspecified.
#[derive(Debug, Clone)]
pub struct FileOrderLog {
    path: PathBuf,
}

impl FileOrderLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OrderLog for FileOrderLog {
    async fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let record = format!("{}\n", line);
        file.write_all(record.as_bytes()).await?;
        file.flush().await
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
