//! Plain file adapter: one append per message.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::debug;

use greeter_core::application::{ApplicationError, ApplicationResult, ports::OutputSink};

use super::LINE_ENDING;

/// Appends each message, plus a line terminator, to a file.
///
/// Every `send` opens, writes and flushes the file. Simplest durability,
/// highest per-call latency.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    name: String,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Create the parent directory of `path` if it has one.
pub(crate) async fn ensure_parent(sink: &str, path: &Path) -> ApplicationResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ApplicationError::io(sink, "create parent directory", &e)),
        _ => Ok(()),
    }
}

#[async_trait]
impl OutputSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: &str) -> ApplicationResult<()> {
        ensure_parent(&self.name, &self.path).await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| ApplicationError::io(&self.name, "open", &e))?;

        let line = format!("{message}{LINE_ENDING}");
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| ApplicationError::io(&self.name, "write", &e))?;
        file.flush()
            .await
            .map_err(|e| ApplicationError::io(&self.name, "flush", &e))?;

        debug!(path = %self.path.display(), bytes = line.len(), "Appended to file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeter_core::application::OutputErrorKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn appends_with_line_terminator() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("greeting.txt");
        let sink = FileSink::new(&path);

        sink.send("first").await.unwrap();
        sink.send("second").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("first{LINE_ENDING}second{LINE_ENDING}"));
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("out.txt");
        let sink = FileSink::new(&path);

        sink.send("nested").await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn preserves_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, format!("old{LINE_ENDING}")).unwrap();

        FileSink::new(&path).send("new").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("old{LINE_ENDING}new{LINE_ENDING}"));
    }

    #[tokio::test]
    async fn directory_as_target_is_an_output_error() {
        let dir = TempDir::new().unwrap();
        let sink = FileSink::new(dir.path());

        let err = sink.send("x").await.unwrap_err();
        match err {
            ApplicationError::Output { sink, kind, .. } => {
                assert!(sink.starts_with("file:"));
                assert_ne!(kind, OutputErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
