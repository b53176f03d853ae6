//! Destinations for finished documents

use crate::Result;
use async_trait::async_trait;
use cv_template::RenderedDocument;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn save(&self, document: &RenderedDocument) -> Result<()>;
}

/// Writes documents into a folder, creating it on first use
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DocumentSink for FileSink {
    async fn save(&self, document: &RenderedDocument) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(&document.file_name);
        tokio::fs::write(&path, &document.bytes).await?;
        log::info!("saved {}", path.display());
        Ok(())
    }
}

/// Keeps documents in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Mutex<Vec<RenderedDocument>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> Vec<RenderedDocument> {
        self.documents.lock().clone()
    }

    pub fn file_names(&self) -> Vec<String> {
        self.documents
            .lock()
            .iter()
            .map(|d| d.file_name.clone())
            .collect()
    }

    pub fn take(&self) -> Vec<RenderedDocument> {
        std::mem::take(&mut *self.documents.lock())
    }
}

#[async_trait]
impl DocumentSink for MemorySink {
    async fn save(&self, document: &RenderedDocument) -> Result<()> {
        self.documents.lock().push(document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_template::Office;
    use pretty_assertions::assert_eq;

    fn document(name: &str) -> RenderedDocument {
        RenderedDocument {
            office: Office::Alnoor,
            file_name: name.to_string(),
            bytes: b"%PDF-1.5".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_file_sink_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("nested/output"));
        sink.save(&document("TK-1_A_ALNOOR.pdf")).await.unwrap();

        let written = std::fs::read(sink.dir().join("TK-1_A_ALNOOR.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.5".to_vec());
    }

    #[tokio::test]
    async fn test_memory_sink() {
        let sink = MemorySink::new();
        sink.save(&document("a.pdf")).await.unwrap();
        sink.save(&document("b.pdf")).await.unwrap();
        assert_eq!(sink.file_names(), vec!["a.pdf", "b.pdf"]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.documents().is_empty());
    }
}
