//! Document intake: extract, store, analyze, persist

use bytes::Bytes;
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::DocumentAnalyzer;
use crate::error::Result;
use crate::providers::{ObjectStoreProvider, ResourceType};
use crate::storage::RecordStore;
use crate::types::Document;

use super::blob::{store_with_fallback, DOCUMENT_PREFIX};
use super::extractor::{ContentKind, TextExtractor};

/// An uploaded government document awaiting processing
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub title: String,
    pub document_type: String,
    /// Declared content type of the file part
    pub content_type: String,
    pub data: Bytes,
}

/// Runs one upload through every stage and persists the result
pub struct IntakePipeline {
    analyzer: DocumentAnalyzer,
    object_store: Option<Arc<dyn ObjectStoreProvider>>,
    store: RecordStore,
}

impl IntakePipeline {
    pub fn new(
        analyzer: DocumentAnalyzer,
        object_store: Option<Arc<dyn ObjectStoreProvider>>,
        store: RecordStore,
    ) -> Self {
        Self {
            analyzer,
            object_store,
            store,
        }
    }

    /// Process an upload into a stored [`Document`].
    ///
    /// Only an unsupported content type or a persistence failure is an
    /// error. Extraction, object store and analysis failures degrade to
    /// placeholder values.
    pub async fn process(&self, upload: DocumentUpload) -> Result<Document> {
        let start = Instant::now();
        let DocumentUpload {
            title,
            document_type,
            content_type,
            data,
        } = upload;

        tracing::info!(
            "Processing upload '{}' ({}, {} bytes)",
            title,
            content_type,
            data.len()
        );

        let kind = TextExtractor::classify(&content_type)?;
        let original_content = extract_off_thread(kind, data.clone(), TextExtractor::extract).await;

        let file = store_with_fallback(
            self.object_store.as_deref(),
            DOCUMENT_PREFIX,
            &data,
            ResourceType::Raw,
        )
        .await;

        let analysis = self
            .analyzer
            .analyze(&title, &original_content)
            .await
            .into_analysis();

        let document = Document::new(title, document_type, original_content, analysis, file);
        self.store.insert(&document)?;

        tracing::info!(
            "Stored document {} '{}' in {:?} (remote copy: {})",
            document.id,
            document.title,
            start.elapsed(),
            document.file.is_remote()
        );

        Ok(document)
    }
}

/// Run a CPU-bound extraction on the blocking pool. A worker that panics
/// degrades to the kind's failure text like any other parse failure.
async fn extract_off_thread<F>(kind: ContentKind, data: Bytes, extract: F) -> String
where
    F: FnOnce(&[u8], ContentKind) -> String + Send + 'static,
{
    let worker_data = data.clone();
    match tokio::task::spawn_blocking(move || extract(&worker_data, kind)).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("{} extraction task failed: {}", kind.display_name(), e);
            match kind.failure_sentinel() {
                Some(sentinel) => sentinel.to_string(),
                None => String::from_utf8_lossy(&data).into_owned(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::{DOCX_EXTRACTION_FAILED, PDF_EXTRACTION_FAILED};

    fn panicking_extract(_: &[u8], _: ContentKind) -> String {
        panic!("parser blew up")
    }

    #[tokio::test]
    async fn test_panicking_extraction_uses_sentinel() {
        let data = Bytes::from_static(b"%PDF-1.4 truncated");

        let pdf = extract_off_thread(ContentKind::Pdf, data.clone(), panicking_extract).await;
        assert_eq!(pdf, PDF_EXTRACTION_FAILED);

        let docx =
            extract_off_thread(ContentKind::WordProcessor, data.clone(), panicking_extract).await;
        assert_eq!(docx, DOCX_EXTRACTION_FAILED);

        let text = extract_off_thread(ContentKind::Text, data, panicking_extract).await;
        assert_eq!(text, "%PDF-1.4 truncated");
    }

    #[tokio::test]
    async fn test_extraction_runs_supplied_parser() {
        let data = Bytes::from_static(b"Notice of public hearing");
        let text = extract_off_thread(ContentKind::Text, data, TextExtractor::extract).await;
        assert_eq!(text, "Notice of public hearing");
    }
}
