//! Export result with metadata and statistics.

use serde::{Deserialize, Serialize};

use super::record::WordRecord;
use crate::model::Metadata;

/// Result of exporting a document: the serialized records plus statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    /// The serialized output (CSV or JSON)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Export statistics
    pub stats: ExportStats,
}

impl ExportResult {
    /// Create a new export result.
    pub fn new(content: String, metadata: Metadata, stats: ExportStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected during export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    /// Pages in the source document
    pub page_count: u32,

    /// Pages that matched the selection
    pub exported_pages: u32,

    /// Word records written
    pub word_count: u32,

    /// Words without a language tag
    pub untagged_words: u32,
}

impl ExportStats {
    /// Create new empty statistics.
    pub fn new(page_count: u32) -> Self {
        Self {
            page_count,
            ..Default::default()
        }
    }

    /// Count one exported page and its records.
    pub fn add_page(&mut self, records: &[WordRecord]) {
        self.exported_pages += 1;
        self.word_count += records.len() as u32;
        self.untagged_words += records.iter().filter(|r| r.lang.is_empty()).count() as u32;
    }
}
