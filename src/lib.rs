//! # unhocr
//!
//! hOCR document model and word-level exporter for Rust.
//!
//! This library parses hOCR markup (the HTML dialect OCR engines such as
//! Tesseract emit) into a page, block, paragraph, line and word hierarchy,
//! and flattens it into per-word records for CSV or JSON output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unhocr::{HocrParser, render};
//!
//! fn main() -> unhocr::Result<()> {
//!     let parser = HocrParser::open("scan.hocr")?;
//!     let doc = parser.parse()?;
//!
//!     for page in doc.pages() {
//!         for word in page.words()? {
//!             println!("{} {:?}", word.text()?, word.bbox());
//!         }
//!     }
//!
//!     let records = render::export(&doc, &render::PageSelection::All)?;
//!     println!("{}", render::to_csv(&records)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lazy hierarchy**: relations between levels are resolved on first
//!   access and cached per node
//! - **Packed properties**: `bbox`, `x_wconf`, `textangle`, `baseline` and
//!   friends decoded from the `title` attribute
//! - **Word export**: CSV or JSON records with a bottom-left origin
//! - **Page selection**: `"1,3,5-7"` style page specs

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, ParseErrorKind, Result, StructuralErrorKind};
pub use model::{
    resolve, Baseline, BoundingBox, Document, Kind, Metadata, Node, Properties, ScanResolution,
    Value, WordInfo,
};
pub use parser::HocrParser;
pub use render::{
    ExportOptions, ExportResult, ExportStats, JsonFormat, OutputFormat, PageSelection, WordRecord,
};

use std::path::Path;

/// Export the word records of an hOCR file.
///
/// # Example
///
/// ```no_run
/// use unhocr::{export_file, PageSelection};
///
/// let records = export_file("scan.hocr", &PageSelection::parse("2-3").unwrap()).unwrap();
/// println!("{} words", records.len());
/// ```
pub fn export_file<P: AsRef<Path>>(path: P, pages: &PageSelection) -> Result<Vec<WordRecord>> {
    let parser = HocrParser::open(path)?;
    let doc = parser.parse()?;
    render::export(&doc, pages)
}

/// Export the word records of hOCR markup.
pub fn export_str(markup: &str, pages: &PageSelection) -> Result<Vec<WordRecord>> {
    let parser = HocrParser::from_markup(markup)?;
    let doc = parser.parse()?;
    render::export(&doc, pages)
}

/// Extract plain text from an hOCR file.
///
/// # Example
///
/// ```no_run
/// use unhocr::extract_text;
///
/// let text = extract_text("scan.hocr").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let parser = HocrParser::open(path)?;
    let doc = parser.parse()?;
    doc.plain_text()
}

/// Convert an hOCR file to CSV word records.
///
/// # Example
///
/// ```no_run
/// use unhocr::to_csv;
///
/// let csv = to_csv("scan.hocr").unwrap();
/// std::fs::write("words.csv", csv).unwrap();
/// ```
pub fn to_csv<P: AsRef<Path>>(path: P) -> Result<String> {
    let records = export_file(path, &PageSelection::All)?;
    render::to_csv(&records)
}

/// Convert an hOCR file to JSON word records.
///
/// # Example
///
/// ```no_run
/// use unhocr::{to_json, JsonFormat};
///
/// let json = to_json("scan.hocr", JsonFormat::Pretty).unwrap();
/// std::fs::write("words.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let records = export_file(path, &PageSelection::All)?;
    render::to_json(&records, format)
}

/// Builder for parsing and exporting hOCR documents.
///
/// # Example
///
/// ```no_run
/// use unhocr::{OutputFormat, PageSelection, Unhocr};
///
/// let result = Unhocr::new()
///     .with_pages(PageSelection::parse("2-3")?)
///     .with_format(OutputFormat::Json)
///     .pretty()
///     .convert_file("scan.hocr")?;
/// std::fs::write("words.json", &result.content)?;
/// println!("{} words", result.stats.word_count);
/// # Ok::<(), unhocr::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unhocr {
    options: ExportOptions,
}

impl Unhocr {
    /// Create a new Unhocr builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.options = self.options.with_format(format);
        self
    }

    /// Pretty-print JSON output.
    pub fn pretty(mut self) -> Self {
        self.options = self.options.pretty();
        self
    }

    /// The accumulated export options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Parse an hOCR file and serialize its word records.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<ExportResult> {
        let parser = HocrParser::open(path)?;
        self.convert(&parser)
    }

    /// Parse hOCR bytes and serialize their word records.
    pub fn convert_bytes(&self, data: &[u8]) -> Result<ExportResult> {
        let parser = HocrParser::from_bytes(data)?;
        self.convert(&parser)
    }

    /// Parse hOCR markup and serialize its word records.
    pub fn convert_str(&self, markup: &str) -> Result<ExportResult> {
        let parser = HocrParser::from_markup(markup)?;
        self.convert(&parser)
    }

    fn convert(&self, parser: &HocrParser) -> Result<ExportResult> {
        let doc = parser.parse()?;
        let mut stats = ExportStats::new(doc.page_count());
        let records = render::export_pages(&doc, &self.options.pages, |_, page_records| {
            stats.add_page(page_records)
        })?;

        let content = render::render(&records, &self.options)?;
        Ok(ExportResult::new(content, doc.metadata().clone(), stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PAGES: &str = r#"<html><body>
        <div class="ocr_page" title="bbox 0 0 500 1000">
          <span class="ocr_line" title="bbox 10 10 200 40">
            <span class="ocrx_word" lang="eng" title="bbox 10 10 90 40">alpha</span>
            <span class="ocrx_word" lang="eng" title="bbox 100 10 200 40">beta</span>
          </span>
        </div>
        <div class="ocr_page" title="bbox 0 0 500 1000">
          <span class="ocr_line" title="bbox 10 10 90 40">
            <span class="ocrx_word" title="bbox 10 10 90 40">gamma</span>
          </span>
        </div>
    </body></html>"#;

    #[test]
    fn test_unhocr_builder_default() {
        let builder = Unhocr::default();
        assert_eq!(builder.options().format, OutputFormat::Csv);
        assert_eq!(builder.options().pages, PageSelection::All);
    }

    #[test]
    fn test_unhocr_builder_chained() {
        let builder = Unhocr::new()
            .with_pages([2].into_iter().collect())
            .with_format(OutputFormat::Json)
            .pretty();

        assert_eq!(builder.options().format, OutputFormat::Json);
        assert_eq!(builder.options().json_format, JsonFormat::Pretty);
        assert!(!builder.options().pages.includes(1));
    }

    #[test]
    fn test_convert_str_csv() {
        let result = Unhocr::new().convert_str(TWO_PAGES).unwrap();
        assert_eq!(result.stats.page_count, 2);
        assert_eq!(result.stats.exported_pages, 2);
        assert_eq!(result.stats.word_count, 3);
        assert_eq!(result.stats.untagged_words, 1);
        assert_eq!(result.content.lines().count(), 4);
    }

    #[test]
    fn test_convert_str_selected_json() {
        let result = Unhocr::new()
            .with_pages([2].into_iter().collect())
            .with_format(OutputFormat::Json)
            .convert_str(TWO_PAGES)
            .unwrap();

        let records: Vec<WordRecord> = serde_json::from_str(&result.content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "gamma");
        assert_eq!(records[0].pageid, 2);
        assert_eq!(records[0].y0, 960);
        assert_eq!(records[0].y1, 990);
    }

    #[test]
    fn test_convert_empty_input() {
        let result = Unhocr::new().convert_bytes(b"");
        assert!(matches!(result, Err(Error::Parse(ParseErrorKind::Empty))));
    }

    #[test]
    fn test_export_str() {
        let records = export_str(TWO_PAGES, &PageSelection::parse("1").unwrap()).unwrap();
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha", "beta"]);
    }
}
