//! hOCR document parser using scraper.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use scraper::{ElementRef, Html};

use crate::error::{Error, ParseErrorKind, Result};
use crate::model::{Document, Kind, Metadata, Node};

/// hOCR document parser.
///
/// Owns the parsed markup tree; [`HocrParser::parse`] hands out a
/// [`Document`] borrowing from it.
pub struct HocrParser {
    html: Html,
}

impl HocrParser {
    /// Open an hOCR file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reading hOCR from {}", path.display());
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse hOCR from bytes. Invalid UTF-8 is replaced, not rejected.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_markup(&String::from_utf8_lossy(data))
    }

    /// Parse hOCR from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse hOCR from a markup string.
    pub fn from_markup(markup: &str) -> Result<Self> {
        if !markup.contains('<') {
            return Err(Error::Parse(ParseErrorKind::Empty));
        }

        Ok(Self {
            html: Html::parse_document(markup),
        })
    }

    /// Build the page list.
    ///
    /// Only the pages' own properties are decoded here; everything below
    /// page level is resolved on demand.
    pub fn parse(&self) -> Result<Document<'_>> {
        let pages = self
            .html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|e| Kind::Page.matches(e))
            .map(|e| Node::new(Kind::Page, e))
            .collect::<Result<Vec<_>>>()?;

        if pages.is_empty() {
            return Err(Error::Parse(ParseErrorKind::NoPages));
        }

        let metadata = self.extract_metadata();
        if let Some(declared) = metadata.number_of_pages {
            if declared as usize != pages.len() {
                log::warn!(
                    "ocr-number-of-pages declares {} pages but {} were found",
                    declared,
                    pages.len()
                );
            }
        }

        log::debug!("parsed {} pages", pages.len());
        Ok(Document::new(pages, metadata))
    }

    /// Extract `<title>` and `ocr-*` `<meta>` entries.
    fn extract_metadata(&self) -> Metadata {
        let mut metadata = Metadata::default();

        for element in self
            .html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
        {
            let value = element.value();
            match value.name() {
                "title" if metadata.title.is_none() => {
                    let title: String = element.text().collect();
                    let title = title.trim();
                    if !title.is_empty() {
                        metadata.title = Some(title.to_string());
                    }
                }
                "meta" => {
                    if let (Some(name), Some(content)) = (value.attr("name"), value.attr("content"))
                    {
                        metadata.set(name, content);
                    }
                }
                _ => {}
            }
        }

        metadata
    }

    /// The underlying markup tree.
    pub fn html(&self) -> &Html {
        &self.html
    }
}

impl FromStr for HocrParser {
    type Err = Error;

    fn from_str(markup: &str) -> Result<Self> {
        Self::from_markup(markup)
    }
}
