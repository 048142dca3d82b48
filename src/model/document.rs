//! Document-level types.

use serde::{Deserialize, Serialize};

use super::Node;
use crate::error::Result;

/// A parsed hOCR document: its pages in source order.
///
/// Pages are stored 0-indexed; the page accessors taking a page number
/// are 1-based.
#[derive(Debug)]
pub struct Document<'a> {
    pages: Vec<Node<'a>>,
    metadata: Metadata,
}

impl<'a> Document<'a> {
    pub(crate) fn new(pages: Vec<Node<'a>>, metadata: Metadata) -> Self {
        Self { pages, metadata }
    }

    /// Pages in document order.
    pub fn pages(&self) -> &[Node<'a>] {
        &self.pages
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Node<'a>> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Pages paired with their 1-based page numbers.
    pub fn numbered_pages(&self) -> impl Iterator<Item = (u32, &Node<'a>)> + '_ {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, page)| (i as u32 + 1, page))
    }

    /// Document metadata from the markup head.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Total number of words across all pages.
    pub fn word_count(&self) -> Result<usize> {
        self.pages
            .iter()
            .try_fold(0, |acc, page| -> Result<usize> {
                Ok(acc + page.words()?.len())
            })
    }

    /// Plain text of the whole document: one line of text per hOCR line,
    /// pages separated by a blank line.
    pub fn plain_text(&self) -> Result<String> {
        let pages = self
            .pages
            .iter()
            .map(page_text)
            .collect::<Result<Vec<_>>>()?;
        Ok(pages.join("\n\n"))
    }
}

pub(crate) fn page_text(page: &Node<'_>) -> Result<String> {
    let lines = page
        .lines()?
        .iter()
        .map(|line| line.text().map(|text| text.into_owned()))
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

/// Document metadata taken from `<title>` and the `ocr-*` meta entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// `ocr-system`, the producing engine
    pub ocr_system: Option<String>,

    /// `ocr-capabilities`, the hOCR features the engine emits
    pub capabilities: Vec<String>,

    /// `ocr-number-of-pages`
    pub number_of_pages: Option<u32>,

    /// `ocr-langs`
    pub langs: Vec<String>,

    /// `ocr-scripts`
    pub scripts: Vec<String>,
}

impl Metadata {
    /// Record one `<meta name=... content=...>` entry.
    ///
    /// Unknown names are ignored; an unparseable `ocr-number-of-pages` is
    /// dropped since it is informational only.
    pub fn set(&mut self, name: &str, content: &str) {
        let content = content.trim();
        let list = || -> Vec<String> { content.split_whitespace().map(String::from).collect() };
        match name {
            "ocr-system" => self.ocr_system = Some(content.to_string()),
            "ocr-capabilities" => self.capabilities = list(),
            "ocr-number-of-pages" => self.number_of_pages = content.parse().ok(),
            "ocr-langs" => self.langs = list(),
            "ocr-scripts" => self.scripts = list(),
            _ => {}
        }
    }

    /// Whether the engine declares support for an hOCR capability.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}
