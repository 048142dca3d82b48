//! Plain text rendering.

use super::PageSelection;
use crate::error::Result;
use crate::model::document::page_text;
use crate::model::Document;

/// Text of the selected pages, one output line per hOCR line, pages
/// separated by a blank line.
pub fn to_text(doc: &Document<'_>, pages: &PageSelection) -> Result<String> {
    let mut texts = Vec::new();
    for (number, page) in doc.numbered_pages() {
        if pages.includes(number) {
            texts.push(page_text(page)?);
        }
    }

    Ok(texts.join("\n\n"))
}
