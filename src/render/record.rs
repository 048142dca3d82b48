//! Flattening pages into per-word records.
//!
//! hOCR measures from the *top* of the page; records use a bottom-left
//! origin, so `y0 = H - bottom` and `y1 = H - top` for a page of height `H`.

use serde::{Deserialize, Serialize};

use super::PageSelection;
use crate::error::Result;
use crate::model::{Document, Node};

/// Record column names, in output order.
pub const FIELDNAMES: [&str; 11] = [
    "pageid",
    "page_dim",
    "text",
    "object_type",
    "height",
    "width",
    "x0",
    "x1",
    "y0",
    "y1",
    "lang",
];

/// Object type written for every word record.
pub const WORD_OBJECT_TYPE: &str = "word";

/// One exported word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    /// 1-based page number
    pub pageid: u32,
    /// Page dimensions as `"{width}x{height}"`
    pub page_dim: String,
    /// Word text
    pub text: String,
    /// Always `"word"`
    pub object_type: String,
    /// Word bbox height
    pub height: i64,
    /// Word bbox width
    pub width: i64,
    /// Left edge
    pub x0: i64,
    /// Right edge
    pub x1: i64,
    /// Bottom edge, measured from the page bottom
    pub y0: i64,
    /// Top edge, measured from the page bottom
    pub y1: i64,
    /// Word language, empty when unknown
    pub lang: String,
}

/// Records for every word of `page`, in document order.
pub fn page_records(page: &Node<'_>, pageid: u32) -> Result<Vec<WordRecord>> {
    let page_box = page.require_bbox()?;
    let page_height = page_box.height();
    let page_dim = format!("{}x{}", page_box.width(), page_height);

    page.words()?
        .iter()
        .map(|word| {
            let bbox = word.require_bbox()?;
            let (text, lang) = match word.word_info() {
                Some(info) => (info.text.clone(), info.lang.clone()),
                None => (word.text()?.into_owned(), String::new()),
            };

            Ok(WordRecord {
                pageid,
                page_dim: page_dim.clone(),
                text,
                object_type: WORD_OBJECT_TYPE.to_string(),
                height: bbox.height(),
                width: bbox.width(),
                x0: bbox.left,
                x1: bbox.right,
                y0: page_height - bbox.bottom,
                y1: page_height - bbox.top,
                lang,
            })
        })
        .collect()
}

/// Records for every word of the selected pages.
///
/// Page numbers in `pages` beyond the document are ignored. Any error on
/// any page aborts the whole export.
pub fn export(doc: &Document<'_>, pages: &PageSelection) -> Result<Vec<WordRecord>> {
    export_pages(doc, pages, |_, _| {})
}

/// Like [`export`], calling `on_page` with each selected page's number and
/// records as soon as the page is done.
pub fn export_pages<F>(
    doc: &Document<'_>,
    pages: &PageSelection,
    mut on_page: F,
) -> Result<Vec<WordRecord>>
where
    F: FnMut(u32, &[WordRecord]),
{
    let mut records = Vec::new();

    for (number, page) in doc.numbered_pages() {
        if !pages.includes(number) {
            continue;
        }
        log::debug!("processing page {}", number);
        let page_records = page_records(page, number)?;
        on_page(number, &page_records);
        records.extend(page_records);
    }

    Ok(records)
}
