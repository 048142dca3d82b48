//! Document model for hOCR content.
//!
//! A [`Document`] is an ordered list of page [`Node`]s. Blocks,
//! paragraphs, lines and words are materialized lazily from the markup
//! tree the first time a relation naming them is requested.

mod bbox;
pub(crate) mod document;
mod kind;
mod node;
mod properties;

pub use bbox::BoundingBox;
pub use document::{Document, Metadata};
pub use kind::{Kind, KindSpec, TextSource};
pub use node::{resolve, Node, Value, WordInfo};
pub use properties::{Baseline, Properties, ScanResolution};
