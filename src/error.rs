//! Error types for unhocr library.

use std::io;
use thiserror::Error;

use crate::model::Kind;

/// Result type alias for unhocr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during hOCR processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Document-level or bbox-level malformed input.
    #[error("hOCR parse error: {0}")]
    Parse(ParseErrorKind),

    /// A recognized packed property failed to parse as its declared type.
    #[error("Invalid value for property '{property}': {raw_value:?}")]
    AttributeParse {
        /// Property name as written in the title attribute
        property: String,
        /// The value that failed to parse
        raw_value: String,
    },

    /// A structural relation that must exist could not be found.
    #[error("Structural lookup error: {0}")]
    StructuralLookup(StructuralErrorKind),

    /// The requested name is neither a decoded property nor a valid relation.
    #[error("No such field or relation: '{name}'")]
    AttributeNotFound {
        /// The requested name
        name: String,
    },

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during serialization (CSV, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

/// Kinds of document-level parse failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input contains no markup at all.
    #[error("input contains no markup")]
    Empty,

    /// The markup contains no `ocr_page` element.
    #[error("document contains no ocr_page elements")]
    NoPages,

    /// A bbox value is not exactly four integers.
    #[error("invalid bbox {0:?}")]
    InvalidBBox(String),
}

/// Kinds of structural lookup failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralErrorKind {
    /// No enclosing element of the requested ancestor kind exists.
    #[error("{node} has no enclosing {ancestor}")]
    MissingAncestor {
        /// Kind of the node the lookup started from
        node: Kind,
        /// Kind that was requested
        ancestor: Kind,
    },
}

impl Error {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Error::AttributeNotFound { name: name.into() }
    }

    pub(crate) fn attribute(property: &str, raw_value: &str) -> Self {
        Error::AttributeParse {
            property: property.to_string(),
            raw_value: raw_value.to_string(),
        }
    }

    /// True when the error means the input document is malformed.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::Parse(_) | Error::AttributeParse { .. } | Error::StructuralLookup(_)
        )
    }

    /// True when a requested field or relation does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::AttributeNotFound { .. })
    }
}

impl From<ParseErrorKind> for Error {
    fn from(kind: ParseErrorKind) -> Self {
        Error::Parse(kind)
    }
}

impl From<StructuralErrorKind> for Error {
    fn from(kind: StructuralErrorKind) -> Self {
        Error::StructuralLookup(kind)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Render(format!("CSV serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Parse(ParseErrorKind::Empty);
        assert_eq!(err.to_string(), "hOCR parse error: input contains no markup");

        let err = Error::not_found("shjgioda");
        assert_eq!(err.to_string(), "No such field or relation: 'shjgioda'");

        let err = Error::from(StructuralErrorKind::MissingAncestor {
            node: Kind::Word,
            ancestor: Kind::Block,
        });
        assert_eq!(
            err.to_string(),
            "Structural lookup error: word has no enclosing block"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::Parse(ParseErrorKind::NoPages).is_malformed_input());
        assert!(Error::attribute("x_wconf", "high").is_malformed_input());
        assert!(!Error::not_found("foo").is_malformed_input());
        assert!(Error::not_found("foo").is_not_found());
        assert!(!Error::Render("x".into()).is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
