//! Bounding boxes in page-pixel space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ParseErrorKind, Result};

/// A rectangle in top-left-origin page-pixel space.
///
/// `right >= left` and `bottom >= top` are expected of well-formed input
/// but not enforced. Parsed edges are limited to the `i32` range, so
/// differences between them always fit in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub left: i64,
    /// Top edge
    pub top: i64,
    /// Right edge
    pub right: i64,
    /// Bottom edge
    pub bottom: i64,
}

impl BoundingBox {
    /// Create a bounding box from its four edges.
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Parse the hOCR `"left top right bottom"` form.
    ///
    /// Each edge must fit in an `i32`.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::Parse(ParseErrorKind::InvalidBBox(s.to_string()));

        let values = s
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<i32>()
                    .map(i64::from)
                    .map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>>>()?;

        match values[..] {
            [left, top, right, bottom] => Ok(Self::new(left, top, right, bottom)),
            _ => Err(invalid()),
        }
    }

    /// Width (`right - left`).
    pub fn width(&self) -> i64 {
        self.right.saturating_sub(self.left)
    }

    /// Height (`bottom - top`).
    pub fn height(&self) -> i64 {
        self.bottom.saturating_sub(self.top)
    }

    /// Area in square pixels.
    pub fn area(&self) -> i64 {
        self.width().saturating_mul(self.height())
    }

    /// Check whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Edges as a `(left, top, right, bottom)` tuple.
    pub fn as_tuple(&self) -> (i64, i64, i64, i64) {
        (self.left, self.top, self.right, self.bottom)
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}
