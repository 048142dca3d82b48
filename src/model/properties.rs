//! Decoding of the packed hOCR `title` property string.
//!
//! hOCR packs per-element metrics into one attribute as `;`-separated
//! `name value...` entries:
//!
//! ```text
//! bbox 2216 1049 2449 1098; x_wconf 91
//! ```
//!
//! Unrecognized names are skipped so newer engines stay readable. A
//! recognized name whose value does not parse is an error.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::BoundingBox;
use crate::error::{Error, Result};

/// Decoded property bag of one hOCR element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    /// `bbox`
    pub bbox: Option<BoundingBox>,

    /// `image`, with surrounding quotes stripped
    pub image: Option<String>,

    /// `x_wconf`, recognition confidence (typically 0-100)
    pub wconf: Option<i64>,

    /// `textangle`, rotation in degrees
    pub textangle: Option<i64>,

    /// `x_size`, font-size metric
    pub size: Option<f64>,

    /// `x_ascenders`
    pub ascenders: Option<f64>,

    /// `x_descenders`
    pub descenders: Option<f64>,

    /// `ppageno`, physical page number
    pub ppageno: Option<i64>,

    /// `baseline`
    pub baseline: Option<Baseline>,

    /// `scan_res`
    pub scan_res: Option<ScanResolution>,
}

/// Text baseline as a slope and a vertical offset from the bbox bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Slope of the baseline
    pub slope: f64,
    /// Offset from the bottom of the bounding box
    pub offset: f64,
}

/// Scan resolution in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResolution {
    /// Horizontal DPI
    pub x: u32,
    /// Vertical DPI
    pub y: u32,
}

impl Properties {
    /// Decode a packed property string.
    pub fn decode(packed: &str) -> Result<Self> {
        let mut props = Properties::default();

        for entry in packed.split(';') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (name, value) = match entry.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (entry, ""),
            };

            match name {
                "bbox" => props.bbox = Some(BoundingBox::parse(value)?),
                "image" => {
                    props.image = Some(value.trim_matches(|c: char| c == '"' || c == ' ').to_string())
                }
                "x_wconf" => props.wconf = Some(parse_value(name, value)?),
                "textangle" => props.textangle = Some(parse_value(name, value)?),
                "x_size" => props.size = Some(parse_value(name, value)?),
                "x_ascenders" => props.ascenders = Some(parse_value(name, value)?),
                "x_descenders" => props.descenders = Some(parse_value(name, value)?),
                "ppageno" => props.ppageno = Some(parse_value(name, value)?),
                "baseline" => {
                    let [slope, offset] = parse_pair(name, value)?;
                    props.baseline = Some(Baseline { slope, offset });
                }
                "scan_res" => {
                    let [x, y] = parse_pair(name, value)?;
                    props.scan_res = Some(ScanResolution { x, y });
                }
                _ => log::trace!("ignoring unrecognized hOCR property '{}'", name),
            }
        }

        Ok(props)
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::attribute(name, value))
}

fn parse_pair<T: FromStr>(name: &str, value: &str) -> Result<[T; 2]> {
    let mut tokens = value.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(a), Some(b), None) => Ok([parse_value(name, a)?, parse_value(name, b)?]),
        _ => Err(Error::attribute(name, value)),
    }
}
