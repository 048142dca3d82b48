//! Export options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for exporting word records.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Page selection (1-indexed)
    pub pages: PageSelection,

    /// Output format
    pub format: OutputFormat,

    /// JSON layout, used when `format` is JSON
    pub json_format: JsonFormat,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, json_format: JsonFormat) -> Self {
        self.json_format = json_format;
        self
    }

    /// Pretty-print JSON output.
    pub fn pretty(mut self) -> Self {
        self.json_format = JsonFormat::Pretty;
        self
    }
}

/// Serialization format for word records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// CSV with a fixed header row
    #[default]
    Csv,
    /// JSON array of record objects
    Json,
}

impl OutputFormat {
    /// Parse a format name (`"csv"` or `"json"`, any case).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// JSON output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Compact JSON without extra whitespace
    #[default]
    Compact,
    /// Pretty-printed JSON with indentation
    Pretty,
}

/// Page selection for export.
///
/// Ranges are kept as ranges, so an open-ended spec such as
/// `"1-4294967295"` costs no more than `"1-2"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Export all pages
    #[default]
    All,
    /// Export pages in any of these inclusive ranges (1-indexed)
    Pages(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Pages(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Parse a page selection string (e.g., `"all"`, `"2"`, `"1,3,5-7"`).
    ///
    /// Ranges are inclusive; a range whose end precedes its start selects
    /// nothing.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let range = if let Some((start, end)) = part.split_once('-') {
                parse_page_number(start, s)?..=parse_page_number(end, s)?
            } else {
                let page = parse_page_number(part, s)?;
                page..=page
            };
            if !range.is_empty() {
                ranges.push(range);
            }
        }

        Ok(PageSelection::Pages(ranges))
    }

    /// Union of several page specs, as given by repeated `--pages` values.
    pub fn from_specs<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection: Option<PageSelection> = None;
        for spec in specs {
            let parsed = Self::parse(spec.as_ref())?;
            selection = Some(match selection {
                Some(current) => current.union(parsed),
                None => parsed,
            });
        }
        Ok(selection.unwrap_or_default())
    }

    /// Combine two selections.
    pub fn union(self, other: PageSelection) -> PageSelection {
        match (self, other) {
            (PageSelection::Pages(mut a), PageSelection::Pages(b)) => {
                a.extend(b);
                PageSelection::Pages(a)
            }
            _ => PageSelection::All,
        }
    }

    /// Whether no page can match.
    pub fn is_empty(&self) -> bool {
        matches!(self, PageSelection::Pages(ranges) if ranges.is_empty())
    }
}

impl FromIterator<u32> for PageSelection {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        PageSelection::Pages(iter.into_iter().map(|page| page..=page).collect())
    }
}

fn parse_page_number(token: &str, spec: &str) -> Result<u32> {
    token
        .trim()
        .parse()
        .map_err(|_| Error::InvalidPageRange(spec.to_string()))
}
