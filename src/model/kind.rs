//! The five hOCR hierarchy levels and their static registry.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};

/// A level of the hOCR hierarchy, ordered from outermost to innermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// `ocr_page`
    Page,
    /// `ocr_carea`
    Block,
    /// `ocr_par`
    Paragraph,
    /// `ocr_line`
    Line,
    /// `ocr_word` / `ocrx_word`
    Word,
}

/// Registry entry describing one kind.
#[derive(Debug)]
pub struct KindSpec {
    /// Relation name when requested as a single ancestor
    pub singular: &'static str,
    /// Relation name when requested as a descendant collection
    pub plural: &'static str,
    /// Pattern matched against each class token of an element
    pub pattern: &'static str,
    /// Kinds that may be requested as descendant collections
    pub descendants: &'static [Kind],
    /// Kinds that may be requested as a single enclosing ancestor
    pub ancestors: &'static [Kind],
    /// Where the kind's `text` field comes from
    pub text: TextSource,
    /// Whether `textangle`/`vertical` default to 0/false when absent
    pub orientation_defaults: bool,
}

/// Origin of a kind's `text` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// The kind has no text field
    None,
    /// The element's own text content, read at construction
    Element,
    /// Space-joined text of the descendant words, recomputed on every read
    Words,
}

static REGISTRY: [KindSpec; 5] = [
    KindSpec {
        singular: "page",
        plural: "pages",
        pattern: r"^ocr_page$",
        descendants: &[Kind::Block, Kind::Paragraph, Kind::Line, Kind::Word],
        ancestors: &[],
        text: TextSource::None,
        orientation_defaults: false,
    },
    KindSpec {
        singular: "block",
        plural: "blocks",
        pattern: r"^ocr_carea$",
        descendants: &[Kind::Paragraph, Kind::Line, Kind::Word],
        ancestors: &[Kind::Page],
        text: TextSource::None,
        orientation_defaults: false,
    },
    KindSpec {
        singular: "paragraph",
        plural: "paragraphs",
        pattern: r"^ocr_par$",
        descendants: &[Kind::Line, Kind::Word],
        ancestors: &[Kind::Page, Kind::Block],
        text: TextSource::None,
        orientation_defaults: false,
    },
    KindSpec {
        singular: "line",
        plural: "lines",
        pattern: r"^ocr_line$",
        descendants: &[Kind::Word],
        ancestors: &[Kind::Page, Kind::Block, Kind::Paragraph],
        text: TextSource::Words,
        orientation_defaults: true,
    },
    KindSpec {
        singular: "word",
        plural: "words",
        pattern: r"^ocrx?_word$",
        descendants: &[],
        ancestors: &[Kind::Page, Kind::Block, Kind::Paragraph, Kind::Line],
        text: TextSource::Element,
        orientation_defaults: false,
    },
];

static PATTERNS: Lazy<[Regex; 5]> =
    Lazy::new(|| std::array::from_fn(|i| Regex::new(REGISTRY[i].pattern).unwrap()));

impl Kind {
    /// All kinds, outermost first.
    pub const ALL: [Kind; 5] = [
        Kind::Page,
        Kind::Block,
        Kind::Paragraph,
        Kind::Line,
        Kind::Word,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Registry entry for this kind.
    pub fn spec(self) -> &'static KindSpec {
        &REGISTRY[self.index()]
    }

    /// Singular name (`"line"`).
    pub fn name(self) -> &'static str {
        self.spec().singular
    }

    /// Plural name (`"lines"`).
    pub fn plural(self) -> &'static str {
        self.spec().plural
    }

    /// Look up a kind by its plural relation name.
    pub fn from_plural(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.plural() == name)
    }

    /// Whether `other` may be requested as a descendant collection.
    pub fn has_descendant(self, other: Kind) -> bool {
        self.spec().descendants.contains(&other)
    }

    /// Whether `other` may be requested as an enclosing ancestor.
    pub fn has_ancestor(self, other: Kind) -> bool {
        self.spec().ancestors.contains(&other)
    }

    /// Relation names a node of this kind answers to.
    pub fn relation_names(self) -> Vec<&'static str> {
        let spec = self.spec();
        spec.ancestors
            .iter()
            .map(|k| k.name())
            .chain(spec.descendants.iter().map(|k| k.plural()))
            .collect()
    }

    /// Whether any class token of `element` marks it as this kind.
    pub fn matches(self, element: &ElementRef<'_>) -> bool {
        let pattern = &PATTERNS[self.index()];
        element.value().classes().any(|class| pattern.is_match(class))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first_span(html: &Html) -> ElementRef<'_> {
        let selector = Selector::parse("span").unwrap();
        html.select(&selector).next().unwrap()
    }

    #[test]
    fn test_registry_ranges_are_contiguous_and_exclusive() {
        for kind in Kind::ALL {
            let spec = kind.spec();
            assert!(!spec.descendants.contains(&kind));
            assert!(!spec.ancestors.contains(&kind));
            assert!(spec.descendants.iter().all(|d| *d > kind));
            assert!(spec.ancestors.iter().all(|a| *a < kind));
            assert_eq!(spec.descendants.len() + spec.ancestors.len(), 4);
        }
    }

    #[test]
    fn test_from_plural() {
        assert_eq!(Kind::from_plural("words"), Some(Kind::Word));
        assert_eq!(Kind::from_plural("paragraphs"), Some(Kind::Paragraph));
        assert_eq!(Kind::from_plural("word"), None);
    }

    #[test]
    fn test_word_pattern_accepts_both_markers() {
        let plain = Html::parse_fragment(r#"<span class="ocr_word">a</span>"#);
        let engine = Html::parse_fragment(r#"<span class="foo ocrx_word">a</span>"#);
        let other = Html::parse_fragment(r#"<span class="ocry_word">a</span>"#);
        assert!(Kind::Word.matches(&first_span(&plain)));
        assert!(Kind::Word.matches(&first_span(&engine)));
        assert!(!Kind::Word.matches(&first_span(&other)));
        assert!(!Kind::Line.matches(&first_span(&plain)));
    }

    #[test]
    fn test_line_pattern_is_exact() {
        let line = Html::parse_fragment(r#"<span class="ocr_line">a</span>"#);
        let caption = Html::parse_fragment(r#"<span class="ocr_line_caption">a</span>"#);
        assert!(Kind::Line.matches(&first_span(&line)));
        assert!(!Kind::Line.matches(&first_span(&caption)));
    }

    #[test]
    fn test_relation_names() {
        assert_eq!(
            Kind::Word.relation_names(),
            vec!["page", "block", "paragraph", "line"]
        );
        assert_eq!(
            Kind::Page.relation_names(),
            vec!["blocks", "paragraphs", "lines", "words"]
        );
    }
}
