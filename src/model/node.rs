//! Hierarchy nodes and the lazy relation resolver.
//!
//! Every hOCR level is represented by the same [`Node`] type. What differs
//! between a page and a word is data from the kind registry: which
//! relations may be asked for and where the `text` field comes from.
//!
//! Relations are resolved on first request against the markup tree and
//! memoized on the node that asked:
//!
//! - a plural name (`"words"`) scans all descendant elements, in document
//!   order, whose class marks the requested kind;
//! - a singular name (`"block"`) walks strictly upward to the nearest
//!   enclosing element of that kind.
//!
//! ```
//! use unhocr::{resolve, HocrParser};
//!
//! let parser = HocrParser::from_markup(
//!     r#"<div class="ocr_page" title="bbox 0 0 100 100">
//!          <span class="ocr_line" title="bbox 0 0 50 10">
//!            <span class="ocrx_word" title="bbox 0 0 20 10">Hello</span>
//!            <span class="ocrx_word" title="bbox 25 0 50 10">world</span>
//!          </span>
//!        </div>"#,
//! )?;
//! let doc = parser.parse()?;
//! let line = &doc.pages()[0].lines()?[0];
//! assert_eq!(resolve(line, "text")?.as_str(), Some("Hello world"));
//! assert!(resolve(line, "shjgioda").unwrap_err().is_not_found());
//! # Ok::<(), unhocr::Error>(())
//! ```

use std::borrow::Cow;
use std::fmt;

use once_cell::unsync::OnceCell;
use scraper::ElementRef;

use super::kind::TextSource;
use super::{BoundingBox, Kind, Properties};
use crate::error::{Error, Result, StructuralErrorKind};

const BOLD_TAGS: &[&str] = &["strong", "b"];
const ITALIC_TAGS: &[&str] = &["em", "i"];

/// One hOCR element of any kind, with lazily resolved relations.
pub struct Node<'a> {
    kind: Kind,
    element: ElementRef<'a>,
    properties: Properties,
    word: Option<WordInfo>,
    descendants: [OnceCell<Vec<Node<'a>>>; 5],
    ancestors: [OnceCell<Box<Node<'a>>>; 5],
}

/// Fields a word reads from its own markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordInfo {
    /// Text content of the word element
    pub text: String,
    /// `lang` attribute, empty when absent
    pub lang: String,
    /// Is or wraps a `<strong>`/`<b>` element
    pub bold: bool,
    /// Is or wraps an `<em>`/`<i>` element
    pub italic: bool,
}

impl WordInfo {
    fn from_element(element: &ElementRef<'_>) -> Self {
        Self {
            text: element.text().collect(),
            lang: element.value().attr("lang").unwrap_or_default().to_string(),
            bold: has_wrapper(element, BOLD_TAGS),
            italic: has_wrapper(element, ITALIC_TAGS),
        }
    }
}

fn has_wrapper(element: &ElementRef<'_>, tags: &[&str]) -> bool {
    element
        .descendants()
        .filter_map(ElementRef::wrap)
        .any(|e| tags.contains(&e.value().name()))
}

/// Result of a [`resolve`] query.
#[derive(Debug)]
pub enum Value<'n, 'a> {
    /// A descendant collection, in document order
    Nodes(&'n [Node<'a>]),
    /// A single enclosing ancestor
    Node(&'n Node<'a>),
    /// A bounding box
    BBox(BoundingBox),
    /// A text field
    Text(Cow<'n, str>),
    /// An integer field
    Int(i64),
    /// A floating-point field
    Float(f64),
    /// A flag
    Bool(bool),
}

impl<'n, 'a> Value<'n, 'a> {
    /// The collection, if this is one.
    pub fn as_nodes(&self) -> Option<&'n [Node<'a>]> {
        match self {
            Value::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// The single node, if this is one.
    pub fn as_node(&self) -> Option<&'n Node<'a>> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The bounding box, if this is one.
    pub fn as_bbox(&self) -> Option<BoundingBox> {
        match self {
            Value::BBox(bbox) => Some(*bbox),
            _ => None,
        }
    }

    /// The text, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The integer, if this is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The float, if this is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The flag, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

/// Resolve a relation or field by name.
///
/// Plural kind names return descendant collections, singular kind names
/// return the enclosing ancestor, anything else is looked up among the
/// node's decoded and derived fields. Names that are none of these fail
/// with [`Error::AttributeNotFound`].
pub fn resolve<'n, 'a>(node: &'n Node<'a>, name: &str) -> Result<Value<'n, 'a>> {
    if let Some(kind) = Kind::from_plural(name) {
        if node.kind.has_descendant(kind) {
            return node.children(kind).map(Value::Nodes);
        }
    }

    if let Some(kind) = Kind::from_plural(&format!("{}s", name)) {
        if node.kind.has_ancestor(kind) {
            return node.parent(kind).map(Value::Node);
        }
    }

    node.field(name)?.ok_or_else(|| Error::not_found(name))
}

impl<'a> Node<'a> {
    /// Wrap `element` as a node of `kind`, decoding its `title` properties.
    pub fn new(kind: Kind, element: ElementRef<'a>) -> Result<Self> {
        let properties = Properties::decode(element.value().attr("title").unwrap_or_default())?;
        let word = match kind.spec().text {
            TextSource::Element => Some(WordInfo::from_element(&element)),
            TextSource::None | TextSource::Words => None,
        };

        Ok(Self {
            kind,
            element,
            properties,
            word,
            descendants: Default::default(),
            ancestors: Default::default(),
        })
    }

    /// Kind of this node.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Underlying markup element.
    pub fn element(&self) -> ElementRef<'a> {
        self.element
    }

    /// Decoded property bag.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// `id` attribute of the element.
    pub fn id(&self) -> Option<&'a str> {
        self.element.value().id()
    }

    /// Bounding box, when the element carries one.
    pub fn bbox(&self) -> Option<BoundingBox> {
        self.properties.bbox
    }

    /// Bounding box, or [`Error::AttributeNotFound`] when missing.
    pub fn require_bbox(&self) -> Result<BoundingBox> {
        self.bbox().ok_or_else(|| Error::not_found("bbox"))
    }

    /// Image path (pages).
    pub fn image(&self) -> Option<&str> {
        self.properties.image.as_deref()
    }

    /// Physical page number (pages).
    pub fn ppageno(&self) -> Option<i64> {
        self.properties.ppageno
    }

    /// Word confidence.
    pub fn wconf(&self) -> Option<i64> {
        self.properties.wconf
    }

    /// Word-specific fields, present only on words.
    pub fn word_info(&self) -> Option<&WordInfo> {
        self.word.as_ref()
    }

    /// Descendants of `kind`, in document order.
    pub fn children(&self, kind: Kind) -> Result<&[Node<'a>]> {
        if !self.kind.has_descendant(kind) {
            return Err(Error::not_found(kind.plural()));
        }

        let nodes = self.descendants[kind.index()].get_or_try_init(|| -> Result<_> {
            log::trace!("resolving {} of {}", kind.plural(), self.kind);
            self.element
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .filter(|e| kind.matches(e))
                .map(|e| Node::new(kind, e))
                .collect()
        })?;

        Ok(nodes)
    }

    /// Nearest enclosing node of `kind`.
    pub fn parent(&self, kind: Kind) -> Result<&Node<'a>> {
        if !self.kind.has_ancestor(kind) {
            return Err(Error::not_found(kind.name()));
        }

        let node = self.ancestors[kind.index()].get_or_try_init(|| -> Result<_> {
            log::trace!("resolving {} of {}", kind.name(), self.kind);
            let element = self
                .element
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|e| kind.matches(e))
                .ok_or(StructuralErrorKind::MissingAncestor {
                    node: self.kind,
                    ancestor: kind,
                })?;
            Ok(Box::new(Node::new(kind, element)?))
        })?;

        Ok(node)
    }

    /// Blocks below this node.
    pub fn blocks(&self) -> Result<&[Node<'a>]> {
        self.children(Kind::Block)
    }

    /// Paragraphs below this node.
    pub fn paragraphs(&self) -> Result<&[Node<'a>]> {
        self.children(Kind::Paragraph)
    }

    /// Lines below this node.
    pub fn lines(&self) -> Result<&[Node<'a>]> {
        self.children(Kind::Line)
    }

    /// Words below this node.
    pub fn words(&self) -> Result<&[Node<'a>]> {
        self.children(Kind::Word)
    }

    /// Enclosing page.
    pub fn page(&self) -> Result<&Node<'a>> {
        self.parent(Kind::Page)
    }

    /// Enclosing block.
    pub fn block(&self) -> Result<&Node<'a>> {
        self.parent(Kind::Block)
    }

    /// Enclosing paragraph.
    pub fn paragraph(&self) -> Result<&Node<'a>> {
        self.parent(Kind::Paragraph)
    }

    /// Enclosing line.
    pub fn line(&self) -> Result<&Node<'a>> {
        self.parent(Kind::Line)
    }

    /// Text of a word, or the space-joined word texts of a line.
    ///
    /// Line text is rebuilt from the words on every call.
    pub fn text(&self) -> Result<Cow<'_, str>> {
        match self.kind.spec().text {
            TextSource::Element => match &self.word {
                Some(word) => Ok(Cow::Borrowed(word.text.as_str())),
                None => Err(Error::not_found("text")),
            },
            TextSource::Words => {
                let words = self.words()?;
                let mut text = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i > 0 {
                        text.push(' ');
                    }
                    text.push_str(&word.text()?);
                }
                Ok(Cow::Owned(text))
            }
            TextSource::None => Err(Error::not_found("text")),
        }
    }

    /// Rotation in degrees; lines default to 0.
    pub fn textangle(&self) -> Option<i64> {
        match self.properties.textangle {
            Some(angle) => Some(angle),
            None if self.kind.spec().orientation_defaults => Some(0),
            None => None,
        }
    }

    /// Whether text runs vertically; lines default to `false`.
    pub fn vertical(&self) -> Option<bool> {
        self.textangle().map(|angle| angle == 90)
    }

    fn field(&self, name: &str) -> Result<Option<Value<'_, 'a>>> {
        let props = &self.properties;
        let value = match name {
            "bbox" => props.bbox.map(Value::BBox),
            "image" => props.image.as_deref().map(|s| Value::Text(Cow::Borrowed(s))),
            "wconf" => props.wconf.map(Value::Int),
            "textangle" => self.textangle().map(Value::Int),
            "vertical" => self.vertical().map(Value::Bool),
            "size" => props.size.map(Value::Float),
            "ascenders" => props.ascenders.map(Value::Float),
            "descenders" => props.descenders.map(Value::Float),
            "ppageno" => props.ppageno.map(Value::Int),
            "baseline" => props
                .baseline
                .map(|b| Value::Text(Cow::Owned(format!("{} {}", b.slope, b.offset)))),
            "scan_res" => props
                .scan_res
                .map(|r| Value::Text(Cow::Owned(format!("{} {}", r.x, r.y)))),
            "text" if self.kind.spec().text != TextSource::None => Some(Value::Text(self.text()?)),
            "lang" => self
                .word
                .as_ref()
                .map(|w| Value::Text(Cow::Borrowed(w.lang.as_str()))),
            "bold" => self.word.as_ref().map(|w| Value::Bool(w.bold)),
            "italic" => self.word.as_ref().map(|w| Value::Bool(w.italic)),
            _ => None,
        };
        Ok(value)
    }

    /// Look up a relation or field by name; see [`resolve`].
    pub fn get(&self, name: &str) -> Result<Value<'_, 'a>> {
        resolve(self, name)
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("id", &self.id())
            .field("properties", &self.properties)
            .field("word", &self.word)
            .finish()
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(", self.kind)?;
        if let Some(word) = &self.word {
            write!(f, "{:?}, ", word.text)?;
        }
        match self.properties.bbox {
            Some(bbox) => write!(f, "{})", bbox),
            None => f.write_str("no bbox)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use scraper::{Html, Selector};

    const SAMPLE: &str = r#"
        <div class="ocr_page" id="page_1" title='image "scan.png"; bbox 0 0 1000 800; ppageno 0'>
          <div class="ocr_carea" id="block_1" title="bbox 10 10 900 300">
            <p class="ocr_par" id="par_1" lang="eng" title="bbox 10 10 900 100">
              <span class="ocr_line" id="line_1" title="bbox 10 10 900 50; baseline 0 -5; x_size 40">
                <span class="ocrx_word" id="word_1" lang="eng" title="bbox 10 10 100 50; x_wconf 95"><strong>Hello</strong></span>
                <span class="ocrx_word" id="word_2" title="bbox 110 10 200 50; x_wconf 90"><em>big</em></span>
                <span class="ocr_word" id="word_3" title="bbox 210 10 300 50; x_wconf 80">world</span>
              </span>
              <span class="ocr_line" id="line_2" title="bbox 10 60 900 100; textangle 90">
                <span class="ocrx_word" id="word_4" title="bbox 10 60 100 100">again</span>
              </span>
            </p>
          </div>
          <span class="ocr_line" id="stray" title="bbox 0 700 10 710"></span>
        </div>"#;

    fn with_page<F: FnOnce(&Node<'_>)>(markup: &str, f: F) {
        let html = Html::parse_document(markup);
        let selector = Selector::parse(".ocr_page").unwrap();
        let element = html.select(&selector).next().unwrap();
        let page = Node::new(Kind::Page, element).unwrap();
        f(&page);
    }

    #[test]
    fn test_children_in_document_order() {
        with_page(SAMPLE, |page| {
            let words = page.words().unwrap();
            let ids: Vec<_> = words.iter().map(|w| w.id().unwrap()).collect();
            assert_eq!(ids, vec!["word_1", "word_2", "word_3", "word_4"]);
            assert_eq!(page.blocks().unwrap().len(), 1);
            assert_eq!(page.lines().unwrap().len(), 3);
        });
    }

    #[test]
    fn test_children_are_cached() {
        with_page(SAMPLE, |page| {
            let first = page.words().unwrap();
            let second = page.words().unwrap();
            assert!(std::ptr::eq(first, second));

            let via_resolve = resolve(page, "words").unwrap().as_nodes().unwrap();
            assert!(std::ptr::eq(first, via_resolve));
        });
    }

    #[test]
    fn test_parent_is_nearest_enclosing_and_cached() {
        with_page(SAMPLE, |page| {
            let word = &page.words().unwrap()[3];
            let line = word.line().unwrap();
            assert_eq!(line.id(), Some("line_2"));
            assert!(std::ptr::eq(line, word.line().unwrap()));
            assert_eq!(word.block().unwrap().id(), Some("block_1"));
            assert_eq!(word.page().unwrap().id(), Some("page_1"));
        });
    }

    #[test]
    fn test_missing_ancestor() {
        with_page(SAMPLE, |page| {
            let stray = &page.lines().unwrap()[2];
            assert_eq!(stray.id(), Some("stray"));
            let err = stray.block().unwrap_err();
            assert!(matches!(
                err,
                Error::StructuralLookup(StructuralErrorKind::MissingAncestor {
                    node: Kind::Line,
                    ancestor: Kind::Block,
                })
            ));
            assert!(stray.page().is_ok());
        });
    }

    #[test]
    fn test_invalid_relations_are_not_found() {
        with_page(SAMPLE, |page| {
            let word = &page.words().unwrap()[0];
            assert!(word.blocks().unwrap_err().is_not_found());
            assert!(resolve(word, "words").unwrap_err().is_not_found());
            assert!(resolve(page, "page").unwrap_err().is_not_found());
            assert!(resolve(page, "block").unwrap_err().is_not_found());
            assert!(resolve(page, "shjgioda").unwrap_err().is_not_found());
            assert!(resolve(page, "text").unwrap_err().is_not_found());
        });
    }

    #[test]
    fn test_word_fields() {
        with_page(SAMPLE, |page| {
            let words = page.words().unwrap();
            let hello = words[0].word_info().unwrap();
            assert_eq!(hello.text, "Hello");
            assert_eq!(hello.lang, "eng");
            assert!(hello.bold);
            assert!(!hello.italic);

            let big = words[1].word_info().unwrap();
            assert!(big.italic);
            assert!(!big.bold);
            assert_eq!(big.lang, "");

            assert_eq!(resolve(&words[2], "text").unwrap().as_str(), Some("world"));
            assert_eq!(resolve(&words[2], "wconf").unwrap().as_int(), Some(80));
            assert_eq!(resolve(&words[0], "bold").unwrap().as_bool(), Some(true));
            assert!(resolve(&words[0], "textangle").unwrap_err().is_not_found());
        });
    }

    #[test]
    fn test_line_fields() {
        with_page(SAMPLE, |page| {
            let lines = page.lines().unwrap();
            assert_eq!(lines[0].text().unwrap(), "Hello big world");
            assert_eq!(lines[0].text().unwrap(), lines[0].text().unwrap());
            assert_eq!(resolve(&lines[0], "textangle").unwrap().as_int(), Some(0));
            assert_eq!(resolve(&lines[0], "vertical").unwrap().as_bool(), Some(false));
            assert_eq!(resolve(&lines[0], "size").unwrap().as_float(), Some(40.0));
            assert_eq!(resolve(&lines[0], "baseline").unwrap().as_str(), Some("0 -5"));
            assert_eq!(resolve(&lines[1], "vertical").unwrap().as_bool(), Some(true));
            assert_eq!(lines[2].text().unwrap(), "");
            assert!(resolve(&lines[0], "lang").unwrap_err().is_not_found());
        });
    }

    #[test]
    fn test_vertical_only_at_ninety_degrees() {
        let markup = r#"<div class="ocr_page" title="bbox 0 0 10 10">
            <span class="ocr_line" title="bbox 0 0 5 5; textangle 180"></span>
            <span class="ocr_line" title="bbox 0 5 5 10; textangle 90"></span></div>"#;
        with_page(markup, |page| {
            let lines = page.lines().unwrap();
            assert_eq!(lines[0].textangle(), Some(180));
            assert_eq!(lines[0].vertical(), Some(false));
            assert_eq!(lines[1].vertical(), Some(true));
            assert_eq!(page.vertical(), None);
        });
    }

    #[test]
    fn test_word_element_is_itself_the_style_tag() {
        let markup = r#"<div class="ocr_page" title="bbox 0 0 100 10">
            <strong class="ocrx_word" title="bbox 0 0 40 10">Bold</strong>
            <em class="ocrx_word" title="bbox 50 0 100 10">Slanted</em></div>"#;
        with_page(markup, |page| {
            let words = page.words().unwrap();
            let bold = words[0].word_info().unwrap();
            assert_eq!(bold.text, "Bold");
            assert!(bold.bold);
            assert!(!bold.italic);

            let slanted = words[1].word_info().unwrap();
            assert_eq!(slanted.text, "Slanted");
            assert!(slanted.italic);
            assert!(!slanted.bold);
        });
    }

    #[test]
    fn test_page_fields() {
        with_page(SAMPLE, |page| {
            assert_eq!(page.image(), Some("scan.png"));
            assert_eq!(page.ppageno(), Some(0));
            assert_eq!(
                resolve(page, "bbox").unwrap().as_bbox(),
                Some(BoundingBox::new(0, 0, 1000, 800))
            );
            assert!(resolve(page, "vertical").unwrap_err().is_not_found());
        });
    }

    #[test]
    fn test_child_property_error_propagates_and_is_not_cached() {
        let markup = r#"<div class="ocr_page" title="bbox 0 0 10 10">
            <span class="ocrx_word" title="bbox 0 0 a 1">x</span></div>"#;
        with_page(markup, |page| {
            for _ in 0..2 {
                assert!(matches!(
                    page.words().unwrap_err(),
                    Error::Parse(ParseErrorKind::InvalidBBox(_))
                ));
            }
        });
    }

    #[test]
    fn test_display() {
        with_page(SAMPLE, |page| {
            assert_eq!(page.words().unwrap()[0].to_string(), r#"Word("Hello", (10, 10, 100, 50))"#);
            assert_eq!(page.to_string(), "Page((0, 0, 1000, 800))");
        });
    }
}
