//! Fragment renderer
//!
//! Turns tokenized [`Block`]s into one self-contained HTML fragment: a root
//! `div` carrying the base typography, one element per block, every element
//! styled inline. Each `render_*` method emits both halves of its markup, so
//! the fragment can never contain an unmatched tag; the root close is
//! appended exactly once at the end.

use once_cell::sync::Lazy;
use regex::Regex;

use super::style::StyleSheet;
use super::types::Block;

/// Inline bold span: `**text**`
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex"));

/// Renderer for converting blocks to an inline-styled fragment
pub struct HtmlRenderer {
    styles: StyleSheet,
}

impl HtmlRenderer {
    /// Create a renderer with the brand style table
    pub fn new() -> Self {
        Self {
            styles: StyleSheet::default(),
        }
    }

    /// Create a renderer with a specific style table
    pub fn with_styles(styles: StyleSheet) -> Self {
        Self { styles }
    }

    /// Render a whole document: container open, one element per block,
    /// container close.
    pub fn render_document(&self, blocks: &[Block]) -> String {
        let mut parts = Vec::with_capacity(blocks.len() + 2);
        parts.push(format!("<div{}>", style_attr(&self.styles.base)));

        for block in blocks {
            parts.push(self.render_block(block));
        }

        parts.push("</div>".to_string());
        parts.concat()
    }

    /// Render a single block
    pub fn render_block(&self, block: &Block) -> String {
        match block {
            Block::Title(text) => self.render_title(text),
            Block::Section(text) => self.render_section(text),
            Block::Sub(text) => self.render_sub(text),
            Block::Bullets(items) => self.render_bullets(items),
            Block::Rule => self.render_rule(),
            Block::Paragraph(text) => self.render_paragraph(text),
        }
    }

    /// Title: uppercase bold paragraph inside a bottom-bordered wrapper
    pub fn render_title(&self, text: &str) -> String {
        format!(
            "<div{}><p{}>{}</p></div>",
            style_attr(&self.styles.title_wrap),
            style_attr(&self.styles.title_text),
            self.inline(text),
        )
    }

    /// Section header: bordered uppercase `h2`
    pub fn render_section(&self, text: &str) -> String {
        format!(
            "<h2{}>{}</h2>",
            style_attr(&self.styles.section),
            self.inline(text)
        )
    }

    /// Subsection header: smaller muted `h3`
    pub fn render_sub(&self, text: &str) -> String {
        format!(
            "<h3{}>{}</h3>",
            style_attr(&self.styles.sub),
            self.inline(text)
        )
    }

    /// Bullet run: one `ul` wrapping every item
    pub fn render_bullets(&self, items: &[String]) -> String {
        let mut out = format!("<ul{}>", style_attr(&self.styles.list));
        for item in items {
            out.push_str(&format!(
                "<li{}>{}</li>",
                style_attr(&self.styles.item),
                self.inline(item)
            ));
        }
        out.push_str("</ul>");
        out
    }

    /// Horizontal rule: empty top-bordered divider
    pub fn render_rule(&self) -> String {
        format!("<div{}></div>", style_attr(&self.styles.rule))
    }

    /// Plain paragraph
    pub fn render_paragraph(&self, text: &str) -> String {
        format!(
            "<p{}>{}</p>",
            style_attr(&self.styles.paragraph),
            self.inline(text)
        )
    }

    /// Escape text and convert `**bold**` spans to `strong` elements.
    ///
    /// Escaping runs first; the bold markers survive it, so each balanced
    /// pair becomes exactly one element and no literal asterisks remain.
    /// An unpaired `**` is left as-is.
    fn inline(&self, text: &str) -> String {
        let escaped = html_escape::encode_text(text);
        let strong_attr = style_attr(&self.styles.strong);
        BOLD_RE
            .replace_all(&escaped, |caps: &regex::Captures<'_>| {
                format!("<strong{}>{}</strong>", strong_attr, &caps[1])
            })
            .into_owned()
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format an inline style attribute; empty declarations emit nothing so a
/// plain sheet yields bare structural markup.
fn style_attr(decl: &str) -> String {
    if decl.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", decl)
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> HtmlRenderer {
        HtmlRenderer::with_styles(StyleSheet::plain())
    }

    #[test]
    fn test_render_title_structure() {
        let html = plain().render_title("Gravel Fondo");
        assert_eq!(html, "<div><p>Gravel Fondo</p></div>");
    }

    #[test]
    fn test_render_headers() {
        assert_eq!(plain().render_section("Overview"), "<h2>Overview</h2>");
        assert_eq!(plain().render_sub("Details"), "<h3>Details</h3>");
    }

    #[test]
    fn test_render_bullets_single_list() {
        let items = vec!["one".to_string(), "two".to_string()];
        let html = plain().render_bullets(&items);
        assert_eq!(html, "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn test_render_rule_and_paragraph() {
        assert_eq!(plain().render_rule(), "<div></div>");
        assert_eq!(plain().render_paragraph("hi"), "<p>hi</p>");
    }

    #[test]
    fn test_bold_span_round_trip() {
        let html = plain().render_paragraph("a **bold** word");
        assert_eq!(html, "<p>a <strong>bold</strong> word</p>");
        assert!(!html.contains('*'));
    }

    #[test]
    fn test_bold_multiple_spans() {
        let html = plain().render_paragraph("**x** and **y**");
        assert_eq!(html, "<p><strong>x</strong> and <strong>y</strong></p>");
    }

    #[test]
    fn test_unpaired_bold_left_alone() {
        let html = plain().render_paragraph("lone ** marker");
        assert_eq!(html, "<p>lone ** marker</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        let html = plain().render_paragraph("5 < 6 & 7 > 2");
        assert_eq!(html, "<p>5 &lt; 6 &amp; 7 &gt; 2</p>");
    }

    #[test]
    fn test_document_container() {
        let blocks = vec![Block::Paragraph("body".to_string())];
        let html = plain().render_document(&blocks);
        assert_eq!(html, "<div><p>body</p></div>");
    }

    #[test]
    fn test_default_styles_on_every_element() {
        let renderer = HtmlRenderer::new();
        let blocks = vec![
            Block::Title("T".to_string()),
            Block::Section("S".to_string()),
            Block::Sub("U".to_string()),
            Block::Bullets(vec!["i".to_string()]),
            Block::Rule,
            Block::Paragraph("p".to_string()),
        ];
        let html = renderer.render_document(&blocks);

        // Every opening tag carries an inline style attribute
        for open in ["<div", "<p", "<h2", "<h3", "<ul", "<li"] {
            assert!(
                !html.contains(&format!("{}>", open)),
                "unstyled element {} in {}",
                open,
                html
            );
        }
        assert!(html.contains("#F4D03F"));
    }

    #[test]
    fn test_strong_carries_style_with_default_sheet() {
        let renderer = HtmlRenderer::new();
        let html = renderer.render_paragraph("**brand**");
        assert!(html.contains("<strong style=\"font-weight:700\">brand</strong>"));
    }
}
