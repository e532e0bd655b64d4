//! Fragment compaction pipeline
//!
//! Entry points for turning a plan description into marketplace-ready HTML:
//! [`convert`] renders without a size limit, [`compact`] enforces the byte
//! ceiling through progressively more aggressive deterministic trimming.
//!
//! Trimming never fails and never emits unbalanced markup: the first pass
//! drops the designated optional section, the second truncates at the
//! rightmost complete close-tag boundary and then closes every element that
//! is still open at the cut.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use super::render::HtmlRenderer;
use super::style::StyleSheet;
use super::tokenize::tokenize;
use super::types::{Block, CompactOptions, MarkdownError, Result, OUTPUT_FILE_NAME};

/// Whitespace sitting between two tags
static INTER_TAG_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").expect("inter-tag regex"));

/// Runs of two or more literal spaces
static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"  +").expect("space-run regex"));

/// Space immediately before a closing tag
static SPACE_BEFORE_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" +</").expect("space-before-close regex"));

/// Any element tag, for the open-element scan at a truncation point
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)[^>]*>").expect("tag regex"));

/// Close-tag boundaries considered safe truncation points
const SAFE_BOUNDARIES: [&str; 5] = ["</p>", "</li>", "</ul>", "</h2>", "</h3>"];

// ============================================================
// Conversion entry points
// ============================================================

/// Render a document to a styled fragment with no size limit.
pub fn convert(text: &str, styles: &StyleSheet) -> String {
    let renderer = HtmlRenderer::with_styles(styles.clone());
    compress(&renderer.render_document(&tokenize(text)))
}

/// Render a document and force the result under the byte ceiling.
///
/// Returns the fragment unchanged when it already fits. Otherwise drops the
/// optional section and re-renders; if that is still not enough, truncates
/// at a safe boundary. The result is always well-formed and never longer
/// than the ceiling.
pub fn compact(text: &str, options: &CompactOptions, styles: &StyleSheet) -> String {
    compact_impl(text, options, styles).0
}

fn compact_impl(text: &str, options: &CompactOptions, styles: &StyleSheet) -> (String, bool) {
    let mut blocks = tokenize(text);
    let renderer = HtmlRenderer::with_styles(styles.clone());
    let mut html = compress(&renderer.render_document(&blocks));

    if html.len() <= options.ceiling {
        return (html, false);
    }

    tracing::debug!(
        len = html.len(),
        ceiling = options.ceiling,
        "fragment over ceiling, trimming"
    );

    if drop_optional_section(&mut blocks, &options.optional_section) {
        html = compress(&renderer.render_document(&blocks));
        if html.len() <= options.ceiling {
            return (html, true);
        }
    }

    (truncate_at_boundary(&html, options), true)
}

// ============================================================
// Whitespace compression
// ============================================================

/// Compress a fragment: drop whitespace between tags, collapse space runs,
/// drop the space before each closing tag. Applied in that order.
pub fn compress(html: &str) -> String {
    let html = INTER_TAG_WS_RE.replace_all(html, "><");
    let html = SPACE_RUN_RE.replace_all(&html, " ");
    SPACE_BEFORE_CLOSE_RE.replace_all(&html, "</").into_owned()
}

// ============================================================
// Trimming passes
// ============================================================

/// Remove the optional section header block and its immediately following
/// paragraph, if the header is present. Returns whether anything was cut.
fn drop_optional_section(blocks: &mut Vec<Block>, header: &str) -> bool {
    let Some(idx) = blocks.iter().position(|b| b.is_section_titled(header)) else {
        return false;
    };

    blocks.remove(idx);
    if matches!(blocks.get(idx), Some(Block::Paragraph(_))) {
        blocks.remove(idx);
    }
    true
}

/// Truncate an over-ceiling fragment at the rightmost safe close-tag
/// boundary at or before `ceiling - safety_margin`, then close every element
/// still open there. Falls back to a character-level cut outside any tag at
/// `ceiling - hard_cut_margin` when no boundary exists; that path also
/// closes all open elements, so output is well-formed either way.
fn truncate_at_boundary(html: &str, options: &CompactOptions) -> String {
    let limit = floor_char_boundary(html, options.ceiling.saturating_sub(options.safety_margin));
    let window = &html[..limit];

    let boundary = SAFE_BOUNDARIES
        .iter()
        .filter_map(|pat| window.rfind(pat).map(|idx| idx + pat.len()))
        .max();

    let cut = match boundary {
        Some(end) => end,
        None => {
            let mut pos =
                floor_char_boundary(html, options.ceiling.saturating_sub(options.hard_cut_margin));
            // Never cut inside a tag
            let prefix = &html[..pos];
            if let (Some(lt), gt) = (prefix.rfind('<'), prefix.rfind('>')) {
                if gt.map_or(true, |g| g < lt) {
                    pos = lt;
                }
            }
            // Never split an entity like &amp;
            let prefix = &html[..pos];
            if let Some(amp) = prefix.rfind('&') {
                if pos - amp <= 8 && !prefix[amp..].contains(';') {
                    pos = amp;
                }
            }
            pos
        }
    };

    let mut out = html[..cut].to_string();
    out.push_str(&closers_for(&out));
    // A hard cut can leave a dangling space before the first closer
    compress(&out)
}

/// Closing tags, innermost first, for every element left open in `prefix`.
fn closers_for(prefix: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();

    for caps in TAG_RE.captures_iter(prefix) {
        let closing = !caps[1].is_empty();
        let name = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        if closing {
            if let Some(open_idx) = stack.iter().rposition(|n| *n == name) {
                stack.truncate(open_idx);
            }
        } else {
            stack.push(name);
        }
    }

    stack
        .iter()
        .rev()
        .map(|name| format!("</{}>", name))
        .collect()
}

/// Largest index `<= idx` that is a UTF-8 character boundary of `s`.
fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

// ============================================================
// File entry points
// ============================================================

/// Result of compacting one plan description to disk
#[derive(Debug)]
pub struct CompactOutcome {
    /// Written output file
    pub output_path: PathBuf,
    /// Final fragment size in bytes
    pub output_bytes: usize,
    /// Whether any trimming pass ran
    pub trimmed: bool,
}

/// Compact one source file into `dest_dir/marketplace_description.html`.
pub fn compact_file(
    source: &Path,
    dest_dir: &Path,
    options: &CompactOptions,
    styles: &StyleSheet,
) -> Result<CompactOutcome> {
    if !source.exists() {
        return Err(MarkdownError::SourceNotFound(source.to_path_buf()));
    }

    let text = std::fs::read_to_string(source)?;
    let (html, trimmed) = compact_impl(&text, options, styles);

    std::fs::create_dir_all(dest_dir)?;
    let output_path = dest_dir.join(OUTPUT_FILE_NAME);
    std::fs::write(&output_path, &html)?;

    tracing::info!(
        source = %source.display(),
        bytes = html.len(),
        trimmed,
        "compacted plan description"
    );

    Ok(CompactOutcome {
        output_path,
        output_bytes: html.len(),
        trimmed,
    })
}

/// Convert one source file without a ceiling, writing next to the source or
/// to an explicit output path.
pub fn convert_file(source: &Path, output: Option<&Path>) -> Result<PathBuf> {
    if !source.exists() {
        return Err(MarkdownError::SourceNotFound(source.to_path_buf()));
    }

    let text = std::fs::read_to_string(source)?;
    let html = convert(&text, &StyleSheet::default());

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => source.with_extension("html"),
    };
    std::fs::write(&output_path, &html)?;

    Ok(output_path)
}

// ============================================================
// Tests
// ============================================================
