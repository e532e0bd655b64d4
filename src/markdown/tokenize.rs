//! Line tokenizer for the constrained plan-description dialect
//!
//! Classifies a flat sequence of lines into typed [`Block`]s in a single
//! left-to-right scan. Recognition is strictly prefix-based and first match
//! wins; anything unrecognized becomes a paragraph, so tokenization never
//! fails.

use super::types::Block;

/// Tokenize a document into blocks.
///
/// The scan advances by the number of lines each block consumes: headers,
/// rules and paragraphs consume one line, a bullet run consumes every
/// contiguous `- ` line, blank lines are skipped.
pub fn tokenize(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    let mut blocks = Vec::new();
    let mut pos = 0usize;

    while pos < lines.len() {
        let line = lines[pos];

        // Blank lines emit nothing
        if line.trim().is_empty() {
            pos += 1;
            continue;
        }

        // Title only exists on the very first line
        if pos == 0 {
            if let Some(text) = title_text(line) {
                blocks.push(Block::Title(text.to_string()));
                pos += 1;
                continue;
            }
        }

        if let Some(text) = header_text(line, "## ") {
            blocks.push(Block::Section(text.to_string()));
            pos += 1;
            continue;
        }

        if let Some(text) = header_text(line, "### ") {
            blocks.push(Block::Sub(text.to_string()));
            pos += 1;
            continue;
        }

        if let Some(first) = bullet_text(line) {
            let mut items = vec![first.to_string()];
            let mut next = pos + 1;
            while next < lines.len() {
                match bullet_text(lines[next]) {
                    Some(item) => {
                        items.push(item.to_string());
                        next += 1;
                    }
                    None => break,
                }
            }
            blocks.push(Block::Bullets(items));
            pos = next;
            continue;
        }

        if is_rule(line) {
            blocks.push(Block::Rule);
            pos += 1;
            continue;
        }

        blocks.push(Block::Paragraph(line.trim().to_string()));
        pos += 1;
    }

    blocks
}

/// Title marker: a single `#` followed by a space
fn title_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("# ")?;
    Some(rest.trim())
}

/// Section / subsection marker with the given prefix
fn header_text<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(prefix)?;
    Some(rest.trim())
}

/// Bullet marker: `- ` at line start
fn bullet_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("- ")?;
    Some(rest.trim())
}

/// Horizontal rule: three or more leading hyphens
fn is_rule(line: &str) -> bool {
    line.starts_with("---")
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_on_first_line_only() {
        let blocks = tokenize("# Gravel Fondo Plan\nBody text\n# Not a title");
        assert_eq!(
            blocks,
            vec![
                Block::Title("Gravel Fondo Plan".to_string()),
                Block::Paragraph("Body text".to_string()),
                Block::Paragraph("# Not a title".to_string()),
            ]
        );
    }

    #[test]
    fn test_section_and_sub_headers() {
        let blocks = tokenize("## Who It's For\n### The Details");
        assert_eq!(
            blocks,
            vec![
                Block::Section("Who It's For".to_string()),
                Block::Sub("The Details".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_requires_space() {
        // No space after the markers: falls through to paragraph
        let blocks = tokenize("##NoSpace");
        assert_eq!(blocks, vec![Block::Paragraph("##NoSpace".to_string())]);
    }

    #[test]
    fn test_four_hashes_is_paragraph() {
        let blocks = tokenize("First\n#### Too deep");
        assert_eq!(blocks[1], Block::Paragraph("#### Too deep".to_string()));
    }

    #[test]
    fn test_bullets_grouped() {
        let blocks = tokenize("- one\n- two\n- three\n\n- four");
        assert_eq!(
            blocks,
            vec![
                Block::Bullets(vec![
                    "one".to_string(),
                    "two".to_string(),
                    "three".to_string()
                ]),
                Block::Bullets(vec!["four".to_string()]),
            ]
        );
    }

    #[test]
    fn test_bullet_run_ends_at_paragraph() {
        let blocks = tokenize("- one\n- two\nplain line");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            Block::Bullets(vec!["one".to_string(), "two".to_string()])
        );
        assert_eq!(blocks[1], Block::Paragraph("plain line".to_string()));
    }

    #[test]
    fn test_rule_variants() {
        assert_eq!(tokenize("a\n---"), vec![
            Block::Paragraph("a".to_string()),
            Block::Rule,
        ]);
        assert_eq!(tokenize("a\n---------"), vec![
            Block::Paragraph("a".to_string()),
            Block::Rule,
        ]);
        // Two hyphens are not a rule
        assert_eq!(tokenize("--"), vec![Block::Paragraph("--".to_string())]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let blocks = tokenize("\n\n# Title\n\n\nParagraph\n\n");
        assert_eq!(blocks.len(), 2);
        // Leading blanks mean the title line is no longer line zero
        assert_eq!(blocks[0], Block::Paragraph("# Title".to_string()));
    }

    #[test]
    fn test_crlf_input() {
        let blocks = tokenize("# Title\r\n- item\r\n");
        assert_eq!(
            blocks,
            vec![
                Block::Title("Title".to_string()),
                Block::Bullets(vec!["item".to_string()]),
            ]
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n\n\n").is_empty());
    }

    #[test]
    fn test_full_plan_shape() {
        let source = "\
# 12-Week Gravel Fondo
Get ready for your first century.

## What You Get
- Structured workouts with **power** and **RPE** targets
- Weekly coach notes

---

## What This Isn't
A generic spin-bike plan.";

        let blocks = tokenize(source);
        assert_eq!(blocks.len(), 7);
        assert_eq!(blocks[0], Block::Title("12-Week Gravel Fondo".to_string()));
        assert_eq!(blocks[2], Block::Section("What You Get".to_string()));
        assert!(matches!(blocks[3], Block::Bullets(ref items) if items.len() == 2));
        assert_eq!(blocks[4], Block::Rule);
        assert!(blocks[5].is_section_titled("what this isn't"));
        assert_eq!(
            blocks[6],
            Block::Paragraph("A generic spin-bike plan.".to_string())
        );
    }
}
