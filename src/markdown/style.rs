//! Inline style table for rendered fragments
//!
//! The marketplace strips external stylesheets, so every element carries its
//! look as an inline `style` attribute. [`StyleSheet`] maps each block kind
//! to one CSS declaration string; the default is the brand typography table.

/// Inline CSS declarations per rendered element.
///
/// Fields are plain declaration strings (no braces, no selector) and are
/// public so rendering can be exercised with any table.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    /// Root container div (base typography)
    pub base: String,
    /// Wrapper div around the title (bottom brand border)
    pub title_wrap: String,
    /// Title paragraph itself
    pub title_text: String,
    /// `h2` section header
    pub section: String,
    /// `h3` subsection header
    pub sub: String,
    /// `ul` list container
    pub list: String,
    /// `li` list item
    pub item: String,
    /// Divider div for horizontal rules
    pub rule: String,
    /// `p` paragraph
    pub paragraph: String,
    /// `strong` inline bold span
    pub strong: String,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            base: "font-family:'Helvetica Neue',Helvetica,Arial,sans-serif;\
                   font-size:14px;line-height:1.55;color:#2C3E50"
                .to_string(),
            title_wrap: "margin:0 0 14px;padding-bottom:10px;border-bottom:3px solid #F4D03F"
                .to_string(),
            title_text: "margin:0;font-size:21px;font-weight:800;letter-spacing:1px;\
                         text-transform:uppercase"
                .to_string(),
            section: "margin:18px 0 8px;font-size:16px;font-weight:700;\
                      text-transform:uppercase;letter-spacing:.5px;\
                      border-bottom:2px solid #E8E8E8;padding-bottom:4px"
                .to_string(),
            sub: "margin:12px 0 6px;font-size:13px;font-weight:600;color:#7F8C8D;\
                  text-transform:uppercase;letter-spacing:.5px"
                .to_string(),
            list: "margin:8px 0;padding-left:20px".to_string(),
            item: "margin:4px 0".to_string(),
            rule: "margin:14px 0;border-top:1px solid #E8E8E8".to_string(),
            paragraph: "margin:8px 0".to_string(),
            strong: "font-weight:700".to_string(),
        }
    }
}

impl StyleSheet {
    /// A sheet with every declaration empty. The renderer omits empty
    /// `style` attributes, so this yields bare structural markup; used to
    /// keep structure-level tests readable.
    pub fn plain() -> Self {
        Self {
            base: String::new(),
            title_wrap: String::new(),
            title_text: String::new(),
            section: String::new(),
            sub: String::new(),
            list: String::new(),
            item: String::new(),
            rule: String::new(),
            paragraph: String::new(),
            strong: String::new(),
        }
    }
}

// ============================================================
// Tests
// ============================================================
