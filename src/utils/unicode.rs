//! Unicode-safe helpers for terminal alignment.

use unicode_width::UnicodeWidthStr;

/// Left-align `s` in a column of `width` terminal cells.
/// Wide (CJK) characters count as two cells; longer strings are returned unchanged.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + width - w);
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(width - w));
    out
}
