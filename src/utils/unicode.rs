//! Display-width helpers for terminal layout.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` so it occupies at most `max` terminal columns, ending with `…`
/// when anything was removed.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
