//! Markup escaping for externally sourced text.

const MAX_REFERENCE_LEN: usize = 32;

/// Escapes markup metacharacters so `text` renders literally inside markup.
///
/// Well-formed character references (`&amp;`, `&#39;`, `&#x3C;`, ...) are
/// kept as they are, so feeding already-escaped text through again yields
/// the same string instead of `&amp;amp;`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for (idx, ch) in text.char_indices() {
        match ch {
            '&' if is_character_reference(&text[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// True when `rest` (starting at an `&`) opens a named or numeric reference.
fn is_character_reference(rest: &str) -> bool {
    let body = &rest[1..];
    let Some(end) = body.find(';') else {
        return false;
    };
    if end == 0 || end > MAX_REFERENCE_LEN {
        return false;
    }
    let name = &body[..end];
    if let Some(numeric) = name.strip_prefix('#') {
        return match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !numeric.is_empty() && numeric.chars().all(|c| c.is_ascii_digit()),
        };
    }
    name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}
