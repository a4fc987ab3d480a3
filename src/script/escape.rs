//! Escaping for values embedded in generated script and HTML text.

use serde::Serialize;

/// Serializes `value` as a JSON literal that is safe inside an inline
/// `<script>` element.
///
/// JSON is a subset of JavaScript expression syntax except for U+2028 and
/// U+2029, which are escaped along with `<`, `>` and `&` so a value can never
/// close the surrounding element or open an HTML comment.
pub fn script_literal<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());

    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }

    Ok(out)
}

/// Escapes `text` for use as HTML element content or a quoted attribute value.
pub fn html_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
