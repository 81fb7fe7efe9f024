//! The two escaping regimes.
//!
//! `escape_for_attribute_embedding` is for the preview document that goes
//! into a double-quoted `srcdoc` attribute. `escape_for_markup_body` is for
//! text inside `<pre><code>`. They are not interchangeable: never run both
//! over the same string.

/// Escape `"`, `'` and `\` for a double-quoted attribute value, so the
/// value cannot break out of the attribute. `&` is not escaped: entities
/// already in the source are decoded once by the browser.
pub fn escape_for_attribute_embedding(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\\' => out.push_str("&#92;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape `&`, `<` and `>` for element text content. Quotes are left as is.
pub fn escape_for_markup_body(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_body_escapes_tags_and_ampersands() {
        let escaped = escape_for_markup_body("<script>&\"'</script>");
        assert_eq!(escaped, "&lt;script&gt;&amp;\"'&lt;/script&gt;");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        // every remaining '&' starts one of our entities
        for (idx, _) in escaped.match_indices('&') {
            let rest = &escaped[idx..];
            assert!(
                rest.starts_with("&amp;") || rest.starts_with("&lt;") || rest.starts_with("&gt;")
            );
        }
    }

    #[test]
    fn test_markup_body_escapes_existing_entities() {
        assert_eq!(escape_for_markup_body("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_attribute_has_no_raw_quotes() {
        let escaped = escape_for_attribute_embedding(r#"<a title="x" href='y'>C:\path</a>"#);
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
        assert!(!escaped.contains('\\'));
        assert_eq!(
            escaped,
            "<a title=&quot;x&quot; href=&#39;y&#39;>C:&#92;path</a>"
        );
    }

    #[test]
    fn test_attribute_backslash_is_not_an_ampersand_escape() {
        assert_eq!(escape_for_attribute_embedding("\\"), "&#92;");
        assert_ne!(escape_for_attribute_embedding("\\"), "&amp;");
    }

    #[test]
    fn test_regimes_differ() {
        let s = "<b>\"&\"</b>";
        assert_ne!(escape_for_attribute_embedding(s), escape_for_markup_body(s));
        assert_eq!(escape_for_attribute_embedding("<b>&</b>"), "<b>&</b>");
        assert_eq!(escape_for_markup_body("\"'\\"), "\"'\\");
    }
}
