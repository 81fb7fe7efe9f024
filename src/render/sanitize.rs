//! Remote-resource stripping for the HTML preview.
//!
//! Removes `<script>` elements whose `src` points at another host and
//! `<link rel="stylesheet">` elements whose `href` does. Inline scripts,
//! event-handler attributes and relative references are left alone: the
//! preview iframe sandbox is what isolates them from this origin.
//!
//! Never applied to the code view.

use std::sync::LazyLock;

use regex::{Captures, Regex};

// Attribute values may contain `>`; an unclosed script runs to end of input.
static SCRIPT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\b((?:[^>"']|"[^"]*"|'[^']*')*)>(?:.*?</script\s*>|.*$)"#)
        .expect("script pattern is valid")
});

static LINK_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#).expect("link pattern is valid")
});

static REMOTE_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)src\s*=\s*["']?\s*(?:https?:)?//"#).expect("src pattern is valid")
});

static REMOTE_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)href\s*=\s*["']?\s*(?:https?:)?//"#).expect("href pattern is valid")
});

static STYLESHEET_REL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)rel\s*=\s*["']?[^"'>]*\bstylesheet\b"#).expect("rel pattern is valid")
});

pub fn sanitize(markup: &str) -> String {
    let without_scripts = SCRIPT_ELEMENT.replace_all(markup, |caps: &Captures| {
        if REMOTE_SRC.is_match(&caps[1]) {
            String::new()
        } else {
            caps[0].to_string()
        }
    });

    LINK_ELEMENT
        .replace_all(&without_scripts, |caps: &Captures| {
            let attrs = &caps[1];
            if STYLESHEET_REL.is_match(attrs) && REMOTE_HREF.is_match(attrs) {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}
