//! README teaser extraction.
//!
//! Turns untrusted README HTML into a short plain-text snippet. Script and
//! style blocks go first, with their contents, since generic tag stripping
//! would leave their text behind.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Maximum snippet length in characters, before the rendered ellipsis.
pub const MAX_SNIPPET_CHARS: usize = 400;

/// `<style>` blocks, closed only by `</style>`. An unterminated block runs to the end of input.
static STYLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?(?:</style\s*>|\z)").expect("style regex should compile")
});

/// `<script>` blocks, closed only by `</script>`. An unterminated block runs to the end of input.
static SCRIPT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?(?:</script\s*>|\z)")
        .expect("script regex should compile")
});

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag regex should compile"));

static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(amp|quot|apos|#39|nbsp|lt|gt);").expect("entity regex should compile")
});

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex should compile"));

/// Reduce README HTML to a plain-text teaser of at most [`MAX_SNIPPET_CHARS`].
///
/// The result never contains `<` or `>`.
pub fn sanitize(readme_html: Option<&str>) -> String {
    let Some(html) = readme_html else {
        return String::new();
    };

    let text = STYLE_REGEX.replace_all(html, " ");
    let text = SCRIPT_REGEX.replace_all(&text, " ");
    let text = TAG_REGEX.replace_all(&text, " ");
    let text = ENTITY_REGEX.replace_all(&text, |caps: &Captures| match &caps[1] {
        "amp" => "&",
        "quot" => "\"",
        "apos" | "#39" => "'",
        _ => " ",
    });
    let text = text.replace(['<', '>'], " ");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");

    text.trim().chars().take(MAX_SNIPPET_CHARS).collect()
}
