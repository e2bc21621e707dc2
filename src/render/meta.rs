//! SEO and social meta tags for crawler requests.

use std::sync::LazyLock;

use maud::html;
use regex::{NoExpand, Regex};
use reqwest::Url;

use crate::models::RepositoryMetadata;

/// First `<title>` element of the shell, possibly spanning lines.
static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>.*?</title\s*>").expect("title regex should compile")
});

/// Page-level values for the injected tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub heading: String,
    pub description: String,
    pub image_url: String,
}

impl PageMeta {
    /// Derive tag values for a repository page.
    ///
    /// `id` is the identifier as requested, so the image URL points at the same
    /// resource the crawler asked about.
    pub fn for_repository(
        metadata: &RepositoryMetadata,
        id: &str,
        site_name: &str,
        og_image_base_url: &str,
    ) -> Self {
        Self {
            title: format!("{} - {}", metadata.full_name, site_name),
            heading: metadata.full_name.clone(),
            description: metadata.description_or_empty().to_string(),
            image_url: image_url(og_image_base_url, id),
        }
    }

    /// Render the tag block that replaces the shell's `<title>`.
    pub fn to_tags(&self) -> String {
        html! {
            title { (self.title) }
            meta name="description" content=(self.description);
            meta property="og:title" content=(self.heading);
            meta property="og:description" content=(self.description);
            meta property="og:image" content=(self.image_url);
            meta property="twitter:card" content="summary_large_image";
            meta property="twitter:title" content=(self.heading);
            meta property="twitter:description" content=(self.description);
            meta property="twitter:image" content=(self.image_url);
        }
        .into_string()
    }
}

/// `{base}?id={id}`, falling back to plain concatenation if `base` is not a URL.
fn image_url(base: &str, id: &str) -> String {
    match Url::parse_with_params(base, &[("id", id)]) {
        Ok(url) => url.into(),
        Err(_) => format!("{}?id={}", base, id),
    }
}

/// Replace the shell's first `<title>` element with the meta tag block.
///
/// A shell without a `<title>` element is returned unchanged.
pub fn inject_meta_tags(shell: &str, meta: &PageMeta) -> String {
    if !TITLE_REGEX.is_match(shell) {
        tracing::warn!("SPA shell has no <title> element, serving it unmodified");
        return shell.to_string();
    }

    TITLE_REGEX
        .replacen(shell, 1, NoExpand(&meta.to_tags()))
        .into_owned()
}
