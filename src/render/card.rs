//! Preview card HTML.
//!
//! A standalone page sized to the Open Graph raster. Everything it needs is
//! inline (CSS, logo as a data URI) so the browser makes no further requests
//! while the page is captured.

use maud::{html, PreEscaped, DOCTYPE};

use crate::assets::Logo;
use crate::models::RepositoryMetadata;

/// Card width in CSS pixels (standard Open Graph).
pub const CARD_WIDTH: u32 = 1200;

/// Card height in CSS pixels (standard Open Graph).
pub const CARD_HEIGHT: u32 = 630;

/// Appended after the README teaser.
pub const SNIPPET_SUFFIX: &str = "...";

const CARD_CSS: &str = r#"
html,body{margin:0}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,Helvetica,Arial,sans-serif;background-color:#0d1117;color:white;padding:50px;width:1200px;height:630px;box-sizing:border-box;display:flex;flex-direction:column;justify-content:space-between;overflow:hidden}
.header{display:flex;align-items:center;padding-bottom:20px;border-bottom:1px solid #30363d}
.logo{width:100px;height:100px;margin-right:30px;border-radius:6px;flex-shrink:0}
.title-section{display:flex;flex-direction:column;overflow:hidden}
.title{font-size:48px;font-weight:600;color:#c9d1d9;white-space:nowrap;overflow:hidden;text-overflow:ellipsis}
.description{font-size:24px;color:#8b949e;margin-top:8px;min-height:1.2em;white-space:nowrap;overflow:hidden;text-overflow:ellipsis}
.readme{font-family:"SFMono-Regular",Consolas,"Liberation Mono",Menlo,Courier,monospace;font-size:18px;color:#c9d1d9;max-height:250px;overflow:hidden;text-overflow:ellipsis;margin-top:20px;line-height:1.6;-webkit-mask-image:linear-gradient(to bottom,black 50%,transparent 100%);mask-image:linear-gradient(to bottom,black 50%,transparent 100%)}
.footer{font-size:20px;color:#8b949e;text-align:right}
"#;

/// Render the preview card for a repository.
///
/// All dynamic values are HTML-escaped.
pub fn render_card(
    metadata: &RepositoryMetadata,
    snippet: &str,
    logo: &Logo,
    site_domain: &str,
) -> String {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                style { (PreEscaped(CARD_CSS)) }
            }
            body {
                div {
                    div.header {
                        img.logo src=(logo.data_uri()) alt="";
                        div."title-section" {
                            div.title { (metadata.full_name) }
                            div.description { (metadata.description_or_empty()) }
                        }
                    }
                    div.readme { (snippet) (SNIPPET_SUFFIX) }
                }
                div.footer { (site_domain) }
            }
        }
    }
    .into_string()
}
