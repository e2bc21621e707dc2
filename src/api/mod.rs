//! HTTP handlers.
//!
//! - `GET /?id=` renders a repository preview card to PNG.
//! - `GET /repository/{id}` serves the SPA shell, with meta tags for crawlers.

mod document;
mod og;

pub use document::*;
pub use og::*;
