//! HTML rendering: README teasers, preview cards and crawler meta tags.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/), so every dynamic value
//! is escaped.

pub mod card;
pub mod meta;
pub mod snippet;

pub use card::{render_card, CARD_HEIGHT, CARD_WIDTH};
pub use meta::{inject_meta_tags, PageMeta};
pub use snippet::sanitize;
