//! Data models for the OG image service.
//!
//! Wire types mirror the upstream API payloads; `RepositoryMetadata` is the
//! unwrapped form the renderers work with.

mod repository;

pub use repository::*;
