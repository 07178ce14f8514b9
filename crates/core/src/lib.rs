//! # Content Core
//!
//! Core logic behind the custom content endpoints.
//!
//! This crate contains the data-shaping work layered over the content platform:
//! - the [`RecordSource`] abstraction over the platform's storage and query layer, plus a
//!   snapshot-backed in-memory implementation
//! - menu tree construction from flat, parent-referencing menu items
//! - projection of posts into the public response shape
//! - markup stripping, slug derivation and request parameter sanitisation
//!
//! **No API concerns**: HTTP servers, routing and status mapping belong in `api-rest`; wire types
//! live in `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod like;
pub mod markup;
pub mod menu;
pub mod projector;
pub mod records;
pub mod service;
pub mod slug;
pub mod source;
pub mod validation;

pub use config::CoreConfig;
pub use error::{ContentError, ContentResult};
pub use service::ContentService;
pub use source::{InMemoryRecordSource, RecordSource};
