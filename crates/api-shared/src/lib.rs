//! # API Shared
//!
//! Shared wire types for the content API.
//!
//! Contains:
//! - Response bodies for the menu, search and category-posts endpoints (`res` module)
//! - The platform-shaped error envelope
//! - Shared services like `HealthService`
//!
//! Used by `content-core` to build responses and by `api-rest` to serve them.

pub mod health;
pub mod res;

pub use health::HealthService;
pub use res::*;
