//! Constants used throughout the content core crate.

/// Parent id carried by top-level menu items.
pub const ROOT_PARENT_ID: u64 = 0;

/// Number of posts returned per page by the category-posts endpoint.
pub const POSTS_PER_PAGE: usize = 20;

/// Maximum number of posts returned by the search endpoint.
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Default maximum menu nesting depth before a menu is reported as malformed.
pub const DEFAULT_MAX_MENU_DEPTH: usize = 64;

/// Default location of the JSON content snapshot when no explicit file is configured.
pub const DEFAULT_CONTENT_DATA_FILE: &str = "content_data/content.json";

/// Post status for publicly visible posts.
pub const STATUS_PUBLISH: &str = "publish";

/// Post type for regular blog posts.
pub const POST_TYPE_POST: &str = "post";

/// Format used for `published_date` in responses.
pub const POST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
