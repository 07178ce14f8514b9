//! Record source abstraction.
//!
//! The content platform owns storage, search and pagination. Everything the endpoints need from
//! it goes through [`RecordSource`], so handlers and tests can run against any backend.
//!
//! Query criteria are plain values passed per call. In particular the title match rule for
//! search travels inside [`PostSearch`]; there is no filter a caller installs on the source.

mod memory;

pub use memory::{ContentSnapshot, InMemoryRecordSource, SnapshotMenu};

use crate::like::LikePattern;
use crate::records::{Category, MenuItem, MetaEntry, Post};
use crate::ContentResult;

/// Criteria for a title search over published posts.
#[derive(Debug, Clone)]
pub struct PostSearch {
    pub title: LikePattern,
    pub limit: usize,
}

/// Criteria for looking up categories by name.
#[derive(Debug, Clone)]
pub struct CategorySearch {
    /// Case-insensitive substring the category name must contain.
    pub name_contains: String,
    pub limit: usize,
}

/// One page of published posts filed under a category.
#[derive(Debug, Clone)]
pub struct CategoryPostsQuery {
    pub term_id: u64,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

/// A page of posts plus the totals needed to paginate.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub found_posts: usize,
    pub max_num_pages: usize,
}

/// Read access to the content platform.
///
/// All operations are read-only snapshots taken at call time.
pub trait RecordSource: Send + Sync + 'static {
    /// All items of a menu. An unknown menu yields an empty list.
    fn menu_items(&self, menu_id: u64) -> ContentResult<Vec<MenuItem>>;

    /// Published posts whose title matches `search.title`, newest first.
    fn search_posts(&self, search: &PostSearch) -> ContentResult<Vec<Post>>;

    /// Non-empty categories whose name matches, ordered by name.
    fn find_categories(&self, search: &CategorySearch) -> ContentResult<Vec<Category>>;

    /// A page of published posts in a category or any of its descendants, newest first.
    fn posts_in_category(&self, query: &CategoryPostsQuery) -> ContentResult<PostPage>;

    /// Raw custom-field rows of a post, in stored order, duplicates included.
    fn post_meta(&self, post_id: u64) -> ContentResult<Vec<MetaEntry>>;

    /// Names of the categories a post is filed under.
    fn post_category_names(&self, post: &Post) -> ContentResult<Vec<String>>;

    fn author_display_name(&self, author_id: Option<u64>) -> ContentResult<Option<String>>;

    /// Full-size featured image URL, if the post has one.
    fn thumbnail_url(&self, post: &Post) -> ContentResult<Option<String>>;

    /// Canonical public URL of a post.
    fn permalink(&self, post: &Post) -> ContentResult<String>;
}
