//! Snapshot-backed record source.
//!
//! Loads an exported JSON snapshot of the site's content once at startup and answers queries from
//! memory. The snapshot is never modified afterwards, so one instance can be shared by all
//! request handlers.
//!
//! Query semantics mirror the hosting platform:
//! - menu items are ordered by `menu_order`
//! - only published `post` records are searchable or listed
//! - posts are ordered newest first
//! - category lookup hides categories with no published posts in them or their descendants, and
//!   orders by name
//! - category listings include posts filed under descendant categories

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{CategoryPostsQuery, CategorySearch, PostPage, PostSearch, RecordSource};
use crate::records::{Attachment, Author, Category, MenuItem, MetaEntry, Post};
use crate::{ContentError, ContentResult};

/// On-disk shape of a content snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentSnapshot {
    /// Public base URL, used to build permalinks.
    #[serde(default)]
    pub site_url: String,
    #[serde(default)]
    pub menus: Vec<SnapshotMenu>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotMenu {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// In-memory [`RecordSource`] built from a [`ContentSnapshot`].
#[derive(Debug, Clone)]
pub struct InMemoryRecordSource {
    site_url: String,
    menus: HashMap<u64, Vec<MenuItem>>,
    /// Published posts only, newest first.
    published: Vec<Post>,
    meta: HashMap<u64, Vec<MetaEntry>>,
    categories: Vec<Category>,
    category_names: HashMap<u64, String>,
    /// Number of published posts filed directly under each category.
    category_counts: HashMap<u64, usize>,
    authors: HashMap<u64, String>,
    attachments: HashMap<u64, String>,
}

impl InMemoryRecordSource {
    /// Build a source from an already parsed snapshot.
    pub fn from_snapshot(snapshot: ContentSnapshot) -> Self {
        let menus = snapshot
            .menus
            .into_iter()
            .map(|menu| {
                let mut items = menu.items;
                items.sort_by_key(|item| item.menu_order);
                (menu.id, items)
            })
            .collect();

        let meta = snapshot
            .posts
            .iter()
            .map(|post| (post.id, post.meta.clone()))
            .collect();

        let mut published: Vec<Post> = snapshot
            .posts
            .into_iter()
            .filter(Post::is_published_post)
            .collect();
        published.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

        let mut category_counts: HashMap<u64, usize> = HashMap::new();
        for post in &published {
            for term_id in &post.categories {
                *category_counts.entry(*term_id).or_default() += 1;
            }
        }

        let category_names = snapshot
            .categories
            .iter()
            .map(|c| (c.term_id, c.name.clone()))
            .collect();

        Self {
            site_url: snapshot.site_url.trim_end_matches('/').to_string(),
            menus,
            published,
            meta,
            categories: snapshot.categories,
            category_names,
            category_counts,
            authors: snapshot
                .authors
                .into_iter()
                .map(|a| (a.id, a.display_name))
                .collect(),
            attachments: snapshot
                .attachments
                .into_iter()
                .map(|a| (a.id, a.url))
                .collect(),
        }
    }

    /// Read and parse a JSON snapshot file.
    ///
    /// # Errors
    ///
    /// - `ContentError::SnapshotRead` if the file cannot be read.
    /// - `ContentError::SnapshotParse` if it is not a valid snapshot.
    pub fn load(path: &Path) -> ContentResult<Self> {
        let contents = fs::read_to_string(path).map_err(ContentError::SnapshotRead)?;
        let snapshot: ContentSnapshot =
            serde_json::from_str(&contents).map_err(ContentError::SnapshotParse)?;

        tracing::info!(
            "loaded content snapshot {}: {} menus, {} posts, {} categories",
            path.display(),
            snapshot.menus.len(),
            snapshot.posts.len(),
            snapshot.categories.len()
        );

        Ok(Self::from_snapshot(snapshot))
    }

    /// Whether `term_id` or any category below it has published posts filed directly under it.
    fn has_published_posts(&self, term_id: u64) -> bool {
        self.category_with_descendants(term_id)
            .iter()
            .any(|id| self.category_counts.get(id).copied().unwrap_or(0) > 0)
    }

    /// `term_id` plus every category below it.
    fn category_with_descendants(&self, term_id: u64) -> HashSet<u64> {
        let mut found = HashSet::from([term_id]);
        let mut frontier = vec![term_id];

        while let Some(parent) = frontier.pop() {
            for child in self.categories.iter().filter(|c| c.parent == parent) {
                // A malformed parent chain must not loop forever.
                if found.insert(child.term_id) {
                    frontier.push(child.term_id);
                }
            }
        }

        found
    }
}

impl RecordSource for InMemoryRecordSource {
    fn menu_items(&self, menu_id: u64) -> ContentResult<Vec<MenuItem>> {
        Ok(self.menus.get(&menu_id).cloned().unwrap_or_default())
    }

    fn search_posts(&self, search: &PostSearch) -> ContentResult<Vec<Post>> {
        Ok(self
            .published
            .iter()
            .filter(|post| search.title.matches(&post.title))
            .take(search.limit)
            .cloned()
            .collect())
    }

    fn find_categories(&self, search: &CategorySearch) -> ContentResult<Vec<Category>> {
        let needle = search.name_contains.to_lowercase();
        let mut matches: Vec<&Category> = self
            .categories
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .filter(|c| self.has_published_posts(c.term_id))
            .collect();
        matches.sort_by_cached_key(|c| c.name.to_lowercase());

        Ok(matches
            .into_iter()
            .take(search.limit)
            .cloned()
            .collect())
    }

    fn posts_in_category(&self, query: &CategoryPostsQuery) -> ContentResult<PostPage> {
        let terms = self.category_with_descendants(query.term_id);
        let in_category: Vec<&Post> = self
            .published
            .iter()
            .filter(|post| post.categories.iter().any(|id| terms.contains(id)))
            .collect();

        let found_posts = in_category.len();
        let per_page = query.per_page.max(1);
        let max_num_pages = found_posts.div_ceil(per_page);
        let offset = query.page.max(1).saturating_sub(1).saturating_mul(per_page);

        let posts = in_category
            .into_iter()
            .skip(offset)
            .take(per_page)
            .cloned()
            .collect();

        Ok(PostPage {
            posts,
            found_posts,
            max_num_pages,
        })
    }

    fn post_meta(&self, post_id: u64) -> ContentResult<Vec<MetaEntry>> {
        Ok(self.meta.get(&post_id).cloned().unwrap_or_default())
    }

    fn post_category_names(&self, post: &Post) -> ContentResult<Vec<String>> {
        Ok(post
            .categories
            .iter()
            .filter_map(|id| self.category_names.get(id).cloned())
            .collect())
    }

    fn author_display_name(&self, author_id: Option<u64>) -> ContentResult<Option<String>> {
        Ok(author_id.and_then(|id| self.authors.get(&id).cloned()))
    }

    fn thumbnail_url(&self, post: &Post) -> ContentResult<Option<String>> {
        Ok(post
            .thumbnail
            .and_then(|id| self.attachments.get(&id).cloned()))
    }

    fn permalink(&self, post: &Post) -> ContentResult<String> {
        if post.slug.is_empty() {
            Ok(format!("{}/?p={}", self.site_url, post.id))
        } else {
            Ok(format!("{}/{}/", self.site_url, post.slug))
        }
    }
}
