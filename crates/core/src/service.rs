//! Endpoint orchestration.
//!
//! [`ContentService`] holds one operation per public endpoint. Each validates its parameters,
//! queries the record source and reshapes the result; every error an endpoint can return is
//! produced here, at the service boundary.

use std::sync::Arc;

use api_shared::{CategoryPostsRes, MenuNode, ProjectedPost};

use crate::constants::{POSTS_PER_PAGE, ROOT_PARENT_ID, SEARCH_RESULT_LIMIT};
use crate::like::LikePattern;
use crate::menu::build_menu_tree;
use crate::projector::project_post;
use crate::source::{
    CategoryPostsQuery, CategorySearch, InMemoryRecordSource, PostSearch, RecordSource,
};
use crate::validation::{loose_int, sanitize_text_field};
use crate::{ContentError, ContentResult, CoreConfig};

/// Content endpoints over a shared record source.
#[derive(Clone)]
pub struct ContentService {
    cfg: Arc<CoreConfig>,
    source: Arc<dyn RecordSource>,
}

impl ContentService {
    pub fn new(cfg: Arc<CoreConfig>, source: Arc<dyn RecordSource>) -> Self {
        Self { cfg, source }
    }

    /// Build a service over the snapshot file named by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or parsed.
    pub fn from_config(cfg: Arc<CoreConfig>) -> ContentResult<Self> {
        let source = InMemoryRecordSource::load(cfg.content_data_file())?;
        Ok(Self::new(cfg, Arc::new(source)))
    }

    /// Navigation menu `menu_id` as a tree of top-level entries and their submenus.
    ///
    /// # Errors
    ///
    /// - `ContentError::NoMenu` if the menu has no items.
    /// - `ContentError::MenuCycle` / `ContentError::MenuTooDeep` if the stored items do not form
    ///   a well-formed tree.
    pub fn menu_with_submenus(&self, menu_id: u64) -> ContentResult<Vec<MenuNode>> {
        let items = self.source.menu_items(menu_id)?;
        if items.is_empty() {
            return Err(ContentError::NoMenu);
        }

        tracing::debug!("building menu {} from {} items", menu_id, items.len());
        build_menu_tree(&items, ROOT_PARENT_ID, self.cfg.max_menu_depth())
    }

    /// Published posts whose title contains `query`, newest first, at most 20.
    ///
    /// # Errors
    ///
    /// - `ContentError::MissingParameter` if `query` is absent.
    /// - `ContentError::InvalidInput` if nothing is left of `query` after sanitising.
    /// - `ContentError::NoSearchResults` if no post matches.
    pub fn search(&self, query: Option<&str>) -> ContentResult<Vec<ProjectedPost>> {
        let raw = query.ok_or(ContentError::MissingParameter { param: "query" })?;
        let query = sanitize_text_field(raw);
        if query.is_empty() {
            return Err(ContentError::InvalidInput { param: "query" });
        }

        let search = PostSearch {
            title: LikePattern::contains(&query),
            limit: SEARCH_RESULT_LIMIT,
        };
        tracing::debug!("searching post titles LIKE {:?}", search.title.as_str());

        let posts = self.source.search_posts(&search)?;
        if posts.is_empty() {
            return Err(ContentError::NoSearchResults);
        }

        posts
            .iter()
            .map(|post| project_post(self.source.as_ref(), post))
            .collect()
    }

    /// One page of posts from the first category whose name contains `category_title`.
    ///
    /// `paged` is read as a loose integer and defaults to page 1; values below 1 also mean
    /// page 1.
    ///
    /// # Errors
    ///
    /// - `ContentError::NoCategoryTitle` if the title is absent or empty after sanitising.
    /// - `ContentError::CategoryNotFound` if no category matches.
    /// - `ContentError::NoPosts` if the requested page holds no posts.
    pub fn category_posts(
        &self,
        category_title: Option<&str>,
        paged: Option<&str>,
    ) -> ContentResult<CategoryPostsRes> {
        let title = category_title.map(sanitize_text_field).unwrap_or_default();
        if title.is_empty() {
            return Err(ContentError::NoCategoryTitle);
        }

        let category = self
            .source
            .find_categories(&CategorySearch {
                name_contains: title,
                limit: 1,
            })?
            .into_iter()
            .next()
            .ok_or(ContentError::CategoryNotFound)?;

        let page = paged.map(loose_int).unwrap_or(1).max(1);
        let page = usize::try_from(page).unwrap_or(usize::MAX);

        let result = self.source.posts_in_category(&CategoryPostsQuery {
            term_id: category.term_id,
            page,
            per_page: POSTS_PER_PAGE,
        })?;
        tracing::debug!(
            "category {} ({}) page {}: {} of {} posts",
            category.term_id,
            category.name,
            page,
            result.posts.len(),
            result.found_posts
        );

        if result.posts.is_empty() {
            return Err(ContentError::NoPosts);
        }

        let posts = result
            .posts
            .iter()
            .map(|post| project_post(self.source.as_ref(), post))
            .collect::<ContentResult<Vec<_>>>()?;

        Ok(CategoryPostsRes {
            posts,
            total_pages: result.max_num_pages as u64,
            current_page: page as u64,
        })
    }
}

#[cfg(test)]
mod service_tests {
    use super::*;
    use crate::records::{Category, MenuItem, MetaEntry, Post};
    use crate::source::{ContentSnapshot, PostPage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fixture() -> ContentSnapshot {
        let mut posts = Vec::new();
        for id in 1..=45u64 {
            posts.push(serde_json::json!({
                "id": id,
                "title": format!("Weekly news {id}"),
                "content": "<p>Body</p>",
                "date": format!("2024-01-01 00:{:02}:00", id),
                "categories": [7]
            }));
        }
        posts.push(serde_json::json!({
            "id": 99, "title": "Recipe: 50% less sugar", "date": "2023-01-01 00:00:00",
            "categories": [8]
        }));

        serde_json::from_value(serde_json::json!({
            "site_url": "https://example.com",
            "menus": [{ "id": 5, "items": [
                { "id": 1, "parent": 0, "title": "Home" },
                { "id": 2, "parent": 1, "title": "About" }
            ]}],
            "categories": [
                { "term_id": 7, "name": "Weekly" },
                { "term_id": 8, "name": "Recipes" }
            ],
            "posts": posts
        }))
        .expect("snapshot fixture")
    }

    fn service() -> ContentService {
        ContentService::new(
            Arc::new(CoreConfig::default()),
            Arc::new(InMemoryRecordSource::from_snapshot(fixture())),
        )
    }

    /// Wraps a source and counts how often it is queried.
    struct CountingSource {
        inner: InMemoryRecordSource,
        calls: Arc<AtomicUsize>,
    }

    impl CountingSource {
        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl RecordSource for CountingSource {
        fn menu_items(&self, menu_id: u64) -> ContentResult<Vec<MenuItem>> {
            self.hit();
            self.inner.menu_items(menu_id)
        }
        fn search_posts(&self, search: &PostSearch) -> ContentResult<Vec<Post>> {
            self.hit();
            self.inner.search_posts(search)
        }
        fn find_categories(&self, search: &CategorySearch) -> ContentResult<Vec<Category>> {
            self.hit();
            self.inner.find_categories(search)
        }
        fn posts_in_category(&self, query: &CategoryPostsQuery) -> ContentResult<PostPage> {
            self.hit();
            self.inner.posts_in_category(query)
        }
        fn post_meta(&self, post_id: u64) -> ContentResult<Vec<MetaEntry>> {
            self.inner.post_meta(post_id)
        }
        fn post_category_names(&self, post: &Post) -> ContentResult<Vec<String>> {
            self.inner.post_category_names(post)
        }
        fn author_display_name(&self, author_id: Option<u64>) -> ContentResult<Option<String>> {
            self.inner.author_display_name(author_id)
        }
        fn thumbnail_url(&self, post: &Post) -> ContentResult<Option<String>> {
            self.inner.thumbnail_url(post)
        }
        fn permalink(&self, post: &Post) -> ContentResult<String> {
            self.inner.permalink(post)
        }
    }

    fn counting_service() -> (ContentService, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            inner: InMemoryRecordSource::from_snapshot(fixture()),
            calls: calls.clone(),
        };
        (
            ContentService::new(Arc::new(CoreConfig::default()), Arc::new(source)),
            calls,
        )
    }

    #[test]
    fn menu_is_nested() {
        let tree = service().menu_with_submenus(5).expect("menu");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].slug, "home");
        assert_eq!(tree[0].children[0].name, "About");
        assert!(tree[0].children[0].children.is_empty());
    }

    #[test]
    fn unknown_menu_is_not_found() {
        let err = service().menu_with_submenus(404).expect_err("no menu");
        assert!(matches!(err, ContentError::NoMenu));
        assert_eq!(err.status(), 404);
        assert_eq!(err.code(), "no_menu");
    }

    #[test]
    fn search_without_query_never_reaches_source() {
        let (svc, calls) = counting_service();

        let missing = svc.search(None).expect_err("missing query");
        assert!(matches!(missing, ContentError::MissingParameter { .. }));
        let empty = svc.search(Some("")).expect_err("empty query");
        assert!(matches!(empty, ContentError::InvalidInput { .. }));
        let blank = svc.search(Some(" <b></b> ")).expect_err("blank query");
        assert!(matches!(blank, ContentError::InvalidInput { .. }));

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn search_caps_results() {
        let posts = service().search(Some("weekly")).expect("results");
        assert_eq!(posts.len(), SEARCH_RESULT_LIMIT);
        assert_eq!(posts[0].id, 45);
    }

    #[test]
    fn search_treats_percent_literally() {
        let posts = service().search(Some("50%")).expect("results");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 99);

        let err = service().search(Some("5_%")).expect_err("no literal match");
        assert!(matches!(err, ContentError::NoSearchResults));
    }

    #[test]
    fn search_without_matches_is_not_found() {
        let err = service().search(Some("nonexistent")).expect_err("no results");
        assert!(matches!(err, ContentError::NoSearchResults));
    }

    #[test]
    fn category_title_is_required() {
        let (svc, calls) = counting_service();
        assert!(matches!(
            svc.category_posts(None, None),
            Err(ContentError::NoCategoryTitle)
        ));
        assert!(matches!(
            svc.category_posts(Some("   "), None),
            Err(ContentError::NoCategoryTitle)
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_category_is_not_found() {
        let err = service()
            .category_posts(Some("News"), None)
            .expect_err("no category");
        assert!(matches!(err, ContentError::CategoryNotFound));
        assert_eq!(err.code(), "category_not_found");
    }

    #[test]
    fn category_posts_paginate() {
        let svc = service();

        let first = svc.category_posts(Some("weekly"), None).expect("page 1");
        assert_eq!(first.posts.len(), POSTS_PER_PAGE);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.current_page, 1);
        assert_eq!(first.posts[0].id, 45);

        let last = svc.category_posts(Some("Weekly"), Some("3")).expect("page 3");
        assert_eq!(last.posts.len(), 5);
        assert_eq!(last.current_page, 3);
    }

    #[test]
    fn page_past_the_end_has_no_posts() {
        let svc = service();
        let err = svc
            .category_posts(Some("Recipes"), Some("3"))
            .expect_err("past the end");
        assert!(matches!(err, ContentError::NoPosts));
        assert!(svc.category_posts(Some("Recipes"), Some("1")).is_ok());
    }

    #[test]
    fn unparseable_or_low_page_means_first_page() {
        let svc = service();
        assert_eq!(
            svc.category_posts(Some("Weekly"), Some("abc"))
                .expect("page")
                .current_page,
            1
        );
        assert_eq!(
            svc.category_posts(Some("Weekly"), Some("-4"))
                .expect("page")
                .current_page,
            1
        );
        assert_eq!(
            svc.category_posts(Some("Weekly"), Some("2nd"))
                .expect("page")
                .current_page,
            2
        );
    }
}
