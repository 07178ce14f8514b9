//! Projection of platform posts into the public response shape.

use api_shared::ProjectedPost;
use indexmap::IndexMap;

use crate::constants::POST_DATE_FORMAT;
use crate::markup::{plain_text, sanitize_post_html};
use crate::records::{MetaEntry, Post};
use crate::source::RecordSource;
use crate::ContentResult;

/// Reshape one post, resolving its categories, author, featured image, URL and custom fields
/// through `source`.
///
/// Missing author or featured image map to `None`.
pub fn project_post(source: &dyn RecordSource, post: &Post) -> ContentResult<ProjectedPost> {
    let meta = source.post_meta(post.id)?;

    Ok(ProjectedPost {
        id: post.id,
        title: post.title.clone(),
        plain_text: plain_text(&post.content),
        content: sanitize_post_html(&post.content),
        published_date: post.date.format(POST_DATE_FORMAT).to_string(),
        categories: source.post_category_names(post)?,
        url: source.permalink(post)?,
        image_url: source.thumbnail_url(post)?,
        author: source.author_display_name(post.author)?,
        custom_fields: dedupe_custom_fields(&meta),
    })
}

/// Group raw meta rows by key and drop repeated values.
///
/// Keys appear in the order they were first stored, and each key's values keep the order of
/// their first occurrence.
pub fn dedupe_custom_fields(rows: &[MetaEntry]) -> IndexMap<String, Vec<String>> {
    let mut fields: IndexMap<String, Vec<String>> = IndexMap::new();
    for row in rows {
        let values = fields.entry(row.key.clone()).or_default();
        if !values.contains(&row.value) {
            values.push(row.value.clone());
        }
    }
    fields
}
