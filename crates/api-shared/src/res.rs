//! Response bodies.
//!
//! Field names match the JSON consumed by the existing frontend, so renaming a field here is a
//! breaking API change.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// One entry of a navigation menu, with its submenu entries nested under `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuNode {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub children: Vec<MenuNode>,
}

/// A published post reshaped for the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectedPost {
    pub id: u64,
    pub title: String,
    /// Body with all markup removed and newlines collapsed to spaces.
    pub plain_text: String,
    /// Body with disallowed markup removed.
    pub content: String,
    /// `YYYY-MM-DD HH:MM:SS` in site-local time.
    pub published_date: String,
    pub categories: Vec<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub author: Option<String>,
    /// Custom field key to its distinct stored values, in first-stored order.
    #[schema(value_type = Object)]
    pub custom_fields: IndexMap<String, Vec<String>>,
}

/// Page of posts belonging to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryPostsRes {
    pub posts: Vec<ProjectedPost>,
    pub total_pages: u64,
    pub current_page: u64,
}

/// Error envelope in the shape the hosting platform uses for its own REST errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub code: String,
    pub message: String,
    pub data: ErrorData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorData {
    pub status: u16,
}

impl ErrorRes {
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: ErrorData { status },
        }
    }
}

/// Bare message body returned by the search endpoint when nothing matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

#[cfg(test)]
mod res_tests {
    use super::*;

    #[test]
    fn error_envelope_nests_status_under_data() {
        let body = serde_json::to_value(ErrorRes::new("no_menu", "Menu not found", 404))
            .expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({
                "code": "no_menu",
                "message": "Menu not found",
                "data": { "status": 404 }
            })
        );
    }

    #[test]
    fn custom_fields_keep_insertion_order() {
        let mut custom_fields = IndexMap::new();
        custom_fields.insert("zeta".to_string(), vec!["1".to_string()]);
        custom_fields.insert("alpha".to_string(), vec!["2".to_string()]);
        let post = ProjectedPost {
            id: 1,
            title: "t".into(),
            plain_text: "t".into(),
            content: "t".into(),
            published_date: "2024-01-01 00:00:00".into(),
            categories: vec![],
            url: "https://example.com/?p=1".into(),
            image_url: None,
            author: None,
            custom_fields,
        };

        let json = serde_json::to_string(&post).expect("serialize");
        let zeta = json.find("\"zeta\"").expect("zeta present");
        let alpha = json.find("\"alpha\"").expect("alpha present");
        assert!(zeta < alpha);
        assert!(json.contains("\"image_url\":null"));
    }
}
