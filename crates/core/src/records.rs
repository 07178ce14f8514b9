//! Native record shapes as stored by the content platform.
//!
//! These are read-only snapshots: the core never mutates or persists them. Field names follow the
//! JSON content snapshot format read by [`crate::source::InMemoryRecordSource`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use crate::constants::{POST_DATE_FORMAT, POST_TYPE_POST, STATUS_PUBLISH};

/// One navigation entry of a menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuItem {
    pub id: u64,
    /// Id of the parent menu item, `0` for top-level items.
    #[serde(default)]
    pub parent: u64,
    pub title: String,
    #[serde(default)]
    pub menu_order: i64,
}

/// A raw custom-field row. Several rows may share a key, and their values may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetaEntry {
    pub key: String,
    pub value: String,
}

impl MetaEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A publishable content record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    /// Marked-up body.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    #[serde(deserialize_with = "deserialize_post_date")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub author: Option<u64>,
    /// Category term ids, in the order the platform returns them.
    #[serde(default)]
    pub categories: Vec<u64>,
    /// Attachment id of the featured image.
    #[serde(default)]
    pub thumbnail: Option<u64>,
    #[serde(default)]
    pub meta: Vec<MetaEntry>,
}

impl Post {
    /// Published posts of the regular `post` type are the only ones the endpoints expose.
    pub fn is_published_post(&self) -> bool {
        self.status == STATUS_PUBLISH && self.post_type == POST_TYPE_POST
    }
}

fn default_status() -> String {
    STATUS_PUBLISH.to_string()
}

fn default_post_type() -> String {
    POST_TYPE_POST.to_string()
}

fn deserialize_post_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, POST_DATE_FORMAT).map_err(serde::de::Error::custom)
}

/// A taxonomy term posts can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub term_id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// Parent term id, `0` for top-level categories.
    #[serde(default)]
    pub parent: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub id: u64,
    pub display_name: String,
}

/// Uploaded media, referenced by posts as their featured image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    pub id: u64,
    pub url: String,
}
