//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads environment variables.

use crate::constants::{DEFAULT_CONTENT_DATA_FILE, DEFAULT_MAX_MENU_DEPTH};
use crate::{ContentError, ContentResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    content_data_file: PathBuf,
    max_menu_depth: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidConfig` if `max_menu_depth` is zero.
    pub fn new(content_data_file: PathBuf, max_menu_depth: usize) -> ContentResult<Self> {
        if max_menu_depth == 0 {
            return Err(ContentError::InvalidConfig(
                "max_menu_depth must be at least 1".into(),
            ));
        }

        Ok(Self {
            content_data_file,
            max_menu_depth,
        })
    }

    pub fn content_data_file(&self) -> &Path {
        &self.content_data_file
    }

    pub fn max_menu_depth(&self) -> usize {
        self.max_menu_depth
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            content_data_file: PathBuf::from(DEFAULT_CONTENT_DATA_FILE),
            max_menu_depth: DEFAULT_MAX_MENU_DEPTH,
        }
    }
}

/// Resolve the content snapshot path from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_CONTENT_DATA_FILE`].
pub fn content_data_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DATA_FILE))
}

/// Parse the maximum menu depth from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MAX_MENU_DEPTH`].
///
/// # Errors
///
/// Returns `ContentError::InvalidConfig` if the value is not a positive integer.
pub fn max_menu_depth_from_env_value(value: Option<String>) -> ContentResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(value) = value else {
        return Ok(DEFAULT_MAX_MENU_DEPTH);
    };

    match value.parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(depth),
        _ => Err(ContentError::InvalidConfig(format!(
            "CONTENT_MAX_MENU_DEPTH must be a positive integer, got {value:?}"
        ))),
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn max_menu_depth_defaults_when_unset_or_blank() {
        assert_eq!(
            max_menu_depth_from_env_value(None).unwrap(),
            DEFAULT_MAX_MENU_DEPTH
        );
        assert_eq!(
            max_menu_depth_from_env_value(Some("  ".into())).unwrap(),
            DEFAULT_MAX_MENU_DEPTH
        );
    }

    #[test]
    fn max_menu_depth_rejects_zero_and_garbage() {
        assert!(matches!(
            max_menu_depth_from_env_value(Some("0".into())),
            Err(ContentError::InvalidConfig(_))
        ));
        assert!(matches!(
            max_menu_depth_from_env_value(Some("deep".into())),
            Err(ContentError::InvalidConfig(_))
        ));
        assert_eq!(max_menu_depth_from_env_value(Some(" 8 ".into())).unwrap(), 8);
    }

    #[test]
    fn content_data_file_falls_back_to_default() {
        assert_eq!(
            content_data_file_from_env_value(Some(String::new())),
            PathBuf::from(DEFAULT_CONTENT_DATA_FILE)
        );
        assert_eq!(
            content_data_file_from_env_value(Some("/srv/site.json".into())),
            PathBuf::from("/srv/site.json")
        );
    }

    #[test]
    fn core_config_rejects_zero_depth() {
        assert!(CoreConfig::new(PathBuf::from("x.json"), 0).is_err());
    }
}
