#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Invalid parameter(s): {param}")]
    InvalidInput { param: &'static str },
    #[error("Missing parameter(s): {param}")]
    MissingParameter { param: &'static str },

    #[error("Menu not found")]
    NoMenu,
    #[error("No results found")]
    NoSearchResults,
    #[error("Category title is required")]
    NoCategoryTitle,
    #[error("Category not found")]
    CategoryNotFound,
    #[error("No posts found in this category")]
    NoPosts,

    #[error("menu item {item_id} is reachable from more than one parent (cycle in menu)")]
    MenuCycle { item_id: u64 },
    #[error("menu nesting exceeds maximum depth of {max_depth}")]
    MenuTooDeep { max_depth: usize },

    #[error("failed to read content snapshot: {0}")]
    SnapshotRead(std::io::Error),
    #[error("failed to parse content snapshot: {0}")]
    SnapshotParse(serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ContentError {
    /// Machine-readable code sent to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            ContentError::InvalidInput { .. } => "rest_invalid_param",
            ContentError::MissingParameter { .. } => "rest_missing_callback_param",
            ContentError::NoMenu => "no_menu",
            ContentError::NoSearchResults => "no_results",
            ContentError::NoCategoryTitle => "no_category_title",
            ContentError::CategoryNotFound => "category_not_found",
            ContentError::NoPosts => "no_posts",
            ContentError::MenuCycle { .. } | ContentError::MenuTooDeep { .. } => "menu_malformed",
            ContentError::SnapshotRead(_)
            | ContentError::SnapshotParse(_)
            | ContentError::InvalidConfig(_) => "internal_error",
        }
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            ContentError::InvalidInput { .. }
            | ContentError::MissingParameter { .. }
            | ContentError::NoCategoryTitle => 400,
            ContentError::NoMenu
            | ContentError::NoSearchResults
            | ContentError::CategoryNotFound
            | ContentError::NoPosts => 404,
            ContentError::MenuCycle { .. }
            | ContentError::MenuTooDeep { .. }
            | ContentError::SnapshotRead(_)
            | ContentError::SnapshotParse(_)
            | ContentError::InvalidConfig(_) => 500,
        }
    }

    /// Whether the error was caused by the request rather than by the server or its data.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status())
    }
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;
