use super::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: i64,
    /// Authored time in epoch milliseconds, supplied by the caller.
    pub(crate) timestamp: i64,
    pub(crate) is_published: bool,
    /// Server time in epoch milliseconds; set iff `is_published`.
    pub(crate) published_date: Option<i64>,
}

/// Create intent as received from the API. Required columns stay optional
/// here so that the store's constraints decide what a missing field means.
#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) author: Option<i64>,
    pub(crate) timestamp: Option<i64>,
    pub(crate) is_published: bool,
}

/// Exact-match filters for listing; `None` disables a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PostFilter {
    pub(crate) author: Option<i64>,
    pub(crate) is_published: Option<bool>,
}

impl Post {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        author: i64,
        timestamp: i64,
        is_published: bool,
        published_date: Option<i64>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }

        if published_date.is_some() != is_published {
            return Err(DomainError::Validation {
                field: "published_date",
                message: "must be present iff is_published",
            });
        }

        Ok(Self {
            id,
            title: title.into(),
            author,
            timestamp,
            is_published,
            published_date,
        })
    }
}
