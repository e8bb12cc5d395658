use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostFilter};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: Option<String>,
    pub(crate) author: Option<i64>,
    pub(crate) timestamp: Option<i64>,
    pub(crate) is_published: bool,
    pub(crate) published_date: Option<i64>,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// Matching posts in insertion order.
    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError>;
}
