use std::sync::Mutex;

use async_trait::async_trait;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostFilter};

/// Vec-backed store with the same NOT NULL semantics as the `posts` table.
#[derive(Debug, Default)]
pub(crate) struct InMemoryPostRepository {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<Post>,
    next_id: i64,
    failure: Option<String>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with `DomainError::Storage`.
    pub(crate) fn fail_with(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory repository mutex poisoned")
    }
}

impl MemoryState {
    fn check_failure(&self) -> Result<(), DomainError> {
        match &self.failure {
            Some(message) => Err(DomainError::Storage(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut state = self.lock();
        state.check_failure()?;

        let title = input.title.ok_or_else(|| not_null("title"))?;
        let author = input.author.ok_or_else(|| not_null("author"))?;
        let timestamp = input.timestamp.ok_or_else(|| not_null("timestamp"))?;

        state.next_id += 1;
        let post = Post::new(
            state.next_id,
            title,
            author,
            timestamp,
            input.is_published,
            input.published_date,
        )
        .map_err(|err| DomainError::Storage(err.to_string()))?;

        state.rows.push(post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let state = self.lock();
        state.check_failure()?;
        Ok(state.rows.iter().find(|post| post.id == id).cloned())
    }

    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError> {
        let state = self.lock();
        state.check_failure()?;
        Ok(state
            .rows
            .iter()
            .filter(|post| matches_filter(post, filter))
            .cloned()
            .collect())
    }
}

fn matches_filter(post: &Post, filter: PostFilter) -> bool {
    filter.author.is_none_or(|author| post.author == author)
        && filter
            .is_published
            .is_none_or(|is_published| post.is_published == is_published)
}

fn not_null(column: &str) -> DomainError {
    DomainError::Storage(format!("null value in column \"{column}\""))
}

#[cfg(test)]
mod tests {
    use super::InMemoryPostRepository;
    use crate::data::post_repository::{NewPost, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::PostFilter;

    fn draft(title: &str, author: i64) -> NewPost {
        NewPost {
            title: Some(title.to_string()),
            author: Some(author),
            timestamp: Some(1_000),
            is_published: false,
            published_date: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryPostRepository::new();

        let first = repo.create_post(draft("a", 1)).await.expect("insert a");
        let second = repo.create_post(draft("b", 1)).await.expect("insert b");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn create_rejects_missing_title_like_not_null_column() {
        let repo = InMemoryPostRepository::new();
        let mut input = draft("a", 1);
        input.title = None;

        let err = repo.create_post(input).await.expect_err("title is required");
        assert!(matches!(err, DomainError::Storage(_)));
    }

    #[tokio::test]
    async fn list_applies_filters_in_insertion_order() {
        let repo = InMemoryPostRepository::new();
        repo.create_post(draft("a", 1)).await.expect("insert a");
        repo.create_post(draft("b", 2)).await.expect("insert b");
        repo.create_post(draft("c", 1)).await.expect("insert c");

        let posts = repo
            .list_posts(PostFilter {
                author: Some(1),
                is_published: Some(false),
            })
            .await
            .expect("list must succeed");

        let titles: Vec<_> = posts.iter().map(|post| post.title.as_str()).collect();
        assert_eq!(titles, ["a", "c"]);
    }
}
