use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, PostFilter};

pub(crate) struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub(crate) fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Persists a post. Published posts are stamped with the current server
    /// time; drafts never carry a `published_date`.
    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let published_date = req.is_published.then(current_millis);

        let new_post = NewPost {
            title: req.title,
            author: req.author,
            timestamp: req.timestamp,
            is_published: req.is_published,
            published_date,
        };
        let post = self.repo.create_post(new_post).await?;

        info!(
            post_id = post.id,
            author = post.author,
            is_published = post.is_published,
            "post created"
        );
        Ok(post)
    }

    pub(crate) async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError> {
        self.repo.list_posts(filter).await
    }

    /// `Ok(None)` when no post has this id.
    pub(crate) async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        self.repo.get_post(id).await
    }
}

fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::PostService;
    use crate::data::post_repository::{NewPost, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::{CreatePostRequest, Post, PostFilter};

    #[derive(Clone)]
    struct FakePostRepo {
        created_input: Arc<Mutex<Option<NewPost>>>,
        post_for_get: Arc<Mutex<Option<Post>>>,
        list_filter: Arc<Mutex<Option<PostFilter>>>,
        list_result: Arc<Mutex<Vec<Post>>>,
    }

    impl FakePostRepo {
        fn new() -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                post_for_get: Arc::new(Mutex::new(None)),
                list_filter: Arc::new(Mutex::new(None)),
                list_result: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            Post::new(
                1,
                input.title.unwrap_or_default(),
                input.author.unwrap_or_default(),
                input.timestamp.unwrap_or_default(),
                input.is_published,
                input.published_date,
            )
        }

        async fn get_post(&self, _id: i64) -> Result<Option<Post>, DomainError> {
            Ok(self
                .post_for_get
                .lock()
                .expect("post_for_get mutex poisoned")
                .clone())
        }

        async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError> {
            *self.list_filter.lock().expect("list_filter mutex poisoned") = Some(filter);
            Ok(self
                .list_result
                .lock()
                .expect("list_result mutex poisoned")
                .clone())
        }
    }

    fn request(is_published: bool) -> CreatePostRequest {
        CreatePostRequest {
            title: Some("title".to_string()),
            author: Some(10),
            timestamp: Some(1_531_522_701_000),
            is_published,
        }
    }

    #[tokio::test]
    async fn create_published_post_stamps_published_date() {
        let repo = FakePostRepo::new();
        let service = PostService::new(Arc::new(repo.clone()));

        let before = Utc::now().timestamp_millis();
        let created = service
            .create_post(request(true))
            .await
            .expect("create_post must succeed");
        let after = Utc::now().timestamp_millis();

        let published_date = created.published_date.expect("published_date must be set");
        assert!((before..=after).contains(&published_date));

        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert!(input.is_published);
        assert_eq!(input.timestamp, Some(1_531_522_701_000));
        assert_eq!(input.author, Some(10));
    }

    #[tokio::test]
    async fn create_draft_omits_published_date() {
        let repo = FakePostRepo::new();
        let service = PostService::new(Arc::new(repo.clone()));

        let created = service
            .create_post(request(false))
            .await
            .expect("create_post must succeed");

        assert!(!created.is_published);
        assert!(created.published_date.is_none());

        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert!(input.published_date.is_none());
    }

    #[tokio::test]
    async fn get_post_returns_none_when_missing() {
        let service = PostService::new(Arc::new(FakePostRepo::new()));

        let result = service.get_post(42).await.expect("lookup must not fail");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn list_posts_forwards_filter_to_repo() {
        let repo = FakePostRepo::new();
        *repo.list_result.lock().expect("list_result mutex poisoned") = vec![
            Post::new(3, "a", 1, 1_000, true, Some(2_000)).expect("sample post must be valid"),
        ];
        let service = PostService::new(Arc::new(repo.clone()));

        let filter = PostFilter {
            author: Some(1),
            is_published: Some(true),
        };
        let posts = service
            .list_posts(filter)
            .await
            .expect("list_posts must succeed");

        assert_eq!(posts.len(), 1);
        assert_eq!(
            *repo.list_filter.lock().expect("list_filter mutex poisoned"),
            Some(filter)
        );
    }
}
