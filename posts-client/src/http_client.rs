use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::error::{PostsClientError, PostsClientResult};
use crate::models::{NewPost, Post, PostQuery};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Clone)]
/// HTTP client for the posts service REST API.
pub struct PostsClient {
    base_url: String,
    client: Client,
}

impl PostsClient {
    /// Creates a client for the server at `base_url`, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> PostsClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: Response) -> PostsClientError {
        let status = response.status();
        // 404 carries plain text; everything else uses `{"error": ...}`.
        let message = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorResponseDto>(&text)
                .ok()
                .and_then(|body| body.error)
                .or_else(|| (!text.is_empty()).then_some(text)),
            Err(_) => None,
        };
        PostsClientError::from_http_status(status, message)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
        expected: StatusCode,
    ) -> PostsClientResult<T> {
        if response.status() != expected {
            return Err(Self::decode_error(response).await);
        }
        Ok(response.json::<T>().await?)
    }

    /// Creates a post. Published posts come back with `published_date` set.
    pub async fn create_post(&self, post: &NewPost) -> PostsClientResult<Post> {
        let response = self
            .client
            .post(self.endpoint("/posts"))
            .json(post)
            .send()
            .await?;
        Self::decode(response, StatusCode::CREATED).await
    }

    /// Lists posts in creation order, optionally filtered.
    pub async fn list_posts(&self, query: &PostQuery) -> PostsClientResult<Vec<Post>> {
        let response = self
            .client
            .get(self.endpoint("/posts"))
            .query(query)
            .send()
            .await?;
        Self::decode(response, StatusCode::OK).await
    }

    /// Fetches a post by id; a missing post is [`PostsClientError::NotFound`].
    pub async fn get_post(&self, id: i64) -> PostsClientResult<Post> {
        let response = self
            .client
            .get(self.endpoint(&format!("/posts/{id}")))
            .send()
            .await?;
        Self::decode(response, StatusCode::OK).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::PostsClient;
    use crate::models::{NewPost, Post, PostQuery};

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = PostsClient::new("http://127.0.0.1:8080/").expect("client must build");
        assert_eq!(client.endpoint("/posts"), "http://127.0.0.1:8080/posts");
        assert_eq!(client.endpoint("posts/3"), "http://127.0.0.1:8080/posts/3");
    }

    #[test]
    fn new_post_uses_camel_case_fields() {
        let payload = NewPost {
            title: "A".to_string(),
            author: 1,
            timestamp: 1000,
            is_published: true,
        };
        assert_eq!(
            serde_json::to_value(&payload).expect("must serialize"),
            json!({"title": "A", "author": 1, "timestamp": 1000, "isPublished": true})
        );
    }

    #[test]
    fn draft_decodes_without_published_date() {
        let post: Post = serde_json::from_value(
            json!({"id": 4, "title": "A", "author": 1, "timestamp": 1000, "isPublished": false}),
        )
        .expect("must decode");
        assert_eq!(post.published_date, None);
    }

    #[test]
    fn empty_query_sends_no_filters() {
        assert_eq!(
            serde_json::to_value(PostQuery::default()).expect("must serialize"),
            json!({})
        );
    }
}
