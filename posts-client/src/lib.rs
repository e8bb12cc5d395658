//! Client library for the posts service HTTP API.
//!
//! `PostsClient` wraps `reqwest` and maps the service's status codes onto
//! [`PostsClientError`]:
//! - `404` on `GET /posts/{id}` becomes [`PostsClientError::NotFound`]
//! - `405` (posts are immutable) becomes [`PostsClientError::MethodNotAllowed`]
//! - `5xx` becomes [`PostsClientError::Server`]
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{PostsClientError, PostsClientResult};
pub use http_client::PostsClient;
pub use models::{NewPost, Post, PostQuery};
