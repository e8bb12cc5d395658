use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::post::{CreatePostRequest, Post, PostFilter};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult, ErrorBody};

/// Create payload. Values are coerced loosely and anything unusable reaches
/// the store as NULL, where the NOT NULL columns reject it.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostDto {
    #[schema(value_type = Option<String>)]
    pub(crate) title: Option<Value>,
    #[schema(value_type = Option<i64>)]
    pub(crate) author: Option<Value>,
    #[schema(value_type = Option<i64>)]
    pub(crate) timestamp: Option<Value>,
    #[schema(value_type = Option<bool>)]
    pub(crate) is_published: Option<Value>,
}

/// List filters as raw query-string values; the first occurrence of a key wins.
#[derive(Debug, Default)]
pub(crate) struct ListPostsQuery {
    pub(crate) author: Option<String>,
    pub(crate) is_published: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: i64,
    pub(crate) timestamp: i64,
    pub(crate) is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) published_date: Option<i64>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: post.author,
            timestamp: post.timestamp,
            is_published: post.is_published,
            published_date: post.published_date,
        }
    }
}

impl From<CreatePostDto> for CreatePostRequest {
    fn from(dto: CreatePostDto) -> Self {
        Self {
            title: dto.title.as_ref().and_then(coerce_text),
            author: dto.author.as_ref().and_then(coerce_integer),
            timestamp: dto.timestamp.as_ref().and_then(coerce_integer),
            is_published: dto.is_published.as_ref().is_some_and(is_truthy),
        }
    }
}

impl ListPostsQuery {
    pub(crate) fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "author" => &mut query.author,
                "isPublished" => &mut query.is_published,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// `None` when the author value cannot name any stored post.
    pub(crate) fn into_filter(self) -> Option<PostFilter> {
        let author = match self.author {
            Some(raw) => Some(parse_integer(raw.trim())?),
            None => None,
        };

        // Anything but a literal boolean disables the filter.
        let is_published = self
            .is_published
            .and_then(|raw| raw.parse::<bool>().ok());

        Some(PostFilter {
            author,
            is_published,
        })
    }
}

/// Optional `-` followed by ASCII digits only.
fn parse_integer(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Integral numbers (`1000`, `1000.0`) and numeric strings (`"1"`).
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64)
                .map(|n| n as i64)
        }),
        Value::String(text) => parse_integer(text.trim()),
        _ => None,
    }
}

/// Scalars are stored as their text form; null and containers are not text.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Loose truthiness for `isPublished` in create payloads.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    params(
        ("author" = Option<i64>, Query, description = "Only posts by this author; a non-integer matches nothing"),
        ("isPublished" = Option<String>, Query, description = "`true` or `false`; other values disable the filter")
    ),
    responses(
        (status = 200, description = "Posts in creation order", body = [PostDto]),
        (status = 500, description = "Storage error", body = ErrorBody)
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let Some(filter) = ListPostsQuery::from_pairs(pairs).into_filter() else {
        return Ok((StatusCode::OK, Json(Vec::new())));
    };

    let posts = state.post_service.list_posts(filter).await?;

    Ok((
        StatusCode::OK,
        Json(posts.into_iter().map(PostDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage error", body = ErrorBody)
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    // Only the canonical decimal form names a stored post.
    let Some(id) = parse_integer(&id) else {
        return Err(AppError::PostNotFound);
    };

    let post = state
        .post_service
        .get_post(id)
        .await?
        .ok_or(AppError::PostNotFound)?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Body is not parseable JSON", body = ErrorBody),
        (status = 500, description = "Storage error", body = ErrorBody)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let dto = match payload {
        Ok(Json(dto)) => dto,
        // No JSON body at all: forward an empty payload and let the store decide.
        Err(JsonRejection::MissingJsonContentType(_)) => CreatePostDto::default(),
        Err(err) => return Err(AppError::BadRequest(err.body_text())),
    };

    let post = state.post_service.create_post(dto.into()).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

/// Posts are immutable through the API.
pub(crate) async fn reject_mutation() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}
