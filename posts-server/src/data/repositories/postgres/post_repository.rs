use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostFilter};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    author: i64,
    timestamp: i64,
    is_published: bool,
    published_date: Option<i64>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, author, "timestamp", is_published, published_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, "timestamp", is_published, published_date
            "#,
        )
        .bind(input.title)
        .bind(input.author)
        .bind(input.timestamp)
        .bind(input.is_published)
        .bind(input.published_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                title,
                author,
                "timestamp",
                is_published,
                published_date
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                title,
                author,
                "timestamp",
                is_published,
                published_date
            FROM posts
            WHERE ($1::BIGINT IS NULL OR author = $1)
              AND ($2::BOOLEAN IS NULL OR is_published = $2)
            ORDER BY id ASC
            "#,
        )
        .bind(filter.author)
        .bind(filter.is_published)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(
        row.id,
        row.title,
        row.author,
        row.timestamp,
        row.is_published,
        row.published_date,
    )
    .map_err(|err| DomainError::Storage(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        // 23502 not_null_violation carries the column, not a constraint name.
        if db_err.code().as_deref() == Some("23502") {
            return DomainError::Storage(format!("missing required column: {}", db_err.message()));
        }
        if let Some(constraint) = db_err.constraint() {
            return DomainError::Storage(format!("constraint '{constraint}' violated"));
        }
    }
    DomainError::Storage(err.to_string())
}
