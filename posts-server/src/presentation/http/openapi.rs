use utoipa::OpenApi;

use crate::presentation::http::app_error::ErrorBody;
use crate::presentation::http::handlers::posts::{CreatePostDto, PostDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post
    ),
    components(schemas(CreatePostDto, PostDto, ErrorBody)),
    tags(
        (name = "posts", description = "Blog post endpoints; posts cannot be updated or deleted")
    )
)]
pub(crate) struct ApiDoc;
