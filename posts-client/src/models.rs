use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A stored blog post.
pub struct Post {
    /// Identifier assigned by the server.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Identifier of the authoring user.
    pub author: i64,
    /// Authored time, epoch milliseconds.
    pub timestamp: i64,
    /// Whether the post is published.
    pub is_published: bool,
    /// Server time of publication, epoch milliseconds. Absent for drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
/// Payload for creating a post.
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Identifier of the authoring user.
    pub author: i64,
    /// Authored time, epoch milliseconds.
    pub timestamp: i64,
    /// Publish immediately instead of saving a draft.
    pub is_published: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
/// Optional filters for listing posts; unset fields are not sent.
pub struct PostQuery {
    /// Only posts by this author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<i64>,
    /// Only published (`true`) or draft (`false`) posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}
