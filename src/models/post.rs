use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Thread, ThreadId};

pub type PostId = i64;

/// A post in a thread - internal DB representation
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub thread: i64,
    /// 0 for root posts
    pub parent: i64,
    pub author: String,
    pub message: String,
    pub forum: String,
    pub is_edited: bool,
    pub created: DateTime<Utc>,
}

/// A message in a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Assigned in creation order, also within a batch sharing one timestamp
    pub id: PostId,
    #[serde(rename = "thread")]
    pub thread_id: ThreadId,
    /// Parent post ID (0 for root posts)
    #[serde(rename = "parent")]
    pub parent_id: PostId,
    pub author: String,
    pub message: String,
    /// Slug of the forum owning the thread
    pub forum: String,
    pub is_edited: bool,
    pub created: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            thread_id: row.thread,
            parent_id: row.parent,
            author: row.author,
            message: row.message,
            forum: row.forum,
            is_edited: row.is_edited,
            created: row.created,
        }
    }
}

impl Post {
    pub fn new(
        id: PostId,
        thread_id: ThreadId,
        parent_id: PostId,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Post {
            id,
            thread_id,
            parent_id,
            author: author.into(),
            message: message.into(),
            forum: String::new(),
            is_edited: false,
            created: Utc::now(),
        }
    }

    /// Check if this post starts a new discussion branch
    pub fn is_root(&self) -> bool {
        self.parent_id == 0
    }
}

/// One entry of a `POST /thread/{slug_or_id}/create` batch
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub author: String,
    pub message: String,
    /// Post being replied to; 0 or absent starts a new root
    #[serde(default)]
    pub parent: PostId,
}

/// Body of `POST /post/{id}/details`; an empty message changes nothing
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub message: String,
}

/// A post with the related objects asked for through `?related=`
#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub post: Post,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
}

/// Which related objects to attach to a post detail
#[derive(Debug, Default, Deserialize)]
pub struct PostDetailsParams {
    pub related: Option<String>,
}

impl PostDetailsParams {
    /// `related` is a comma-separated list, e.g. `user,thread`
    pub fn wants(&self, kind: &str) -> bool {
        self.related
            .as_deref()
            .map(|r| r.split(',').any(|item| item.trim() == kind))
            .unwrap_or(false)
    }
}
