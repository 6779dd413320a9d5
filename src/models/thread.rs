use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub type ThreadId = i64;

/// A discussion thread within a forum
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Thread {
    pub id: ThreadId,
    /// Optional human-readable identifier, unique when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    pub author: String,
    /// Slug of the forum the thread belongs to
    pub forum: String,
    pub message: String,
    pub votes: i32,
    pub created: DateTime<Utc>,
}

/// Request to open a thread in a forum
#[derive(Debug, Deserialize)]
pub struct CreateThreadRequest {
    pub author: String,
    pub title: String,
    pub message: String,
    pub slug: Option<String>,
    /// Defaults to the time of insertion
    pub created: Option<DateTime<Utc>>,
}

/// Request to change a thread; absent or empty fields are left as they are
#[derive(Debug, Default, Deserialize)]
pub struct UpdateThreadRequest {
    pub title: Option<String>,
    pub message: Option<String>,
}

impl UpdateThreadRequest {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.title().is_none() && self.message().is_none()
    }
}

/// How a thread is addressed in URLs: numeric id or slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadRef<'a> {
    Id(ThreadId),
    Slug(&'a str),
}

impl<'a> ThreadRef<'a> {
    pub fn parse(slug_or_id: &'a str) -> Self {
        match slug_or_id.parse::<ThreadId>() {
            Ok(id) => ThreadRef::Id(id),
            Err(_) => ThreadRef::Slug(slug_or_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_ref_parse() {
        assert_eq!(ThreadRef::parse("42"), ThreadRef::Id(42));
        assert_eq!(ThreadRef::parse("rust-news"), ThreadRef::Slug("rust-news"));
        assert_eq!(ThreadRef::parse("42a"), ThreadRef::Slug("42a"));
    }

    #[test]
    fn test_update_request_ignores_empty_fields() {
        let req: UpdateThreadRequest =
            serde_json::from_str(r#"{"title":"","message":"new"}"#).unwrap();
        assert_eq!(req.title(), None);
        assert_eq!(req.message(), Some("new"));
        assert!(!req.is_empty());

        let req: UpdateThreadRequest = serde_json::from_str("{}").unwrap();
        assert!(req.is_empty());
    }
}
