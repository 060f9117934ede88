use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - a reader comment attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub author_name: String,
    pub author_email: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A sanitized comment ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: i32,
    pub author_name: String,
    pub author_email: Option<String>,
    pub content: String,
}
