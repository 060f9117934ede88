use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    /// Parse the wire/store representation. Returns `None` for anything
    /// outside the `draft | published | archived` enum.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post entity - a blog post as stored and served.
///
/// Invariants: `slug` matches `^[a-z0-9-]{1,100}$` and is unique across
/// posts; `published_at` is `Some` iff the post has ever been published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub slug: String,
    pub status: PostStatus,
    pub excerpt: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Merge a validated patch into the post.
    ///
    /// `published_at` is written exactly once, on the first transition into
    /// `published`; later updates (including publish -> publish) leave it
    /// untouched.
    pub fn apply(&mut self, patch: PostPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if self.status.is_published() && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = now;
    }
}

/// A validated, normalized post ready for insertion.
///
/// Produced only by the request validator, so the slug is guaranteed valid
/// and every text field is sanitized and within its length cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub slug: String,
    pub status: PostStatus,
    pub excerpt: Option<String>,
}

/// A validated partial update.
///
/// `excerpt` distinguishes "leave unchanged" (`None`) from "clear"
/// (`Some(None)`), matching the wire format's absent-vs-null split.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
    pub excerpt: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Post {
        let now = Utc::now();
        Post {
            id: 1,
            title: "Title".to_string(),
            content: "Content".to_string(),
            author: "Author".to_string(),
            slug: "title".to_string(),
            status: PostStatus::Draft,
            excerpt: None,
            created_at: now,
            updated_at: now,
            published_at: None,
        }
    }

    #[test]
    fn publish_sets_published_at_once() {
        let mut post = draft();
        let first = Utc::now();
        post.apply(
            PostPatch {
                status: Some(PostStatus::Published),
                ..Default::default()
            },
            first,
        );
        assert_eq!(post.published_at, Some(first));

        // Publishing again must not move the timestamp.
        let later = first + chrono::Duration::hours(1);
        post.apply(
            PostPatch {
                status: Some(PostStatus::Published),
                ..Default::default()
            },
            later,
        );
        assert_eq!(post.published_at, Some(first));
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn archive_does_not_touch_published_at() {
        let mut post = draft();
        post.apply(
            PostPatch {
                status: Some(PostStatus::Archived),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(post.published_at, None);
    }

    #[test]
    fn excerpt_clear_vs_keep() {
        let mut post = draft();
        post.excerpt = Some("old".to_string());

        post.apply(
            PostPatch {
                title: Some("New title".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(post.excerpt.as_deref(), Some("old"));

        post.apply(
            PostPatch {
                excerpt: Some(None),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(post.excerpt, None);
    }

    #[test]
    fn status_round_trip() {
        for status in [PostStatus::Draft, PostStatus::Published, PostStatus::Archived] {
            assert_eq!(PostStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PostStatus::parse("deleted"), None);
    }
}
