//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Deserializer, Serialize};

/// Request to create a post. Presence of the required fields is checked by
/// the validator, not the deserializer, so missing fields surface as a
/// single descriptive validation error instead of a serde message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub slug: Option<String>,
    pub status: Option<String>,
    pub excerpt: Option<String>,
}

/// Partial post update. `excerpt` distinguishes an absent key (leave the
/// stored value alone) from an explicit `null` (clear it).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub excerpt: Option<Option<String>>,
}

/// Deserialize a present value (including `null`) as `Some`; absent keys
/// stay `None` via `#[serde(default)]`.
fn some_if_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Request to create a comment on a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub content: Option<String>,
}

/// Paging block of a list response. Key casing matches the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(u64::from(limit)),
        }
    }
}

/// One page of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse<T> {
    pub posts: Vec<T>,
    pub pagination: Pagination,
}

/// Acknowledgement for a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_excerpt_absent_vs_null_vs_value() {
        let absent: UpdatePostRequest = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(absent.excerpt, None);

        let null: UpdatePostRequest = serde_json::from_str(r#"{"excerpt":null}"#).unwrap();
        assert_eq!(null.excerpt, Some(None));

        let value: UpdatePostRequest = serde_json::from_str(r#"{"excerpt":"e"}"#).unwrap();
        assert_eq!(value.excerpt, Some(Some("e".to_string())));
    }

    #[test]
    fn pagination_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
    }
}
