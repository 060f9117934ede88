//! Request validation for post mutations.
//!
//! The validator is the single gate in front of persistence: it checks
//! required fields, sanitizes every free-text field, resolves the slug,
//! validates the status enum and enforces slug uniqueness through the
//! [`SlugLookup`] collaborator. Rules run in a fixed order and the first
//! failure wins - callers never see more than one error per request.

use thiserror::Error;

use crate::domain::{NewPost, PostPatch, PostStatus};
use crate::error::{RepoError, ValidationError};
use crate::ports::{PostQuery, SlugLookup};
use crate::{sanitize, slug};

/// Length caps per field, in characters.
pub const TITLE_MAX: usize = 200;
pub const CONTENT_MAX: usize = 50_000;
pub const AUTHOR_MAX: usize = 100;
pub const EXCERPT_MAX: usize = 500;

/// Listing bounds.
pub const PAGE_MAX: u32 = 1000;
pub const LIMIT_MAX: u32 = 100;

/// Raw create payload as it came off the wire.
#[derive(Debug, Clone, Default)]
pub struct CreatePayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub slug: Option<String>,
    pub status: Option<String>,
    pub excerpt: Option<String>,
}

/// Raw update payload. `excerpt` keeps the absent/null distinction:
/// `None` leaves the stored excerpt alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdatePayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub excerpt: Option<Option<String>>,
}

/// A validation run that had to consult the store.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Stateless mutation validator. Pure given its collaborator's read-only
/// lookups; it never writes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator;

impl RequestValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate and normalize a create request.
    pub async fn validate_create<S>(
        &self,
        payload: CreatePayload,
        slugs: &S,
    ) -> Result<NewPost, ValidateError>
    where
        S: SlugLookup + ?Sized,
    {
        let (title, content, author) = match (
            non_empty(payload.title),
            non_empty(payload.content),
            non_empty(payload.author),
        ) {
            (Some(t), Some(c), Some(a)) => (t, c, a),
            _ => return Err(ValidationError::MissingFields("title, content, author").into()),
        };

        let title = sanitize::sanitize(&title, TITLE_MAX);
        let content = sanitize::sanitize(&content, CONTENT_MAX);
        let author = sanitize::sanitize(&author, AUTHOR_MAX);

        // A field that was only markup sanitizes to nothing and counts as
        // missing, same as an absent key.
        if title.is_empty() || content.is_empty() || author.is_empty() {
            return Err(ValidationError::MissingFields("title, content, author").into());
        }

        let excerpt = non_empty(payload.excerpt).map(|e| sanitize::sanitize(&e, EXCERPT_MAX));

        let resolved_slug = match non_empty(payload.slug) {
            Some(supplied) => {
                let normalized = slug::normalize(&supplied);
                if !slug::is_valid(&normalized) {
                    return Err(ValidationError::InvalidSlug.into());
                }
                normalized
            }
            // Derived slugs are valid by construction.
            None => slug::from_title(&title),
        };

        let status = match payload.status {
            None => PostStatus::Draft,
            Some(raw) => {
                PostStatus::parse(&raw).ok_or(ValidationError::InvalidStatus(raw))?
            }
        };

        if slugs.slug_exists(&resolved_slug).await? {
            return Err(ValidationError::DuplicateSlug.into());
        }

        Ok(NewPost {
            title,
            content,
            author,
            slug: resolved_slug,
            status,
            excerpt,
        })
    }

    /// Validate a partial update. Empty strings count as absent, matching
    /// the original wire behavior.
    pub fn validate_update(&self, payload: UpdatePayload) -> Result<PostPatch, ValidationError> {
        let title = non_empty(payload.title);
        let content = non_empty(payload.content);
        let status_raw = non_empty(payload.status);

        if title.is_none()
            && content.is_none()
            && status_raw.is_none()
            && payload.excerpt.is_none()
        {
            return Err(ValidationError::EmptyUpdate);
        }

        let status = match status_raw {
            None => None,
            Some(raw) => {
                Some(PostStatus::parse(&raw).ok_or(ValidationError::InvalidStatus(raw))?)
            }
        };

        let excerpt = payload.excerpt.map(|e| {
            non_empty(e)
                .map(|e| sanitize::sanitize(&e, EXCERPT_MAX))
                .filter(|e| !e.is_empty())
        });

        Ok(PostPatch {
            title: title.map(|t| sanitize::sanitize(&t, TITLE_MAX)),
            content: content.map(|c| sanitize::sanitize(&c, CONTENT_MAX)),
            status,
            excerpt,
        })
    }

    /// Range-check listing parameters.
    pub fn validate_list(
        &self,
        page: u32,
        limit: u32,
        status: Option<&str>,
    ) -> Result<PostQuery, ValidationError> {
        if page < 1 || page > PAGE_MAX {
            return Err(ValidationError::InvalidPage);
        }
        if limit < 1 || limit > LIMIT_MAX {
            return Err(ValidationError::InvalidLimit);
        }
        let status = match status {
            None => None,
            Some(raw) => {
                Some(PostStatus::parse(raw).ok_or_else(|| {
                    ValidationError::InvalidStatus(raw.to_string())
                })?)
            }
        };
        Ok(PostQuery {
            page,
            limit,
            status,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedSlugs(Vec<&'static str>);

    #[async_trait]
    impl SlugLookup for FixedSlugs {
        async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
            Ok(self.0.contains(&slug))
        }
    }

    fn payload() -> CreatePayload {
        CreatePayload {
            title: Some("Hello World!".to_string()),
            content: Some("Some content".to_string()),
            author: Some("Alice".to_string()),
            ..Default::default()
        }
    }

    fn unwrap_invalid(err: ValidateError) -> ValidationError {
        match err {
            ValidateError::Invalid(e) => e,
            ValidateError::Store(e) => panic!("unexpected store error: {e}"),
        }
    }

    #[tokio::test]
    async fn create_derives_slug_from_title() {
        let validator = RequestValidator::new();
        let post = validator
            .validate_create(payload(), &FixedSlugs(vec![]))
            .await
            .unwrap();
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.excerpt, None);
    }

    #[tokio::test]
    async fn create_requires_all_fields() {
        let validator = RequestValidator::new();
        for missing in ["title", "content", "author"] {
            let mut p = payload();
            match missing {
                "title" => p.title = None,
                "content" => p.content = Some("   ".to_string()),
                _ => p.author = None,
            }
            let err = validator
                .validate_create(p, &FixedSlugs(vec![]))
                .await
                .unwrap_err();
            assert_eq!(
                unwrap_invalid(err),
                ValidationError::MissingFields("title, content, author")
            );
        }
    }

    #[tokio::test]
    async fn create_sanitizes_fields() {
        let validator = RequestValidator::new();
        let mut p = payload();
        p.title = Some("<script>alert(1)</script>Clean Title".to_string());
        p.excerpt = Some("<b>bold</b> excerpt".to_string());
        let post = validator
            .validate_create(p, &FixedSlugs(vec![]))
            .await
            .unwrap();
        assert_eq!(post.title, "Clean Title");
        assert_eq!(post.excerpt.as_deref(), Some("bold excerpt"));
        assert_eq!(post.slug, "clean-title");
    }

    #[tokio::test]
    async fn create_rejects_fields_that_sanitize_to_nothing() {
        let validator = RequestValidator::new();
        for field in ["title", "content", "author"] {
            let mut p = payload();
            let markup_only = "<script>x()</script>".to_string();
            match field {
                "title" => p.title = Some(markup_only),
                "content" => p.content = Some("<b></b>".to_string()),
                _ => p.author = Some(markup_only),
            }
            let err = validator
                .validate_create(p, &FixedSlugs(vec![]))
                .await
                .unwrap_err();
            assert_eq!(
                unwrap_invalid(err),
                ValidationError::MissingFields("title, content, author"),
                "markup-only {field} accepted"
            );
        }
    }

    #[tokio::test]
    async fn create_rejects_bad_supplied_slug() {
        let validator = RequestValidator::new();
        let mut p = payload();
        p.slug = Some("!!!".to_string());
        let err = validator
            .validate_create(p, &FixedSlugs(vec![]))
            .await
            .unwrap_err();
        assert_eq!(unwrap_invalid(err), ValidationError::InvalidSlug);
    }

    #[tokio::test]
    async fn create_normalizes_supplied_slug() {
        let validator = RequestValidator::new();
        let mut p = payload();
        p.slug = Some("My Custom Slug".to_string());
        let post = validator
            .validate_create(p, &FixedSlugs(vec![]))
            .await
            .unwrap();
        assert_eq!(post.slug, "my-custom-slug");
    }

    #[tokio::test]
    async fn create_rejects_unknown_status() {
        let validator = RequestValidator::new();
        let mut p = payload();
        p.status = Some("deleted".to_string());
        let err = validator
            .validate_create(p, &FixedSlugs(vec![]))
            .await
            .unwrap_err();
        assert_eq!(
            unwrap_invalid(err),
            ValidationError::InvalidStatus("deleted".to_string())
        );
    }

    #[tokio::test]
    async fn create_rejects_duplicate_slug() {
        let validator = RequestValidator::new();
        let err = validator
            .validate_create(payload(), &FixedSlugs(vec!["hello-world"]))
            .await
            .unwrap_err();
        assert_eq!(unwrap_invalid(err), ValidationError::DuplicateSlug);
    }

    #[tokio::test]
    async fn first_failing_rule_wins() {
        let validator = RequestValidator::new();

        // Missing fields beats the bad slug and the bad status.
        let p = CreatePayload {
            slug: Some("!!!".to_string()),
            status: Some("bogus".to_string()),
            ..Default::default()
        };
        let err = validator
            .validate_create(p, &FixedSlugs(vec![]))
            .await
            .unwrap_err();
        assert_eq!(
            unwrap_invalid(err),
            ValidationError::MissingFields("title, content, author")
        );

        // Bad slug beats the bad status.
        let mut p = payload();
        p.slug = Some("!!!".to_string());
        p.status = Some("bogus".to_string());
        let err = validator
            .validate_create(p, &FixedSlugs(vec![]))
            .await
            .unwrap_err();
        assert_eq!(unwrap_invalid(err), ValidationError::InvalidSlug);
    }

    #[test]
    fn update_requires_at_least_one_field() {
        let validator = RequestValidator::new();
        let err = validator
            .validate_update(UpdatePayload::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyUpdate);

        // Empty strings count as absent.
        let err = validator
            .validate_update(UpdatePayload {
                title: Some(String::new()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyUpdate);
    }

    #[test]
    fn update_distinguishes_clearing_excerpt() {
        let validator = RequestValidator::new();

        let patch = validator
            .validate_update(UpdatePayload {
                excerpt: Some(None),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(patch.excerpt, Some(None));

        let patch = validator
            .validate_update(UpdatePayload {
                excerpt: Some(Some("<i>new</i> excerpt".to_string())),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(patch.excerpt, Some(Some("new excerpt".to_string())));
    }

    #[test]
    fn update_validates_status() {
        let validator = RequestValidator::new();
        let err = validator
            .validate_update(UpdatePayload {
                status: Some("bogus".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidStatus("bogus".to_string()));
    }

    #[test]
    fn list_bounds() {
        let validator = RequestValidator::new();
        assert!(validator.validate_list(1, 10, None).is_ok());
        assert!(validator.validate_list(1000, 100, Some("published")).is_ok());
        assert_eq!(
            validator.validate_list(0, 10, None).unwrap_err(),
            ValidationError::InvalidPage
        );
        assert_eq!(
            validator.validate_list(1001, 10, None).unwrap_err(),
            ValidationError::InvalidPage
        );
        assert_eq!(
            validator.validate_list(1, 0, None).unwrap_err(),
            ValidationError::InvalidLimit
        );
        assert_eq!(
            validator.validate_list(1, 101, None).unwrap_err(),
            ValidationError::InvalidLimit
        );
        assert_eq!(
            validator.validate_list(1, 10, Some("bogus")).unwrap_err(),
            ValidationError::InvalidStatus("bogus".to_string())
        );
    }
}
