//! Social feed contract: a read-only, bounded list of posts.
//!
//! The feed requires a bearer credential. A missing credential is a
//! configuration failure with remediation text, surfaced before any
//! request is attempted — the rest of the application keeps working.

use super::error::{ConfigError, FeedError};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Kind of a post's media attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// A still image.
    Image,
    /// A video.
    Video,
}

/// One media attachment on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    /// Publicly resolvable media URL.
    pub url: String,
    /// What the URL points at.
    pub kind: MediaKind,
}

/// One post from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// The feed service's post id.
    pub id: String,
    /// Post text, when present.
    pub message: Option<String>,
    /// Link back to the post, when present.
    pub permalink: Option<String>,
    /// Publication instant, when reported.
    pub created_at: Option<DateTime<Utc>>,
    /// Media attachments.
    pub media: Vec<Media>,
}

/// Configuration for reaching the feed service.
#[derive(Debug, Clone, Default)]
pub struct FeedConfig {
    access_token: Option<String>,
}

impl FeedConfig {
    /// Creates a configuration; pass `None` to model a missing credential.
    pub fn new(access_token: Option<String>) -> Self {
        Self { access_token }
    }

    /// Returns the bearer credential, or the configuration failure to show
    /// the operator.
    pub fn access_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError {
                name: "FEED_ACCESS_TOKEN".to_string(),
                hint: "set the social feed access token in the deployment environment"
                    .to_string(),
            })
    }
}

/// Read-only access to the social feed.
pub trait SocialFeed {
    /// Returns at most `limit` of the most recent posts.
    fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, FeedError>;
}

/// In-memory [`SocialFeed`] serving a fixed post list, used by tests and
/// demos.
pub struct MemoryFeed {
    config: FeedConfig,
    posts: Vec<Post>,
}

impl MemoryFeed {
    /// Creates a feed over the given configuration and posts.
    pub fn new(config: FeedConfig, posts: Vec<Post>) -> Self {
        Self { config, posts }
    }
}

impl SocialFeed for MemoryFeed {
    fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, FeedError> {
        self.config.access_token()?;
        let posts: Vec<Post> = self.posts.iter().take(limit).cloned().collect();
        debug!(count = posts.len(), "served feed posts");
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            message: Some(format!("post {id}")),
            permalink: None,
            created_at: None,
            media: vec![Media {
                url: format!("https://cdn.example.com/{id}.jpg"),
                kind: MediaKind::Image,
            }],
        }
    }

    #[test]
    fn test_posts_are_bounded_by_limit() {
        let feed = MemoryFeed::new(
            FeedConfig::new(Some("token".to_string())),
            vec![post("a"), post("b"), post("c")],
        );
        let posts = feed.recent_posts(2).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "a");
    }

    #[test]
    fn test_missing_credential_is_a_config_error() {
        let feed = MemoryFeed::new(FeedConfig::new(None), vec![post("a")]);
        let err = feed.recent_posts(5).unwrap_err();
        match err {
            FeedError::Config(config) => {
                assert_eq!(config.name, "FEED_ACCESS_TOKEN");
                assert!(config.hint.contains("access token"));
            }
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let config = FeedConfig::new(Some("   ".to_string()));
        assert!(config.access_token().is_err());
    }
}
