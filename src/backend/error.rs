//! Error taxonomy for the backend contracts.
//!
//! Remote failures carry the backend's message string verbatim so the
//! operator sees what the service reported. Configuration failures carry
//! remediation text and are surfaced before any request is attempted.

use thiserror::Error;

/// A data store operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatastoreError {
    /// The remote store rejected the operation.
    #[error("remote operation failed: {message}")]
    Remote {
        /// Message string reported by the store.
        message: String,
    },

    /// No record with the given id exists.
    #[error("record {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A record with the same id already exists.
    #[error("record {id} already exists")]
    Conflict {
        /// The conflicting id.
        id: String,
    },
}

/// An authentication operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The credential pair was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session is active where one is required.
    #[error("no active session")]
    NoSession,

    /// The auth provider rejected the operation.
    #[error("authentication failed: {message}")]
    Remote {
        /// Message string reported by the provider.
        message: String,
    },
}

/// A blob upload failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobError {
    /// The destination path is not acceptable.
    #[error("invalid upload path: {path}")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// The file host rejected the upload.
    #[error("upload failed: {message}")]
    Remote {
        /// Message string reported by the host.
        message: String,
    },
}

/// A required piece of configuration is missing.
///
/// Not fatal to the rest of the application: the affected feature renders
/// a descriptive error state instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing configuration value {name}: {hint}")]
pub struct ConfigError {
    /// Name of the missing value.
    pub name: String,
    /// How to supply it.
    pub hint: String,
}

/// A social feed read failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The feed credential is not configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The feed service rejected the request.
    #[error("feed request failed: {message}")]
    Remote {
        /// Message string reported by the service.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_remote_text() {
        let err = DatastoreError::Remote {
            message: "row level security".to_string(),
        };
        assert_eq!(err.to_string(), "remote operation failed: row level security");
    }

    #[test]
    fn test_config_error_includes_remediation() {
        let err = ConfigError {
            name: "FEED_ACCESS_TOKEN".to_string(),
            hint: "set it in the deployment environment".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("FEED_ACCESS_TOKEN"));
        assert!(text.contains("set it in the deployment environment"));
    }

    #[test]
    fn test_feed_error_wraps_config_error() {
        let config = ConfigError {
            name: "FEED_ACCESS_TOKEN".to_string(),
            hint: "see the feed setup notes".to_string(),
        };
        let err: FeedError = config.clone().into();
        assert_eq!(err.to_string(), config.to_string());
    }
}
