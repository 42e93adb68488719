//! Contracts for the remote services an admin back-office delegates to.
//!
//! The UI components in this crate never perform I/O; everything remote is
//! reached through the traits in this module, injected by the host
//! application:
//!
//! - [`Datastore`] — per-content-type CRUD against the hosted database
//! - [`SessionProvider`] — authentication with session-change subscriptions
//! - [`BlobStore`] — file uploads resolving to public URLs
//! - [`SocialFeed`] — a read-only feed of posts with media attachments
//!
//! Each trait ships with an in-memory reference implementation used by
//! tests and demos. The traits are synchronous; async hosts wrap calls in
//! their own commands and surface outcomes as messages. No failure here is
//! retried automatically — remote errors carry the backend's message string
//! and are shown to the operator.

pub mod blobstore;
pub mod datastore;
pub mod error;
pub mod feed;
pub mod session;

pub use blobstore::{BlobStore, MemoryBlobStore};
pub use datastore::{Datastore, MemoryDatastore, SortOrder};
pub use error::{AuthError, BlobError, ConfigError, DatastoreError, FeedError};
pub use feed::{FeedConfig, Media, MediaKind, MemoryFeed, Post, SocialFeed};
pub use session::{MemorySessionProvider, Session, SessionEvent, SessionProvider, SubscriptionId};
