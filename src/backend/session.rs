//! Session provider contract: authentication with change subscriptions.
//!
//! The provider is an explicit, injectable interface rather than ambient
//! module state: route guards and headers take a `&dyn SessionProvider`
//! and subscribe to change events, so no component is tied to a particular
//! backend SDK.

use super::error::AuthError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};

/// An authenticated session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Stable identity of the signed-in user.
    pub user_id: String,
    /// The user's email, when known.
    pub email: Option<String>,
    /// Expiry instant, when the provider reports one.
    pub expires_at: Option<DateTime<Utc>>,
}

/// A session lifecycle event delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was established.
    SignedIn(Session),
    /// The session ended.
    SignedOut,
    /// The session's token was refreshed.
    TokenRefreshed(Session),
}

/// Handle identifying one subscription, used to unsubscribe.
pub type SubscriptionId = usize;

/// Listener invoked on session lifecycle events.
pub type SessionListener = Box<dyn Fn(&SessionEvent) + Send>;

/// Authentication provider contract.
pub trait SessionProvider {
    /// Exchanges a credential pair for a session.
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Ends the current session. Succeeds even when none is active.
    fn sign_out(&self) -> Result<(), AuthError>;

    /// The current session snapshot, if one is active. Route guards use
    /// this to decide between protected content and the login view.
    fn current_session(&self) -> Option<Session>;

    /// Registers a listener for session lifecycle events.
    fn subscribe(&self, listener: SessionListener) -> SubscriptionId;

    /// Removes a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// In-memory [`SessionProvider`] with a fixed account table, used by tests
/// and demos.
pub struct MemorySessionProvider {
    accounts: HashMap<String, String>,
    state: Mutex<Option<Session>>,
    listeners: Mutex<Vec<(SubscriptionId, SessionListener)>>,
    next_subscription: AtomicUsize,
}

impl MemorySessionProvider {
    /// Creates a provider with no accounts; every sign-in fails.
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            state: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicUsize::new(1),
        }
    }

    /// Adds an accepted credential pair (builder pattern).
    pub fn with_account(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.accounts.insert(email.into(), password.into());
        self
    }

    fn notify(&self, event: &SessionEvent) {
        let listeners = self.listeners.lock().unwrap();
        for (_, listener) in listeners.iter() {
            listener(event);
        }
    }
}

impl Default for MemorySessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for MemorySessionProvider {
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let accepted = self
            .accounts
            .get(email)
            .map(|expected| expected == password)
            .unwrap_or(false);
        if !accepted {
            debug!(email, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            user_id: email.to_string(),
            email: Some(email.to_string()),
            expires_at: None,
        };
        *self.state.lock().unwrap() = Some(session.clone());
        info!(email, "signed in");
        self.notify(&SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        let had_session = self.state.lock().unwrap().take().is_some();
        if had_session {
            info!("signed out");
            self.notify(&SessionEvent::SignedOut);
        }
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.state.lock().unwrap().clone()
    }

    fn subscribe(&self, listener: SessionListener) -> SubscriptionId {
        let id = self.next_subscription.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().unwrap().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().unwrap().retain(|(sid, _)| *sid != id);
    }
}
