//! Session context and the login gate.
//!
//! Login state lives in an explicit registry handed to the web layer rather
//! than in ambient globals. The registry is the authentication collaborator:
//! everything past `/api/session/login` asks it who the caller is.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// One authenticated session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionContext {
    pub session_id: String,
    pub user: String,
    pub started_at: DateTime<Utc>,
}

impl SessionContext {
    fn new(user: &str) -> Self {
        SessionContext {
            session_id: Uuid::new_v4().to_string(),
            user: user.to_string(),
            started_at: Utc::now(),
        }
    }
}

/// Answers "is this caller authenticated, and who are they".
pub trait Authenticator {
    fn is_authenticated(&self, session_id: &str) -> bool;
    fn current_user(&self, session_id: &str) -> Option<String>;
}

/// In-memory registry of live sessions.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, SessionContext>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user` and return its context.
    pub fn login(&mut self, user: &str) -> SessionContext {
        let context = SessionContext::new(user);
        self.sessions
            .insert(context.session_id.clone(), context.clone());
        context
    }

    pub fn resolve(&self, session_id: &str) -> Option<&SessionContext> {
        self.sessions.get(session_id)
    }

    /// Clear a session. Subsequent requests with this id hit the login gate
    /// again. Returns whether a session was actually cleared.
    pub fn logout(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }
}

impl Authenticator for SessionRegistry {
    fn is_authenticated(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    fn current_user(&self, session_id: &str) -> Option<String> {
        self.sessions.get(session_id).map(|s| s.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_creates_a_resolvable_session() {
        let mut registry = SessionRegistry::new();
        let context = registry.login("alice");

        assert!(registry.is_authenticated(&context.session_id));
        assert_eq!(
            registry.current_user(&context.session_id),
            Some("alice".to_string())
        );
    }

    #[test]
    fn logout_clears_authentication_state() {
        let mut registry = SessionRegistry::new();
        let context = registry.login("alice");

        assert!(registry.logout(&context.session_id));
        assert!(!registry.is_authenticated(&context.session_id));
        assert_eq!(registry.current_user(&context.session_id), None);
        // Second logout is a no-op
        assert!(!registry.logout(&context.session_id));
    }

    #[test]
    fn unknown_session_is_not_authenticated() {
        let registry = SessionRegistry::new();
        assert!(!registry.is_authenticated("no-such-session"));
    }

    #[test]
    fn sessions_are_distinct_per_login() {
        let mut registry = SessionRegistry::new();
        let first = registry.login("alice");
        let second = registry.login("alice");
        assert_ne!(first.session_id, second.session_id);
    }
}
