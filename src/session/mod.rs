//! Client-side session policy.
//!
//! An [`AuthGuard`] decides, from the current session state, whether a client
//! view should stay where it is or navigate elsewhere. Views that need a
//! session send anonymous users to a login route; views meant for anonymous
//! users (a login form) send signed-in users home.
//!
//! [`watch_session`] runs the guard against live session and policy channels
//! and calls a [`Navigator`] whenever a new redirect is due.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Route anonymous users are sent to when a view requires a session
pub const DEFAULT_LOGIN_ROUTE: &str = "/admin/login";

/// Route signed-in users are sent to from anonymous-only views
pub const HOME_ROUTE: &str = "/";

/// A signed-in admin session as held by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

/// What the session provider currently knows
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub status: SessionStatus,
    pub session: Option<Session>,
}

impl SessionState {
    pub fn loading() -> Self {
        Self {
            status: SessionStatus::Loading,
            session: None,
        }
    }

    pub fn resolved(session: Option<Session>) -> Self {
        let status = if session.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        };
        Self { status, session }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGuard {
    pub require_auth: bool,
    pub redirect_to: String,
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self {
            require_auth: true,
            redirect_to: DEFAULT_LOGIN_ROUTE.to_string(),
        }
    }
}

/// Result of one guard evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct GuardOutcome {
    pub session: Option<Session>,
    pub status: SessionStatus,
    pub is_authenticated: bool,
    /// Where to navigate, if anywhere
    pub redirect: Option<String>,
}

impl AuthGuard {
    pub fn require_auth(redirect_to: impl Into<String>) -> Self {
        Self {
            require_auth: true,
            redirect_to: redirect_to.into(),
        }
    }

    pub fn anonymous_only() -> Self {
        Self {
            require_auth: false,
            redirect_to: DEFAULT_LOGIN_ROUTE.to_string(),
        }
    }

    pub fn evaluate(&self, state: &SessionState) -> GuardOutcome {
        let loading = state.status == SessionStatus::Loading;
        let has_session = state.session.is_some();

        let redirect = if loading {
            None
        } else if self.require_auth && !has_session {
            Some(self.redirect_to.clone())
        } else if !self.require_auth && has_session {
            Some(HOME_ROUTE.to_string())
        } else {
            None
        };

        GuardOutcome {
            session: state.session.clone(),
            status: state.status,
            is_authenticated: !loading && has_session,
            redirect,
        }
    }
}

pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn navigate(&self, path: &str) {
        self(path)
    }
}

/// Re-evaluate the guard on every policy or session change until either sender
/// is dropped, and return the last outcome.
///
/// The navigator is called when an evaluation yields a redirect that differs
/// from the previous evaluation's, so an unchanged state does not navigate twice.
pub async fn watch_session<N: Navigator>(
    mut policy: watch::Receiver<AuthGuard>,
    mut session: watch::Receiver<SessionState>,
    navigator: N,
) -> GuardOutcome {
    let mut last_redirect: Option<String> = None;

    loop {
        let outcome = {
            let guard = policy.borrow_and_update();
            let state = session.borrow_and_update();
            guard.evaluate(&state)
        };

        if let Some(path) = &outcome.redirect {
            if last_redirect.as_deref() != Some(path.as_str()) {
                tracing::debug!("Auth guard redirecting to {}", path);
                navigator.navigate(path);
            }
        }
        last_redirect = outcome.redirect.clone();

        let changed = tokio::select! {
            r = policy.changed() => r,
            r = session.changed() => r,
        };
        if changed.is_err() {
            return outcome;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn session() -> Session {
        Session {
            token: "t".to_string(),
            id: "1".to_string(),
            email: "a@b.com".to_string(),
            role: "admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn loading_never_redirects() {
        for guard in [AuthGuard::default(), AuthGuard::anonymous_only()] {
            let outcome = guard.evaluate(&SessionState::loading());
            assert_eq!(outcome.redirect, None);
            assert!(!outcome.is_authenticated);
            assert_eq!(outcome.status, SessionStatus::Loading);
        }
    }

    #[test]
    fn required_auth_without_session_redirects_to_login() {
        let guard = AuthGuard::require_auth("/admin/signin");
        let outcome = guard.evaluate(&SessionState::resolved(None));
        assert_eq!(outcome.redirect.as_deref(), Some("/admin/signin"));
        assert!(!outcome.is_authenticated);
    }

    #[test]
    fn required_auth_with_session_stays() {
        let outcome = AuthGuard::default().evaluate(&SessionState::resolved(Some(session())));
        assert_eq!(outcome.redirect, None);
        assert!(outcome.is_authenticated);
        assert_eq!(outcome.session.unwrap().email, "a@b.com");
    }

    #[test]
    fn anonymous_view_with_session_goes_home() {
        let outcome = AuthGuard::anonymous_only().evaluate(&SessionState::resolved(Some(session())));
        assert_eq!(outcome.redirect.as_deref(), Some(HOME_ROUTE));
    }

    #[test]
    fn anonymous_view_without_session_stays() {
        let outcome = AuthGuard::anonymous_only().evaluate(&SessionState::resolved(None));
        assert_eq!(outcome.redirect, None);
        assert_eq!(outcome.status, SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn watcher_redirects_once_session_resolves() {
        let (policy_tx, policy_rx) = watch::channel(AuthGuard::default());
        let (session_tx, session_rx) = watch::channel(SessionState::loading());
        let visited = Arc::new(Mutex::new(Vec::<String>::new()));

        let recorder = visited.clone();
        let handle = tokio::spawn(watch_session(policy_rx, session_rx, move |path: &str| {
            recorder.lock().unwrap().push(path.to_string());
        }));

        tokio::task::yield_now().await;
        assert!(visited.lock().unwrap().is_empty());

        session_tx.send(SessionState::resolved(None)).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(*visited.lock().unwrap(), vec![DEFAULT_LOGIN_ROUTE.to_string()]);

        // Signing in clears the redirect; switching to an anonymous-only view sends us home
        session_tx.send(SessionState::resolved(Some(session()))).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        policy_tx.send(AuthGuard::anonymous_only()).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        drop(session_tx);
        let last = handle.await.unwrap();
        assert_eq!(last.redirect.as_deref(), Some(HOME_ROUTE));
        assert_eq!(
            *visited.lock().unwrap(),
            vec![DEFAULT_LOGIN_ROUTE.to_string(), HOME_ROUTE.to_string()]
        );
        drop(policy_tx);
    }
}
