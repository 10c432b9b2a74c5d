//! Auth-gated routing.

use std::fmt;

use tokio::sync::watch;

use crate::identity::{Identity, Session};

/// The app's named views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Signup,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Root => f.write_str("/"),
            Route::Login => f.write_str("/login"),
            Route::Signup => f.write_str("/signup"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Unknown,
    Resolved(Option<Identity>),
}

/// What the root view should do for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the neutral loading placeholder.
    Loading,
    Redirect(Route),
    Render(Identity),
}

/// Keeps the calendar behind a resolved, signed-in session.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    state: GuardState,
}

impl SessionGuard {
    pub fn new() -> Self {
        SessionGuard {
            state: GuardState::Unknown,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Feed one session snapshot and get the resulting decision.
    pub fn observe(&mut self, session: &Session) -> GuardDecision {
        self.state = if session.loading {
            GuardState::Unknown
        } else {
            GuardState::Resolved(session.user.clone())
        };
        self.decision()
    }

    pub fn decision(&self) -> GuardDecision {
        match &self.state {
            GuardState::Unknown => GuardDecision::Loading,
            GuardState::Resolved(None) => GuardDecision::Redirect(Route::Login),
            GuardState::Resolved(Some(identity)) => GuardDecision::Render(identity.clone()),
        }
    }

    /// Wait for the first resolved snapshot on `session` and decide.
    ///
    /// A closed channel counts as signed out.
    pub async fn resolve(&mut self, session: &mut watch::Receiver<Session>) -> GuardDecision {
        let snapshot = match session.wait_for(|s| !s.loading).await {
            Ok(snapshot) => Session::clone(&snapshot),
            Err(_) => Session::resolved(None),
        };
        self.observe(&snapshot)
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}
