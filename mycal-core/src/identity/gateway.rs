//! Session state published from identity provider results.

use tokio::sync::watch;

use crate::identity::{AuthResult, Identity, IdentityProvider};

/// Current authentication resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<Identity>,
    /// True until the provider has reported whether a user is signed in.
    pub loading: bool,
}

impl Session {
    pub fn loading() -> Self {
        Session {
            user: None,
            loading: true,
        }
    }

    pub fn resolved(user: Option<Identity>) -> Self {
        Session {
            user,
            loading: false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

/// Wraps an [`IdentityProvider`] and publishes the resulting [`Session`].
///
/// The session only changes when a provider call completes. Views read it
/// with [`session`](Self::session) or watch it through
/// [`subscribe`](Self::subscribe).
pub struct IdentityGateway<P> {
    provider: P,
    session: watch::Sender<Session>,
}

impl<P: IdentityProvider> IdentityGateway<P> {
    pub fn new(provider: P) -> Self {
        let (session, _) = watch::channel(Session::loading());
        IdentityGateway { provider, session }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.session.borrow().user.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    /// Resolve the initial session from whatever the provider persisted.
    ///
    /// A failing restore is logged and resolves to signed out.
    pub async fn restore(&self) -> Session {
        let user = match self.provider.restore().await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    code = err.code.as_code(),
                    detail = %err.detail,
                    "could not restore session"
                );
                None
            }
        };
        self.publish(user);
        self.session()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Identity> {
        let result = self.provider.sign_in(email, password).await;
        self.settle("sign in", result)
    }

    pub async fn sign_in_federated(&self) -> AuthResult<Identity> {
        let result = self.provider.sign_in_federated().await;
        self.settle("federated sign in", result)
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AuthResult<Identity> {
        let result = self.provider.sign_up(email, password, display_name).await;
        self.settle("sign up", result)
    }

    /// Sign out. The local session is cleared even when the provider fails.
    pub async fn sign_out(&self) -> AuthResult<()> {
        let result = self.provider.sign_out().await;
        if let Err(err) = &result {
            tracing::error!(
                provider = self.provider.name(),
                code = err.code.as_code(),
                detail = %err.detail,
                "sign out failed"
            );
        }
        self.publish(None);
        result
    }

    fn settle(&self, action: &str, result: AuthResult<Identity>) -> AuthResult<Identity> {
        match result {
            Ok(identity) => {
                self.publish(Some(identity.clone()));
                Ok(identity)
            }
            Err(err) => {
                tracing::error!(
                    provider = self.provider.name(),
                    action,
                    code = err.code.as_code(),
                    detail = %err.detail,
                    "identity call failed"
                );
                Err(err)
            }
        }
    }

    fn publish(&self, user: Option<Identity>) {
        tracing::info!(user = user.as_ref().map(Identity::label), "session resolved");
        self.session.send_replace(Session::resolved(user));
    }
}
