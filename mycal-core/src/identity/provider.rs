use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::identity::AuthResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignInMethod {
    Password,
    Google,
}

impl fmt::Display for SignInMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignInMethod::Password => f.write_str("email"),
            SignInMethod::Google => f.write_str("Google"),
        }
    }
}

/// A signed-in user as the rest of the app sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub method: SignInMethod,
}

impl Identity {
    /// Best human-readable name: display name, then email, then uid.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// An external identity service.
///
/// Implementations own their credentials and tokens. Every failure is
/// reported as an [`AuthError`](crate::identity::AuthError) carrying one of
/// the known codes, or `Other` with the provider's code.
pub trait IdentityProvider {
    fn name(&self) -> &str;

    /// The identity persisted by a previous run, if any.
    fn restore(&self) -> impl Future<Output = AuthResult<Option<Identity>>>;

    fn sign_in(&self, email: &str, password: &str) -> impl Future<Output = AuthResult<Identity>>;

    /// Sign in through the provider's federated (Google) flow.
    fn sign_in_federated(&self) -> impl Future<Output = AuthResult<Identity>>;

    /// Create an account and sign it in.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> impl Future<Output = AuthResult<Identity>>;

    fn sign_out(&self) -> impl Future<Output = AuthResult<()>>;
}
