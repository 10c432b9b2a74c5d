//! Process-local identity provider.
//!
//! Backs `--offline` runs and tests. Accounts live only as long as the
//! provider; clones share the same accounts and signed-in user.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::constants::MIN_PASSWORD_LEN;
use crate::identity::{
    AuthError, AuthErrorCode, AuthResult, Identity, IdentityProvider, SignInMethod,
};
use crate::validation::looks_like_email;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
    display_name: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Account>,
    signed_in: Option<Identity>,
    federated: Option<Identity>,
    next_uid: u64,
}

impl State {
    fn create(&mut self, email: &str, password: &str, display_name: Option<&str>) -> Identity {
        self.next_uid += 1;
        let account = Account {
            uid: format!("local-{}", self.next_uid),
            password: password.to_string(),
            display_name: display_name.map(str::to_string),
        };
        let identity = identity_for(email, &account);
        self.accounts.insert(email.to_string(), account);
        identity
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    state: Arc<Mutex<State>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register an email/password account.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.state().create(email, password, None);
        self
    }

    /// Identity handed out by the federated flow. Without one the flow
    /// fails as if the user closed the popup.
    pub fn with_federated_identity(self, identity: Identity) -> Self {
        self.state().federated = Some(identity);
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn identity_for(email: &str, account: &Account) -> Identity {
    Identity {
        uid: account.uid.clone(),
        email: Some(email.to_string()),
        display_name: account.display_name.clone(),
        method: SignInMethod::Password,
    }
}

fn check_email(email: &str) -> AuthResult<()> {
    if looks_like_email(email) {
        Ok(())
    } else {
        Err(AuthError::new(
            AuthErrorCode::InvalidEmail,
            format!("'{email}' is not an email address"),
        ))
    }
}

impl IdentityProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn restore(&self) -> AuthResult<Option<Identity>> {
        Ok(self.state().signed_in.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Identity> {
        check_email(email)?;
        let mut state = self.state();

        let account = state
            .accounts
            .get(email)
            .ok_or_else(|| {
                AuthError::new(AuthErrorCode::UserNotFound, format!("no account for {email}"))
            })?;
        if account.password != password {
            return Err(AuthError::new(AuthErrorCode::WrongPassword, "password mismatch"));
        }

        let identity = identity_for(email, account);
        state.signed_in = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_in_federated(&self) -> AuthResult<Identity> {
        let mut state = self.state();
        let identity = state.federated.clone().ok_or_else(|| {
            AuthError::new(
                AuthErrorCode::Other("auth/popup-closed-by-user".into()),
                "no federated identity configured",
            )
        })?;
        state.signed_in = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AuthResult<Identity> {
        check_email(email)?;
        let mut state = self.state();

        if state.accounts.contains_key(email) {
            return Err(AuthError::new(AuthErrorCode::EmailAlreadyInUse, format!("{email} exists")));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::new(
                AuthErrorCode::WeakPassword,
                format!("password shorter than {MIN_PASSWORD_LEN} characters"),
            ));
        }

        let identity = state.create(email, password, display_name);
        state.signed_in = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.state().signed_in = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MemoryProvider {
        MemoryProvider::new().with_account("ada@example.com", "hunter22")
    }

    #[tokio::test]
    async fn unknown_email_is_user_not_found() {
        let err = provider().sign_in("bob@example.com", "whatever").await.unwrap_err();
        assert_eq!(err.code, AuthErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn malformed_email_is_invalid_email() {
        let err = provider().sign_in("not-an-email", "whatever").await.unwrap_err();
        assert_eq!(err.code, AuthErrorCode::InvalidEmail);
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_rejected() {
        let err = provider().sign_up("ada@example.com", "another1", None).await.unwrap_err();
        assert_eq!(err.code, AuthErrorCode::EmailAlreadyInUse);
    }

    #[tokio::test]
    async fn short_password_is_weak() {
        let err = provider().sign_up("new@example.com", "12345", None).await.unwrap_err();
        assert_eq!(err.code, AuthErrorCode::WeakPassword);
    }

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let provider = provider();
        let created = provider.sign_up("new@example.com", "123456", None).await.unwrap();
        provider.sign_out().await.unwrap();
        assert_eq!(provider.restore().await.unwrap(), None);

        let signed_in = provider.sign_in("new@example.com", "123456").await.unwrap();
        assert_eq!(created.uid, signed_in.uid);
        assert_ne!(created.uid, "local-1");
    }

    #[tokio::test]
    async fn federated_without_identity_fails() {
        let err = provider().sign_in_federated().await.unwrap_err();
        assert_eq!(err.code.as_code(), "auth/popup-closed-by-user");
    }

    #[tokio::test]
    async fn federated_identity_is_signed_in() {
        let google = Identity {
            uid: "g-1".into(),
            email: Some("ada@gmail.com".into()),
            display_name: Some("Ada".into()),
            method: SignInMethod::Google,
        };
        let provider = provider().with_federated_identity(google.clone());
        assert_eq!(provider.sign_in_federated().await.unwrap(), google);
        assert_eq!(provider.restore().await.unwrap(), Some(google));
    }
}
