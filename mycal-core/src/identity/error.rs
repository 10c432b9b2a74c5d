//! Provider error codes and the messages shown for them.

use thiserror::Error;

/// Shown for any code without a dedicated message.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    UserNotFound,
    WrongPassword,
    EmailAlreadyInUse,
    InvalidEmail,
    WeakPassword,
    InvalidCredential,
    /// Any other provider code, kept verbatim.
    Other(String),
}

impl AuthErrorCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/user-not-found" => AuthErrorCode::UserNotFound,
            "auth/wrong-password" => AuthErrorCode::WrongPassword,
            "auth/email-already-in-use" => AuthErrorCode::EmailAlreadyInUse,
            "auth/invalid-email" => AuthErrorCode::InvalidEmail,
            "auth/weak-password" => AuthErrorCode::WeakPassword,
            "auth/invalid-credential" => AuthErrorCode::InvalidCredential,
            other => AuthErrorCode::Other(other.to_string()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            AuthErrorCode::UserNotFound => "auth/user-not-found",
            AuthErrorCode::WrongPassword => "auth/wrong-password",
            AuthErrorCode::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthErrorCode::InvalidEmail => "auth/invalid-email",
            AuthErrorCode::WeakPassword => "auth/weak-password",
            AuthErrorCode::InvalidCredential => "auth/invalid-credential",
            AuthErrorCode::Other(code) => code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthErrorCode::UserNotFound => "No account found with this email. Please sign up.",
            AuthErrorCode::WrongPassword => "Incorrect password. Try again.",
            AuthErrorCode::EmailAlreadyInUse => "This email is already registered. Try logging in.",
            AuthErrorCode::InvalidEmail => "Please enter a valid email address.",
            AuthErrorCode::WeakPassword => "Password should be at least 6 characters long.",
            AuthErrorCode::InvalidCredential => {
                "Invalid credentials. Username/Password is incorrect."
            }
            AuthErrorCode::Other(_) => GENERIC_MESSAGE,
        }
    }
}

/// User-facing message for a provider error code.
pub fn error_message(code: &str) -> &'static str {
    AuthErrorCode::from_code(code).message()
}

/// A failed identity call. Displays as the user-facing message; `detail`
/// keeps the provider's own description for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .code.message())]
pub struct AuthError {
    pub code: AuthErrorCode,
    pub detail: String,
}

impl AuthError {
    pub fn new(code: AuthErrorCode, detail: impl Into<String>) -> Self {
        AuthError {
            code,
            detail: detail.into(),
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_messages() {
        assert_eq!(
            error_message("auth/user-not-found"),
            "No account found with this email. Please sign up."
        );
        assert_eq!(error_message("auth/wrong-password"), "Incorrect password. Try again.");
        assert_eq!(
            error_message("auth/email-already-in-use"),
            "This email is already registered. Try logging in."
        );
        assert_eq!(error_message("auth/invalid-email"), "Please enter a valid email address.");
        assert_eq!(
            error_message("auth/weak-password"),
            "Password should be at least 6 characters long."
        );
        assert_eq!(
            error_message("auth/invalid-credential"),
            "Invalid credentials. Username/Password is incorrect."
        );
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(error_message("auth/too-many-requests"), GENERIC_MESSAGE);
        assert_eq!(error_message(""), GENERIC_MESSAGE);
    }

    #[test]
    fn code_round_trips_through_string() {
        for code in [
            "auth/user-not-found",
            "auth/wrong-password",
            "auth/email-already-in-use",
            "auth/invalid-email",
            "auth/weak-password",
            "auth/invalid-credential",
            "auth/network-request-failed",
        ] {
            assert_eq!(AuthErrorCode::from_code(code).as_code(), code);
        }
    }

    #[test]
    fn error_displays_friendly_message() {
        let err = AuthError::new(AuthErrorCode::WrongPassword, "INVALID_PASSWORD");
        assert_eq!(err.to_string(), "Incorrect password. Try again.");
        assert_eq!(err.detail, "INVALID_PASSWORD");
    }
}
