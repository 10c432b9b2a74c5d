//! Errors from the Firebase provider and how they map to auth codes.

use mycal_core::identity::{AuthError, AuthErrorCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirebaseError {
    #[error("Firebase API key is not configured (set firebase.api_key)")]
    MissingApiKey,

    #[error("Google sign-in is not configured (set google.client_id and google.client_secret)")]
    MissingGoogleClient,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error body returned by a Firebase or Google endpoint.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Session file error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FirebaseResult<T> = Result<T, FirebaseError>;

/// Refresh failures that mean the stored session is gone for good.
const SESSION_REJECTIONS: &[&str] = &[
    "TOKEN_EXPIRED",
    "INVALID_REFRESH_TOKEN",
    "USER_NOT_FOUND",
    "USER_DISABLED",
];

impl FirebaseError {
    /// True when Firebase definitively refused the refresh token. Outages,
    /// rate limits and unreadable gateway errors are not rejections.
    pub fn rejects_session(&self) -> bool {
        match self {
            FirebaseError::Api { status, message } => {
                matches!(status, 400 | 401 | 403)
                    && SESSION_REJECTIONS.contains(&reason(message))
            }
            _ => false,
        }
    }

    pub fn auth_code(&self) -> AuthErrorCode {
        match self {
            FirebaseError::Api { message, .. } => code_for_message(message),
            FirebaseError::MissingApiKey => AuthErrorCode::Other("auth/invalid-api-key".into()),
            FirebaseError::MissingGoogleClient => {
                AuthErrorCode::Other("auth/operation-not-allowed".into())
            }
            FirebaseError::Http(_) => AuthErrorCode::Other("auth/network-request-failed".into()),
            FirebaseError::OAuth(_) => AuthErrorCode::Other("auth/popup-closed-by-user".into()),
            FirebaseError::Session(_) | FirebaseError::Io(_) => {
                AuthErrorCode::Other("auth/internal-error".into())
            }
        }
    }
}

/// Map an Identity Toolkit error message to an auth code.
///
/// Messages look like `EMAIL_NOT_FOUND` or
/// `WEAK_PASSWORD : Password should be at least 6 characters`.
pub fn code_for_message(message: &str) -> AuthErrorCode {
    match reason(message) {
        "EMAIL_NOT_FOUND" => AuthErrorCode::UserNotFound,
        "INVALID_PASSWORD" => AuthErrorCode::WrongPassword,
        "EMAIL_EXISTS" => AuthErrorCode::EmailAlreadyInUse,
        "INVALID_EMAIL" => AuthErrorCode::InvalidEmail,
        "WEAK_PASSWORD" => AuthErrorCode::WeakPassword,
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_IDP_RESPONSE" => AuthErrorCode::InvalidCredential,
        "USER_DISABLED" => AuthErrorCode::Other("auth/user-disabled".into()),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthErrorCode::Other("auth/too-many-requests".into()),
        "MISSING_PASSWORD" => AuthErrorCode::Other("auth/missing-password".into()),
        "OPERATION_NOT_ALLOWED" => AuthErrorCode::Other("auth/operation-not-allowed".into()),
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" => {
            AuthErrorCode::Other("auth/user-token-expired".into())
        }
        _ => AuthErrorCode::Other("auth/internal-error".into()),
    }
}

/// `WEAK_PASSWORD : Password should be...` to `WEAK_PASSWORD`.
fn reason(message: &str) -> &str {
    message.split(':').next().unwrap_or_default().trim()
}

impl From<FirebaseError> for AuthError {
    fn from(err: FirebaseError) -> Self {
        AuthError::new(err.auth_code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(message: &str) -> FirebaseError {
        FirebaseError::Api {
            status: 400,
            message: message.to_string(),
        }
    }

    #[test]
    fn maps_identity_toolkit_messages() {
        assert_eq!(code_for_message("EMAIL_NOT_FOUND"), AuthErrorCode::UserNotFound);
        assert_eq!(code_for_message("INVALID_PASSWORD"), AuthErrorCode::WrongPassword);
        assert_eq!(code_for_message("EMAIL_EXISTS"), AuthErrorCode::EmailAlreadyInUse);
        assert_eq!(code_for_message("INVALID_EMAIL"), AuthErrorCode::InvalidEmail);
        assert_eq!(code_for_message("INVALID_LOGIN_CREDENTIALS"), AuthErrorCode::InvalidCredential);
    }

    #[test]
    fn weak_password_message_carries_detail() {
        assert_eq!(
            code_for_message("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthErrorCode::WeakPassword
        );
    }

    #[test]
    fn unknown_message_gets_generic_text() {
        let auth: AuthError = api("SOMETHING_NEW").into();
        assert_eq!(auth.code.as_code(), "auth/internal-error");
        assert_eq!(auth.to_string(), "Something went wrong. Please try again.");
        assert!(auth.detail.contains("SOMETHING_NEW"));
    }

    #[test]
    fn converted_error_keeps_friendly_message() {
        let auth: AuthError = api("EMAIL_EXISTS").into();
        assert_eq!(auth.to_string(), "This email is already registered. Try logging in.");
    }

    #[test]
    fn only_auth_refusals_reject_the_session() {
        assert!(api("TOKEN_EXPIRED").rejects_session());
        assert!(api("USER_DISABLED").rejects_session());
        assert!(!api("TOO_MANY_ATTEMPTS_TRY_LATER").rejects_session());
        assert!(!api("INTERNAL_ERROR").rejects_session());

        let outage = FirebaseError::Api {
            status: 503,
            message: "TOKEN_EXPIRED".into(),
        };
        assert!(!outage.rejects_session());
    }

    #[test]
    fn missing_config_codes() {
        assert_eq!(FirebaseError::MissingApiKey.auth_code().as_code(), "auth/invalid-api-key");
        assert_eq!(
            FirebaseError::MissingGoogleClient.auth_code().as_code(),
            "auth/operation-not-allowed"
        );
    }
}
