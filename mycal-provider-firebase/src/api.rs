//! Identity Toolkit and Secure Token REST calls.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{FirebaseError, FirebaseResult};

pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Tokens and profile returned by every sign-in style endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Thin client for one Firebase project's auth endpoints.
#[derive(Clone, Debug)]
pub struct FirebaseClient {
    http: reqwest::Client,
    api_key: String,
    identity_url: String,
    token_url: String,
}

impl FirebaseClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        FirebaseClient {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            identity_url: IDENTITY_TOOLKIT_URL.to_string(),
            token_url: SECURE_TOKEN_URL.to_string(),
        }
    }

    /// Point at other base URLs, e.g. the Auth emulator.
    pub fn with_endpoints(
        mut self,
        identity_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        self.identity_url = identity_url.into().trim_end_matches('/').to_string();
        self.token_url = token_url.into().trim_end_matches('/').to_string();
        self
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> FirebaseResult<SignInResponse> {
        self.accounts(
            "signInWithPassword",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> FirebaseResult<SignInResponse> {
        self.accounts(
            "signUp",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Exchange a Google ID token for a Firebase session.
    pub async fn sign_in_with_google(
        &self,
        google_id_token: &str,
        request_uri: &str,
    ) -> FirebaseResult<SignInResponse> {
        let post_body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("id_token", google_id_token)
            .append_pair("providerId", "google.com")
            .finish();

        self.accounts(
            "signInWithIdp",
            &IdpRequest {
                post_body,
                request_uri,
                return_secure_token: true,
                return_idp_credential: true,
            },
        )
        .await
    }

    pub async fn update_display_name(
        &self,
        id_token: &str,
        display_name: &str,
    ) -> FirebaseResult<()> {
        let _: serde_json::Value = self
            .accounts(
                "update",
                &UpdateProfileRequest {
                    id_token,
                    display_name,
                    return_secure_token: false,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn lookup(&self, id_token: &str) -> FirebaseResult<Option<UserRecord>> {
        let response: LookupResponse = self.accounts("lookup", &LookupRequest { id_token }).await?;
        Ok(response.users.into_iter().next())
    }

    /// Trade a refresh token for a fresh ID token.
    pub async fn refresh(&self, refresh_token: &str) -> FirebaseResult<RefreshResponse> {
        let response = self
            .http
            .post(format!("{}/token", self.token_url))
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        parse_response(response).await
    }

    async fn accounts<B: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> FirebaseResult<R> {
        tracing::debug!(method, "identity toolkit request");

        let response = self
            .http
            .post(format!("{}/accounts:{}", self.identity_url, method))
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        parse_response(response).await
    }
}

/// Decode a success body, or turn Firebase's `{"error": {...}}` into
/// [`FirebaseError::Api`].
pub(crate) async fn parse_response<R: DeserializeOwned>(
    response: reqwest::Response,
) -> FirebaseResult<R> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error.message,
            Err(_) => body,
        };
        return Err(FirebaseError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycal_core::identity::AuthErrorCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> FirebaseClient {
        FirebaseClient::new("test-key")
            .with_endpoints(format!("{}/v1", server.uri()), format!("{}/st", server.uri()))
    }

    fn sign_in_body() -> serde_json::Value {
        json!({
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": "uid-1",
            "email": "ada@example.com",
            "displayName": "",
            "idToken": "id-token",
            "registered": true,
            "refreshToken": "refresh-token",
            "expiresIn": "3600"
        })
    }

    #[tokio::test]
    async fn sign_in_posts_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .and(query_param("key", "test-key"))
            .and(body_json(json!({
                "email": "ada@example.com",
                "password": "hunter22",
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(sign_in_body()))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .sign_in_with_password("ada@example.com", "hunter22")
            .await
            .unwrap();

        assert_eq!(response.local_id, "uid-1");
        assert_eq!(response.refresh_token, "refresh-token");
    }

    #[tokio::test]
    async fn error_body_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "EMAIL_EXISTS",
                    "errors": [{
                        "message": "EMAIL_EXISTS",
                        "domain": "global",
                        "reason": "invalid"
                    }]
                }
            })))
            .mount(&server)
            .await;

        let err = client(&server).sign_up("ada@example.com", "hunter22").await.unwrap_err();

        assert!(matches!(
            &err,
            FirebaseError::Api { status: 400, message } if message == "EMAIL_EXISTS"
        ));
        assert_eq!(err.auth_code(), AuthErrorCode::EmailAlreadyInUse);
    }

    #[tokio::test]
    async fn non_json_error_keeps_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client(&server).sign_in_with_password("a@b.co", "pw").await.unwrap_err();
        assert!(matches!(
            err,
            FirebaseError::Api { status: 502, ref message } if message == "Bad Gateway"
        ));
    }

    #[tokio::test]
    async fn google_sign_in_sends_post_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithIdp"))
            .and(body_string_contains("id_token=google-id-token&providerId=google.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sign_in_body()))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .sign_in_with_google("google-id-token", "http://localhost:8085/callback")
            .await
            .unwrap();
        assert_eq!(response.email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn refresh_uses_form_encoding() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/st/token"))
            .and(query_param("key", "test-key"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=old-refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "expires_in": "3600",
                "token_type": "Bearer",
                "refresh_token": "new-refresh",
                "id_token": "new-id",
                "user_id": "uid-1",
                "project_id": "123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let refreshed = client(&server).refresh("old-refresh").await.unwrap();
        assert_eq!(refreshed.refresh_token, "new-refresh");
        assert_eq!(refreshed.user_id, "uid-1");
    }

    #[tokio::test]
    async fn lookup_returns_first_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:lookup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "identitytoolkit#GetAccountInfoResponse",
                "users": [{ "localId": "uid-1", "email": "ada@example.com", "displayName": "Ada" }]
            })))
            .mount(&server)
            .await;

        let user = client(&server).lookup("id").await.unwrap().unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Ada"));
    }
}
