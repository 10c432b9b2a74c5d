//! Google OAuth in the system browser with a loopback redirect.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use url::Url;
use uuid::Uuid;

use crate::api::parse_response;
use crate::error::{FirebaseError, FirebaseResult};

pub const SCOPES: &[&str] = &["openid", "email", "profile"];

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const REDIRECT_PORT: u16 = 8085;
const CALLBACK_PATH: &str = "/callback";

/// How long the browser has to finish the consent screen.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(300);

const SIGNED_IN_RESPONSE: &str = "HTTP/1.1 200 OK\r\n\
    Content-Type: text/html\r\n\
    Connection: close\r\n\
    \r\n\
    <html><body>\
    <h1>Signed in to My Calendar</h1>\
    <p>You can close this window and return to the terminal.</p>\
    </body></html>";

const NOT_FOUND_RESPONSE: &str = "HTTP/1.1 404 Not Found\r\n\
    Content-Length: 0\r\n\
    Connection: close\r\n\
    \r\n";

pub fn redirect_uri() -> String {
    format!("http://localhost:{}{}", REDIRECT_PORT, CALLBACK_PATH)
}

pub fn redirect_address() -> String {
    format!("127.0.0.1:{}", REDIRECT_PORT)
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Clone, Debug)]
pub struct GoogleOAuth {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl GoogleOAuth {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        GoogleOAuth {
            http: reqwest::Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn consent_url(&self, state: &str) -> FirebaseResult<Url> {
        Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", redirect_uri().as_str()),
                ("response_type", "code"),
                ("scope", SCOPES.join(" ").as_str()),
                ("state", state),
                ("prompt", "select_account"),
            ],
        )
        .map_err(|e| FirebaseError::OAuth(e.to_string()))
    }

    /// Run the browser consent flow and return Google's ID token.
    ///
    /// The loopback listener is bound before the browser opens and is
    /// released once the callback has been answered or the wait times out.
    pub async fn authorize(&self) -> FirebaseResult<String> {
        let state = Uuid::new_v4().to_string();
        let auth_url = self.consent_url(&state)?;

        let listener = TcpListener::bind(redirect_address()).await.map_err(|e| {
            FirebaseError::OAuth(format!("Failed to bind OAuth callback listener: {e}"))
        })?;

        eprintln!("\nOpen this URL in your browser to sign in with Google:\n");
        eprintln!("{}\n", auth_url);

        if open::that(auth_url.as_str()).is_err() {
            eprintln!("(Could not open browser automatically, please copy the URL above)");
        }

        let params = wait_for_callback(listener, CALLBACK_TIMEOUT).await?;
        let code = callback_code(&params, &state)?;

        tracing::debug!("received authorization code, exchanging for tokens");
        self.exchange_code(&code).await
    }

    async fn exchange_code(&self, code: &str) -> FirebaseResult<String> {
        let redirect_uri = redirect_uri();
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let tokens: TokenResponse = parse_response(response).await?;
        tokens
            .id_token
            .ok_or_else(|| FirebaseError::OAuth("Google did not return an ID token".into()))
    }
}

/// Pull the authorization code out of the callback, checking `state`.
fn callback_code(
    params: &HashMap<String, String>,
    expected_state: &str,
) -> FirebaseResult<String> {
    if let Some(error) = params.get("error") {
        return Err(FirebaseError::OAuth(format!(
            "Google sign-in was not completed: {error}"
        )));
    }

    let state = params
        .get("state")
        .ok_or_else(|| FirebaseError::OAuth("No state in callback".into()))?;
    if state != expected_state {
        return Err(FirebaseError::OAuth(
            "OAuth state mismatch - possible CSRF attack".into(),
        ));
    }

    params
        .get("code")
        .cloned()
        .ok_or_else(|| FirebaseError::OAuth("No code in callback".into()))
}

/// Wait up to `limit` for the browser to hit `/callback` and return its
/// query parameters. Other requests get a 404 and the wait goes on.
async fn wait_for_callback(
    listener: TcpListener,
    limit: Duration,
) -> FirebaseResult<HashMap<String, String>> {
    tokio::time::timeout(limit, accept_callback(&listener))
        .await
        .map_err(|_| FirebaseError::OAuth("Timed out waiting for Google sign-in".into()))?
}

async fn accept_callback(listener: &TcpListener) -> FirebaseResult<HashMap<String, String>> {
    loop {
        let (stream, peer) = listener.accept().await?;

        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        if let Err(e) = reader.read_line(&mut request_line).await {
            tracing::debug!(%peer, "dropping unreadable loopback request: {e}");
            continue;
        }
        let mut stream = reader.into_inner();

        match parse_request_line(&request_line) {
            Ok((path, params)) if path == CALLBACK_PATH => {
                if let Err(e) = respond(&mut stream, SIGNED_IN_RESPONSE).await {
                    tracing::debug!("could not answer the OAuth callback: {e}");
                }
                return Ok(params);
            }
            Ok((path, _)) => {
                tracing::debug!(%peer, %path, "ignoring loopback request");
                if let Err(e) = respond(&mut stream, NOT_FOUND_RESPONSE).await {
                    tracing::debug!("could not answer loopback request: {e}");
                }
            }
            Err(e) => tracing::debug!(%peer, "ignoring loopback request: {e}"),
        }
    }
}

async fn respond(stream: &mut TcpStream, response: &str) -> std::io::Result<()> {
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}

/// `GET /callback?code=..&state=.. HTTP/1.1` to its path and query
/// parameters.
fn parse_request_line(request_line: &str) -> FirebaseResult<(String, HashMap<String, String>)> {
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| FirebaseError::OAuth("Invalid HTTP request".into()))?;

    let url = Url::parse(&format!("http://localhost{}", url_part))
        .map_err(|e| FirebaseError::OAuth(e.to_string()))?;

    Ok((url.path().to_string(), url.query_pairs().into_owned().collect()))
}
