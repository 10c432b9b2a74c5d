//! [`IdentityProvider`] backed by Firebase Authentication.

use mycal_core::config::MycalConfig;
use mycal_core::identity::{AuthResult, Identity, IdentityProvider, SignInMethod};

use crate::api::{FirebaseClient, SignInResponse};
use crate::error::{FirebaseError, FirebaseResult};
use crate::oauth::{self, GoogleOAuth};
use crate::session::{SessionFile, StoredSession};

pub struct FirebaseProvider {
    client: FirebaseClient,
    google: Option<GoogleOAuth>,
    session_file: SessionFile,
}

impl FirebaseProvider {
    pub fn new(
        client: FirebaseClient,
        google: Option<GoogleOAuth>,
        session_file: SessionFile,
    ) -> Self {
        FirebaseProvider {
            client,
            google,
            session_file,
        }
    }

    pub fn from_config(config: &MycalConfig) -> FirebaseResult<Self> {
        let api_key = config
            .firebase
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(FirebaseError::MissingApiKey)?;

        let mut client = FirebaseClient::new(api_key);
        if config.firebase.identity_url.is_some() || config.firebase.token_url.is_some() {
            client = client.with_endpoints(
                config
                    .firebase
                    .identity_url
                    .as_deref()
                    .unwrap_or(crate::api::IDENTITY_TOOLKIT_URL),
                config
                    .firebase
                    .token_url
                    .as_deref()
                    .unwrap_or(crate::api::SECURE_TOKEN_URL),
            );
        }

        let google = config
            .google
            .as_ref()
            .map(|g| GoogleOAuth::new(&g.client_id, &g.client_secret));

        let session_path = config
            .session_path()
            .map_err(|e| FirebaseError::Session(e.to_string()))?;

        Ok(Self::new(client, google, SessionFile::new(session_path)))
    }

    pub fn session_file(&self) -> &SessionFile {
        &self.session_file
    }

    /// Persist the session from a sign-in response and return its identity.
    fn remember(&self, response: SignInResponse, method: SignInMethod) -> FirebaseResult<Identity> {
        let stored = StoredSession {
            uid: response.local_id,
            email: response.email.filter(|e| !e.is_empty()),
            display_name: response.display_name.filter(|n| !n.is_empty()),
            method,
            refresh_token: response.refresh_token,
        };
        self.session_file.save(&stored)?;
        Ok(stored.identity())
    }

    async fn restore_stored(&self) -> FirebaseResult<Option<Identity>> {
        let Some(mut stored) = self.session_file.load()? else {
            return Ok(None);
        };

        match self.client.refresh(&stored.refresh_token).await {
            Ok(refreshed) => {
                if let Ok(Some(user)) = self.client.lookup(&refreshed.id_token).await {
                    stored.email = user.email.filter(|e| !e.is_empty()).or(stored.email);
                    stored.display_name = user
                        .display_name
                        .filter(|n| !n.is_empty())
                        .or(stored.display_name);
                }
                stored.uid = refreshed.user_id;
                stored.refresh_token = refreshed.refresh_token;
                self.session_file.save(&stored)?;
                Ok(Some(stored.identity()))
            }
            Err(e) if e.rejects_session() => {
                tracing::info!(error = %e, "stored session rejected, signing out");
                self.session_file.clear()?;
                Ok(None)
            }
            Err(e @ (FirebaseError::Api { .. } | FirebaseError::Http(_))) => {
                tracing::warn!(error = %e, "could not refresh session, using stored identity");
                Ok(Some(stored.identity()))
            }
            Err(e) => Err(e),
        }
    }

    async fn sign_up_with_profile(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> FirebaseResult<Identity> {
        let mut response = self.client.sign_up(email, password).await?;

        if let Some(name) = display_name.filter(|n| !n.is_empty()) {
            match self.client.update_display_name(&response.id_token, name).await {
                Ok(()) => response.display_name = Some(name.to_string()),
                Err(e) => {
                    tracing::warn!(error = %e, "account created but display name was not saved")
                }
            }
        }

        self.remember(response, SignInMethod::Password)
    }

    async fn sign_in_with_google(&self) -> FirebaseResult<Identity> {
        let google = self.google.as_ref().ok_or(FirebaseError::MissingGoogleClient)?;
        let google_id_token = google.authorize().await?;
        let response = self
            .client
            .sign_in_with_google(&google_id_token, &oauth::redirect_uri())
            .await?;
        self.remember(response, SignInMethod::Google)
    }
}

impl IdentityProvider for FirebaseProvider {
    fn name(&self) -> &str {
        "firebase"
    }

    async fn restore(&self) -> AuthResult<Option<Identity>> {
        Ok(self.restore_stored().await?)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Identity> {
        let response = self.client.sign_in_with_password(email, password).await?;
        Ok(self.remember(response, SignInMethod::Password)?)
    }

    async fn sign_in_federated(&self) -> AuthResult<Identity> {
        Ok(self.sign_in_with_google().await?)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AuthResult<Identity> {
        Ok(self.sign_up_with_profile(email, password, display_name).await?)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        Ok(self.session_file.clear()?)
    }
}
