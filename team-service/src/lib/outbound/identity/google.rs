use async_trait::async_trait;
use reqwest::Client;
use reqwest::Url;
use serde::Deserialize;

use crate::account::errors::AccountError;
use crate::account::models::DisplayName;
use crate::account::models::EmailAddress;
use crate::account::models::FederatedProfile;
use crate::account::ports::IdentityProvider;
use crate::config::GoogleConfig;

const SCOPES: &str =
    "https://www.googleapis.com/auth/userinfo.profile https://www.googleapis.com/auth/userinfo.email";

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: String,
    #[serde(default)]
    verified_email: bool,
    name: Option<String>,
}

impl GoogleUserInfo {
    /// Display name falls back to the email's local part when Google sends none.
    fn into_profile(self) -> Result<FederatedProfile, AccountError> {
        let email = EmailAddress::new(self.email).map_err(|e| {
            tracing::error!(error = %e, "Google profile carries an invalid email");
            AccountError::ProfileFetch("profile email is invalid".to_string())
        })?;

        let name = self
            .name
            .and_then(|n| DisplayName::new(n).ok())
            .or_else(|| {
                let local = email.as_str().split('@').next().unwrap_or_default();
                DisplayName::new(local.to_string()).ok()
            })
            .ok_or_else(|| AccountError::ProfileFetch("profile has no usable name".to_string()))?;

        Ok(FederatedProfile {
            provider_id: self.id,
            email,
            verified_email: self.verified_email,
            name,
        })
    }
}

/// Google OAuth 2.0 authorization-code client.
pub struct GoogleIdentityProvider {
    client: Client,
    config: GoogleConfig,
    auth_url: Url,
}

impl GoogleIdentityProvider {
    pub fn new(client: Client, config: GoogleConfig) -> anyhow::Result<Self> {
        let auth_url = Url::parse(&config.auth_url)?;
        Url::parse(&config.token_url)?;
        Url::parse(&config.userinfo_url)?;

        Ok(Self {
            client,
            config,
            auth_url,
        })
    }

    /// Build a provider whose HTTP client gives up after `config.timeout()`.
    pub fn from_config(config: GoogleConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Self::new(client, config)
    }

    async fn fetch_access_token(&self, code: &str) -> Result<String, AccountError> {
        let response = self
            .client
            .post(self.config.token_url.as_str())
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to reach Google token endpoint");
                AccountError::Exchange("token endpoint unreachable".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Google rejected authorization code");
            return Err(AccountError::Exchange("authorization code rejected".to_string()));
        }

        let token: GoogleTokenResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Google token response");
            AccountError::Exchange("malformed token response".to_string())
        })?;

        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<GoogleUserInfo, AccountError> {
        let response = self
            .client
            .get(self.config.userinfo_url.as_str())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to reach Google userinfo endpoint");
                AccountError::ProfileFetch("profile endpoint unreachable".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(status = %status, "Google userinfo request failed");
            return Err(AccountError::ProfileFetch(format!(
                "profile endpoint returned {status}"
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Google user info");
            AccountError::ProfileFetch("malformed profile".to_string())
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            .append_pair("access_type", "offline")
            .append_pair("state", state);
        url.into()
    }

    async fn exchange(&self, code: &str) -> Result<FederatedProfile, AccountError> {
        let access_token = self.fetch_access_token(code).await?;
        let info = self.fetch_profile(&access_token).await?;
        info.into_profile()
    }
}
