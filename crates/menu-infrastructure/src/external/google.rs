// ============================================================================
// Menu Infrastructure - Google Identity Provider
// File: crates/menu-infrastructure/src/external/google.rs
// ============================================================================
//! Authorization-code flow against Google: consent URL, code exchange, userinfo.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use menu_core::domain::AuthProvider;
use menu_core::error::DomainError;
use menu_core::ports::{IdentityProvider, OAuthProfile};
use menu_shared::config::GoogleOAuthSettings;

const SCOPES: &str = "openid email profile";

#[derive(Clone)]
pub struct GoogleIdentityProvider {
    client: Client,
    auth_url: Url,
    token_url: String,
    userinfo_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'static str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfoResponse {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

fn provider_error(message: String) -> DomainError {
    error!("Google sign-in failed: {}", message);
    DomainError::IdentityProviderError(message)
}

impl GoogleIdentityProvider {
    pub fn new(settings: &GoogleOAuthSettings) -> anyhow::Result<Self> {
        let auth_url = Url::parse(&settings.auth_url).context("parsing Google auth_url")?;
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building identity provider HTTP client")?;

        Ok(Self {
            client,
            auth_url,
            token_url: settings.token_url.clone(),
            userinfo_url: settings.userinfo_url.clone(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            redirect_uri: settings.redirect_uri.clone(),
        })
    }

    async fn fetch_access_token(&self, code: &str) -> Result<String, DomainError> {
        let request = TokenRequest {
            code,
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            redirect_uri: &self.redirect_uri,
            grant_type: "authorization_code",
        };

        let response = self
            .client
            .post(&self.token_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| provider_error(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(provider_error(format!("token endpoint returned {}: {}", status, text)));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("unreadable token response: {}", e)))?;
        Ok(body.access_token)
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Google
    }

    fn authorization_url(&self, state: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            .append_pair("state", state)
            .append_pair("prompt", "select_account");
        url.into()
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthProfile, DomainError> {
        let access_token = self.fetch_access_token(code).await?;

        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(&access_token)
            .send()
            .await
            .map_err(|e| provider_error(format!("userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(provider_error(format!(
                "userinfo endpoint returned {}",
                response.status()
            )));
        }

        let info: UserInfoResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("unreadable userinfo response: {}", e)))?;

        let email = info
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| provider_error("profile has no email".to_string()))?;

        info!("Google profile resolved for subject {}", info.sub);

        Ok(OAuthProfile {
            provider: AuthProvider::Google,
            subject: info.sub,
            email,
            name: info.name,
            image: info.picture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base: &str) -> GoogleOAuthSettings {
        GoogleOAuthSettings {
            client_id: "client-123".to_string(),
            client_secret: "shh".to_string(),
            redirect_uri: "http://localhost:8080/api/auth/google/callback".to_string(),
            auth_url: "https://accounts.example.test/o/oauth2/v2/auth".to_string(),
            token_url: format!("{}/token", base),
            userinfo_url: format!("{}/userinfo", base),
        }
    }

    #[test]
    fn test_authorization_url_carries_state() {
        let provider = GoogleIdentityProvider::new(&settings("http://unused")).unwrap();
        let url = Url::parse(&provider.authorization_url("abc123")).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(pairs.contains(&("state".to_string(), "abc123".to_string())));
        assert!(pairs.contains(&("client_id".to_string(), "client-123".to_string())));
        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
    }

    #[tokio::test]
    async fn test_exchange_code_returns_profile() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_partial_json(json!({
                "code": "auth-code",
                "grant_type": "authorization_code"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header("authorization", "Bearer ya29.token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sub": "1098",
                "email": "layla@cafe.test",
                "name": "Layla K",
                "picture": "https://img.test/layla.png"
            })))
            .mount(&server)
            .await;

        let provider = GoogleIdentityProvider::new(&settings(&server.uri())).unwrap();
        let profile = provider.exchange_code("auth-code").await.unwrap();

        assert_eq!(profile.subject, "1098");
        assert_eq!(profile.email, "layla@cafe.test");
        assert_eq!(profile.provider, AuthProvider::Google);
    }

    #[tokio::test]
    async fn test_rejected_code_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant"
            })))
            .mount(&server)
            .await;

        let provider = GoogleIdentityProvider::new(&settings(&server.uri())).unwrap();
        assert!(matches!(
            provider.exchange_code("stale").await,
            Err(DomainError::IdentityProviderError(_))
        ));
    }
}
