use crate::{VisionError, VisionResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

const TOKEN_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Parsed service-account credential blob. Only the fields needed for the
/// jwt-bearer token exchange are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    pub fn from_json(blob: &str) -> VisionResult<Self> {
        Ok(serde_json::from_str(blob)?)
    }
}

#[derive(Serialize)]
struct TokenClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Exchanges the service-account key for bearer tokens and caches them
/// until shortly before expiry. Safe to share across requests.
pub(crate) struct TokenProvider {
    key: ServiceAccountKey,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    pub(crate) fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            cached: RwLock::new(None),
        }
    }

    pub(crate) async fn bearer_token(&self, http: &reqwest::Client) -> VisionResult<String> {
        if let Some(cached) = self.cached.read().await.as_ref()
            && cached.expires_at > Utc::now()
        {
            return Ok(cached.token.clone());
        }

        let fresh = self.fetch_token(http).await?;
        let token = fresh.token.clone();
        *self.cached.write().await = Some(fresh);
        Ok(token)
    }

    async fn fetch_token(&self, http: &reqwest::Client) -> VisionResult<CachedToken> {
        let now = Utc::now();
        let claims = TokenClaims {
            iss: &self.key.client_email,
            scope: TOKEN_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let assertion = jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?,
        )?;

        let response = http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(VisionError::TokenExchange {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let token: TokenResponse = response.json().await?;
        debug!(expires_in = token.expires_in, "fetched fresh bearer token");
        Ok(CachedToken {
            token: token.access_token,
            // Refresh a minute early so an in-flight call never carries an
            // expired token.
            expires_at: now + Duration::seconds(token.expires_in - 60),
        })
    }
}
