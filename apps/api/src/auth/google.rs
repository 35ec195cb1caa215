use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Decoded claims of a Google ID token, as returned by the tokeninfo
/// endpoint. Only the fields we consume are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokenInfo {
    pub aud: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Verifies Google ID tokens by asking Google, rather than carrying the
/// JWKS machinery in-process. Federated sign-in is rare enough that the
/// extra round-trip does not matter.
#[derive(Clone)]
pub struct GoogleVerifier {
    client: Client,
    client_id: Option<String>,
}

impl GoogleVerifier {
    pub fn new(client_id: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            client_id,
        }
    }

    /// Returns the token's claims, or `Unauthorized` if Google rejects the
    /// token or its audience does not match the configured client id.
    pub async fn verify(&self, id_token: &str) -> Result<GoogleTokenInfo, AppError> {
        let response = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("tokeninfo request failed: {e}")))?;

        if !response.status().is_success() {
            warn!("Google rejected ID token: {}", response.status());
            return Err(AppError::Unauthorized);
        }

        let info: GoogleTokenInfo = response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("tokeninfo parse failed: {e}")))?;

        if let Some(expected) = &self.client_id {
            if &info.aud != expected {
                warn!("ID token audience mismatch: {}", info.aud);
                return Err(AppError::Unauthorized);
            }
        }

        Ok(info)
    }
}
