//! The OAuth token file a profile points at, refreshed when expired.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::OAuthClient;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Token file contents, in the usual OAuth2 token layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenData {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenData {
    /// Tokens with no expiry (or the zero expiry) are treated as valid.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) if expiry.year() > 1 => now >= expiry,
            _ => false,
        }
    }
}

pub struct Session {
    path: PathBuf,
    data: TokenData,
}

impl Session {
    /// Load the token file, refreshing it first if it has expired and
    /// the profile carries client credentials.
    pub async fn load_valid(path: &Path, oauth_client: Option<&OAuthClient>) -> Result<Self> {
        let mut session = Self::load(path)?;

        if session.data.is_expired(Utc::now()) {
            match oauth_client {
                Some(client) if !session.data.refresh_token.is_empty() => {
                    session.refresh(client).await?;
                }
                _ => warn!(
                    "Access token in {} has expired and cannot be refreshed without client_id/client_secret",
                    path.display()
                ),
            }
        }

        Ok(session)
    }

    fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Token file {} not found!", path.display());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read token file {}", path.display()))?;

        let data: TokenData = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse token file {}", path.display()))?;

        Ok(Session {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn access_token(&self) -> &str {
        &self.data.access_token
    }

    fn save(&self) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize token")?;

        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write token to {}", self.path.display()))?;

        // Set to owner-only (0600) since file contains OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", self.path.display()))?;
        }

        Ok(())
    }

    async fn refresh(&mut self, client: &OAuthClient) -> Result<()> {
        info!("Access token expired, refreshing");

        let response = reqwest::Client::new()
            .post(TOKEN_URL)
            .form(&[
                ("client_id", client.client_id.as_str()),
                ("client_secret", client.client_secret.as_str()),
                ("refresh_token", self.data.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .context("Failed to send token refresh request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Failed to refresh token: HTTP {} - {}", status, error_text);
        }

        #[derive(Deserialize)]
        struct RefreshResponse {
            access_token: String,
            expires_in: i64,
            #[serde(default)]
            refresh_token: Option<String>,
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .context("Failed to parse token refresh response")?;

        self.data.access_token = refreshed.access_token;
        self.data.expiry = Some(Utc::now() + Duration::seconds(refreshed.expires_in));
        // Google typically doesn't return a new refresh_token on refresh
        if let Some(token) = refreshed.refresh_token.filter(|t| !t.is_empty()) {
            self.data.refresh_token = token;
        }
        self.save()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_oauth2_token_file() {
        let json = r#"{
            "access_token": "ya29.abc",
            "token_type": "Bearer",
            "refresh_token": "1//refresh",
            "expiry": "2025-03-20T15:00:00Z"
        }"#;
        let data: TokenData = serde_json::from_str(json).unwrap();

        assert_eq!(data.access_token, "ya29.abc");
        assert_eq!(data.refresh_token, "1//refresh");
        assert_eq!(data.expiry, Some(Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap()));
    }

    #[test]
    fn test_expiry() {
        let mut data: TokenData = serde_json::from_str(r#"{"access_token": "t"}"#).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap();
        assert_eq!(data.token_type, "Bearer");
        assert!(!data.is_expired(now));

        data.expiry = Some(now - Duration::minutes(1));
        assert!(data.is_expired(now));

        data.expiry = Some(now + Duration::minutes(1));
        assert!(!data.is_expired(now));

        // The zero time means "never expires"
        data.expiry = Some(Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap());
        assert!(!data.is_expired(now));
    }

    #[tokio::test]
    async fn test_load_valid_without_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, r#"{"access_token": "ya29.abc"}"#).unwrap();

        let session = Session::load_valid(&path, None).await.unwrap();
        assert_eq!(session.access_token(), "ya29.abc");
    }

    #[tokio::test]
    async fn test_load_missing_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Session::load_valid(&dir.path().join("nope.json"), None).await;
        assert!(result.is_err());
    }
}
