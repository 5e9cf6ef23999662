mod storage;

use chrono::Utc;
use illustra_backend_models::models::LoginRequest;
use illustra_backend_models::models::LoginResponse;
use illustra_backend_models::models::RefreshRequest;
use illustra_backend_models::models::RefreshResponse;
use illustra_backend_models::models::TokenPair;
use reqwest::Method;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::client::Client;
use crate::error::ApiError;
use crate::error::Result;
pub use storage::StoredCredentials;
pub use storage::get_auth_file;
use storage::CredentialStore;
use storage::FileCredentialStore;
use storage::MemoryCredentialStore;

/// Environment variable that supplies an access token without touching
/// `auth.json`.
pub const ACCESS_TOKEN_ENV_VAR: &str = "ILLUSTRA_ACCESS_TOKEN";

/// Current token pair plus the store it is persisted to.
#[derive(Debug)]
pub struct Session {
    credentials: Mutex<Option<StoredCredentials>>,
    store: Arc<dyn CredentialStore>,
}

impl Session {
    /// Loads `auth.json` from `home`. A missing file yields a signed-out
    /// session; an unreadable one is reported.
    pub fn from_home(home: &Path) -> std::io::Result<Self> {
        let store = FileCredentialStore::new(home);
        let credentials = store.load()?;
        Ok(Self {
            credentials: Mutex::new(credentials),
            store: Arc::new(store),
        })
    }

    /// Session that is never persisted to disk.
    pub fn anonymous() -> Self {
        Self {
            credentials: Mutex::new(None),
            store: Arc::new(MemoryCredentialStore::default()),
        }
    }

    pub fn from_access_token(access: impl Into<String>) -> Self {
        let credentials = StoredCredentials {
            email: None,
            tokens: Some(TokenPair {
                access: access.into(),
                refresh: String::new(),
            }),
            last_refresh: None,
        };
        Self {
            credentials: Mutex::new(Some(credentials)),
            store: Arc::new(MemoryCredentialStore::default()),
        }
    }

    /// Prefers `ILLUSTRA_ACCESS_TOKEN` when it is set and non-empty.
    pub fn from_env_or_home(home: &Path) -> std::io::Result<Self> {
        match std::env::var(ACCESS_TOKEN_ENV_VAR) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::from_access_token(token.trim())),
            _ => Self::from_home(home),
        }
    }

    pub fn credentials(&self) -> Option<StoredCredentials> {
        self.credentials.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens()
            .map(|tokens| tokens.access)
            .filter(|access| !access.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.tokens()
            .map(|tokens| tokens.refresh)
            .filter(|refresh| !refresh.is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.access_token().is_some()
    }

    fn tokens(&self) -> Option<TokenPair> {
        self.credentials().and_then(|credentials| credentials.tokens)
    }

    fn store(&self, credentials: StoredCredentials) -> std::io::Result<()> {
        self.store.save(&credentials)?;
        let mut guard = self
            .credentials
            .lock()
            .map_err(|_| std::io::Error::other("failed to lock session"))?;
        *guard = Some(credentials);
        Ok(())
    }

    fn clear(&self) -> std::io::Result<bool> {
        if let Ok(mut guard) = self.credentials.lock() {
            guard.take();
        }
        self.store.delete()
    }
}

impl Client {
    /// Exchanges email and password for a token pair and persists it.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .send_json(Method::POST, "/auth/login/", &request)
            .await?;
        let tokens = response.into_tokens();
        self.session().store(StoredCredentials {
            email: Some(email.to_string()),
            tokens: Some(tokens.clone()),
            last_refresh: Some(Utc::now()),
        })?;
        info!(email, "signed in");
        Ok(tokens)
    }

    /// Trades the stored refresh token for a new access token. Rotated
    /// refresh tokens replace the stored one.
    pub async fn refresh_access_token(&self) -> Result<String> {
        let refresh = self
            .session()
            .refresh_token()
            .ok_or(ApiError::MissingRefreshToken)?;
        let request = RefreshRequest {
            refresh: refresh.clone(),
        };
        let response: RefreshResponse = self
            .send_json(Method::POST, "/auth/token/refresh/", &request)
            .await?;
        let mut credentials = self.session().credentials().unwrap_or_default();
        credentials.tokens = Some(TokenPair {
            access: response.access.clone(),
            refresh: response.refresh.unwrap_or(refresh),
        });
        credentials.last_refresh = Some(Utc::now());
        self.session().store(credentials)?;
        debug!("access token refreshed");
        Ok(response.access)
    }

    /// Drops the stored tokens. Returns whether anything was stored.
    pub fn logout(&self) -> Result<bool> {
        self.clear_cache();
        match self.session().clear() {
            Ok(removed) => Ok(removed),
            Err(err) => {
                warn!("failed to remove stored credentials: {err}");
                Err(ApiError::Storage(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_auth_file_is_signed_out() -> std::io::Result<()> {
        let home = tempdir()?;
        let session = Session::from_home(home.path())?;
        assert!(!session.is_signed_in());
        assert_eq!(session.refresh_token(), None);
        Ok(())
    }

    #[test]
    fn explicit_access_token_has_no_refresh() {
        let session = Session::from_access_token("abc");
        assert_eq!(session.access_token(), Some("abc".to_string()));
        assert_eq!(session.refresh_token(), None);
    }

    #[test]
    fn stored_credentials_survive_reload() -> std::io::Result<()> {
        let home = tempdir()?;
        let session = Session::from_home(home.path())?;
        session.store(StoredCredentials {
            email: Some("mechanic@example.com".to_string()),
            tokens: Some(TokenPair {
                access: "a".to_string(),
                refresh: "r".to_string(),
            }),
            last_refresh: None,
        })?;

        let reloaded = Session::from_home(home.path())?;
        assert_eq!(reloaded.access_token(), Some("a".to_string()));
        assert_eq!(reloaded.refresh_token(), Some("r".to_string()));

        assert!(reloaded.clear()?);
        assert!(!Session::from_home(home.path())?.is_signed_in());
        Ok(())
    }
}
