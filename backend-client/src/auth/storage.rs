use chrono::DateTime;
use chrono::Utc;
use illustra_backend_models::models::TokenPair;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

const AUTH_FILENAME: &str = "auth.json";

/// Contents of `auth.json` in the client home directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredCredentials {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tokens: Option<TokenPair>,
    #[serde(default)]
    pub last_refresh: Option<DateTime<Utc>>,
}

pub(crate) trait CredentialStore: Debug + Send + Sync {
    fn load(&self) -> io::Result<Option<StoredCredentials>>;
    fn save(&self, credentials: &StoredCredentials) -> io::Result<()>;
    fn delete(&self) -> io::Result<bool>;
}

#[derive(Debug, Clone)]
pub(crate) struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub(crate) fn new(home: &Path) -> Self {
        Self {
            path: get_auth_file(home),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> io::Result<Option<StoredCredentials>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let credentials: StoredCredentials = serde_json::from_str(&contents)?;
        Ok(Some(credentials))
    }

    fn save(&self, credentials: &StoredCredentials) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json_data = serde_json::to_string_pretty(credentials)?;
        let mut options = OpenOptions::new();
        options.truncate(true).write(true).create(true);
        #[cfg(unix)]
        {
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(json_data.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn delete(&self) -> io::Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Keeps credentials for the lifetime of the process only.
#[derive(Debug, Default)]
pub(crate) struct MemoryCredentialStore {
    credentials: Mutex<Option<StoredCredentials>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> io::Result<Option<StoredCredentials>> {
        self.credentials
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| io::Error::other("failed to lock credential store"))
    }

    fn save(&self, credentials: &StoredCredentials) -> io::Result<()> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|_| io::Error::other("failed to lock credential store"))?;
        *guard = Some(credentials.clone());
        Ok(())
    }

    fn delete(&self) -> io::Result<bool> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|_| io::Error::other("failed to lock credential store"))?;
        Ok(guard.take().is_some())
    }
}

pub fn get_auth_file(home: &Path) -> PathBuf {
    home.join(AUTH_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_auth_file() -> io::Result<()> {
        let home = tempdir()?;
        let store = FileCredentialStore::new(home.path());
        assert_eq!(store.load()?, None);

        let credentials = StoredCredentials {
            email: Some("mechanic@example.com".to_string()),
            tokens: Some(TokenPair {
                access: "access".to_string(),
                refresh: "refresh".to_string(),
            }),
            last_refresh: Some(Utc::now()),
        };
        store.save(&credentials)?;
        assert_eq!(store.load()?, Some(credentials));

        assert!(store.delete()?);
        assert!(!store.delete()?);
        assert!(!get_auth_file(home.path()).exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn auth_file_is_private() -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let home = tempdir()?;
        let store = FileCredentialStore::new(home.path());
        store.save(&StoredCredentials::default())?;
        let mode = std::fs::metadata(get_auth_file(home.path()))?
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
        Ok(())
    }
}
