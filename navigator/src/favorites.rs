use illustra_backend_client::Result as ApiResult;
use illustra_backend_client::models::Favorite;
use illustra_backend_client::models::Id;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;

use crate::error::Result;
use crate::source::FavoriteSource;

const FAVORITES_FILENAME: &str = "favorites.json";

/// Last known favorite flag per illustration, persisted as JSON in the
/// client home directory. Last write wins.
#[derive(Debug, Clone)]
pub struct FavoritesCache {
    path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FavoritesBook {
    #[serde(default)]
    favorites: BTreeMap<Id, bool>,
}

impl FavoritesCache {
    pub fn new(home: &Path) -> Self {
        Self {
            path: home.join(FAVORITES_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<BTreeMap<Id, bool>> {
        Ok(self.read()?.favorites)
    }

    pub fn record(&self, illustration: Id, favorited: bool) -> Result<()> {
        let mut book = self.read()?;
        book.favorites.insert(illustration, favorited);
        self.write(&book)
    }

    fn read(&self) -> Result<FavoritesBook> {
        match fs::read(&self.path) {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(FavoritesBook::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, book: &FavoritesBook) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(book)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Favorite toggling with failure rollback. A failed toggle leaves the
/// caller's state untouched instead of surfacing an error.
pub struct FavoritesToggle<S> {
    source: S,
    cache: Option<FavoritesCache>,
    known: BTreeMap<Id, bool>,
}

impl<S: FavoriteSource> FavoritesToggle<S> {
    pub fn new(source: S, cache: Option<FavoritesCache>) -> Self {
        let known = match cache.as_ref().map(FavoritesCache::load) {
            Some(Ok(known)) => known,
            Some(Err(err)) => {
                warn!("ignoring unreadable favorites cache: {err}");
                BTreeMap::new()
            }
            None => BTreeMap::new(),
        };
        Self {
            source,
            cache,
            known,
        }
    }

    /// State recorded by an earlier toggle or check, if any.
    pub fn cached(&self, illustration: Id) -> Option<bool> {
        self.known.get(&illustration).copied()
    }

    /// Returns the state after the toggle: the server's answer on success,
    /// `current` unchanged on failure.
    pub async fn toggle(&mut self, illustration: Id, current: bool) -> bool {
        match self.source.toggle(illustration).await {
            Ok(status) => {
                let favorited = status.is_favorited;
                debug!(illustration, favorited, "favorite toggled");
                self.remember(illustration, favorited);
                favorited
            }
            Err(err) => {
                warn!(illustration, "failed to toggle favorite: {err}");
                current
            }
        }
    }

    /// Server status. Failures read as "not favorited".
    pub async fn check(&mut self, illustration: Id) -> bool {
        match self.source.check(illustration).await {
            Ok(status) => {
                self.remember(illustration, status.is_favorited);
                status.is_favorited
            }
            Err(err) => {
                warn!(illustration, "failed to check favorite: {err}");
                false
            }
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<Favorite>> {
        self.source.favorites().await
    }

    fn remember(&mut self, illustration: Id, favorited: bool) {
        self.known.insert(illustration, favorited);
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.record(illustration, favorited) {
                warn!("failed to update favorites cache: {err}");
            }
        }
    }
}
