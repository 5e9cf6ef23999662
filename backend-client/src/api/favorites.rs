use illustra_backend_models::models::Favorite;
use illustra_backend_models::models::FavoriteStatus;
use illustra_backend_models::models::FavoriteToggleRequest;
use illustra_backend_models::models::Id;
use illustra_backend_models::models::Page;
use reqwest::Method;

use crate::client::Client;
use crate::error::Result;

const FAVORITES: &str = "/favorites/";

impl Client {
    pub async fn list_favorites(&self) -> Result<Page<Favorite>> {
        self.get_json(FAVORITES, &[]).await
    }

    /// Flips the favorite flag server-side and returns the new state.
    pub async fn toggle_favorite(&self, illustration: Id) -> Result<FavoriteStatus> {
        let request = FavoriteToggleRequest { illustration };
        self.send_json(Method::POST, &format!("{FAVORITES}toggle/"), &request)
            .await
    }

    pub async fn check_favorite(&self, illustration: Id) -> Result<FavoriteStatus> {
        self.get_json_uncached(
            &format!("{FAVORITES}check/"),
            &[("illustration", illustration.to_string())],
        )
        .await
    }
}
