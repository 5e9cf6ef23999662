use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Id;
use super::illustration::Illustration;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Favorite {
    #[serde(default)]
    pub id: Option<Id>,
    pub illustration: FavoriteTarget,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Favorite {
    pub fn illustration_id(&self) -> Id {
        match &self.illustration {
            FavoriteTarget::Id(id) => *id,
            FavoriteTarget::Expanded(illustration) => illustration.id,
        }
    }
}

/// Favorites reference their illustration either by id or as an embedded
/// list representation, depending on the serializer the backend picks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FavoriteTarget {
    Id(Id),
    Expanded(Box<Illustration>),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteToggleRequest {
    pub illustration: Id,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteStatus {
    pub is_favorited: bool,
}
