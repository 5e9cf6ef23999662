use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Id;

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

/// User feedback left through the comment form.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: Id,
    #[serde(default)]
    pub department_name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub star: u8,
    #[serde(default, alias = "username")]
    pub user_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    pub department_name: String,
    pub comment: String,
    pub star: u8,
}

impl NewComment {
    pub fn new(department_name: impl Into<String>, comment: impl Into<String>, star: u8) -> Self {
        Self {
            department_name: department_name.into(),
            comment: comment.into(),
            star: star.clamp(MIN_STARS, MAX_STARS),
        }
    }
}
