use serde::Deserialize;
use serde::Serialize;

/// A list response. Paginated endpoints wrap their items in an envelope,
/// others return a bare array; both decode into this type.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Page<T> {
    Paginated {
        #[serde(default)]
        count: u64,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
    Plain(Vec<T>),
}

impl<T> Page<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Page::Paginated { results, .. } => results,
            Page::Plain(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Page::Paginated { results, .. } => results,
            Page::Plain(items) => items,
        }
    }

    /// Total number of matching records on the server. For unpaginated
    /// responses this is the length of the array.
    pub fn total(&self) -> u64 {
        match self {
            Page::Paginated { count, .. } => *count,
            Page::Plain(items) => items.len() as u64,
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self, Page::Paginated { next: Some(_), .. })
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page::Plain(Vec::new())
    }
}
