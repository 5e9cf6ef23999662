use serde::Deserialize;
use serde::Serialize;
use serde_with::skip_serializing_none;

use super::Id;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartCategory {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub subcategory_count: Option<u64>,
    #[serde(default)]
    pub illustration_count: Option<u64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub order: Option<i32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartSubCategory {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub part_category: Option<Id>,
    #[serde(default)]
    pub part_category_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub illustration_count: Option<u64>,
}

impl PartSubCategory {
    pub fn has_illustrations(&self) -> bool {
        self.illustration_count.unwrap_or(0) > 0
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartSubCategoryInput {
    pub part_category: Option<Id>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub order: Option<i32>,
}
