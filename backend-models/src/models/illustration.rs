use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_with::skip_serializing_none;
use std::fmt;

use super::Id;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    #[default]
    Image,
    Pdf,
    #[serde(other)]
    Other,
}

impl FileType {
    /// Classifies an upload by extension the same way the backend does when
    /// it stores the file.
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" => FileType::Image,
            "pdf" => FileType::Pdf,
            _ => FileType::Other,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            FileType::Image => "image/*",
            FileType::Pdf => "application/pdf",
            FileType::Other => "application/octet-stream",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Image => write!(f, "image"),
            FileType::Pdf => write!(f, "pdf"),
            FileType::Other => write!(f, "other"),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IllustrationFile {
    pub id: Id,
    #[serde(default)]
    pub illustration: Option<Id>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub file_type: FileType,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// List representation of an illustration. File payloads are only present
/// when the list was requested with `include_files=true`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Illustration {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user: Option<Id>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub engine_model: Id,
    #[serde(default)]
    pub engine_model_name: Option<String>,
    #[serde(default)]
    pub manufacturer_id: Option<Id>,
    #[serde(default)]
    pub manufacturer_name: Option<String>,
    pub part_category: Id,
    #[serde(default)]
    pub part_category_name: Option<String>,
    #[serde(default)]
    pub part_subcategory: Option<Id>,
    #[serde(default)]
    pub part_subcategory_name: Option<String>,
    #[serde(default)]
    pub applicable_car_models: Vec<Id>,
    #[serde(default)]
    pub file_count: Option<u64>,
    #[serde(default)]
    pub first_file: Option<IllustrationFile>,
    #[serde(default)]
    pub files: Vec<IllustrationFile>,
    #[serde(default)]
    pub is_favorited: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Detail representation: the list fields plus the ordered file collection
/// and the owner's email.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IllustrationDetail {
    #[serde(flatten)]
    pub illustration: Illustration,
    #[serde(default)]
    pub user_email: Option<String>,
}

impl IllustrationDetail {
    pub fn files(&self) -> &[IllustrationFile] {
        &self.illustration.files
    }
}

/// An opaque file payload forwarded to the backend as a multipart part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_file_name(&self.file_name)
    }
}

/// Fields of a create or full update. Sent as `multipart/form-data` because
/// files travel in the same request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewIllustration {
    pub title: String,
    pub description: String,
    pub engine_model: Id,
    pub part_category: Id,
    pub part_subcategory: Option<Id>,
    pub applicable_car_models: Vec<Id>,
    pub uploaded_files: Vec<UploadFile>,
}

impl NewIllustration {
    /// Scalar form fields in submission order. Unset optional fields are
    /// omitted rather than sent empty.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("engine_model", self.engine_model.to_string()),
            ("part_category", self.part_category.to_string()),
        ];
        if let Some(sub) = self.part_subcategory {
            fields.push(("part_subcategory", sub.to_string()));
        }
        for car in &self.applicable_car_models {
            fields.push(("applicable_car_models", car.to_string()));
        }
        fields
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IllustrationPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub engine_model: Option<Id>,
    pub part_category: Option<Id>,
    pub part_subcategory: Option<Id>,
    pub applicable_car_models: Option<Vec<Id>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Id>,
}

/// Aggregate counters. The backend decides which counters it reports, so
/// everything besides the total is kept as raw JSON.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct IllustrationStats {
    #[serde(default, alias = "total_illustrations")]
    pub total: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn file_type_from_extension() {
        assert_eq!(FileType::from_file_name("piston.PNG"), FileType::Image);
        assert_eq!(FileType::from_file_name("manual.pdf"), FileType::Pdf);
        assert_eq!(FileType::from_file_name("notes.txt"), FileType::Other);
        assert_eq!(FileType::from_file_name("README"), FileType::Other);
    }

    #[test]
    fn unknown_file_type_decodes_as_other() {
        let file: IllustrationFile =
            serde_json::from_value(json!({"id": 1, "file_type": "cad"})).unwrap();
        assert_eq!(file.file_type, FileType::Other);
    }

    #[test]
    fn detail_flattens_list_fields() {
        let detail: IllustrationDetail = serde_json::from_value(json!({
            "id": 7,
            "title": "Timing belt",
            "engine_model": 100,
            "part_category": 1000,
            "user_email": "mechanic@example.com",
            "files": [
                {"id": 1, "file_type": "image", "file_size": 2048},
                {"id": 2, "file_type": "pdf"}
            ],
            "created_at": "2025-01-02T03:04:05Z"
        }))
        .unwrap();
        assert_eq!(detail.illustration.title, "Timing belt");
        assert_eq!(detail.files().len(), 2);
        assert_eq!(detail.files()[1].file_type, FileType::Pdf);
        assert_eq!(detail.user_email.as_deref(), Some("mechanic@example.com"));
    }

    #[test]
    fn text_fields_repeat_car_models_and_skip_missing_subcategory() {
        let new = NewIllustration {
            title: "Oil pump".to_string(),
            description: String::new(),
            engine_model: 100,
            part_category: 1000,
            part_subcategory: None,
            applicable_car_models: vec![10, 11],
            uploaded_files: Vec::new(),
        };
        let names: Vec<&str> = new.text_fields().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "title",
                "description",
                "engine_model",
                "part_category",
                "applicable_car_models",
                "applicable_car_models",
            ]
        );
    }

    #[test]
    fn stats_accepts_either_total_key() {
        let stats: IllustrationStats =
            serde_json::from_value(json!({"total_illustrations": 12, "pdf_files": 3})).unwrap();
        assert_eq!(stats.total, 12);
        assert_eq!(stats.extra.get("pdf_files"), Some(&json!(3)));
    }
}
