use serde::Deserialize;
use serde::Serialize;
use serde_with::skip_serializing_none;

use super::Id;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manufacturer {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub engine_count: Option<u64>,
    #[serde(default)]
    pub car_model_count: Option<u64>,
    #[serde(default)]
    pub illustration_count: Option<u64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManufacturerInput {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineModel {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub engine_code: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub fuel_type_display: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub manufacturer: Option<Id>,
    #[serde(default)]
    pub manufacturer_name: Option<String>,
    #[serde(default)]
    pub car_model_count: Option<u64>,
    #[serde(default)]
    pub illustration_count: Option<u64>,
}

impl EngineModel {
    /// Label shown for the engine in listings and breadcrumbs: the engine
    /// code when the backend has one, the name otherwise.
    pub fn display_code(&self) -> &str {
        if self.engine_code.trim().is_empty() {
            &self.name
        } else {
            &self.engine_code
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineModelInput {
    pub manufacturer: Option<Id>,
    pub name: Option<String>,
    pub engine_code: Option<String>,
    pub fuel_type: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarModel {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub manufacturer: Option<Id>,
    #[serde(default)]
    pub manufacturer_name: Option<String>,
    #[serde(default)]
    pub model_code: String,
    #[serde(default)]
    pub chassis_code: String,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub vehicle_type_display: Option<String>,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
    #[serde(default)]
    pub engines: Vec<Id>,
    #[serde(default)]
    pub engine_count: Option<u64>,
    #[serde(default)]
    pub illustration_count: Option<u64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarModelInput {
    pub manufacturer: Option<Id>,
    pub name: Option<String>,
    pub vehicle_type: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub model_code: Option<String>,
    pub chassis_code: Option<String>,
    pub engines: Option<Vec<Id>>,
}

/// `{value, label}` pair served by the fuel type and vehicle type endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn engine_display_code_prefers_engine_code() {
        let engine = EngineModel {
            id: 100,
            name: "2TR-FE".to_string(),
            engine_code: "2TR".to_string(),
            ..Default::default()
        };
        assert_eq!(engine.display_code(), "2TR");

        let bare = EngineModel {
            id: 101,
            name: "A09C".to_string(),
            engine_code: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(bare.display_code(), "A09C");
    }

    #[test]
    fn car_model_tolerates_missing_optional_fields() {
        let car: CarModel = serde_json::from_value(json!({
            "id": 10,
            "name": "Hiace",
        }))
        .unwrap();
        assert_eq!(car.id, 10);
        assert_eq!(car.engines, Vec::<Id>::new());
        assert_eq!(car.illustration_count, None);
    }

    #[test]
    fn input_skips_unset_fields() {
        let input = EngineModelInput {
            name: Some("6HK1".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&input).unwrap(), json!({"name": "6HK1"}));
    }
}
