//! Typed list filters. Each query renders to the `key=value` pairs the
//! backend's filter sets understand; unset fields are never sent.

use illustra_backend_models::models::FileType;
use illustra_backend_models::models::Id;

pub type QueryPairs = Vec<(&'static str, String)>;

pub trait QueryParams {
    fn pairs(&self) -> QueryPairs;
}

#[derive(Default)]
struct PairsBuilder(QueryPairs);

impl PairsBuilder {
    fn opt<T: ToString>(mut self, key: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
        self
    }

    fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
            self.0.push((key, value.to_string()));
        }
        self
    }

    fn always(mut self, key: &'static str, value: impl ToString) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    fn build(self) -> QueryPairs {
        self.0
    }
}

/// Paging and free-text options shared by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListOptions {
    fn apply(&self, builder: PairsBuilder) -> PairsBuilder {
        builder
            .text("search", self.search.as_deref())
            .text("ordering", self.ordering.as_deref())
            .opt("page", self.page)
            .opt("limit", self.limit)
    }
}

impl QueryParams for ListOptions {
    fn pairs(&self) -> QueryPairs {
        self.apply(PairsBuilder::default()).build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineModelQuery {
    pub manufacturer: Option<Id>,
    pub car_model: Option<Id>,
    pub fuel_type: Option<String>,
    pub list: ListOptions,
}

impl EngineModelQuery {
    pub fn by_manufacturer(manufacturer: Id) -> Self {
        Self {
            manufacturer: Some(manufacturer),
            ..Default::default()
        }
    }

    pub fn by_car_model(car_model: Id) -> Self {
        Self {
            car_model: Some(car_model),
            ..Default::default()
        }
    }
}

impl QueryParams for EngineModelQuery {
    fn pairs(&self) -> QueryPairs {
        let builder = PairsBuilder::default()
            .opt("manufacturer", self.manufacturer)
            .opt("car_model", self.car_model)
            .text("fuel_type", self.fuel_type.as_deref());
        self.list.apply(builder).build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarModelQuery {
    pub manufacturer: Option<Id>,
    pub engine_model: Option<Id>,
    pub vehicle_type: Option<String>,
    pub list: ListOptions,
}

impl CarModelQuery {
    pub fn by_manufacturer(manufacturer: Id) -> Self {
        Self {
            manufacturer: Some(manufacturer),
            ..Default::default()
        }
    }

    pub fn by_engine_model(engine_model: Id) -> Self {
        Self {
            engine_model: Some(engine_model),
            ..Default::default()
        }
    }
}

impl QueryParams for CarModelQuery {
    fn pairs(&self) -> QueryPairs {
        let builder = PairsBuilder::default()
            .opt("manufacturer", self.manufacturer)
            .opt("engine_model", self.engine_model)
            .text("vehicle_type", self.vehicle_type.as_deref());
        self.list.apply(builder).build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartCategoryQuery {
    pub engine_model: Option<Id>,
    pub car_model: Option<Id>,
    pub list: ListOptions,
}

impl QueryParams for PartCategoryQuery {
    fn pairs(&self) -> QueryPairs {
        let builder = PairsBuilder::default()
            .opt("engine_model", self.engine_model)
            .opt("car_model", self.car_model);
        self.list.apply(builder).build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartSubCategoryQuery {
    pub part_category: Option<Id>,
    pub engine_model: Option<Id>,
    pub car_model: Option<Id>,
    pub list: ListOptions,
}

impl PartSubCategoryQuery {
    pub fn by_category(part_category: Id) -> Self {
        Self {
            part_category: Some(part_category),
            ..Default::default()
        }
    }
}

impl QueryParams for PartSubCategoryQuery {
    fn pairs(&self) -> QueryPairs {
        let builder = PairsBuilder::default()
            .opt("part_category", self.part_category)
            .opt("engine_model", self.engine_model)
            .opt("car_model", self.car_model);
        self.list.apply(builder).build()
    }
}

/// Illustration list filter. Manufacturer and car model scoping go through
/// the engine and applicable-car relations on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IllustrationQuery {
    pub manufacturer: Option<Id>,
    pub engine_model: Option<Id>,
    pub car_model: Option<Id>,
    pub part_category: Option<Id>,
    pub part_subcategory: Option<Id>,
    pub include_files: bool,
    pub list: ListOptions,
}

impl IllustrationQuery {
    pub fn newest_first() -> Self {
        Self {
            list: ListOptions {
                ordering: Some("-created_at".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl QueryParams for IllustrationQuery {
    fn pairs(&self) -> QueryPairs {
        let builder = PairsBuilder::default()
            .opt("engine_model__manufacturer", self.manufacturer)
            .opt("engine_model", self.engine_model)
            .opt("applicable_car_models", self.car_model)
            .opt("part_category", self.part_category)
            .opt("part_subcategory", self.part_subcategory);
        self.list
            .apply(builder)
            .always("include_files", self.include_files)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IllustrationFileQuery {
    pub illustration: Option<Id>,
    pub file_type: Option<FileType>,
}

impl QueryParams for IllustrationFileQuery {
    fn pairs(&self) -> QueryPairs {
        PairsBuilder::default()
            .opt("illustration", self.illustration)
            .opt("file_type", self.file_type)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unset_fields_are_not_sent() {
        assert_eq!(EngineModelQuery::default().pairs(), Vec::new());
        assert_eq!(
            EngineModelQuery::by_car_model(10).pairs(),
            vec![("car_model", "10".to_string())]
        );
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = CarModelQuery {
            manufacturer: Some(1),
            list: ListOptions {
                search: Some("   ".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(query.pairs(), vec![("manufacturer", "1".to_string())]);
    }

    #[test]
    fn illustration_query_maps_relations() {
        let query = IllustrationQuery {
            manufacturer: Some(1),
            engine_model: Some(100),
            car_model: Some(10),
            part_category: Some(1000),
            part_subcategory: Some(2000),
            include_files: false,
            list: ListOptions {
                search: Some(" piston ".to_string()),
                ..Default::default()
            },
        };
        assert_eq!(
            query.pairs(),
            vec![
                ("engine_model__manufacturer", "1".to_string()),
                ("engine_model", "100".to_string()),
                ("applicable_car_models", "10".to_string()),
                ("part_category", "1000".to_string()),
                ("part_subcategory", "2000".to_string()),
                ("search", "piston".to_string()),
                ("include_files", "false".to_string()),
            ]
        );
    }
}
