//! Dependent filter selection across the catalog hierarchy.
//!
//! [`FilterResolver`] owns the current [`Selection`] and the option list of
//! every level. Selecting a value at one level clears the selections that
//! depend on it and fetches the options the new value unlocks. Option
//! fetches never fail the caller: an error leaves the level empty, records
//! the failure in its [`LoadStatus`] and is logged.

use illustra_backend_client::Result as ApiResult;
use illustra_backend_client::models::CarModel;
use illustra_backend_client::models::EngineModel;
use illustra_backend_client::models::Id;
use illustra_backend_client::models::Illustration;
use illustra_backend_client::models::Manufacturer;
use illustra_backend_client::models::PartCategory;
use illustra_backend_client::models::PartSubCategory;
use illustra_backend_client::query::CarModelQuery;
use illustra_backend_client::query::EngineModelQuery;
use illustra_backend_client::query::IllustrationQuery;
use illustra_backend_client::query::PartCategoryQuery;
use illustra_backend_client::query::PartSubCategoryQuery;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use tracing::debug;
use tracing::warn;

use crate::source::CatalogSource;

/// Selected id per level. `None` means "no selection".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub manufacturer: Option<Id>,
    #[serde(default)]
    pub car_model: Option<Id>,
    #[serde(default)]
    pub engine_model: Option<Id>,
    #[serde(default)]
    pub part_category: Option<Id>,
    #[serde(default)]
    pub part_subcategory: Option<Id>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        *self == Selection::default()
    }

    /// Subcategory counts follow the narrowest vehicle scope available: the
    /// engine when one is selected, otherwise the car model.
    fn subcategory_scope(&self) -> (Option<Id>, Option<Id>) {
        match self.engine_model {
            Some(engine) => (Some(engine), None),
            None => (None, self.car_model),
        }
    }

    fn subcategory_query(&self, part_category: Id) -> PartSubCategoryQuery {
        let (engine_model, car_model) = self.subcategory_scope();
        PartSubCategoryQuery {
            part_category: Some(part_category),
            engine_model,
            car_model,
            ..Default::default()
        }
    }

    fn illustration_query(&self) -> IllustrationQuery {
        IllustrationQuery {
            manufacturer: self.manufacturer,
            engine_model: self.engine_model,
            car_model: self.car_model,
            part_category: self.part_category,
            part_subcategory: self.part_subcategory,
            ..IllustrationQuery::newest_first()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Manufacturer,
    CarModel,
    EngineModel,
    PartCategory,
    PartSubCategory,
    Illustration,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Manufacturer,
        Level::CarModel,
        Level::EngineModel,
        Level::PartCategory,
        Level::PartSubCategory,
        Level::Illustration,
    ];
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Manufacturer => "manufacturer",
            Level::CarModel => "car model",
            Level::EngineModel => "engine model",
            Level::PartCategory => "part category",
            Level::PartSubCategory => "part subcategory",
            Level::Illustration => "illustration",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Not fetched for the current selection.
    #[default]
    Idle,
    Loaded,
    Failed(String),
}

/// Options of one level plus how they were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList<T> {
    pub items: Vec<T>,
    pub status: LoadStatus,
}

impl<T> Default for OptionList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Idle,
        }
    }
}

impl<T> OptionList<T> {
    fn settle(level: Level, result: ApiResult<Vec<T>>) -> Self {
        match result {
            Ok(items) => {
                debug!(%level, count = items.len(), "options loaded");
                Self {
                    items,
                    status: LoadStatus::Loaded,
                }
            }
            Err(err) => {
                warn!(%level, "failed to load options: {err}");
                Self {
                    items: Vec::new(),
                    status: LoadStatus::Failed(err.to_string()),
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// Clear the part category and subcategory whenever the engine changes,
    /// since category counts are engine specific.
    pub reset_parts_on_engine_change: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            reset_parts_on_engine_change: true,
        }
    }
}

pub struct FilterResolver<S> {
    source: S,
    options: ResolverOptions,
    selection: Selection,
    manufacturers: OptionList<Manufacturer>,
    car_models: OptionList<CarModel>,
    engine_models: OptionList<EngineModel>,
    root_part_categories: OptionList<PartCategory>,
    part_categories: OptionList<PartCategory>,
    part_subcategories: OptionList<PartSubCategory>,
    illustrations: OptionList<Illustration>,
}

impl<S: CatalogSource> FilterResolver<S> {
    pub fn new(source: S, options: ResolverOptions) -> Self {
        Self {
            source,
            options,
            selection: Selection::default(),
            manufacturers: OptionList::default(),
            car_models: OptionList::default(),
            engine_models: OptionList::default(),
            root_part_categories: OptionList::default(),
            part_categories: OptionList::default(),
            part_subcategories: OptionList::default(),
            illustrations: OptionList::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn manufacturers(&self) -> &OptionList<Manufacturer> {
        &self.manufacturers
    }

    pub fn car_models(&self) -> &OptionList<CarModel> {
        &self.car_models
    }

    pub fn engine_models(&self) -> &OptionList<EngineModel> {
        &self.engine_models
    }

    pub fn part_categories(&self) -> &OptionList<PartCategory> {
        &self.part_categories
    }

    pub fn part_subcategories(&self) -> &OptionList<PartSubCategory> {
        &self.part_subcategories
    }

    pub fn illustrations(&self) -> &OptionList<Illustration> {
        &self.illustrations
    }

    pub fn status(&self, level: Level) -> &LoadStatus {
        match level {
            Level::Manufacturer => &self.manufacturers.status,
            Level::CarModel => &self.car_models.status,
            Level::EngineModel => &self.engine_models.status,
            Level::PartCategory => &self.part_categories.status,
            Level::PartSubCategory => &self.part_subcategories.status,
            Level::Illustration => &self.illustrations.status,
        }
    }

    /// Whether the selector for `level` accepts input. A level whose fetch
    /// failed stays enabled so the user can retry by re-selecting.
    pub fn is_enabled(&self, level: Level) -> bool {
        let selection = &self.selection;
        match level {
            Level::Manufacturer | Level::PartCategory => true,
            Level::CarModel => selection.manufacturer.is_some(),
            Level::EngineModel => {
                selection.manufacturer.is_some() || selection.car_model.is_some()
            }
            Level::PartSubCategory => selection.part_category.is_some(),
            Level::Illustration => selection.part_subcategory.is_some(),
        }
    }

    /// Fetches the lists that need no parent: manufacturers and the
    /// unscoped part categories.
    pub async fn load_roots(&mut self) {
        let category_query = PartCategoryQuery::default();
        let (manufacturers, categories) = tokio::join!(
            self.source.manufacturers(),
            self.source.part_categories(&category_query),
        );
        self.manufacturers = OptionList::settle(Level::Manufacturer, manufacturers);
        self.root_part_categories = OptionList::settle(Level::PartCategory, categories);
        if self.selection.engine_model.is_none() {
            self.part_categories = self.root_part_categories.clone();
        }
    }

    /// Drops part options fetched for a vehicle scope that `previous` had
    /// and the current selection no longer has. Categories fall back to the
    /// root list once no engine is selected.
    fn drop_stale_part_options(&mut self, previous: Selection) {
        if previous.engine_model.is_some() && self.selection.engine_model.is_none() {
            self.part_categories = self.root_part_categories.clone();
        }
        if previous.subcategory_scope() != self.selection.subcategory_scope() {
            self.selection.part_subcategory = None;
            self.part_subcategories = OptionList::default();
        }
    }

    pub async fn select_manufacturer(&mut self, id: Option<Id>) {
        let previous = self.selection;
        self.selection.manufacturer = id;
        self.selection.car_model = None;
        self.selection.engine_model = None;
        self.selection.part_subcategory = None;
        self.illustrations = OptionList::default();
        self.drop_stale_part_options(previous);

        let Some(id) = id else {
            self.car_models = OptionList::default();
            self.engine_models = OptionList::default();
            return;
        };
        let car_query = CarModelQuery::by_manufacturer(id);
        let engine_query = EngineModelQuery::by_manufacturer(id);
        let (cars, engines) = tokio::join!(
            self.source.car_models(&car_query),
            self.source.engine_models(&engine_query),
        );
        self.car_models = OptionList::settle(Level::CarModel, cars);
        self.engine_models = OptionList::settle(Level::EngineModel, engines);
    }

    /// Clearing the car model falls back to the manufacturer's engines.
    /// Dropping a selected engine counts as an engine change.
    pub async fn select_car_model(&mut self, id: Option<Id>) {
        let previous = self.selection;
        self.selection.car_model = id;
        self.selection.engine_model = None;
        self.illustrations = OptionList::default();
        if previous.engine_model.is_some() && self.options.reset_parts_on_engine_change {
            self.reset_parts();
        }
        self.drop_stale_part_options(previous);

        let query = match (id, self.selection.manufacturer) {
            (Some(car), _) => EngineModelQuery::by_car_model(car),
            (None, Some(manufacturer)) => EngineModelQuery::by_manufacturer(manufacturer),
            (None, None) => {
                self.engine_models = OptionList::default();
                return;
            }
        };
        let engines = self.source.engine_models(&query).await;
        self.engine_models = OptionList::settle(Level::EngineModel, engines);
    }

    pub async fn select_engine_model(&mut self, id: Option<Id>) {
        let previous = self.selection;
        self.selection.engine_model = id;
        self.illustrations = OptionList::default();
        if previous.engine_model != id && self.options.reset_parts_on_engine_change {
            self.reset_parts();
        }
        self.drop_stale_part_options(previous);

        let query = PartCategoryQuery {
            engine_model: id,
            ..Default::default()
        };
        let categories = self.source.part_categories(&query).await;
        self.part_categories = OptionList::settle(Level::PartCategory, categories);
    }

    pub async fn select_part_category(&mut self, id: Option<Id>) {
        self.selection.part_category = id;
        self.selection.part_subcategory = None;
        self.illustrations = OptionList::default();

        let Some(id) = id else {
            self.part_subcategories = OptionList::default();
            return;
        };
        let query = self.selection.subcategory_query(id);
        let subcategories = self.source.part_subcategories(&query).await;
        self.part_subcategories = OptionList::settle(Level::PartSubCategory, subcategories);
    }

    /// Terminal level: loads the illustrations matching every selected id.
    pub async fn select_part_subcategory(&mut self, id: Option<Id>) {
        self.selection.part_subcategory = id;
        if id.is_none() {
            self.illustrations = OptionList::default();
            return;
        }
        let query = self.selection.illustration_query();
        let illustrations = self.source.illustrations(&query).await;
        self.illustrations = OptionList::settle(Level::Illustration, illustrations);
    }

    fn reset_parts(&mut self) {
        self.selection.part_category = None;
        self.selection.part_subcategory = None;
        self.part_subcategories = OptionList::default();
    }

    /// Resets every selection and empties every derived list. The root
    /// lists from [`Self::load_roots`] stay loaded.
    pub fn clear_all(&mut self) {
        self.selection = Selection::default();
        self.car_models = OptionList::default();
        self.engine_models = OptionList::default();
        self.part_categories = self.root_part_categories.clone();
        self.part_subcategories = OptionList::default();
        self.illustrations = OptionList::default();
    }

    /// Re-applies `target` level by level from a clean state, so the
    /// clearing rules hold exactly as if a user had made each choice.
    pub async fn restore(&mut self, target: Selection) -> Selection {
        self.clear_all();
        if target.manufacturer.is_some() {
            self.select_manufacturer(target.manufacturer).await;
        }
        if target.car_model.is_some() {
            self.select_car_model(target.car_model).await;
        }
        if target.engine_model.is_some() {
            self.select_engine_model(target.engine_model).await;
        }
        if target.part_category.is_some() {
            self.select_part_category(target.part_category).await;
        }
        if target.part_subcategory.is_some() {
            self.select_part_subcategory(target.part_subcategory).await;
        }
        self.selection
    }
}
