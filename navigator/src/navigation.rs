//! Page routes of the drill-down flow and the breadcrumbs derived from them.
//!
//! A page knows its own route parameters and whatever [`NavState`] the
//! previous page handed over. [`resolve_context`] fills the gaps by
//! fetching, and [`breadcrumbs`] turns the result into a trail whose links
//! forward the accumulated state.

use illustra_backend_client::models::Id;
use illustra_backend_client::models::PartSubCategory;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use tracing::debug;
use tracing::warn;

use crate::error::NavigationError;
use crate::error::Result;
use crate::resolver::Selection;
use crate::source::CatalogSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Manufacturers,
    ManufacturerEngines {
        manufacturer: Id,
    },
    EngineCars {
        engine: Id,
    },
    CarCategories {
        car: String,
    },
    CategorySubcategories {
        car: String,
        category: Id,
    },
    SubcategoryIllustrations {
        car: String,
        category: Id,
        subcategory: Id,
    },
}

impl Route {
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["manufacturers"] => Route::Manufacturers,
            ["manufacturers", id, "engines"] => Route::ManufacturerEngines {
                manufacturer: parse_id("manufacturer id", id)?,
            },
            ["engines", id, "cars"] => Route::EngineCars {
                engine: parse_id("engine id", id)?,
            },
            ["cars", car, "categories"] => Route::CarCategories {
                car: (*car).to_string(),
            },
            ["cars", car, "categories", category, "subcategories"] => {
                Route::CategorySubcategories {
                    car: (*car).to_string(),
                    category: parse_id("category id", category)?,
                }
            }
            ["cars", car, "categories", category, "subcategories", sub, "illustrations"] => {
                Route::SubcategoryIllustrations {
                    car: (*car).to_string(),
                    category: parse_id("category id", category)?,
                    subcategory: parse_id("subcategory id", sub)?,
                }
            }
            _ => return Err(NavigationError::UnknownRoute(path.to_string())),
        };
        Ok(route)
    }

    /// Number of breadcrumbs shown on this route's page.
    pub fn depth(&self) -> usize {
        match self {
            Route::Home => 1,
            Route::Manufacturers => 2,
            Route::ManufacturerEngines { .. } => 3,
            Route::EngineCars { .. } => 4,
            Route::CarCategories { .. } => 5,
            Route::CategorySubcategories { .. } => 6,
            Route::SubcategoryIllustrations { .. } => 7,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Manufacturers => write!(f, "/manufacturers"),
            Route::ManufacturerEngines { manufacturer } => {
                write!(f, "/manufacturers/{manufacturer}/engines")
            }
            Route::EngineCars { engine } => write!(f, "/engines/{engine}/cars"),
            Route::CarCategories { car } => write!(f, "/cars/{car}/categories"),
            Route::CategorySubcategories { car, category } => {
                write!(f, "/cars/{car}/categories/{category}/subcategories")
            }
            Route::SubcategoryIllustrations {
                car,
                category,
                subcategory,
            } => write!(
                f,
                "/cars/{car}/categories/{category}/subcategories/{subcategory}/illustrations"
            ),
        }
    }
}

fn parse_id(param: &'static str, value: &str) -> Result<Id> {
    value
        .parse::<Id>()
        .map_err(|_| NavigationError::InvalidParam {
            param,
            value: value.to_string(),
        })
}

/// Ids and display names handed from one page to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_name: Option<String>,
}

/// One resolved level. `name` is `None` when neither the state nor a fetch
/// produced one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextEntry {
    pub id: Option<Id>,
    pub slug: Option<String>,
    pub name: Option<String>,
}

impl ContextEntry {
    fn from_state(id: Option<Id>, name: Option<&String>) -> Option<Self> {
        if id.is_none() && name.is_none() {
            return None;
        }
        Some(Self {
            id,
            slug: None,
            name: name.cloned(),
        })
    }

    fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// Path segment identifying a car: slug when known, id otherwise.
    fn key(&self) -> Option<String> {
        self.slug
            .clone()
            .or_else(|| self.id.map(|id| id.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavContext {
    pub manufacturer: Option<ContextEntry>,
    pub engine: Option<ContextEntry>,
    pub car: Option<ContextEntry>,
    pub category: Option<ContextEntry>,
    pub subcategory: Option<ContextEntry>,
}

impl NavContext {
    /// Seeds a filter resolver from a deep link.
    pub fn selection(&self) -> Selection {
        let id = |entry: &Option<ContextEntry>| entry.as_ref().and_then(|entry| entry.id);
        Selection {
            manufacturer: id(&self.manufacturer),
            car_model: id(&self.car),
            engine_model: id(&self.engine),
            part_category: id(&self.category),
            part_subcategory: id(&self.subcategory),
        }
    }

    fn from_state(state: &NavState) -> Self {
        let car = ContextEntry::from_state(state.car_id, state.car_name.as_ref()).map(|mut car| {
            car.slug = state.car_slug.clone();
            car
        });
        Self {
            manufacturer: ContextEntry::from_state(
                state.manufacturer_id,
                state.manufacturer_name.as_ref(),
            ),
            engine: ContextEntry::from_state(state.engine_id, state.engine_code.as_ref()),
            car,
            category: ContextEntry::from_state(state.category_id, state.category_name.as_ref()),
            subcategory: ContextEntry::from_state(
                state.subcategory_id,
                state.subcategory_name.as_ref(),
            ),
        }
    }
}

/// Builds the page context for `route`. Names carried in `state` are used
/// as-is; missing ones are fetched. A failed fetch leaves an id-only entry.
pub async fn resolve_context<S>(source: &S, route: &Route, state: &NavState) -> NavContext
where
    S: CatalogSource + ?Sized,
{
    let mut context = NavContext::from_state(state);
    match route {
        Route::Home | Route::Manufacturers => {}
        Route::ManufacturerEngines { manufacturer } => {
            resolve_manufacturer(source, &mut context, *manufacturer).await;
        }
        Route::EngineCars { engine } => {
            resolve_engine(source, &mut context, *engine).await;
        }
        Route::CarCategories { car } => {
            resolve_car(source, &mut context, car).await;
        }
        Route::CategorySubcategories { car, category } => {
            resolve_car(source, &mut context, car).await;
            resolve_category(source, &mut context, *category).await;
        }
        Route::SubcategoryIllustrations {
            car,
            category,
            subcategory,
        } => {
            resolve_car(source, &mut context, car).await;
            resolve_category(source, &mut context, *category).await;
            resolve_subcategory(source, &mut context, *subcategory).await;
        }
    }
    context
}

async fn resolve_manufacturer<S>(source: &S, context: &mut NavContext, id: Id)
where
    S: CatalogSource + ?Sized,
{
    let mut entry = context.manufacturer.take().unwrap_or_default();
    entry.id = Some(id);
    if !entry.has_name() {
        match source.manufacturer(id).await {
            Ok(manufacturer) => {
                entry.name = Some(manufacturer.name);
                entry.slug = Some(manufacturer.slug).filter(|slug| !slug.is_empty());
            }
            Err(err) => warn!(id, "failed to resolve manufacturer: {err}"),
        }
    }
    context.manufacturer = Some(entry);
}

async fn resolve_engine<S>(source: &S, context: &mut NavContext, id: Id)
where
    S: CatalogSource + ?Sized,
{
    let mut entry = context.engine.take().unwrap_or_default();
    entry.id = Some(id);
    if !entry.has_name() {
        match source.engine_model(id).await {
            Ok(engine) => {
                entry.name = Some(engine.display_code().to_string());
                if context.manufacturer.is_none() {
                    context.manufacturer =
                        ContextEntry::from_state(engine.manufacturer, engine.manufacturer_name.as_ref());
                }
            }
            Err(err) => warn!(id, "failed to resolve engine model: {err}"),
        }
    }
    context.engine = Some(entry);
}

async fn resolve_car<S>(source: &S, context: &mut NavContext, key: &str)
where
    S: CatalogSource + ?Sized,
{
    let mut entry = context.car.take().unwrap_or_default();
    match key.parse::<Id>() {
        Ok(id) => entry.id = Some(id),
        Err(_) => entry.slug = Some(key.to_string()),
    }
    if !entry.has_name() {
        match source.car_model(key).await {
            Ok(car) => {
                entry.id = Some(car.id);
                entry.name = Some(car.name);
                entry.slug = Some(car.slug).filter(|slug| !slug.is_empty());
                if context.manufacturer.is_none() {
                    context.manufacturer =
                        ContextEntry::from_state(car.manufacturer, car.manufacturer_name.as_ref());
                }
            }
            Err(err) => warn!(key, "failed to resolve car model: {err}"),
        }
    }
    context.car = Some(entry);
}

async fn resolve_category<S>(source: &S, context: &mut NavContext, id: Id)
where
    S: CatalogSource + ?Sized,
{
    let mut entry = context.category.take().unwrap_or_default();
    entry.id = Some(id);
    if !entry.has_name() {
        match source.part_category(id).await {
            Ok(category) => entry.name = Some(category.name),
            Err(err) => warn!(id, "failed to resolve part category: {err}"),
        }
    }
    context.category = Some(entry);
}

async fn resolve_subcategory<S>(source: &S, context: &mut NavContext, id: Id)
where
    S: CatalogSource + ?Sized,
{
    let mut entry = context.subcategory.take().unwrap_or_default();
    entry.id = Some(id);
    if !entry.has_name() {
        match source.part_subcategory(id).await {
            Ok(subcategory) => entry.name = Some(subcategory.name),
            Err(err) => warn!(id, "failed to resolve part subcategory: {err}"),
        }
    }
    context.subcategory = Some(entry);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    /// Link target. `None` when the level is not known well enough to link.
    pub path: Option<String>,
    /// State to hand to the linked page: this level and its ancestors.
    pub state: NavState,
}

fn label(entry: Option<&ContextEntry>, kind: &str) -> String {
    match entry {
        Some(ContextEntry {
            name: Some(name), ..
        }) => name.clone(),
        Some(ContextEntry { id: Some(id), .. }) => format!("{kind} #{id}"),
        _ => format!("Unknown {}", kind.to_lowercase()),
    }
}

/// Trail from home down to the page at `route`.
pub fn breadcrumbs(context: &NavContext, route: &Route) -> Vec<Crumb> {
    let mut state = NavState::default();
    let mut crumbs = vec![
        Crumb {
            label: "Home".to_string(),
            path: Some(Route::Home.to_string()),
            state: NavState::default(),
        },
        Crumb {
            label: "Manufacturers".to_string(),
            path: Some(Route::Manufacturers.to_string()),
            state: NavState::default(),
        },
    ];

    let manufacturer = context.manufacturer.as_ref();
    if let Some(entry) = manufacturer {
        state.manufacturer_id = entry.id;
        state.manufacturer_name = entry.name.clone();
    }
    crumbs.push(Crumb {
        label: label(manufacturer, "Manufacturer"),
        path: manufacturer
            .and_then(|entry| entry.id)
            .map(|manufacturer| Route::ManufacturerEngines { manufacturer }.to_string()),
        state: state.clone(),
    });

    let engine = context.engine.as_ref();
    if let Some(entry) = engine {
        state.engine_id = entry.id;
        state.engine_code = entry.name.clone();
    }
    crumbs.push(Crumb {
        label: label(engine, "Engine"),
        path: engine
            .and_then(|entry| entry.id)
            .map(|engine| Route::EngineCars { engine }.to_string()),
        state: state.clone(),
    });

    let car = context.car.as_ref();
    let car_key = car.and_then(ContextEntry::key);
    if let Some(entry) = car {
        state.car_id = entry.id;
        state.car_slug = entry.slug.clone();
        state.car_name = entry.name.clone();
    }
    crumbs.push(Crumb {
        label: label(car, "Car model"),
        path: car_key
            .clone()
            .map(|car| Route::CarCategories { car }.to_string()),
        state: state.clone(),
    });

    let category = context.category.as_ref();
    let category_id = category.and_then(|entry| entry.id);
    if let Some(entry) = category {
        state.category_id = entry.id;
        state.category_name = entry.name.clone();
    }
    crumbs.push(Crumb {
        label: label(category, "Category"),
        path: car_key
            .clone()
            .zip(category_id)
            .map(|(car, category)| Route::CategorySubcategories { car, category }.to_string()),
        state: state.clone(),
    });

    let subcategory = context.subcategory.as_ref();
    let subcategory_id = subcategory.and_then(|entry| entry.id);
    if let Some(entry) = subcategory {
        state.subcategory_id = entry.id;
        state.subcategory_name = entry.name.clone();
    }
    crumbs.push(Crumb {
        label: label(subcategory, "Subcategory"),
        path: car_key
            .zip(category_id)
            .zip(subcategory_id)
            .map(|((car, category), subcategory)| {
                Route::SubcategoryIllustrations {
                    car,
                    category,
                    subcategory,
                }
                .to_string()
            }),
        state,
    });

    crumbs.truncate(route.depth());
    debug!(route = %route, crumbs = crumbs.len(), "breadcrumbs built");
    crumbs
}

/// Subcategories worth listing on a navigation page.
pub fn visible_subcategories(subcategories: &[PartSubCategory]) -> Vec<&PartSubCategory> {
    subcategories
        .iter()
        .filter(|subcategory| subcategory.has_illustrations())
        .collect()
}
