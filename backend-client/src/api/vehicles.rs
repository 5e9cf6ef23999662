use illustra_backend_models::models::CarModel;
use illustra_backend_models::models::CarModelInput;
use illustra_backend_models::models::Choice;
use illustra_backend_models::models::EngineModel;
use illustra_backend_models::models::EngineModelInput;
use illustra_backend_models::models::Id;
use illustra_backend_models::models::Manufacturer;
use illustra_backend_models::models::ManufacturerInput;
use illustra_backend_models::models::Page;
use reqwest::Method;
use tracing::debug;
use tracing::warn;

use crate::client::Client;
use crate::error::ApiError;
use crate::error::Result;
use crate::query::CarModelQuery;
use crate::query::EngineModelQuery;
use crate::query::ListOptions;
use crate::query::QueryParams;

const MANUFACTURERS: &str = "/manufacturers/";
const ENGINE_MODELS: &str = "/engine-models/";
const CAR_MODELS: &str = "/car-models/";

/// Used when `/engine-models/fuel_types/` is unavailable.
pub fn default_fuel_types() -> Vec<Choice> {
    vec![
        Choice::new("diesel", "Diesel"),
        Choice::new("petrol", "Petrol"),
        Choice::new("hybrid", "Hybrid"),
        Choice::new("electric", "Electric"),
        Choice::new("lpg", "LPG"),
    ]
}

fn detail_path(collection: &str, key: impl std::fmt::Display) -> String {
    format!("{collection}{key}/")
}

impl Client {
    pub async fn list_manufacturers(&self, options: &ListOptions) -> Result<Page<Manufacturer>> {
        self.get_json(MANUFACTURERS, &options.pairs()).await
    }

    /// Some deployments only expose manufacturers through the list view, so
    /// a 404 on the detail endpoint falls back to scanning the list.
    pub async fn get_manufacturer(&self, id: Id) -> Result<Manufacturer> {
        match self.get_json(&detail_path(MANUFACTURERS, id), &[]).await {
            Err(err) if err.is_not_found() => {
                debug!(id, "manufacturer detail missing; scanning list");
                let page: Page<Manufacturer> = self.get_json(MANUFACTURERS, &[]).await?;
                page.into_items()
                    .into_iter()
                    .find(|manufacturer| manufacturer.id == id)
                    .ok_or(err)
            }
            other => other,
        }
    }

    pub async fn get_manufacturer_by_slug(&self, slug: &str) -> Result<Manufacturer> {
        self.get_json(&detail_path(MANUFACTURERS, slug), &[]).await
    }

    pub async fn create_manufacturer(&self, input: &ManufacturerInput) -> Result<Manufacturer> {
        self.send_json(Method::POST, MANUFACTURERS, input).await
    }

    pub async fn update_manufacturer(&self, id: Id, input: &ManufacturerInput) -> Result<Manufacturer> {
        self.send_json(Method::PUT, &detail_path(MANUFACTURERS, id), input)
            .await
    }

    pub async fn patch_manufacturer(&self, id: Id, input: &ManufacturerInput) -> Result<Manufacturer> {
        self.send_json(Method::PATCH, &detail_path(MANUFACTURERS, id), input)
            .await
    }

    pub async fn delete_manufacturer(&self, id: Id) -> Result<()> {
        self.delete(&detail_path(MANUFACTURERS, id)).await
    }

    pub async fn list_engine_models(&self, query: &EngineModelQuery) -> Result<Page<EngineModel>> {
        self.get_json(ENGINE_MODELS, &query.pairs()).await
    }

    pub async fn get_engine_model(&self, id: Id) -> Result<EngineModel> {
        match self.get_json(&detail_path(ENGINE_MODELS, id), &[]).await {
            Err(err) if err.is_not_found() => {
                debug!(id, "engine model detail missing; scanning list");
                let page: Page<EngineModel> = self.get_json(ENGINE_MODELS, &[]).await?;
                page.into_items()
                    .into_iter()
                    .find(|engine| engine.id == id)
                    .ok_or(err)
            }
            other => other,
        }
    }

    pub async fn create_engine_model(&self, input: &EngineModelInput) -> Result<EngineModel> {
        self.send_json(Method::POST, ENGINE_MODELS, input).await
    }

    pub async fn update_engine_model(&self, id: Id, input: &EngineModelInput) -> Result<EngineModel> {
        self.send_json(Method::PUT, &detail_path(ENGINE_MODELS, id), input)
            .await
    }

    pub async fn patch_engine_model(&self, id: Id, input: &EngineModelInput) -> Result<EngineModel> {
        self.send_json(Method::PATCH, &detail_path(ENGINE_MODELS, id), input)
            .await
    }

    pub async fn delete_engine_model(&self, id: Id) -> Result<()> {
        self.delete(&detail_path(ENGINE_MODELS, id)).await
    }

    /// Never fails: any error yields the built-in list.
    pub async fn fuel_types(&self) -> Vec<Choice> {
        let path = format!("{ENGINE_MODELS}fuel_types/");
        match self.get_json::<Vec<Choice>>(&path, &[]).await {
            Ok(choices) if !choices.is_empty() => choices,
            Ok(_) => default_fuel_types(),
            Err(err) => {
                warn!("failed to load fuel types, using defaults: {err}");
                default_fuel_types()
            }
        }
    }

    pub async fn list_car_models(&self, query: &CarModelQuery) -> Result<Page<CarModel>> {
        self.get_json(CAR_MODELS, &query.pairs()).await
    }

    /// `key` is either the slug or the numeric id; the detail route accepts
    /// both.
    pub async fn get_car_model(&self, key: &str) -> Result<CarModel> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ApiError::NotFound("car model key is empty".to_string()));
        }
        self.get_json(&detail_path(CAR_MODELS, key), &[]).await
    }

    pub async fn create_car_model(&self, input: &CarModelInput) -> Result<CarModel> {
        self.send_json(Method::POST, CAR_MODELS, input).await
    }

    pub async fn update_car_model(&self, key: &str, input: &CarModelInput) -> Result<CarModel> {
        self.send_json(Method::PUT, &detail_path(CAR_MODELS, key), input)
            .await
    }

    pub async fn patch_car_model(&self, key: &str, input: &CarModelInput) -> Result<CarModel> {
        self.send_json(Method::PATCH, &detail_path(CAR_MODELS, key), input)
            .await
    }

    pub async fn delete_car_model(&self, key: &str) -> Result<()> {
        self.delete(&detail_path(CAR_MODELS, key)).await
    }

    pub async fn vehicle_types(&self) -> Result<Vec<Choice>> {
        let path = format!("{CAR_MODELS}vehicle_types/");
        self.get_json(&path, &[]).await
    }
}
