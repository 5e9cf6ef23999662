//! Read access to the catalog, abstracted so resolution logic can run
//! against the live backend or an in-memory fixture.

use async_trait::async_trait;
use illustra_backend_client::Client;
use illustra_backend_client::Result as ApiResult;
use illustra_backend_client::models::CarModel;
use illustra_backend_client::models::EngineModel;
use illustra_backend_client::models::Favorite;
use illustra_backend_client::models::FavoriteStatus;
use illustra_backend_client::models::Id;
use illustra_backend_client::models::Illustration;
use illustra_backend_client::models::Manufacturer;
use illustra_backend_client::models::Page;
use illustra_backend_client::models::PartCategory;
use illustra_backend_client::models::PartSubCategory;
use illustra_backend_client::query::CarModelQuery;
use illustra_backend_client::query::EngineModelQuery;
use illustra_backend_client::query::IllustrationQuery;
use illustra_backend_client::query::ListOptions;
use illustra_backend_client::query::PartCategoryQuery;
use illustra_backend_client::query::PartSubCategoryQuery;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn manufacturers(&self) -> ApiResult<Vec<Manufacturer>>;
    async fn car_models(&self, query: &CarModelQuery) -> ApiResult<Vec<CarModel>>;
    async fn engine_models(&self, query: &EngineModelQuery) -> ApiResult<Vec<EngineModel>>;
    async fn part_categories(&self, query: &PartCategoryQuery) -> ApiResult<Vec<PartCategory>>;
    async fn part_subcategories(
        &self,
        query: &PartSubCategoryQuery,
    ) -> ApiResult<Vec<PartSubCategory>>;
    async fn illustrations(&self, query: &IllustrationQuery) -> ApiResult<Vec<Illustration>>;

    async fn manufacturer(&self, id: Id) -> ApiResult<Manufacturer>;
    async fn engine_model(&self, id: Id) -> ApiResult<EngineModel>;
    /// `key` is a slug or a numeric id.
    async fn car_model(&self, key: &str) -> ApiResult<CarModel>;
    async fn part_category(&self, id: Id) -> ApiResult<PartCategory>;
    async fn part_subcategory(&self, id: Id) -> ApiResult<PartSubCategory>;
}

#[async_trait]
pub trait FavoriteSource: Send + Sync {
    async fn toggle(&self, illustration: Id) -> ApiResult<FavoriteStatus>;
    async fn check(&self, illustration: Id) -> ApiResult<FavoriteStatus>;
    async fn favorites(&self) -> ApiResult<Vec<Favorite>>;
}

#[async_trait]
impl CatalogSource for Client {
    async fn manufacturers(&self) -> ApiResult<Vec<Manufacturer>> {
        self.list_manufacturers(&ListOptions::default())
            .await
            .map(Page::into_items)
    }

    async fn car_models(&self, query: &CarModelQuery) -> ApiResult<Vec<CarModel>> {
        self.list_car_models(query).await.map(Page::into_items)
    }

    async fn engine_models(&self, query: &EngineModelQuery) -> ApiResult<Vec<EngineModel>> {
        self.list_engine_models(query).await.map(Page::into_items)
    }

    async fn part_categories(&self, query: &PartCategoryQuery) -> ApiResult<Vec<PartCategory>> {
        self.list_part_categories(query).await.map(Page::into_items)
    }

    async fn part_subcategories(
        &self,
        query: &PartSubCategoryQuery,
    ) -> ApiResult<Vec<PartSubCategory>> {
        self.list_part_subcategories(query)
            .await
            .map(Page::into_items)
    }

    async fn illustrations(&self, query: &IllustrationQuery) -> ApiResult<Vec<Illustration>> {
        self.list_illustrations(query).await.map(Page::into_items)
    }

    async fn manufacturer(&self, id: Id) -> ApiResult<Manufacturer> {
        self.get_manufacturer(id).await
    }

    async fn engine_model(&self, id: Id) -> ApiResult<EngineModel> {
        self.get_engine_model(id).await
    }

    async fn car_model(&self, key: &str) -> ApiResult<CarModel> {
        self.get_car_model(key).await
    }

    async fn part_category(&self, id: Id) -> ApiResult<PartCategory> {
        self.get_part_category(id).await
    }

    async fn part_subcategory(&self, id: Id) -> ApiResult<PartSubCategory> {
        self.get_part_subcategory(id).await
    }
}

#[async_trait]
impl FavoriteSource for Client {
    async fn toggle(&self, illustration: Id) -> ApiResult<FavoriteStatus> {
        self.toggle_favorite(illustration).await
    }

    async fn check(&self, illustration: Id) -> ApiResult<FavoriteStatus> {
        self.check_favorite(illustration).await
    }

    async fn favorites(&self) -> ApiResult<Vec<Favorite>> {
        self.list_favorites().await.map(Page::into_items)
    }
}
