use illustra_backend_models::models::Id;
use illustra_backend_models::models::Page;
use illustra_backend_models::models::PartCategory;
use illustra_backend_models::models::PartCategoryInput;
use illustra_backend_models::models::PartSubCategory;
use illustra_backend_models::models::PartSubCategoryInput;
use reqwest::Method;

use crate::client::Client;
use crate::error::Result;
use crate::query::PartCategoryQuery;
use crate::query::PartSubCategoryQuery;
use crate::query::QueryParams;

const PART_CATEGORIES: &str = "/part-categories/";
const PART_SUBCATEGORIES: &str = "/part-subcategories/";

impl Client {
    pub async fn list_part_categories(&self, query: &PartCategoryQuery) -> Result<Page<PartCategory>> {
        self.get_json(PART_CATEGORIES, &query.pairs()).await
    }

    pub async fn get_part_category(&self, id: Id) -> Result<PartCategory> {
        self.get_json(&format!("{PART_CATEGORIES}{id}/"), &[]).await
    }

    pub async fn create_part_category(&self, input: &PartCategoryInput) -> Result<PartCategory> {
        self.send_json(Method::POST, PART_CATEGORIES, input).await
    }

    pub async fn update_part_category(&self, id: Id, input: &PartCategoryInput) -> Result<PartCategory> {
        self.send_json(Method::PUT, &format!("{PART_CATEGORIES}{id}/"), input)
            .await
    }

    pub async fn patch_part_category(&self, id: Id, input: &PartCategoryInput) -> Result<PartCategory> {
        self.send_json(Method::PATCH, &format!("{PART_CATEGORIES}{id}/"), input)
            .await
    }

    pub async fn delete_part_category(&self, id: Id) -> Result<()> {
        self.delete(&format!("{PART_CATEGORIES}{id}/")).await
    }

    pub async fn list_part_subcategories(
        &self,
        query: &PartSubCategoryQuery,
    ) -> Result<Page<PartSubCategory>> {
        self.get_json(PART_SUBCATEGORIES, &query.pairs()).await
    }

    pub async fn get_part_subcategory(&self, id: Id) -> Result<PartSubCategory> {
        self.get_json(&format!("{PART_SUBCATEGORIES}{id}/"), &[])
            .await
    }

    pub async fn create_part_subcategory(
        &self,
        input: &PartSubCategoryInput,
    ) -> Result<PartSubCategory> {
        self.send_json(Method::POST, PART_SUBCATEGORIES, input).await
    }

    pub async fn update_part_subcategory(
        &self,
        id: Id,
        input: &PartSubCategoryInput,
    ) -> Result<PartSubCategory> {
        self.send_json(Method::PUT, &format!("{PART_SUBCATEGORIES}{id}/"), input)
            .await
    }

    pub async fn patch_part_subcategory(
        &self,
        id: Id,
        input: &PartSubCategoryInput,
    ) -> Result<PartSubCategory> {
        self.send_json(Method::PATCH, &format!("{PART_SUBCATEGORIES}{id}/"), input)
            .await
    }

    pub async fn delete_part_subcategory(&self, id: Id) -> Result<()> {
        self.delete(&format!("{PART_SUBCATEGORIES}{id}/")).await
    }
}
