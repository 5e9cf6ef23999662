use bytes::Bytes;
use illustra_backend_models::models::BulkDeleteRequest;
use illustra_backend_models::models::Id;
use illustra_backend_models::models::Illustration;
use illustra_backend_models::models::IllustrationDetail;
use illustra_backend_models::models::IllustrationFile;
use illustra_backend_models::models::IllustrationPatch;
use illustra_backend_models::models::IllustrationStats;
use illustra_backend_models::models::NewIllustration;
use illustra_backend_models::models::Page;
use illustra_backend_models::models::UploadFile;
use reqwest::Method;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::query::IllustrationFileQuery;
use crate::query::IllustrationQuery;
use crate::query::QueryParams;

const ILLUSTRATIONS: &str = "/illustrations/";
const ILLUSTRATION_FILES: &str = "/illustration-files/";

fn upload_part(file: &UploadFile) -> Result<Part> {
    let part = Part::bytes(file.content.clone())
        .file_name(file.file_name.clone())
        .mime_str(file.file_type().mime_type())?;
    Ok(part)
}

/// Scalar fields first, then one `uploaded_files` part per file.
fn illustration_form(input: &NewIllustration) -> Result<Form> {
    let mut form = Form::new();
    for (key, value) in input.text_fields() {
        form = form.text(key, value);
    }
    for file in &input.uploaded_files {
        form = form.part("uploaded_files", upload_part(file)?);
    }
    Ok(form)
}

impl Client {
    /// Lists with `include_files=true` embed file URLs that may be signed,
    /// so they bypass the response cache.
    pub async fn list_illustrations(&self, query: &IllustrationQuery) -> Result<Page<Illustration>> {
        let pairs = query.pairs();
        if query.include_files {
            self.get_json_uncached(ILLUSTRATIONS, &pairs).await
        } else {
            self.get_json(ILLUSTRATIONS, &pairs).await
        }
    }

    pub async fn get_illustration(&self, id: Id) -> Result<IllustrationDetail> {
        self.get_json(&format!("{ILLUSTRATIONS}{id}/"), &[]).await
    }

    pub async fn illustration_stats(&self) -> Result<IllustrationStats> {
        self.get_json(&format!("{ILLUSTRATIONS}stats/"), &[]).await
    }

    pub async fn create_illustration(&self, input: &NewIllustration) -> Result<IllustrationDetail> {
        let form = illustration_form(input)?;
        self.send_multipart(Method::POST, ILLUSTRATIONS, form).await
    }

    pub async fn update_illustration(
        &self,
        id: Id,
        input: &NewIllustration,
    ) -> Result<IllustrationDetail> {
        let form = illustration_form(input)?;
        self.send_multipart(Method::PUT, &format!("{ILLUSTRATIONS}{id}/"), form)
            .await
    }

    pub async fn patch_illustration(
        &self,
        id: Id,
        patch: &IllustrationPatch,
    ) -> Result<IllustrationDetail> {
        self.send_json(Method::PATCH, &format!("{ILLUSTRATIONS}{id}/"), patch)
            .await
    }

    pub async fn delete_illustration(&self, id: Id) -> Result<()> {
        self.delete(&format!("{ILLUSTRATIONS}{id}/")).await
    }

    /// Attaches files to an existing illustration. The response shape
    /// varies between deployments, so it is returned as raw JSON.
    pub async fn add_illustration_files(&self, id: Id, files: &[UploadFile]) -> Result<Value> {
        let mut form = Form::new();
        for file in files {
            form = form.part("files", upload_part(file)?);
        }
        self.send_multipart(Method::POST, &format!("{ILLUSTRATIONS}{id}/add_files/"), form)
            .await
    }

    pub async fn delete_illustration_file(&self, id: Id, file_id: Id) -> Result<()> {
        self.delete(&format!("{ILLUSTRATIONS}{id}/files/{file_id}/"))
            .await
    }

    pub async fn bulk_delete_illustrations(&self, ids: &[Id]) -> Result<Value> {
        let request = BulkDeleteRequest { ids: ids.to_vec() };
        self.send_json(
            Method::POST,
            &format!("{ILLUSTRATIONS}bulk-delete/"),
            &request,
        )
        .await
    }

    pub async fn list_illustration_files(
        &self,
        query: &IllustrationFileQuery,
    ) -> Result<Page<IllustrationFile>> {
        self.get_json(ILLUSTRATION_FILES, &query.pairs()).await
    }

    pub async fn get_illustration_file(&self, id: Id) -> Result<IllustrationFile> {
        self.get_json(&format!("{ILLUSTRATION_FILES}{id}/"), &[])
            .await
    }

    pub async fn delete_illustration_file_by_id(&self, id: Id) -> Result<()> {
        self.delete(&format!("{ILLUSTRATION_FILES}{id}/")).await
    }

    pub async fn download_illustration_file(&self, id: Id) -> Result<Bytes> {
        self.get_bytes(&format!("{ILLUSTRATION_FILES}{id}/download/"))
            .await
    }

    pub async fn preview_illustration_file(&self, id: Id) -> Result<Bytes> {
        self.get_bytes(&format!("{ILLUSTRATION_FILES}{id}/preview/"))
            .await
    }
}
