use illustra_backend_models::models::Comment;
use illustra_backend_models::models::Id;
use illustra_backend_models::models::NewComment;
use illustra_backend_models::models::Page;
use reqwest::Method;

use crate::client::Client;
use crate::error::Result;

const COMMENTS: &str = "/auth/comments/";

impl Client {
    pub async fn list_comments(&self) -> Result<Page<Comment>> {
        self.get_json(COMMENTS, &[]).await
    }

    pub async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        self.send_json(Method::POST, COMMENTS, comment).await
    }

    pub async fn delete_comment(&self, id: Id) -> Result<()> {
        self.delete(&format!("{COMMENTS}{id}/")).await
    }
}
