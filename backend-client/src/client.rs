use bytes::Bytes;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use tracing::warn;

use crate::auth::Session;
use crate::cache::CacheStats;
use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::error::Result;

const USER_AGENT: &str = concat!("illustra/", env!("CARGO_PKG_VERSION"));

/// Async client for the illustration catalog REST API.
///
/// Cloning is cheap: clones share the connection pool, the session and the
/// response cache.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
    cache: Arc<ResponseCache>,
}

impl Client {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            session: Arc::new(session),
            cache: Arc::new(ResponseCache::new(
                config.cache_ttl(),
                config.cache_capacity,
            )),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET through the response cache.
    pub(crate) async fn get_json<T>(&self, path: &str, query: &[(&'static str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let key = cache_key(path, query);
        if let Some(body) = self.cache.get(&key) {
            return decode(&body);
        }
        let body = self.get_text(path, query).await?;
        let value = decode(&body)?;
        self.cache.put(key, body);
        Ok(value)
    }

    pub(crate) async fn get_json_uncached<T>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.get_text(path, query).await?;
        decode(&body)
    }

    async fn get_text(&self, path: &str, query: &[(&'static str, String)]) -> Result<String> {
        debug!(path, ?query, "GET");
        let resp = self.request(Method::GET, path).query(query).send().await?;
        read_body(path, resp).await
    }

    /// Raw bytes of a download or preview. Never cached.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Bytes> {
        debug!(path, "GET (binary)");
        let resp = self.request(Method::GET, path).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.bytes().await?);
        }
        let body = resp.text().await.unwrap_or_default();
        warn!(path, status = status.as_u16(), "request failed");
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.cache.clear();
        debug!(path, %method, "sending JSON");
        let resp = self.request(method, path).json(body).send().await?;
        let body = read_body(path, resp).await?;
        decode(&body)
    }

    pub(crate) async fn send_multipart<T>(&self, method: Method, path: &str, form: Form) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.cache.clear();
        debug!(path, %method, "sending multipart form");
        let resp = self.request(method, path).multipart(form).send().await?;
        let body = read_body(path, resp).await?;
        decode(&body)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.cache.clear();
        debug!(path, "DELETE");
        let resp = self.request(Method::DELETE, path).send().await?;
        read_body(path, resp).await?;
        Ok(())
    }
}

async fn read_body(path: &str, resp: Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        warn!(path, status = status.as_u16(), "request failed");
        Err(ApiError::from_status(status.as_u16(), &body))
    }
}

/// Empty bodies (204 No Content) decode as JSON `null`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body = body.trim();
    let value = if body.is_empty() {
        serde_json::from_str("null")?
    } else {
        serde_json::from_str(body)?
    };
    Ok(value)
}

fn cache_key(path: &str, query: &[(&'static str, String)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let params = query
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{params}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cache_key_includes_query() {
        assert_eq!(cache_key("/manufacturers/", &[]), "/manufacturers/");
        assert_eq!(
            cache_key(
                "/engine-models/",
                &[("manufacturer", "1".to_string()), ("search", "2TR".to_string())]
            ),
            "/engine-models/?manufacturer=1&search=2TR"
        );
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        let unit: Result<()> = decode("");
        assert!(unit.is_ok());
        let missing: Option<u32> = decode("  ").unwrap();
        assert_eq!(missing, None);
    }
}
