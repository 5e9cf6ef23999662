use illustra_backend_client::Client;
use illustra_backend_client::ClientConfig;
use illustra_backend_client::Session;
use illustra_backend_client::models::ManufacturerInput;
use illustra_backend_client::query::IllustrationQuery;
use illustra_backend_client::query::ListOptions;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

use super::client_for;

#[tokio::test]
async fn cached_get_is_served_until_a_mutation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/manufacturers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Toyota"}])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/manufacturers/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2, "name": "Nissan"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Session::from_access_token("t"));
    let options = ListOptions::default();
    client.list_manufacturers(&options).await.expect("first list");
    client.list_manufacturers(&options).await.expect("cached list");
    assert_eq!(client.cache_stats().entries, 1);

    let created = client
        .create_manufacturer(&ManufacturerInput {
            name: Some("Nissan".to_string()),
            slug: None,
        })
        .await
        .expect("create");
    assert_eq!(created.id, 2);
    assert_eq!(client.cache_stats().entries, 0);

    client.list_manufacturers(&options).await.expect("refetched list");
}

#[tokio::test]
async fn lists_with_files_skip_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/illustrations/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, Session::anonymous());
    let query = IllustrationQuery {
        include_files: true,
        ..Default::default()
    };
    client.list_illustrations(&query).await.expect("first");
    client.list_illustrations(&query).await.expect("second");
    assert_eq!(client.cache_stats().entries, 0);
}

#[tokio::test]
async fn zero_ttl_disables_caching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/part-categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let config = ClientConfig {
        cache_ttl_secs: 0,
        ..ClientConfig::with_base_url(format!("{}/api", server.uri()))
    };
    let client = Client::new(&config, Session::anonymous()).expect("client");
    let query = Default::default();
    client.list_part_categories(&query).await.expect("first");
    client.list_part_categories(&query).await.expect("second");
}
