use illustra_backend_client::ApiError;
use illustra_backend_client::Session;
use illustra_backend_client::models::NewIllustration;
use illustra_backend_client::models::UploadFile;
use illustra_backend_client::query::IllustrationQuery;
use illustra_backend_client::query::ListOptions;
use illustra_backend_client::query::PartCategoryQuery;
use illustra_backend_client::query::PartSubCategoryQuery;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

use super::client_for;

#[tokio::test]
async fn bearer_token_is_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/manufacturers/"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Toyota", "slug": "toyota", "engine_count": 4}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Session::from_access_token("secret-token"));
    let page = client
        .list_manufacturers(&ListOptions::default())
        .await
        .expect("list manufacturers");
    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].name, "Toyota");
    assert_eq!(page.items()[0].engine_count, Some(4));
}

#[tokio::test]
async fn paginated_and_plain_lists_decode_alike() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/part-categories/"))
        .and(query_param("engine_model", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{"id": 1000, "name": "Engine", "illustration_count": 5}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/part-subcategories/"))
        .and(query_param("part_category", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2000, "name": "Pistons", "part_category": 1000, "illustration_count": 0}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, Session::anonymous());
    let categories = client
        .list_part_categories(&PartCategoryQuery {
            engine_model: Some(100),
            ..Default::default()
        })
        .await
        .expect("categories");
    assert_eq!(categories.total(), 1);
    assert_eq!(categories.items()[0].illustration_count, Some(5));

    let subcategories = client
        .list_part_subcategories(&PartSubCategoryQuery::by_category(1000))
        .await
        .expect("subcategories");
    assert_eq!(subcategories.total(), 1);
    assert!(!subcategories.items()[0].has_illustrations());
}

#[tokio::test]
async fn validation_errors_are_keyed_by_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/illustrations/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "title": ["This field is required."],
            "non_field_errors": ["Engine does not belong to manufacturer."]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Session::from_access_token("t"));
    let input = NewIllustration {
        engine_model: 100,
        part_category: 1000,
        applicable_car_models: vec![10, 11],
        uploaded_files: vec![UploadFile::new("diagram.pdf", b"%PDF-1.4".to_vec())],
        ..Default::default()
    };
    let err = client
        .create_illustration(&input)
        .await
        .expect_err("validation should fail");
    let errors = err.field_errors().expect("field errors");
    assert_eq!(
        errors.get("title"),
        Some(&["This field is required.".to_string()][..])
    );
    assert_eq!(
        errors.non_field(),
        &["Engine does not belong to manufacturer.".to_string()]
    );
}

#[tokio::test]
async fn manufacturer_lookup_falls_back_to_list_on_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/manufacturers/1/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/manufacturers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Toyota"},
            {"id": 2, "name": "Nissan"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, Session::anonymous());
    let manufacturer = client.get_manufacturer(1).await.expect("fallback lookup");
    assert_eq!(manufacturer.name, "Toyota");

    let missing = client.get_manufacturer(9).await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn fuel_types_fall_back_to_builtin_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/engine-models/fuel_types/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server, Session::anonymous());
    let fuel_types = client.fuel_types().await;
    assert_eq!(fuel_types, illustra_backend_client::default_fuel_types());
}

#[tokio::test]
async fn illustration_filters_are_sent_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/illustrations/"))
        .and(query_param("engine_model", "100"))
        .and(query_param("part_subcategory", "2000"))
        .and(query_param("ordering", "-created_at"))
        .and(query_param("include_files", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{
                "id": 7,
                "title": "Timing chain",
                "engine_model": 100,
                "part_category": 1000,
                "part_subcategory": 2000,
                "applicable_car_models": [10]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Session::anonymous());
    let mut query = IllustrationQuery::newest_first();
    query.engine_model = Some(100);
    query.part_subcategory = Some(2000);
    let page = client.list_illustrations(&query).await.expect("list");
    assert_eq!(page.items()[0].title, "Timing chain");
    assert_eq!(page.items()[0].applicable_car_models, vec![10]);
}

#[tokio::test]
async fn favorites_toggle_and_check() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/favorites/toggle/"))
        .and(body_json(json!({"illustration": 7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_favorited": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/favorites/check/"))
        .and(query_param("illustration", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_favorited": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Session::from_access_token("t"));
    assert!(client.toggle_favorite(7).await.expect("toggle").is_favorited);
    assert!(client.check_favorite(7).await.expect("check").is_favorited);
}

#[tokio::test]
async fn downloads_return_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/illustration-files/3/download/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
        .mount(&server)
        .await;

    let client = client_for(&server, Session::anonymous());
    let bytes = client
        .download_illustration_file(3)
        .await
        .expect("download");
    assert_eq!(&bytes[..], b"%PDF-1.4");
}

#[tokio::test]
async fn delete_accepts_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/auth/comments/4/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Session::from_access_token("t"));
    client.delete_comment(4).await.expect("delete comment");
}

#[tokio::test]
async fn forbidden_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/illustrations/7/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"detail": "You do not own this illustration."})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Session::from_access_token("t"));
    match client.delete_illustration(7).await {
        Err(ApiError::Forbidden(detail)) => {
            assert_eq!(detail, "You do not own this illustration.");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
