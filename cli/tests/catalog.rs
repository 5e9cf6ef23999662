use std::path::Path;

use anyhow::Result;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::Value as JsonValue;
use serde_json::json;
use tempfile::TempDir;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_json;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

fn illustra_command(home: &Path, server: &MockServer) -> Result<assert_cmd::Command> {
    let mut cmd = assert_cmd::Command::cargo_bin("illustra")?;
    cmd.env("ILLUSTRA_HOME", home)
        .env_remove("ILLUSTRA_BASE_URL")
        .env_remove("ILLUSTRA_ACCESS_TOKEN")
        .env_remove("RUST_LOG")
        .args(["--base-url", &format!("{}/api", server.uri())]);
    Ok(cmd)
}

#[tokio::test(flavor = "multi_thread")]
async fn manufacturers_render_as_table() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/manufacturers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"id": 1, "name": "Toyota", "slug": "toyota", "engine_count": 4, "car_model_count": 2},
                {"id": 2, "name": "Nissan", "slug": "nissan"}
            ]
        })))
        .mount(&server)
        .await;

    let home = TempDir::new()?;
    let output = illustra_command(home.path(), &server)?
        .args(["browse", "manufacturers"])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let toyota = stdout
        .lines()
        .find(|line| line.contains("Toyota"))
        .unwrap_or_default();
    assert!(toyota.starts_with("1 "));
    assert!(toyota.contains("toyota"));
    assert!(stdout.contains("Nissan"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn validation_errors_are_listed_per_field() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/illustrations/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "title": ["Illustration with this title already exists."],
            "engine_model": ["Invalid pk \"9\" - object does not exist."]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new()?;
    let output = illustra_command(home.path(), &server)?
        .args([
            "illustrations",
            "create",
            "--title",
            "Piston assembly",
            "--engine-model",
            "9",
            "--part-category",
            "1000",
        ])
        .output()?;
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;
    let title_line = stderr
        .lines()
        .find(|line| line.contains("already exists"))
        .unwrap_or_default();
    let engine_line = stderr
        .lines()
        .find(|line| line.contains("object does not exist"))
        .unwrap_or_default();
    assert!(title_line.contains("title"));
    assert!(engine_line.contains("engine_model"));
    assert!(stderr.contains("failed to create illustration"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_records_server_state() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/favorites/toggle/"))
        .and(body_json(json!({"illustration": 7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_favorited": true})))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new()?;
    let output = illustra_command(home.path(), &server)?
        .args(["favorites", "toggle", "7", "--json"])
        .output()?;
    assert!(output.status.success());

    let parsed: JsonValue = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed, json!({"illustration": 7, "is_favorited": true}));

    let cache: JsonValue =
        serde_json::from_slice(&std::fs::read(home.path().join("favorites.json"))?)?;
    assert_eq!(cache, json!({"favorites": {"7": true}}));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_toggle_keeps_current_state() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/favorites/toggle/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let home = TempDir::new()?;
    illustra_command(home.path(), &server)?
        .args(["favorites", "toggle", "7", "--current", "true"])
        .assert()
        .success()
        .stdout(contains("is a favorite").and(contains("did not go through")));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn route_prints_breadcrumbs_and_visible_subcategories() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/car-models/hiace/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10, "name": "Hiace", "slug": "hiace",
            "manufacturer": 1, "manufacturer_name": "Toyota", "engines": [100]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/part-categories/1000/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1000, "name": "Engine"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/part-subcategories/"))
        .and(query_param("part_category", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2000, "name": "Pistons", "part_category": 1000, "illustration_count": 3},
            {"id": 2001, "name": "Gaskets", "part_category": 1000, "illustration_count": 0}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/manufacturers/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Toyota"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/engine-models/100/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 100, "name": "2TR-FE", "engine_code": "2TR", "manufacturer": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let home = TempDir::new()?;
    let state = json!({"engine_id": 100, "engine_code": "2TR"}).to_string();
    let output = illustra_command(home.path(), &server)?
        .args([
            "route",
            "/cars/hiace/categories/1000/subcategories",
            "--state",
            &state,
            "--json",
        ])
        .output()?;
    assert!(output.status.success());

    let parsed: JsonValue = serde_json::from_slice(&output.stdout)?;
    let labels: Vec<&str> = parsed["breadcrumbs"]
        .as_array()
        .map(|crumbs| crumbs.iter().filter_map(|c| c["label"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(
        labels,
        vec!["Home", "Manufacturers", "Toyota", "2TR", "Hiace", "Engine"]
    );
    assert_eq!(
        parsed["items"],
        json!([{"id": 2000, "label": "Pistons (3)"}])
    );
    Ok(())
}
