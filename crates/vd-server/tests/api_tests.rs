//! Catalog API integration tests
//!
//! Each test starts a real server on a loopback port and drives it with
//! reqwest, the way a browser client would.

use std::path::Path;
use std::sync::Arc;

use vd_catalog::Catalog;
use vd_server::{start_server, ServerConfig};

const SAMPLE_CSV: &str = "\
English Name,Botanical Name,Plant Family,Strata,Lifecycle,Time-to-Maturity,Lifespan,Zone,Origin,Function,Spacing,Image Name,Image Prompt
Rubber Fig,Ficus elastica,Moraceae,High,Perennial,2-3 years,Perennial (decades),Wet,SE Asia,Shade,4 m,ficus-elastica.png,A rubber fig tree
Banana,Musa acuminata,Musaceae,Medium,Perennial,9 months,Perennial,Wet,SE Asia,Food,3 m,musa-acuminata.png,A banana plant
Kupukupu,Polypodium Fern-ia,Polypodiaceae,Low,Perennial,6-8 months,Perennial,Dry,Pacific,Groundcover,50 cm,polypodium.png,A sword fern
";

/// Write the sample dataset plus one image file, then start a server over
/// them. Returns the base URL.
async fn start_test_server(dir: &Path) -> String {
    let csv_path = dir.join("plants.csv");
    std::fs::write(&csv_path, SAMPLE_CSV).unwrap();

    let images_dir = dir.join("img");
    std::fs::create_dir_all(&images_dir).unwrap();
    std::fs::write(images_dir.join("musa-acuminata.png"), b"png bytes").unwrap();

    let catalog = Arc::new(Catalog::load(&csv_path));
    start_with_catalog(catalog, images_dir).await
}

async fn start_with_catalog(catalog: Arc<Catalog>, images_dir: std::path::PathBuf) -> String {
    let test_port = 41000 + (std::process::id() % 10000) as u16;
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: test_port,
        images_dir,
        enable_cors: true,
    };

    let (_state, _handle, actual_port) = start_server(config, catalog)
        .await
        .expect("Failed to start test server");

    format!("http://127.0.0.1:{}", actual_port)
}

async fn get_json(url: &str) -> serde_json::Value {
    let response = reqwest::get(url).await.expect("request failed");
    assert!(response.status().is_success(), "GET {} failed", url);
    response.json().await.expect("invalid JSON")
}

fn names(rows: &serde_json::Value) -> Vec<String> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row["Botanical Name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_filters_are_distinct_and_domain_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start_test_server(dir.path()).await;

    let filters = get_json(&format!("{}/api/filters", base_url)).await;

    // Strata in canopy order, not lexical order.
    assert_eq!(
        filters["strata"],
        serde_json::json!(["Low", "Medium", "High"])
    );
    // Maturity ordered by months: 6-8 < 9 < 24-36.
    assert_eq!(
        filters["time_to_maturity"],
        serde_json::json!(["6-8 months", "9 months", "2-3 years"])
    );
    // Lexical column.
    assert_eq!(filters["zone"], serde_json::json!(["Dry", "Wet"]));
}

#[tokio::test]
async fn test_plants_without_params_returns_all_rows_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start_test_server(dir.path()).await;

    let rows = get_json(&format!("{}/api/plants", base_url)).await;
    assert_eq!(
        names(&rows),
        vec!["Ficus elastica", "Musa acuminata", "Polypodium Fern-ia"]
    );
    // All original columns come back verbatim.
    assert_eq!(rows[0]["English Name"], "Rubber Fig");
    assert_eq!(rows[0]["Image Name"], "ficus-elastica.png");
}

#[tokio::test]
async fn test_search_matches_either_name_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start_test_server(dir.path()).await;

    let rows = get_json(&format!("{}/api/plants?q=FERN", base_url)).await;
    assert_eq!(names(&rows), vec!["Polypodium Fern-ia"]);
}

#[tokio::test]
async fn test_category_filters_and_across_or_within() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start_test_server(dir.path()).await;

    // One category, two values: OR.
    let url = format!(
        "{}/api/plants?plant_family=Moraceae&plant_family=Musaceae",
        base_url
    );
    assert_eq!(
        names(&get_json(&url).await),
        vec!["Ficus elastica", "Musa acuminata"]
    );

    // Two categories: AND.
    let url = format!(
        "{}/api/plants?plant_family=Moraceae&plant_family=Musaceae&strata=Medium",
        base_url
    );
    assert_eq!(names(&get_json(&url).await), vec!["Musa acuminata"]);
}

#[tokio::test]
async fn test_favorites_ids_filter() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start_test_server(dir.path()).await;

    let url = format!("{}/api/plants?ids=Ficus%20elastica", base_url);
    assert_eq!(names(&get_json(&url).await), vec!["Ficus elastica"]);
}

#[tokio::test]
async fn test_routes_work_without_api_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start_test_server(dir.path()).await;

    let bare = get_json(&format!("{}/plants?q=banana", base_url)).await;
    let prefixed = get_json(&format!("{}/api/plants?q=banana", base_url)).await;
    assert_eq!(bare, prefixed);
    assert_eq!(names(&bare), vec!["Musa acuminata"]);
}

#[tokio::test]
async fn test_static_images_are_served() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start_test_server(dir.path()).await;

    let response = reqwest::get(format!("{}/images/musa-acuminata.png", base_url))
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"png bytes");

    let missing = reqwest::get(format!("{}/images/nope.png", base_url))
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_dataset_degrades_to_empty_results() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Arc::new(Catalog::load(&dir.path().join("missing.csv")));
    let base_url = start_with_catalog(catalog, dir.path().join("img")).await;

    let filters = get_json(&format!("{}/api/filters", base_url)).await;
    assert_eq!(filters["zone"], serde_json::json!([]));

    let rows = get_json(&format!("{}/api/plants", base_url)).await;
    assert_eq!(rows, serde_json::json!([]));
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start_test_server(dir.path()).await;

    let response = reqwest::get(format!("{}/health", base_url)).await.unwrap();
    assert!(response.status().is_success());
}
