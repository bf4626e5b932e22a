use std::sync::Arc;

use mes_api::app::services::AppServices;
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = mes_api::app::build_app(Arc::new(AppServices::in_memory()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn register_product(client: &reqwest::Client, base_url: &str, number: &str, name: &str) -> String {
    let res = client
        .post(format!("{}/products", base_url))
        .json(&json!({ "number": number, "name": name, "unit": "pcs" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

async fn register_resource(
    client: &reqwest::Client,
    base_url: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/resources", base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    if res.status() != StatusCode::CREATED {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        panic!("expected 201 Created from resource registration, got {status} body={body}");
    }
    res.json().await.unwrap()
}

async fn stock_of(client: &reqwest::Client, base_url: &str, product: &str, location: &str) -> String {
    let res = client
        .get(format!("{}/stock/{}/{}", base_url, product, location))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["quantity"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_lookup_serves_sorted_records() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    register_product(&client, &srv.base_url, "P-20", "Bolt").await;
    register_product(&client, &srv.base_url, "P-10", "Washer").await;

    let res = client
        .get(format!("{}/products/records?sidx=number&sord=asc", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let records: serde_json::Value = res.json().await.unwrap();
    let numbers: Vec<&str> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["number"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec!["P-10", "P-20"]);

    let res = client
        .get(format!("{}/products/records?sidx=name&sord=DESC", srv.base_url))
        .send()
        .await
        .unwrap();
    let records: serde_json::Value = res.json().await.unwrap();
    assert_eq!(records[0]["name"], "Washer");

    let res = client
        .get(format!("{}/products/records?sidx=price", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resource_correction_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let product = register_product(&client, &srv.base_url, "P-1", "Widget").await;
    let location = uuid_like_location();

    let resource = register_resource(
        &client,
        &srv.base_url,
        json!({ "product": product, "location": location, "quantity": "10", "price": "2.5" }),
    )
    .await;
    let id = resource["id"].as_str().unwrap().to_string();
    assert_eq!(resource["number"], "000001");
    assert_eq!(stock_of(&client, &srv.base_url, &product, &location).await, "10");

    // Quantity up: correction recorded, stock follows.
    let res = client
        .post(format!("{}/resources/{}/corrections", srv.base_url, id))
        .json(&json!({ "quantity": "15", "price": "2.5" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["corrected"], true);
    assert_eq!(body["recorded"], true);
    assert_eq!(body["correction"]["oldQuantity"], "10");
    assert_eq!(body["correction"]["newQuantity"], "15");
    assert_eq!(body["correction"]["number"], "000001");
    assert_eq!(stock_of(&client, &srv.base_url, &product, &location).await, "15");

    let res = client
        .get(format!("{}/resources/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    let stored: serde_json::Value = res.json().await.unwrap();
    assert_eq!(stored["quantity"], "15");
    assert_eq!(stored["isCorrected"], true);

    // Same values again: nothing to correct.
    let res = client
        .post(format!("{}/resources/{}/corrections", srv.base_url, id))
        .json(&json!({ "quantity": "15.00", "price": "2.50" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["corrected"], false);

    let res = client
        .get(format!("{}/resources/{}/corrections", srv.base_url, id))
        .send()
        .await
        .unwrap();
    let corrections: serde_json::Value = res.json().await.unwrap();
    assert_eq!(corrections.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rejected_correction_leaves_resource_and_stock_alone() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let product = register_product(&client, &srv.base_url, "P-1", "Widget").await;
    let location = uuid_like_location();
    let resource = register_resource(
        &client,
        &srv.base_url,
        json!({
            "product": product,
            "location": location,
            "quantity": "10",
            "reservedQuantity": "6"
        }),
    )
    .await;
    let id = resource["id"].as_str().unwrap().to_string();

    // Below the reservation: available quantity would go negative.
    let res = client
        .post(format!("{}/resources/{}/corrections", srv.base_url, id))
        .json(&json!({ "quantity": "2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client
        .get(format!("{}/resources/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    let stored: serde_json::Value = res.json().await.unwrap();
    assert_eq!(stored["quantity"], "10");
    assert_eq!(stored["isCorrected"], false);
    assert_eq!(stock_of(&client, &srv.base_url, &product, &location).await, "10");
}

#[tokio::test]
async fn requests_use_camel_case_fields_and_listings_cover_everything() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let product = register_product(&client, &srv.base_url, "P-1", "Widget").await;
    let location = uuid_like_location();
    let storage_location = mes_core::StorageLocationId::new().to_string();
    let resource = register_resource(
        &client,
        &srv.base_url,
        json!({
            "product": product,
            "location": location,
            "quantity": "3",
            "storageLocation": storage_location,
            "reservedQuantity": "1"
        }),
    )
    .await;
    assert_eq!(resource["storageLocation"], storage_location.as_str());
    assert_eq!(resource["reservedQuantity"], "1");

    let res = client
        .get(format!("{}/resources", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let resources: serde_json::Value = res.json().await.unwrap();
    assert_eq!(resources.as_array().unwrap().len(), 1);

    let res = client
        .get(format!("{}/stock", srv.base_url))
        .send()
        .await
        .unwrap();
    let levels: serde_json::Value = res.json().await.unwrap();
    assert_eq!(levels.as_array().unwrap().len(), 1);
    assert_eq!(levels[0]["quantity"], "3");
}

#[tokio::test]
async fn unknown_and_malformed_resources() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/resources/not-a-uuid/corrections", srv.base_url))
        .json(&json!({ "quantity": "1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/resources/{}/corrections", srv.base_url, mes_core::ResourceId::new()))
        .json(&json!({ "quantity": "1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(format!("{}/resources", srv.base_url))
        .json(&json!({
            "product": mes_core::ProductId::new(),
            "location": uuid_like_location(),
            "quantity": "1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unknown_product");
}

fn uuid_like_location() -> String {
    mes_core::LocationId::new().to_string()
}
