use std::net::SocketAddr;
use std::path::PathBuf;

use configs::{AppConfig, StorageConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

async fn start_server_with(cfg: AppConfig) -> anyhow::Result<TestApp> {
    let data_dir = cfg.storage.data_dir.clone();
    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_dir })
}

// Isolated data dir per test run
async fn start_server() -> anyhow::Result<TestApp> {
    let data_dir = std::env::temp_dir().join(format!("shop-e2e-{}", Uuid::new_v4()));
    let cfg = AppConfig {
        storage: StorageConfig { data_dir, ..Default::default() },
        ..Default::default()
    };
    start_server_with(cfg).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn pen() -> Value {
    json!({
        "title": "Pen",
        "description": "Blue pen",
        "code": "P1",
        "price": 1.5,
        "stock": 10,
        "category": "office"
    })
}

async fn create_product(app: &TestApp, body: &Value) -> anyhow::Result<Value> {
    let res = client().post(format!("{}/api/products", app.base_url)).json(body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    Ok(res.json().await?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_product_then_cart_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let product = create_product(&app, &pen()).await?;
    let pid = product["id"].as_str().expect("generated id").to_string();
    assert!(!pid.is_empty());
    assert_eq!(product["status"], true);
    assert_eq!(product["thumbnails"], json!([]));
    assert_eq!(product["price"], 1.5);

    let res = c.post(format!("{}/api/carts", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let cart = res.json::<Value>().await?;
    let cid = cart["id"].as_str().expect("cart id").to_string();
    assert_eq!(cart["products"], json!([]));

    let add_url = format!("{}/api/carts/{}/product/{}", app.base_url, cid, pid);
    let res = c.post(&add_url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let cart = res.json::<Value>().await?;
    assert_eq!(cart["products"], json!([{"product": pid, "quantity": 1}]));

    let cart = c.post(&add_url).send().await?.json::<Value>().await?;
    assert_eq!(cart["products"], json!([{"product": pid, "quantity": 2}]));

    let res = c.get(format!("{}/api/carts/{}", app.base_url, cid)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, cart);
    Ok(())
}

#[tokio::test]
async fn e2e_create_product_missing_field_is_400() -> anyhow::Result<()> {
    let app = start_server().await?;
    let mut body = pen();
    body.as_object_mut().unwrap().remove("category");

    let res = client().post(format!("{}/api/products", app.base_url)).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err = res.json::<Value>().await?;
    assert_eq!(err["error"], "All fields except thumbnails are required.");
    assert_eq!(err["detail"], "missing required field: category");

    // zero stock is rejected with the same error and a distinct detail
    let mut body = pen();
    body["stock"] = json!(0);
    let res = client().post(format!("{}/api/products", app.base_url)).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err = res.json::<Value>().await?;
    assert_eq!(err["detail"], "invalid stock: must be greater than zero");

    let list = client().get(format!("{}/api/products", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_body_is_400() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/api/products", app.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err = res.json::<Value>().await?;
    assert_eq!(err["error"], "Invalid request body");
    Ok(())
}

#[tokio::test]
async fn e2e_list_get_update_delete() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let mut ids = Vec::new();
    for code in ["A", "B", "C"] {
        let mut body = pen();
        body["code"] = json!(code);
        let p = create_product(&app, &body).await?;
        ids.push(p["id"].as_str().unwrap().to_string());
    }

    let limited = c.get(format!("{}/api/products?limit=2", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    let codes: Vec<&str> = limited.iter().map(|p| p["code"].as_str().unwrap()).collect();
    assert_eq!(codes, ["A", "B"]);

    let res = c.get(format!("{}/api/products/{}", app.base_url, ids[1])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let before = res.json::<Value>().await?;

    // id in the body is ignored
    let res = c
        .put(format!("{}/api/products/{}", app.base_url, ids[1]))
        .json(&json!({"price": 3.0, "id": "hijack"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let after = res.json::<Value>().await?;
    let mut expected = before.clone();
    expected["price"] = json!(3.0);
    assert_eq!(after, expected);

    let res = c.put(format!("{}/api/products/nope", app.base_url)).json(&json!({"price": 3.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Product not found"}));

    let res = c.delete(format!("{}/api/products/{}", app.base_url, ids[0])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.delete(format!("{}/api/products/{}", app.base_url, ids[0])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let all = c.get(format!("{}/api/products", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|p| p["id"] != json!(ids[0])));

    let res = c.get(format!("{}/api/products/{}", app.base_url, ids[0])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_cart_not_found_cases() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let product = create_product(&app, &pen()).await?;
    let pid = product["id"].as_str().unwrap();
    let cart = c.post(format!("{}/api/carts", app.base_url)).send().await?.json::<Value>().await?;
    let cid = cart["id"].as_str().unwrap();

    let res = c.get(format!("{}/api/carts/missing", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], "Cart not found");

    let res = c.post(format!("{}/api/carts/{}/product/ghost", app.base_url, cid)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let err = res.json::<Value>().await?;
    assert_eq!(err["error"], "Cart or Product not found");
    assert_eq!(err["detail"], "product not found");

    let res = c.post(format!("{}/api/carts/missing/product/{}", app.base_url, pid)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["detail"], "cart not found");

    let cart = c.get(format!("{}/api/carts/{}", app.base_url, cid)).send().await?.json::<Value>().await?;
    assert_eq!(cart["products"], json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_list_cap_from_config() -> anyhow::Result<()> {
    let data_dir = std::env::temp_dir().join(format!("shop-e2e-{}", Uuid::new_v4()));
    let mut cfg = AppConfig {
        storage: StorageConfig { data_dir, ..Default::default() },
        ..Default::default()
    };
    cfg.catalog.max_list_limit = Some(1);
    let app = start_server_with(cfg).await?;

    create_product(&app, &pen()).await?;
    create_product(&app, &pen()).await?;
    let all = client().get(format!("{}/api/products", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(all.len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_are_all_kept() -> anyhow::Result<()> {
    let app = start_server().await?;
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..16 {
        let url = format!("{}/api/products", app.base_url);
        let mut body = pen();
        body["code"] = json!(format!("C{i}"));
        tasks.spawn(async move { client().post(url).json(&body).send().await.map(|r| r.status()) });
    }
    while let Some(res) = tasks.join_next().await {
        assert_eq!(res??, HttpStatusCode::CREATED);
    }
    let all = client().get(format!("{}/api/products", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(all.len(), 16);
    Ok(())
}

#[tokio::test]
async fn e2e_bad_limit_is_json_400() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/api/products?limit=-1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err = res.json::<Value>().await?;
    assert_eq!(err["error"], "Invalid query string");
    assert!(err["detail"].is_string());
    Ok(())
}

#[tokio::test]
async fn e2e_storage_failure_is_500() -> anyhow::Result<()> {
    let data_dir = std::env::temp_dir().join(format!("shop-e2e-{}", Uuid::new_v4()));
    // a directory where the products file belongs makes every rewrite fail
    std::fs::create_dir_all(data_dir.join("products.json"))?;
    let cfg = AppConfig {
        storage: StorageConfig { data_dir, ..Default::default() },
        ..Default::default()
    };
    let app = start_server_with(cfg).await?;
    let c = client();

    let res = c.post(format!("{}/api/products", app.base_url)).json(&pen()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let err = res.json::<Value>().await?;
    assert_eq!(err["error"], "Internal Server Error");
    assert!(err["detail"].as_str().unwrap_or_default().starts_with("storage error: products"));

    let res = c.delete(format!("{}/api/products/x", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let err = res.json::<Value>().await?;
    assert_eq!(err["error"], "Internal Server Error");
    assert!(err["detail"].is_string());

    // reads still succeed and see an empty catalog
    let list = c.get(format!("{}/api/products", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(list, json!([]));
    Ok(())
}
