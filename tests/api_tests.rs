use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use kiosk::config::Config;
use std::sync::atomic::{AtomicU32, Ordering};
use tower::ServiceExt;

const BOUNDARY: &str = "kiosk-test-boundary";

static APP_COUNTER: AtomicU32 = AtomicU32::new(0);

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // A single pooled connection keeps the in-memory database alive
    // for the whole test.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let uploads_dir = std::env::temp_dir().join(format!(
        "kiosk-api-test-{}-{}",
        std::process::id(),
        APP_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    config.uploads.uploads_path = uploads_dir.to_string_lossy().to_string();

    let state = kiosk::api::create_app_state(config)
        .await
        .expect("Failed to create app state");
    kiosk::api::router(state)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn multipart_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "Content-Type",
            format!("{}; boundary={BOUNDARY}", mime::MULTIPART_FORM_DATA),
        )
        .body(Body::from(body))
        .unwrap()
}

fn product_form(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: {}\r\n\r\n",
                mime::IMAGE_PNG
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn sample_fields<'a>() -> Vec<(&'a str, &'a str)> {
    vec![
        ("brand", "Acme"),
        ("name", "Classic"),
        ("origin", "DE"),
        ("type", "filter"),
        ("tar", "8mg"),
        ("price", "4.50"),
        ("stock", "24"),
    ]
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn list_products(app: &Router) -> Vec<serde_json::Value> {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await.as_array().unwrap().clone()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_register_login_roundtrip() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            &serde_json::json!({"username": "alice", "password": "p1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "registered");
    assert_eq!(json["user"]["username"], "alice");
    assert_eq!(json["user"]["role"], "user");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            &serde_json::json!({"username": "alice", "password": "p1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "user");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/login",
            &serde_json::json!({"username": "alice", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_username_is_not_a_generic_failure() {
    let app = spawn_app().await;

    let payload = serde_json::json!({"username": "bob", "password": "pw"});

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/register", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request("POST", "/api/register", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("taken"),
        "expected a username-taken message, got: {json}"
    );
}

#[tokio::test]
async fn test_register_requires_username_and_password() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            &serde_json::json!({"username": "carol"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/register",
            &serde_json::json!({"password": "pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seeded_admin_can_login() {
    let app = spawn_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/login",
            &serde_json::json!({"username": "admin", "password": "123"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "admin");
}

#[tokio::test]
async fn test_users_list_excludes_password() {
    let app = spawn_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            &serde_json::json!({"username": "dave", "password": "pw"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let users = body_json(response).await;
    let users = users.as_array().unwrap();

    // Seeded admin plus the fresh registration, newest first.
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "dave");
    assert_eq!(users[1]["username"], "admin");

    for user in users {
        assert!(user.get("password").is_none());
        assert!(user["id"].is_i64());
        assert!(user["role"].is_string());
    }
}

#[tokio::test]
async fn test_create_product_without_image() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/api/products",
            product_form(&sample_fields(), None),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "created");
    let id = json["id"].as_i64().unwrap();
    assert!(id > 0);

    let products = list_products(&app).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["id"].as_i64().unwrap(), id);
    assert_eq!(products[0]["brand"], "Acme");
    assert_eq!(products[0]["type"], "filter");
    assert_eq!(products[0]["stock"], 24);
    assert_eq!(products[0]["image"], "");
}

#[tokio::test]
async fn test_create_product_with_image_stores_and_serves_file() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/api/products",
            product_form(&sample_fields(), Some(("pack.png", b"png-bytes"))),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let products = list_products(&app).await;
    let image = products[0]["image"].as_str().unwrap().to_string();

    // /uploads/image-<millis>-<random>.png
    assert!(image.starts_with("/uploads/image-"), "got: {image}");
    assert!(image.ends_with(".png"));
    let middle = image
        .strip_prefix("/uploads/image-")
        .and_then(|s| s.strip_suffix(".png"))
        .unwrap();
    let (millis, suffix) = middle.split_once('-').unwrap();
    assert!(millis.parse::<i64>().is_ok());
    assert!(suffix.parse::<u32>().is_ok());

    let response = app
        .oneshot(
            Request::builder()
                .uri(image.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"png-bytes");
}

#[tokio::test]
async fn test_update_without_new_image_preserves_old_one() {
    let app = spawn_app().await;

    app.clone()
        .oneshot(multipart_request(
            "POST",
            "/api/products",
            product_form(&sample_fields(), Some(("pack.png", b"original"))),
        ))
        .await
        .unwrap();

    let products = list_products(&app).await;
    let id = products[0]["id"].as_i64().unwrap();
    let original_image = products[0]["image"].as_str().unwrap().to_string();

    let mut updated = sample_fields();
    updated[1] = ("name", "Classic Gold");
    updated[6] = ("stock", "7");

    let response = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            &format!("/api/products/{id}"),
            product_form(&updated, None),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "updated");

    let products = list_products(&app).await;
    assert_eq!(products[0]["name"], "Classic Gold");
    assert_eq!(products[0]["stock"], 7);
    assert_eq!(products[0]["image"], original_image.as_str());

    // A fresh file part replaces the stored path.
    let response = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            &format!("/api/products/{id}"),
            product_form(&updated, Some(("new.jpg", b"newer"))),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products = list_products(&app).await;
    let replaced = products[0]["image"].as_str().unwrap();
    assert_ne!(replaced, original_image);
    assert!(replaced.ends_with(".jpg"));
}

#[tokio::test]
async fn test_update_and_delete_of_unknown_id_report_success() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            "/api/products/9999",
            product_form(&sample_fields(), None),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/products/9999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "deleted");
}

#[tokio::test]
async fn test_delete_removes_row_and_list_stays_newest_first() {
    let app = spawn_app().await;

    for name in ["first", "second", "third"] {
        let mut fields = sample_fields();
        fields[1] = ("name", name);
        app.clone()
            .oneshot(multipart_request(
                "POST",
                "/api/products",
                product_form(&fields, None),
            ))
            .await
            .unwrap();
    }

    let products = list_products(&app).await;
    assert_eq!(products.len(), 3);
    let middle_id = products[1]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/products/{middle_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products = list_products(&app).await;
    assert_eq!(products.len(), 2);

    let ids: Vec<i64> = products
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert!(!ids.contains(&middle_id));
    assert!(ids.windows(2).all(|w| w[0] > w[1]), "not descending: {ids:?}");
}

#[tokio::test]
async fn test_change_password_with_wrong_old_password_leaves_it_unchanged() {
    let app = spawn_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            &serde_json::json!({"username": "erin", "password": "old-pw"}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/change-password",
            &serde_json::json!({
                "username": "erin",
                "oldPassword": "not-the-old-pw",
                "newPassword": "new-pw"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The failed attempt performed no mutation.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            &serde_json::json!({"username": "erin", "password": "old-pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/change-password",
            &serde_json::json!({
                "username": "erin",
                "oldPassword": "old-pw",
                "newPassword": "new-pw"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "password updated");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            &serde_json::json!({"username": "erin", "password": "new-pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/login",
            &serde_json::json!({"username": "erin", "password": "old-pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blank_product_fields_are_stored_as_is() {
    let app = spawn_app().await;

    // Only a brand; everything else is absent from the form.
    let response = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/api/products",
            product_form(&[("brand", "Solo"), ("stock", "not-a-number")], None),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let products = list_products(&app).await;
    assert_eq!(products[0]["brand"], "Solo");
    assert_eq!(products[0]["name"], "");
    assert_eq!(products[0]["tar"], "");
    assert_eq!(products[0]["stock"], 0);
}
