//! HTTP round trips against the full router with in-memory collaborators.

use argon2::Params;
use async_trait::async_trait;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use gym_api::config::JwtConfig;
use gym_api::security::{Argon2PasswordEncoder, JwtTokenIssuer};
use gym_api::{create_router, AppConfig, AppState, Components, UploadStore};
use gym_core::{
    CheckoutSession, InMemorySupplementRepository, InMemoryUserRepository, PaymentError,
    PaymentGateway, PaymentResult, SessionRequest,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

struct FakeGateway {
    fail_with: Option<String>,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_session(&self, request: &SessionRequest) -> PaymentResult<CheckoutSession> {
        match &self.fail_with {
            Some(message) => Err(PaymentError::Provider {
                provider: "fake".to_string(),
                message: message.clone(),
            }),
            None => Ok(CheckoutSession::new(
                format!("cs_test_{}", request.line_items.len()),
                "https://checkout.example.com/pay",
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

fn server_with(gateway: FakeGateway, uploads: UploadStore) -> TestServer {
    let config = AppConfig::default();
    let components = Components {
        gateway: Arc::new(gateway),
        supplements: Arc::new(InMemorySupplementRepository::new()),
        users: Arc::new(InMemoryUserRepository::new()),
        encoder: Arc::new(Argon2PasswordEncoder::with_params(
            Params::new(8, 1, 1, None).unwrap(),
        )),
        tokens: Arc::new(JwtTokenIssuer::new(&JwtConfig::new(
            "integration-secret",
            Duration::from_secs(3600),
        ))),
        uploads,
    };

    TestServer::new(create_router(AppState::from_components(config, components))).unwrap()
}

fn server() -> TestServer {
    server_with(FakeGateway { fail_with: None }, UploadStore::in_memory())
}

fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

async fn register(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": email, "password": password, "firstName": "Ann" }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health() {
    let response = server().get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_register_twice_conflicts() {
    let server = server();
    register(&server, "ann@example.com", "hunter22").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "ann@example.com", "password": "other" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Email is already taken!");
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn test_login_and_profile() {
    let server = server();
    register(&server, "ann@example.com", "hunter22").await;

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ann@example.com", "password": "hunter22" }))
        .await;
    login.assert_status_ok();
    let body = login.json::<Value>();
    assert_eq!(body["email"], "ann@example.com");
    assert_eq!(body["firstName"], "Ann");
    let token = body["token"].as_str().unwrap().to_string();

    let (name, value) = bearer(&token);
    let profile = server.get("/api/auth/profile").add_header(name, value).await;
    profile.assert_status_ok();
    let profile = profile.json::<Value>();
    assert_eq!(profile["email"], "ann@example.com");
    assert!(profile.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let server = server();
    register(&server, "ann@example.com", "hunter22").await;

    server
        .post("/api/auth/login")
        .json(&json!({ "email": "ann@example.com", "password": "wrong" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_requires_bearer_token() {
    let server = server();
    server
        .get("/api/auth/profile")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = bearer("not-a-jwt");
    server
        .get("/api/auth/profile")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile_applies_provided_fields() {
    let server = server();
    let token = register(&server, "ann@example.com", "hunter22").await;

    let (name, value) = bearer(&token);
    let response = server
        .put("/api/auth/profile")
        .add_header(name, value)
        .json(&json!({ "age": 31, "fitnessGoal": "strength" }))
        .await;

    response.assert_status_ok();
    let profile = response.json::<Value>();
    assert_eq!(profile["firstName"], "Ann");
    assert_eq!(profile["age"], 31);
    assert_eq!(profile["fitnessGoal"], "strength");
}

#[tokio::test]
async fn test_change_password() {
    let server = server();
    let token = register(&server, "ann@example.com", "hunter22").await;

    let (name, value) = bearer(&token);
    server
        .post("/api/auth/change-password")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "currentPassword": "wrong", "newPassword": "s3cret" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/auth/change-password")
        .add_header(name, value)
        .json(&json!({ "currentPassword": "hunter22", "newPassword": "s3cret" }))
        .await;
    response.assert_status_ok();
    response.assert_text("Password changed successfully");

    server
        .post("/api/auth/login")
        .json(&json!({ "email": "ann@example.com", "password": "s3cret" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_delete_account() {
    let server = server();
    let token = register(&server, "ann@example.com", "hunter22").await;

    let (name, value) = bearer(&token);
    let response = server
        .delete("/api/auth/delete-account")
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status_ok();
    response.assert_text("Account deleted successfully");

    server
        .post("/api/auth/login")
        .json(&json!({ "email": "ann@example.com", "password": "hunter22" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/api/auth/profile")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Supplements
// =============================================================================

async fn create_supplement(server: &TestServer, name: &str, category: &str) -> i64 {
    let response = server
        .post("/api/supplements")
        .json(&json!({
            "name": name,
            "price": "29.99",
            "category": category,
            "brand": "Acme"
        }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_supplement_crud() {
    let server = server();
    let id = create_supplement(&server, "Whey", "protein").await;

    let fetched = server.get(&format!("/api/supplements/{id}")).await;
    fetched.assert_status_ok();
    let body = fetched.json::<Value>();
    assert_eq!(body["name"], "Whey");
    assert_eq!(body["price"], "29.99");
    assert_eq!(body["isAvailable"], true);

    let updated = server
        .put(&format!("/api/supplements/{id}"))
        .json(&json!({ "name": "Whey Isolate", "price": "34.50", "category": "protein" }))
        .await;
    updated.assert_status_ok();
    let body = updated.json::<Value>();
    assert_eq!(body["name"], "Whey Isolate");
    assert_eq!(body["price"], "34.50");
    assert!(body["brand"].is_null());

    server
        .get("/api/supplements/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_supplement_price_with_sub_cent_precision_is_rejected() {
    let server = server();

    let response = server
        .post("/api/supplements")
        .json(&json!({ "name": "Whey", "price": "19.999", "category": "protein" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], 400);

    let listed = server.get("/api/supplements").await.json::<Vec<Value>>();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_soft_delete_twice() {
    let server = server();
    let keep = create_supplement(&server, "Creatine", "strength").await;
    let gone = create_supplement(&server, "Pre-workout", "strength").await;

    for _ in 0..2 {
        server
            .delete(&format!("/api/supplements/{gone}"))
            .await
            .assert_status_ok();
    }

    let listed = server.get("/api/supplements").await.json::<Vec<Value>>();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], keep);

    // Category listing does not filter on availability.
    let category = server
        .get("/api/supplements/category/strength")
        .await
        .json::<Vec<Value>>();
    assert_eq!(category.len(), 2);

    let deleted = server.get(&format!("/api/supplements/{gone}")).await;
    assert_eq!(deleted.json::<Value>()["isAvailable"], false);

    server
        .delete("/api/supplements/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_cart_success() {
    let response = server()
        .post("/product/v1/checkoutCart")
        .json(&json!({
            "products": [
                { "priceReference": "price_a", "quantity": 2 },
                { "priceId": "price_b", "quantity": 1 }
            ]
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "Success");
    assert_eq!(body["message"], "Payment session is created successfully");
    assert_eq!(body["sessionId"], "cs_test_2");
    assert_eq!(body["sessionUrl"], "https://checkout.example.com/pay");
}

#[tokio::test]
async fn test_checkout_single_success() {
    let response = server()
        .post("/product/v1/checkout")
        .json(&json!({ "priceReference": "price_a", "quantity": 1 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["sessionId"], "cs_test_1");
}

#[tokio::test]
async fn test_checkout_rejections_are_bad_requests() {
    let server = server();

    let empty = server
        .post("/product/v1/checkoutCart")
        .json(&json!({ "products": [] }))
        .await;
    empty.assert_status(StatusCode::BAD_REQUEST);
    let body = empty.json::<Value>();
    assert_eq!(body["status"], "Failed");
    assert_eq!(body["message"], "Cart is empty");
    assert!(body.get("sessionId").is_none());
    assert!(body.get("sessionUrl").is_none());

    let null_products = server
        .post("/product/v1/checkoutCart")
        .json(&json!({ "products": null }))
        .await;
    null_products.assert_status(StatusCode::BAD_REQUEST);
    let body = null_products.json::<Value>();
    assert_eq!(body["status"], "Failed");
    assert_eq!(body["message"], "Cart is empty");

    let missing_price = server
        .post("/product/v1/checkoutCart")
        .json(&json!({ "products": [{ "priceReference": "", "quantity": 1 }] }))
        .await;
    missing_price.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        missing_price.json::<Value>()["message"],
        "Missing price reference for one or more items"
    );

    server
        .post("/product/v1/checkout")
        .json(&json!({ "priceReference": "price_a", "quantity": 0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_provider_failure_is_bad_gateway() {
    let server = server_with(
        FakeGateway {
            fail_with: Some("No such price: 'price_gone'".to_string()),
        },
        UploadStore::in_memory(),
    );

    let response = server
        .post("/product/v1/checkoutCart")
        .json(&json!({ "products": [{ "priceReference": "price_gone", "quantity": 1 }] }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "Failed");
    assert_eq!(
        body["message"],
        "Failed to create payment session: No such price: 'price_gone'"
    );
}

#[tokio::test]
async fn test_checkout_success_page() {
    let response = server().get("/product/v1/success").await;
    response.assert_status_ok();
    response.assert_text("Payment succeeded! Thank you for your purchase.");
}

// =============================================================================
// Uploads
// =============================================================================

#[tokio::test]
async fn test_upload_file() {
    let uploads = UploadStore::in_memory();
    let server = server_with(FakeGateway { fail_with: None }, uploads.clone());

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"fake-png".as_slice())
            .file_name("whey.png")
            .mime_type("image/png"),
    );
    let response = server.post("/api/s3/upload").multipart(form).await;

    response.assert_status_ok();
    response.assert_text("File uploaded to S3: uploads/whey.png");
    assert_eq!(
        uploads.get("uploads/whey.png").await.unwrap().as_ref(),
        b"fake-png"
    );
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let form = MultipartForm::new().add_text("note", "no file here");
    server()
        .post("/api/s3/upload")
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
