// Callback receiver integration tests
//
// Exercises POST /duitku/callback through the actix-web service:
// - authentic callbacks are echoed back with 200
// - tampered signatures get 401, missing fields get 400
// - the fulfillment hook sees verified notifications only
// - a failing hook turns into a 500 envelope

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{test, App};
use async_trait::async_trait;
use duitku::callbacks::CallbackController;
use duitku::modules::health;
use duitku::{
    CallbackHandler, CallbackNotification, CallbackValidator, Environment, GatewayData,
    PaymentOutcome,
};
use helpers::*;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingHandler {
    seen: Mutex<Vec<CallbackNotification>>,
}

#[async_trait]
impl CallbackHandler for RecordingHandler {
    async fn on_verified(
        &self,
        notification: &CallbackNotification,
        _fields: &GatewayData,
    ) -> anyhow::Result<()> {
        self.seen.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

struct FailingHandler;

#[async_trait]
impl CallbackHandler for FailingHandler {
    async fn on_verified(
        &self,
        _notification: &CallbackNotification,
        _fields: &GatewayData,
    ) -> anyhow::Result<()> {
        anyhow::bail!("order store unavailable")
    }
}

fn validator() -> CallbackValidator {
    CallbackValidator::new(TEST_MERCHANT_KEY, TEST_MERCHANT_CODE)
}

async fn post_callback(
    handler: Option<Arc<dyn CallbackHandler>>,
    content_type: &str,
    body: String,
) -> (u16, Value) {
    let app = test::init_service(
        App::new().configure(|cfg| CallbackController::configure(cfg, validator(), handler)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/duitku/callback")
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();

    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn test_valid_callback_echoes_fields() {
    let signature = TestDataFactory::callback_signature("50000", "ORDER1");
    let body = TestDataFactory::callback_form("50000", "ORDER1", &signature);

    let (status, envelope) =
        post_callback(None, "application/x-www-form-urlencoded", body).await;

    assert_eq!(status, 200);
    assert_eq!(envelope["status"], "success");
    assert_eq!(
        envelope["data"],
        json!({
            "merchantCode": "D1234",
            "amount": "50000",
            "merchantOrderId": "ORDER1",
            "productDetail": "Test product",
            "paymentCode": "VC",
            "resultCode": "00",
            "reference": "D1234REF",
            "signature": signature
        })
    );
}

#[actix_web::test]
async fn test_json_callback_is_accepted() {
    let body = json!({
        "merchantCode": "D1234",
        "amount": "50000",
        "merchantOrderId": "ORDER1",
        "signature": TestDataFactory::callback_signature("50000", "ORDER1")
    });

    let (status, envelope) = post_callback(None, "application/json", body.to_string()).await;

    assert_eq!(status, 200);
    assert_eq!(envelope["data"], body);
}

#[actix_web::test]
async fn test_tampered_signature_is_unauthorized() {
    let mut signature = TestDataFactory::callback_signature("50000", "ORDER1");
    let last = if signature.ends_with('0') { "1" } else { "0" };
    signature.replace_range(signature.len() - 1.., last);
    let body = TestDataFactory::callback_form("50000", "ORDER1", &signature);

    let handler = Arc::new(RecordingHandler::default());
    let (status, envelope) = post_callback(
        Some(handler.clone() as Arc<dyn CallbackHandler>),
        "application/x-www-form-urlencoded",
        body,
    )
    .await;

    assert_eq!(status, 401);
    assert_eq!(envelope["status"], "error");
    assert!(handler.seen.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_amount_changed_after_signing_is_unauthorized() {
    let signature = TestDataFactory::callback_signature("50000", "ORDER1");
    let body = TestDataFactory::callback_form("5000000", "ORDER1", &signature);

    let (status, _) = post_callback(None, "application/x-www-form-urlencoded", body).await;
    assert_eq!(status, 401);
}

#[actix_web::test]
async fn test_missing_amount_is_bad_request() {
    let body = format!(
        "merchantCode=D1234&merchantOrderId=ORDER1&signature={}",
        TestDataFactory::callback_signature("50000", "ORDER1")
    );

    let (status, envelope) =
        post_callback(None, "application/x-www-form-urlencoded", body).await;

    assert_eq!(status, 400);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["details"]["missing"], json!(["amount"]));
}

#[actix_web::test]
async fn test_handler_receives_verified_notification() {
    let signature = TestDataFactory::callback_signature("75000", "ORDER2");
    let body = TestDataFactory::callback_form("75000", "ORDER2", &signature);

    let handler = Arc::new(RecordingHandler::default());
    let (status, _) = post_callback(
        Some(handler.clone() as Arc<dyn CallbackHandler>),
        "application/x-www-form-urlencoded",
        body,
    )
    .await;

    assert_eq!(status, 200);
    let seen = handler.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].merchant_order_id, "ORDER2");
    assert_eq!(seen[0].amount, "75000");
    assert_eq!(seen[0].outcome(), PaymentOutcome::Success);
}

#[actix_web::test]
async fn test_failing_handler_is_internal_error() {
    let signature = TestDataFactory::callback_signature("50000", "ORDER1");
    let body = TestDataFactory::callback_form("50000", "ORDER1", &signature);

    let (status, envelope) = post_callback(
        Some(Arc::new(FailingHandler) as Arc<dyn CallbackHandler>),
        "application/x-www-form-urlencoded",
        body,
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["message"], "Callback processing failed");
    assert_eq!(envelope["details"]["error"], "order store unavailable");
}

#[actix_web::test]
async fn test_health_alongside_callback_routes() {
    let app = test::init_service(
        App::new()
            .configure(|cfg| health::configure(cfg, Environment::Sandbox))
            .configure(|cfg| CallbackController::configure(cfg, validator(), None)),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["gateway_environment"], "sandbox");
}
