use actix_web::{post, web, HttpResponse};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use super::super::models::CallbackNotification;
use super::super::services::CallbackValidator;
use crate::core::{AppError, GatewayData, ResponseEnvelope, Result};

/// Order fulfillment hook run after a callback is authenticated
///
/// An error becomes a 500 response, which makes the gateway resend the callback.
#[async_trait]
pub trait CallbackHandler: Send + Sync {
    async fn on_verified(
        &self,
        notification: &CallbackNotification,
        fields: &GatewayData,
    ) -> anyhow::Result<()>;
}

/// Shared state for the callback endpoint
pub struct CallbackController {
    validator: CallbackValidator,
    handler: Option<Arc<dyn CallbackHandler>>,
}

impl CallbackController {
    pub fn new(validator: CallbackValidator, handler: Option<Arc<dyn CallbackHandler>>) -> Self {
        Self { validator, handler }
    }

    /// Configure callback routes
    ///
    /// Mounts `POST /duitku/callback`.
    pub fn configure(
        cfg: &mut web::ServiceConfig,
        validator: CallbackValidator,
        handler: Option<Arc<dyn CallbackHandler>>,
    ) {
        let controller = web::Data::new(Self::new(validator, handler));

        cfg.service(
            web::scope("/duitku")
                .app_data(controller)
                .service(receive_callback),
        );
    }
}

/// Receive a payment-status callback
///
/// POST /duitku/callback
///
/// # Request Body
/// * Form-urlencoded (as sent by the gateway) or a flat JSON object
///
/// # Returns
/// * `200 OK` - Signature verified, fields echoed back in the envelope
/// * `400 Bad Request` - Required fields missing
/// * `401 Unauthorized` - Signature mismatch
/// * `500 Internal Server Error` - Fulfillment hook failed
#[post("/callback")]
async fn receive_callback(
    body: web::Bytes,
    controller: web::Data<CallbackController>,
) -> Result<HttpResponse> {
    let fields = controller.validator.handle_callback(&body)?;

    if let Some(handler) = &controller.handler {
        let notification = CallbackNotification::from_fields(&fields)?;

        handler
            .on_verified(&notification, &fields)
            .await
            .map_err(|e| {
                error!(
                    merchant_order_id = %notification.merchant_order_id,
                    error = %e,
                    "Callback handler failed"
                );
                AppError::internal(
                    "Callback processing failed",
                    Some(json!({ "error": format!("{:#}", e) })),
                )
            })?;
    }

    Ok(HttpResponse::Ok().json(ResponseEnvelope::success(fields)))
}
