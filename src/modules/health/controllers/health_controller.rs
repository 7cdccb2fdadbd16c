use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::gateway::Environment;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub gateway_environment: Environment,
}

/// GET /health - Liveness probe
///
/// Does not contact the gateway.
pub async fn health_check(environment: web::Data<Environment>) -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        gateway_environment: *environment.get_ref(),
    };

    HttpResponse::Ok().json(response)
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig, environment: Environment) {
    cfg.app_data(web::Data::new(environment))
        .route("/health", web::get().to(health_check));
}
