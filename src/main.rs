use actix_web::{App, HttpServer};
use anyhow::Context;
use duitku::callbacks::{CallbackController, CallbackValidator};
use duitku::config::Config;
use duitku::modules::health;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.app.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate().context("Configuration validation failed")?;

    let environment = config.duitku.environment();
    let validator = CallbackValidator::from_config(&config.duitku);

    tracing::info!("Starting Duitku callback receiver");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Gateway environment: {}", environment);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let validator = validator.clone();
        App::new()
            .wrap(TracingLogger::default())
            .configure(|cfg| health::configure(cfg, environment))
            .configure(|cfg| CallbackController::configure(cfg, validator, None))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}
