//! Chapter Credits API server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chapter_credits::adapters::billing::{
    BillingClient, BillingClientConfig, HttpCheckoutProvider, HttpCreditsReader,
};
use chapter_credits::adapters::http::{api_router, with_layers, CheckoutRedirects, PurchaseAppState};
use chapter_credits::adapters::{JwtSessionValidator, JwtValidatorConfig};
use chapter_credits::application::CheckoutPolicy;
use chapter_credits::config::{AppConfig, ServerConfig};
use chapter_credits::domain::pricing::CreditCalculator;

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.clone()));

    if server.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let table = config.pricing.price_table()?;
    tracing::info!(
        max_chapters = table.max_chapters(),
        unit_price = %table.unit_price(),
        currency = %config.pricing.currency,
        "Price table loaded"
    );
    let calculator = CreditCalculator::new(table);

    let billing = BillingClient::new(BillingClientConfig {
        api_base_url: config.billing.api_base_url.clone(),
        service_token: config.billing.service_token.clone(),
        timeout: config.billing.timeout(),
    })?;

    let state = PurchaseAppState {
        calculator,
        credits_reader: Arc::new(HttpCreditsReader::new(billing.clone())),
        checkout_provider: Arc::new(HttpCheckoutProvider::new(billing)),
        currency: config.pricing.currency.clone(),
        checkout_policy: CheckoutPolicy {
            timeout: config.billing.timeout(),
            max_retries: config.billing.max_retries,
        },
        redirects: CheckoutRedirects::new(
            config.billing.success_url.clone(),
            config.billing.cancel_url.clone(),
        ),
    };

    let validator = Arc::new(JwtSessionValidator::new(&JwtValidatorConfig {
        secret: config.auth.jwt_secret.clone(),
        issuer: config.auth.issuer.clone(),
        audience: config.auth.audience.clone(),
    }));

    let app = with_layers(
        api_router(state, validator),
        config.server.request_timeout(),
        &config.server.allowed_origins(),
    );

    let addr = config.server.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "Chapter credits API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
