use std::net::SocketAddr;
use std::sync::Arc;

use tessera_api::{
    app,
    state::{AppState, CheckoutConfig},
};
use tessera_payments::StripeGateway;
use tessera_store::{DbClient, PgEventRepository, PgOrderRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tessera_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = tessera_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Tessera API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let orders = Arc::new(PgOrderRepository::new(db.pool.clone()));
    let events = Arc::new(PgEventRepository::new(db.pool.clone()));
    let gateway = Arc::new(StripeGateway::new(config.stripe.secret_key.clone()));

    let app_state = AppState::new(
        orders,
        events,
        gateway,
        CheckoutConfig {
            currency: config.stripe.currency.clone(),
            base_url: config.app.base_url.clone(),
        },
        config.stripe.webhook_secret.clone(),
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
