mod config;
mod csv_import;
mod db;
mod dispatch;
mod error;
mod form;
mod models;
mod notify;
mod phone;
mod referral;
mod routes;
mod slug;
mod store;

use std::sync::Arc;

use crate::{
    config::Config,
    models::AppState,
    notify::{HttpNotifier, LogNotifier, Notifier},
    store::PgInviteStore,
};

use axum::extract::DefaultBodyLimit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use axum::http::header;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cfg = Config::from_env()?;
    let pool = db::connect_pg(&cfg.database_url).await?;

    let notifier: Arc<dyn Notifier> = match &cfg.sms_gateway_url {
        Some(url) => {
            tracing::info!("sending invite texts through {url}");
            Arc::new(HttpNotifier::new(url.clone()))
        }
        None => {
            tracing::info!("SMS_GATEWAY_URL not set, invite texts are only logged");
            Arc::new(LogNotifier)
        }
    };

    let state = AppState {
        store: Arc::new(PgInviteStore::new(pool)),
        notifier,
        public_base_url: cfg.public_base_url.clone(),
    };

    // The invite page is served from another origin during development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::router(state)
        .layer(DefaultBodyLimit::max(cfg.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on http://{}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
