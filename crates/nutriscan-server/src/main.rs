mod api;
mod flow;
mod middleware;
mod scan_gate;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::middleware::JwtKeys;
use crate::scan_gate::ScanGate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = nutriscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = nutriscan_db::PoolConfig::from_app_config(&config);
    let pool = nutriscan_db::connect_pool(&config.database_url, pool_config).await?;
    nutriscan_db::run_migrations(&pool).await?;

    // Definitions are immutable for the process lifetime; a fresh set is
    // picked up on restart.
    let challenges = nutriscan_db::list_challenge_definitions(&pool).await?;
    tracing::info!(count = challenges.len(), "loaded weekly challenge definitions");

    let openfood = Arc::new(nutriscan_openfood::OpenFoodClient::with_base_url(
        config.openfood_timeout_secs,
        &config.openfood_user_agent,
        &config.openfood_base_url,
    )?);

    let advisor = match &config.advisor_api_key {
        Some(api_key) => Some(Arc::new(nutriscan_advisor::AdvisorClient::with_base_url(
            api_key,
            &config.advisor_model,
            config.advisor_timeout_secs,
            &config.advisor_base_url,
        )?)),
        None => {
            tracing::warn!("NUTRISCAN_ADVISOR_API_KEY not set; AI assessments disabled");
            None
        }
    };

    let state = AppState {
        pool,
        challenges: Arc::new(challenges),
        openfood,
        advisor,
        jwt: JwtKeys::new(&config.jwt_secret),
        scan_gate: ScanGate::new(),
        notifications: Arc::new(nutriscan_core::NotificationSequence::new()),
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
