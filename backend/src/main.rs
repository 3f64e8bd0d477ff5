use dotenvy::dotenv;
use emyux_backend::config::ServerConfig;
use emyux_backend::utils::notifier::{ContactNotifier, LogNotifier, SmtpNotifier};
use emyux_backend::{build_router, spawn_limiter_pruning, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = ServerConfig::from_env()?;

    let _guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(config.environment.clone().into()),
                ..Default::default()
            },
        ))
    });

    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,emyux_backend=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let notifier: Arc<dyn ContactNotifier> = match &config.smtp {
        Some(smtp) => {
            tracing::info!("Delivering contact requests to {} via {}", smtp.inbox, smtp.host);
            Arc::new(SmtpNotifier::new(smtp)?)
        }
        None => {
            tracing::warn!("SMTP_HOST not set, contact requests will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let state = Arc::new(AppState::new(notifier, &config));
    spawn_limiter_pruning(state.clone());
    if config.trust_proxy {
        tracing::info!("Trusting X-Forwarded-For for client addresses");
    }
    let app = build_router(state, &config);

    tracing::info!(
        "Starting server on port {} (static files from {})",
        config.port,
        config.static_dir.display()
    );
    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
