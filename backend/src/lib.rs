use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;

pub mod handlers {
    pub mod client_ip;
    pub mod contact_handlers;
}

pub mod utils {
    pub mod notifier;
}

use config::ServerConfig;
use handlers::contact_handlers;
use utils::notifier::ContactNotifier;

pub type ContactLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// How often idle entries are dropped from the contact limiter.
pub const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(10 * 60);

pub struct AppState {
    pub notifier: Arc<dyn ContactNotifier>,
    pub contact_limiter: ContactLimiter,
    pub delivery_timeout: Duration,
    pub trust_proxy: bool,
}

impl AppState {
    pub fn new(notifier: Arc<dyn ContactNotifier>, config: &ServerConfig) -> Self {
        // five requests per client per hour
        Self::with_quota(notifier, config, Quota::per_hour(nonzero!(5u32)))
    }

    pub fn with_quota(notifier: Arc<dyn ContactNotifier>, config: &ServerConfig, quota: Quota) -> Self {
        Self {
            notifier,
            contact_limiter: RateLimiter::keyed(quota),
            delivery_timeout: config.delivery_timeout,
            trust_proxy: config.trust_proxy,
        }
    }

    /// Forgets clients whose quota has fully replenished. Returns how many
    /// entries remain.
    pub fn prune_contact_limiter(&self) -> usize {
        self.contact_limiter.retain_recent();
        self.contact_limiter.shrink_to_fit();
        self.contact_limiter.len()
    }
}

/// Prunes the contact limiter on a fixed interval for the life of the process.
pub fn spawn_limiter_pruning(state: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let remaining = state.prune_contact_limiter();
            tracing::debug!("Contact limiter pruned, {} client(s) tracked", remaining);
        }
    })
}

/// API routes plus the compiled frontend. Unknown paths get `index.html`
/// so the browser router can resolve `/:locale` and the 404 page.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(contact_handlers::health))
        .route("/api/contact", post(contact_handlers::submit_contact));

    let index = config.static_dir.join("index.html");
    let static_files = ServeDir::new(&config.static_dir).not_found_service(ServeFile::new(index));

    let allow_origin = match config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            tracing::warn!("Ignoring invalid FRONTEND_URL {}: {}", config.frontend_url, e);
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    Router::new()
        .merge(api_routes)
        .fallback_service(static_files)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_origin(allow_origin)
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    axum::http::header::ACCEPT_LANGUAGE,
                    axum::http::header::ORIGIN,
                ]),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::notifier::LogNotifier;

    #[test]
    fn pruning_drops_clients_whose_quota_replenished() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        let quota = Quota::with_period(Duration::from_millis(1))
            .unwrap()
            .allow_burst(nonzero!(5u32));
        let state = AppState::with_quota(Arc::new(LogNotifier), &config, quota);

        for i in 0..1_000 {
            let _ = state.contact_limiter.check_key(&format!("client-{}", i));
        }
        assert_eq!(state.contact_limiter.len(), 1_000);

        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(state.prune_contact_limiter(), 0);
    }

    #[test]
    fn pruning_keeps_clients_still_inside_their_window() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        let state = AppState::new(Arc::new(LogNotifier), &config);

        assert!(state.contact_limiter.check_key(&"198.51.100.7".to_string()).is_ok());
        assert_eq!(state.prune_contact_limiter(), 1);
    }
}
