use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use orthocheck_db_memory::{InMemoryCategories, InMemorySpellChecks};
use orthocheck_storage::{DynCategories, DynSpellChecks};

use crate::cache::{CacheStore, TypedCache};
use crate::dictionary::{DictionaryLookup, HttpDictionary};
use crate::middleware::RequestCounter;
use crate::orchestrator::SpellCheckOrchestrator;
use crate::service::{CategoryService, SpellCheckService};
use crate::{config::AppConfig, handlers, middleware as app_middleware};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: SpellCheckOrchestrator,
    pub categories: CategoryService,
    pub spell_checks: SpellCheckService,
    pub counter: Arc<RequestCounter>,
}

impl AppState {
    /// Wires the full object graph over the given dictionary client.
    ///
    /// One cache store backs both services and the orchestrator; the key
    /// prefixes are the only namespacing between them.
    pub fn new(dictionary: Arc<dyn DictionaryLookup>, cfg: &AppConfig) -> Self {
        let cache = TypedCache::new(CacheStore::new());
        let category_repo: DynCategories = Arc::new(InMemoryCategories::new());
        let spell_check_repo: DynSpellChecks = Arc::new(InMemorySpellChecks::new());

        let categories = CategoryService::new(
            category_repo,
            cache.clone(),
            cfg.spell_check.default_category.clone(),
        );
        let spell_checks =
            SpellCheckService::new(spell_check_repo, cache.clone(), categories.clone());
        let orchestrator = SpellCheckOrchestrator::new(
            dictionary,
            cache,
            categories.clone(),
            spell_checks.clone(),
        );

        Self {
            orchestrator,
            categories,
            spell_checks,
            counter: Arc::new(RequestCounter::new()),
        }
    }

    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let dictionary = Arc::new(HttpDictionary::new(&cfg.dictionary)?);
        Ok(Self::new(dictionary, cfg))
    }
}

pub struct OrthocheckServer {
    addr: SocketAddr,
    app: Router,
}

pub fn build_app(state: AppState, cfg: &AppConfig) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    let counter = state.counter.clone();
    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/counter", get(handlers::counter))
        // Spelling checks
        .route("/check", get(handlers::check_text))
        .route("/check/bulk", post(handlers::check_bulk))
        // Categories
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/categories/{id}/spell-checks",
            get(handlers::category_spell_checks),
        )
        .route(
            "/categories/{id}/status",
            put(handlers::update_category_status).delete(handlers::clear_category_status),
        )
        // Spell-check records and their category associations
        .route(
            "/spell-checks",
            get(handlers::list_spell_checks).post(handlers::create_spell_check),
        )
        .route(
            "/spell-checks/{id}",
            get(handlers::get_spell_check)
                .put(handlers::update_spell_check)
                .delete(handlers::delete_spell_check),
        )
        .route(
            "/spell-checks/{id}/categories/{category_id}",
            post(handlers::attach_category).delete(handlers::detach_category),
        )
        .with_state(state)
        // Middleware stack (request flow: request id -> counter/metrics -> trace -> compression -> cors)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    let req_id = req
                        .extensions()
                        .get::<axum::http::HeaderValue>()
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %method,
                        http.target = %uri,
                        http.route = Empty,
                        http.status_code = Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            &tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        // Applied outside the trace layer so the span sees the request id
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(app_middleware::request_id))
                .layer(middleware::from_fn_with_state(
                    counter,
                    app_middleware::track_requests,
                )),
        )
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    pub fn build(self) -> anyhow::Result<OrthocheckServer> {
        let state = AppState::from_config(&self.config)?;
        let app = build_app(state, &self.config);

        Ok(OrthocheckServer {
            addr: self.addr,
            app,
        })
    }
}

impl OrthocheckServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
