use super::action::{ActionForm, ActionHandler, ActionResponse};
use crate::config::Config;
use crate::core::history::{self, HistoryRow};
use crate::core::stats::{self, MealStats};
use crate::core::status::MealStatus;
use crate::errors::{AppError, AppResult};
use axum::{
    Form, Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct AppState {
    pub handler: ActionHandler,
    pub stats_window: usize,
    pub history_limit: usize,
}

impl AppState {
    pub fn new(handler: ActionHandler, cfg: &Config) -> Arc<Self> {
        Arc::new(Self {
            handler,
            stats_window: cfg.stats_window,
            history_limit: cfg.history_limit,
        })
    }
}

#[derive(Serialize)]
pub struct StatsReply {
    #[serde(flatten)]
    pub stats: MealStats,
    pub formatted: BTreeMap<&'static str, String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(action_form))
        .route("/api/action", post(action_json))
        .route("/api/meals", get(meals))
        .route("/api/stats", get(stats_handler))
        .route("/api/status", get(status))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `listen` and serve until Ctrl+C / SIGTERM.
pub async fn serve(cfg: &Config, listen: &str) -> AppResult<()> {
    let handler = ActionHandler::from_config(cfg);
    info!(log = %handler.store().path().display(), "using meal log");
    let state = AppState::new(handler, cfg);

    let listener = TcpListener::bind(listen).await?;
    info!("Server running on {listen}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Run a blocking store operation off the async executor.
async fn blocking<T, F>(state: Arc<AppState>, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(state.as_ref()))
        .await
        .map_err(|e| AppError::Other(format!("worker task failed: {e}")))?
}

async fn action_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ActionForm>,
) -> AppResult<Json<ActionResponse>> {
    blocking(state, move |s| Ok(s.handler.dispatch_form(form)))
        .await
        .map(Json)
}

async fn action_json(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ActionForm>,
) -> AppResult<Json<ActionResponse>> {
    blocking(state, move |s| Ok(s.handler.dispatch_form(form)))
        .await
        .map(Json)
}

async fn meals(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<HistoryRow>>> {
    blocking(state, |s| {
        let records = s
            .handler
            .store()
            .read_newest_first()
            .map_err(AppError::reading)?;
        Ok(history::build_rows(&records, s.history_limit))
    })
    .await
    .map(Json)
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<StatsReply>> {
    blocking(state, |s| {
        let records = s
            .handler
            .store()
            .read_newest_first()
            .map_err(AppError::reading)?;
        let stats = stats::compute(&records, s.stats_window);
        Ok(StatsReply {
            formatted: stats.formatted().into_iter().collect(),
            stats,
        })
    })
    .await
    .map(Json)
}

async fn status(State(state): State<Arc<AppState>>) -> AppResult<Json<MealStatus>> {
    blocking(state, |s| {
        let records = s
            .handler
            .store()
            .read_newest_first()
            .map_err(AppError::reading)?;
        Ok(MealStatus::from_latest(
            records.first(),
            s.handler.clock().now(),
        ))
    })
    .await
    .map(Json)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
