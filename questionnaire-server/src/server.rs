use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

/// Build the HTTP router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        // Survey flow
        .route("/start-survey", post(routes::start_survey))
        .route("/next-question/{session_id}", get(routes::next_question))
        .route("/submit-answer", post(routes::submit_answer))
        .route(
            "/sessions/{session_id}",
            get(routes::session_summary).delete(routes::end_session),
        )
        // Analytics
        .route("/analytics/response-counts", get(routes::response_counts))
        .route("/analytics/completion-stats", get(routes::completion_stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on `bind` until `shutdown` resolves.
pub async fn serve<F>(bind: &str, state: Arc<AppState>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);

    let listener = TcpListener::bind(bind).await?;
    info!(bind = %bind, "Questionnaire API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Questionnaire API shut down");
    Ok(())
}
