use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use tokio::{sync::broadcast, task::JoinHandle};
use tower_http::trace::TraceLayer;
use weekmenu_navigation::{AuthEvent, NavigationOutcome, NavigationRequest, Navigator};

use crate::{auth::AUTH_COOKIE_NAME, view::ViewDescriptor};

#[derive(Clone)]
pub struct AppState {
    pub navigator: Navigator,
}

/// Every path except `/health` is handed to the navigator.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(navigate)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

async fn navigate(State(state): State<AppState>, jar: CookieJar, uri: Uri) -> Response {
    let mut request = NavigationRequest::new(uri.path());
    if let Some(cookie) = jar.get(AUTH_COOKIE_NAME) {
        request = request.with_credential(cookie.value());
    }

    match state.navigator.navigate(&request).await {
        NavigationOutcome::Proceed(route) => ViewDescriptor::from(route).into_response(),
        NavigationOutcome::RedirectTo(path) => Redirect::to(&path).into_response(),
        NavigationOutcome::Reject(reason) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": reason.to_string() })),
        )
            .into_response(),
    }
}

/// Logs auth state changes until the provider goes away. Nothing is cached.
pub fn log_auth_events(mut events: broadcast::Receiver<AuthEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::info!(event = %event, "Auth event"),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Auth event subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
