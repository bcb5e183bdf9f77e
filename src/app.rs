use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::header,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::error::AppError;
use crate::exporter::{self, REPORT_FILENAME, XLSX_CONTENT_TYPE};
use crate::repository::UserStore;
use crate::shell;
use crate::ui::{self, Component};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    store: UserStore,
    shell: Arc<str>,
}

impl AppState {
    /// # Arguments
    /// * `store` - Users to serve
    /// * `shell` - Pre-rendered HTML shell
    pub fn new(store: UserStore, shell: String) -> Self {
        AppState {
            store,
            shell: shell.into(),
        }
    }
}

/// Build the router with all routes and middleware
///
/// The HTML shell is the fallback, so it answers every path the API and the
/// export route do not match.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/", get(users_table))
        .route("/api/user/:user_id/", get(user_profile))
        .route("/excel", get(export_excel))
        .fallback(html_landing)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(log_requests))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Start the web server and serve until it fails
///
/// # Arguments
/// * `config` - Listen address and page title
/// * `store` - Users to serve
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Error if binding or serving fails
pub async fn run(config: &Config, store: UserStore) -> Result<(), Box<dyn std::error::Error>> {
    let shell = shell::render_shell(&config.title)?;
    let app = router(AppState::new(store, shell));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reload the users file every time the process receives SIGHUP
///
/// A failed reload is logged and the previous data stays in place.
#[cfg(unix)]
pub async fn reload_on_hangup(store: UserStore, path: std::path::PathBuf) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangups = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            error!("Cannot listen for SIGHUP, reload disabled: {}", e);
            return;
        }
    };

    while hangups.recv().await.is_some() {
        if let Err(e) = store.reload_from_file(&path) {
            error!("Reload of {} failed: {}", path.display(), e);
        }
    }
}

async fn users_table(State(state): State<AppState>) -> Json<Vec<Component>> {
    Json(ui::users_page(&state.store.all()))
}

async fn user_profile(
    Path(user_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Component>>, AppError> {
    let user = state.store.get(user_id).ok_or(AppError::NotFound("User"))?;
    Ok(Json(ui::user_profile_page(&user)))
}

async fn export_excel(State(state): State<AppState>) -> Result<Response, AppError> {
    let users = state.store.all();
    let buffer = exporter::export_rows(&users[..])?;
    info!("Exported {} users ({} bytes)", users.len(), buffer.len());

    let disposition = format!("attachment; filename=\"{}\"", REPORT_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    )
        .into_response())
}

async fn html_landing(State(state): State<AppState>) -> Html<String> {
    Html(state.shell.to_string())
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} -> {} ({:.1} ms)",
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    response
}
