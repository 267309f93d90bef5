//! HTTP surface: the dashboard page, CSV upload, and a JSON API.
//!
//! Every request recomputes what it shows from the uploaded dataset and the
//! selection in its own query string.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::DashboardError;
use crate::filter::Selection;
use crate::period::Period;
use crate::render;
use crate::session::DashboardSession;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error that renders as a JSON `{"error": "..."}` response with an
/// appropriate HTTP status code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<DashboardError> for AppError {
    fn from(e: DashboardError) -> Self {
        Self {
            status: status_for(&e),
            message: e.to_string(),
        }
    }
}

fn status_for(e: &DashboardError) -> StatusCode {
    match e {
        DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
        DashboardError::NoData => StatusCode::CONFLICT,
        DashboardError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ---------------------------------------------------------------------------
// State and router
// ---------------------------------------------------------------------------

/// Shared application state available to all handlers via `State`.
pub struct AppState {
    pub session: DashboardSession,
}

/// Build the application router.
pub fn router(session: DashboardSession, config: &ServerConfig) -> Router {
    let state = Arc::new(AppState { session });
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/api/periods", get(api_periods))
        .route("/api/report", get(api_report))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.addr` and serve until the process is stopped.
pub async fn serve(session: DashboardSession, config: ServerConfig) -> std::io::Result<()> {
    let app = router(session, &config);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %listener.local_addr()?, "dashboard listening");
    axum::serve(listener, app).await
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SelectionParams {
    /// `YYYY-MM`; absent or empty selects the default month.
    pub month: Option<String>,
}

impl SelectionParams {
    fn selection(&self) -> crate::error::Result<Selection> {
        let month = match self.month.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(m) => Some(m.parse::<Period>()?),
        };
        Ok(Selection { month })
    }
}

/// GET /?month=2023-02
///
/// The dashboard page, or the upload prompt when nothing is loaded yet.
/// Selections that cannot be shown render as an HTML notice with the
/// sidebar intact; an empty dataset gets the notice with a 200.
async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> Result<Response, AppError> {
    if !state.session.is_loaded().await? {
        return Ok(Html(render::render_upload_prompt()).into_response());
    }
    let result = match params.selection() {
        Ok(selection) => state.session.report(selection).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(report) => Ok(Html(render::render_dashboard(&report)).into_response()),
        Err(e @ (DashboardError::NotFound(_) | DashboardError::InvalidArgument(_))) => {
            let periods = state.session.periods().await?;
            let status = if periods.is_empty() {
                StatusCode::OK
            } else {
                status_for(&e)
            };
            warn!(error = %e, %status, "page selection rejected");
            Ok((status, Html(render::render_notice(&e.to_string(), &periods))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /upload (multipart, field `file`)
///
/// Replaces the session dataset and redirects back to the page.
async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut payload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid upload: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(format!("Invalid upload: {e}")))?;
            payload = Some(bytes);
        }
    }

    let bytes = match payload {
        Some(b) if !b.is_empty() => b,
        _ => return Err(AppError::bad_request("No file uploaded")),
    };

    let size = bytes.len();
    state
        .session
        .load_csv_bytes(bytes.to_vec())
        .await
        .map_err(|e| {
            warn!(error = %e, size, "upload rejected");
            AppError::bad_request(e.to_string())
        })?;
    Ok(Redirect::to("/"))
}

/// GET /api/periods
///
/// Months available for selection, in list order.
async fn api_periods(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let periods = state.session.periods().await?;
    let count = periods.len();
    Ok(Json(json!({ "data": periods, "count": count })))
}

/// GET /api/report?month=2023-02
///
/// The full report for a selection as JSON.
async fn api_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let selection = params.selection()?;
    let report = state.session.report(selection).await?;
    Ok(Json(json!({ "data": report })))
}
