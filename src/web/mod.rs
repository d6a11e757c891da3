use std::net::SocketAddr;
use std::str::FromStr;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::engine::confirmation::{
    AssignmentCategory, ConfirmationRequest, ConfirmationSlot, Decision,
};
use crate::engine::Engine;
use crate::error::SchedulerError;

#[derive(Clone)]
pub struct WebState {
    pub engine: Engine,
}

/// Query/body fields of a confirmation link, before validation.
#[derive(Deserialize)]
struct ConfirmationParams {
    target: String,
    member: String,
    slot: String,
    /// Defaults to the weekly-meeting category when absent.
    category: Option<String>,
}

#[derive(Deserialize)]
struct RespondRequest {
    #[serde(flatten)]
    params: ConfirmationParams,
    decision: Decision,
}

#[derive(Serialize)]
struct RespondResponse {
    success: bool,
    status: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// The confirmation routes, shared by the server and the tests.
pub fn router(state: WebState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/confirmation", get(view_handler))
        .route("/api/confirmation/respond", post(respond_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, state: WebState) {
    let app = router(state);

    tracing::info!(addr = %addr, "Starting confirmation server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind confirmation server");
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Confirmation server failed");
    }
}

async fn index_handler() -> Html<&'static str> {
    Html(include_str!("confirm.html"))
}

fn parse_params(params: &ConfirmationParams) -> Result<ConfirmationRequest, String> {
    let target = Uuid::parse_str(&params.target).map_err(|_| "Invalid target id".to_string())?;
    let member = Uuid::parse_str(&params.member).map_err(|_| "Invalid member id".to_string())?;
    let slot = ConfirmationSlot::from_str(&params.slot).map_err(|e| e.to_string())?;
    let category = match &params.category {
        Some(raw) => AssignmentCategory::from_str(raw).map_err(|e| e.to_string())?,
        None => AssignmentCategory::default(),
    };
    Ok(ConfirmationRequest {
        target,
        member,
        slot,
        category,
    })
}

fn error_status(err: &SchedulerError) -> StatusCode {
    match err {
        SchedulerError::TargetNotFound(_) | SchedulerError::MemberNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        e if e.is_validation() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn view_handler(
    State(state): State<WebState>,
    Query(params): Query<ConfirmationParams>,
) -> impl IntoResponse {
    let req = match parse_params(&params) {
        Ok(req) => req,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
                .into_response()
        }
    };

    match state.engine.confirmation_view(&req).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => (
            error_status(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn respond_handler(
    State(state): State<WebState>,
    Json(payload): Json<RespondRequest>,
) -> impl IntoResponse {
    let req = match parse_params(&payload.params) {
        Ok(req) => req,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(RespondResponse {
                    success: false,
                    status: None,
                    error: Some(message),
                }),
            )
        }
    };

    match state.engine.respond(&req, payload.decision).await {
        Ok(status) => (
            StatusCode::OK,
            Json(RespondResponse {
                success: true,
                status: Some(status.to_string()),
                error: None,
            }),
        ),
        Err(e) => (
            error_status(&e),
            Json(RespondResponse {
                success: false,
                status: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}
