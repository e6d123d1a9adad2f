// 🌐 HTTP Adapter - axum routes for the two export handlers

use crate::config::ServerConfig;
use crate::download::DownloadResponse;
use crate::error::ExportError;
use crate::pipeline::{ExportService, ExportVariant};
use crate::request::RequestHead;
use axum::{
    body::{Body, Bytes},
    extract::{
        rejection::{BytesRejection, FailedToBufferBody},
        DefaultBodyLimit, FromRequest, Request, State,
    },
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use serde::Serialize;
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

/// Shared application state
#[derive(Clone)]
struct AppState {
    service: ExportService,
    max_body_bytes: usize,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl IntoResponse for DownloadResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(config: &ServerConfig, service: ExportService) -> Router {
    let state = AppState {
        service: service.clone(),
        max_body_bytes: config.max_body_bytes,
    };

    Router::new()
        .route("/health", get(health_check))
        .route(&config.route(ExportVariant::Backup.name()), any(export_backup))
        .route(&config.route(ExportVariant::Household.name()), any(export_hogar))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
                    panic_response(&service, panic)
                }))
                .layer(DefaultBodyLimit::max(config.max_body_bytes)),
        )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// {prefix}/export_backup - Full backup download
async fn export_backup(State(state): State<AppState>, request: Request) -> Response {
    export(state, ExportVariant::Backup, request).await
}

/// {prefix}/export_hogar - Household movements download
async fn export_hogar(State(state): State<AppState>, request: Request) -> Response {
    export(state, ExportVariant::Household, request).await
}

async fn export(state: AppState, variant: ExportVariant, request: Request) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("export", %request_id, %variant);

    async move {
        let (parts, body) = request.into_parts();
        let head = RequestHead::from_headers(parts.method.clone(), &parts.headers);

        if let Some(response) = state.service.precheck(&head) {
            return response.into_response();
        }

        // Only now is the body awaited
        let request = Request::from_parts(parts, body);
        let bytes = match Bytes::from_request(request, &state).await {
            Ok(bytes) => bytes,
            Err(rejection) => {
                let error = body_error(rejection, state.max_body_bytes);
                return state.service.reject(&error).into_response();
            }
        };

        state.service.respond(variant, &bytes).into_response()
    }
    .instrument(span)
    .await
}

fn body_error(rejection: BytesRejection, limit: usize) -> ExportError {
    match rejection {
        BytesRejection::FailedToBufferBody(FailedToBufferBody::LengthLimitError(_)) => {
            ExportError::PayloadTooLarge { limit }
        }
        other => ExportError::internal(other.body_text()),
    }
}

/// Last-resort 500 for a panic anywhere below the router.
fn panic_response(service: &ExportService, panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        String::new()
    };

    service.reject(&ExportError::internal(details)).into_response()
}
