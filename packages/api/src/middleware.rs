// ABOUTME: Panic boundary for the HTTP router
// ABOUTME: Turns handler panics into sanitized INTERNAL_ERROR responses tagged with a request id

use std::any::Any;

use axum::{http::StatusCode, response::Response, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;
use uuid::Uuid;

use crate::error::error_response;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

pub fn create_panic_handler() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

/// Wrap a router so a panicking handler still answers with a 500
pub fn with_panic_boundary<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(create_panic_handler())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let panic_message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    error!(
        request_id = %request_id,
        panic_message = %panic_message,
        "Handler panicked"
    );

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal server error occurred".to_string(),
        request_id,
    )
}
