use api_types::error::ErrorResponse;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use engine::EngineError;

pub use server::{ServerState, router, run_with_listener};

mod server;
mod transactions;

pub(crate) const TRANSACTION_NOT_FOUND: &str = "transaction not found";

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    NotFound(String),
    BadRequest(String),
    NotAcceptable,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidPayload(_) | EngineError::InvalidId => StatusCode::BAD_REQUEST,
        EngineError::CorruptDocument(_)
        | EngineError::Serialization(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    if err.is_validation() {
        return err.to_string();
    }

    tracing::error!("unexpected store error: {err}");
    "internal server error".to_string()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ServerError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ServerError::NotAcceptable => {
                (StatusCode::NOT_ACCEPTABLE, "Not Acceptable".to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}
