use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde_json::json;

use crate::errors::TrackerError;

/// Handler error; the status comes from the `TrackerError` kind in the chain
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match TrackerError::find(&self.0) {
            Some(TrackerError::Network(_)) => StatusCode::BAD_GATEWAY,
            Some(TrackerError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Some(TrackerError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(TrackerError::InvalidUrl(_))
            | Some(TrackerError::MissingField(_))
            | Some(TrackerError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Extractor rejection (bad query string or body) as a 400 with a JSON body
pub fn rejected<R: std::fmt::Display>(rejection: R) -> ApiError {
    ApiError::from(TrackerError::InvalidRequest(rejection.to_string()))
}

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = format!("{:#}", self.0);

        if status.is_server_error() {
            error!("Request failed ({}): {}", status, message);
        } else {
            warn!("Request rejected ({}): {}", status, message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
