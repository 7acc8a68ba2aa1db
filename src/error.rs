// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::completion::IntentError;

/// Failure of a gateway request. Every variant renders as `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller-supplied data failed a precondition.
    #[error("{0}")]
    InvalidInput(String),

    /// The model could not extract a usable intent.
    #[error("{0}")]
    IntentUnrecognized(String),

    /// The RPC node rejected or failed the call.
    #[error("{0}")]
    UpstreamRpc(String),

    /// The completion model failed or returned unusable output.
    #[error("{0}")]
    UpstreamModel(String),
}

/// Error body returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn upstream_rpc(message: impl Into<String>) -> Self {
        Self::UpstreamRpc(message.into())
    }

    pub fn upstream_model(message: impl Into<String>) -> Self {
        Self::UpstreamModel(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_)
            | ApiError::IntentUnrecognized(_)
            | ApiError::UpstreamRpc(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamModel(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<IntentError> for ApiError {
    fn from(err: IntentError) -> Self {
        match &err {
            IntentError::Unrecognized => ApiError::IntentUnrecognized(err.to_string()),
            IntentError::MissingRecipient | IntentError::InvalidAmount => {
                ApiError::InvalidInput(err.to_string())
            }
            IntentError::Malformed(reason) => {
                ApiError::UpstreamModel(format!("Failed to parse intent: {reason}"))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidInput(format!("Invalid path: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
