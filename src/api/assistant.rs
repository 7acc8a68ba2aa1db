// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    api::extract::ApiJson,
    completion::{CompletionRequest, ASSISTANT_INSTRUCTION},
    error::{ApiError, ErrorBody},
    models::{AiRequest, AiResponse},
    state::AppState,
};

/// Ask the Solana assistant a free-form question.
#[utoipa::path(
    post,
    path = "/ai",
    tag = "Assistant",
    request_body = AiRequest,
    responses(
        (status = 200, description = "Assistant reply", body = AiResponse),
        (status = 400, description = "Empty prompt", body = ErrorBody),
        (status = 500, description = "Model request failed", body = ErrorBody)
    )
)]
pub async fn ask_ai(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AiRequest>,
) -> Result<Json<AiResponse>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::invalid_input("Prompt cannot be empty"));
    }

    let response = state
        .model
        .complete(CompletionRequest::text(ASSISTANT_INSTRUCTION, &request.prompt))
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "assistant completion failed");
            ApiError::upstream_model(format!("AI request failed: {e}"))
        })?;

    Ok(Json(AiResponse { response }))
}
