// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    completion::{Confidence, IntentAction, ParsedIntent},
    error::ErrorBody,
    models::{
        AiRequest, AiResponse, BalanceResponse, BroadcastRequest, BroadcastResponse,
        HealthResponse, SimulateTxResponse, TransactionIntentRequest, TransactionIntentResponse,
    },
    state::AppState,
};

pub mod assistant;
pub mod balance;
pub mod cors;
pub mod extract;
pub mod health;
pub mod intent;
pub mod transactions;

#[cfg(test)]
pub(crate) mod test_support;

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    let routes = Router::new()
        .route("/", get(health::health_check))
        .route("/balance", get(balance::missing_address))
        .route("/balance/", get(balance::missing_address))
        .route("/balance/{address}", get(balance::get_balance))
        .route("/ai", post(assistant::ask_ai))
        .route("/simulate_tx", get(transactions::simulate_tx))
        .route("/broadcast_tx", post(transactions::broadcast_tx))
        .route(
            "/parse_transaction_intent",
            post(intent::parse_transaction_intent),
        )
        .with_state(state);

    routes
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors::cors_layer(allowed_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        balance::get_balance,
        assistant::ask_ai,
        transactions::simulate_tx,
        transactions::broadcast_tx,
        intent::parse_transaction_intent
    ),
    components(
        schemas(
            HealthResponse,
            BalanceResponse,
            AiRequest,
            AiResponse,
            SimulateTxResponse,
            BroadcastRequest,
            BroadcastResponse,
            TransactionIntentRequest,
            TransactionIntentResponse,
            ParsedIntent,
            IntentAction,
            Confidence,
            ErrorBody
        )
    ),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Wallet", description = "Balance lookups"),
        (name = "Transactions", description = "Unsigned transfer construction and broadcast"),
        (name = "Assistant", description = "AI assistant and intent parsing")
    )
)]
struct ApiDoc;
