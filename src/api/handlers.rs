//! HTTP request handlers for the salary engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_breakdown, compute_breakdown, plan_budget};
use crate::error::EngineError;
use crate::models::SalaryInput;

use super::request::{BreakdownRequest, BudgetRequest};
use super::response::{ApiError, ApiErrorResponse, BudgetResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/breakdown", post(breakdown_handler))
        .route("/budget", post(budget_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a body extraction failure onto an API error.
fn rejection_to_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message is in the body text, not the Display impl
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("unknown variant") {
                ApiError::unknown_configuration(body_text)
            } else if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::missing_content_type(),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn engine_failure(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    error_response(err.into())
}

/// Handler for POST /breakdown.
///
/// Returns the full [`CalculationResult`](crate::models::CalculationResult)
/// for the requested salary.
async fn breakdown_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakdownRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing breakdown request");

    let input: SalaryInput = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => {
            return error_response(ApiErrorResponse::bad_request(rejection_to_error(
                rejection,
                correlation_id,
            )));
        }
    };

    match calculate_breakdown(&input, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                region = %input.region,
                student_loan_plan = %input.student_loan_plan,
                net_yearly = %result.breakdown.yearly.net,
                warnings = result.audit_trace.warnings.len(),
                duration_us = result.audit_trace.duration_us,
                "Breakdown completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => engine_failure(err, correlation_id),
    }
}

/// Handler for POST /budget.
///
/// Allocates the monthly net pay of `salary` across `outgoings`.
async fn budget_handler(
    State(state): State<AppState>,
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing budget request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return error_response(ApiErrorResponse::bad_request(rejection_to_error(
                rejection,
                correlation_id,
            )));
        }
    };

    let input: SalaryInput = request.salary.into();
    let breakdown = match compute_breakdown(&input, state.config()) {
        Ok(breakdown) => breakdown,
        Err(err) => return engine_failure(err, correlation_id),
    };

    match plan_budget(breakdown.monthly.net, &request.outgoings) {
        Ok(budget) => {
            info!(
                correlation_id = %correlation_id,
                monthly_net = %budget.monthly_net,
                remaining = %budget.remaining,
                categories = budget.allocations.len(),
                "Budget completed successfully"
            );
            json_response(
                StatusCode::OK,
                BudgetResponse {
                    monthly: breakdown.monthly,
                    budget,
                },
            )
        }
        Err(err) => engine_failure(err, correlation_id),
    }
}
