//! HTTP request handlers for the Allowance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{BatchInput, calculate_allowances, resolve_period};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{AllowanceReport, AttendanceRecord, AuditWarning};
use crate::providers::{eligible_roster, match_to_roster, read_schedule};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/allowances/calculate", post(calculate_handler))
        .route("/periods/:year/:month", get(period_handler))
        .with_state(state)
}

/// Handler for POST /allowances/calculate.
///
/// Accepts a calculation request and returns the allowance report.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allowance calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
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
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    match perform_calculation(request, state.config()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %report.calculation_id,
                period = %report.period.label,
                officers = report.rows.len(),
                total = %report.total,
                warnings = report.warnings.len(),
                "Allowance calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Allowance calculation failed"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /periods/{year}/{month}.
///
/// Returns the resolved reporting period.
async fn period_handler(Path((year, month)): Path<(i32, String)>) -> Response {
    match resolve_period(&month, year) {
        Ok(period) => (StatusCode::OK, Json(period)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: EngineError) -> Response {
    ApiErrorResponse::from(err).into_response()
}

/// Prepares the request's inputs and runs the batch.
fn perform_calculation(
    request: CalculationRequest,
    config: &ConfigLoader,
) -> EngineResult<AllowanceReport> {
    let rate_table = request
        .rate_table_override()
        .unwrap_or_else(|| config.rate_table().clone());
    let roster = eligible_roster(request.roster, &request.departments);

    let mut attendance: Vec<AttendanceRecord> = request.attendance;
    let mut unmatched_names = Vec::new();
    if let Some(csv) = request.schedule_csv.as_deref() {
        let entries = read_schedule(csv.as_bytes())?;
        let matched = match_to_roster(&entries, &roster);
        attendance.extend(matched.records);
        unmatched_names = matched.unmatched_names;
    }

    let mut report = calculate_allowances(
        &request.month,
        request.year,
        BatchInput {
            roster: &roster,
            attendance: &attendance,
            rate_table: &rate_table,
            policy: config.policy(),
        },
    )?;

    for name in unmatched_names {
        report.warnings.push(AuditWarning {
            code: "UNMATCHED_SCHEDULE_ROW".to_string(),
            message: format!("Schedule row '{}' does not match a single eligible officer", name),
            person_id: None,
        });
    }

    Ok(report)
}
