//! HTTP request handlers for the projection API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DEFAULT_MILESTONE_TARGETS, ScenarioRun, aggregate, explain_label, headline_kpis, run_scenario,
};
use crate::config::{AssumptionSet, ConfigLoader};
use crate::error::{EngineError, EngineResult};
use crate::export::Workbook;
use crate::models::{Granularity, Period};

use super::request::{AuditRequest, ProjectionRequest};
use super::response::{ApiError, ApiErrorResponse, ProjectionResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/project", post(project_handler))
        .route("/audit", post(audit_handler))
        .route("/export/:sheet", post(export_handler))
        .with_state(state)
}

/// Handler for POST /project endpoint.
///
/// Projects 60 months and returns the monthly series, the aggregated view,
/// milestones and headline KPIs.
async fn project_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing projection request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let granularity = request.granularity.unwrap_or_default();
    let targets = request
        .milestone_targets
        .clone()
        .unwrap_or_else(|| DEFAULT_MILESTONE_TARGETS.to_vec());

    let start_time = Instant::now();
    let (assumptions, run) = match run_request(state.config(), request) {
        Ok(result) => result,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Projection rejected");
            return error_response(err);
        }
    };
    let periods = aggregate(&run.months, granularity);
    let kpis = headline_kpis(&run.months, &run.hires, &targets);
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        hires = run.hires.len(),
        warnings = run.warnings.len(),
        clinic_division = assumptions.features.clinic_division,
        final_year_ebitda = %kpis.final_year_ebitda,
        duration_us = duration.as_micros(),
        "Projection completed successfully"
    );

    let response = ProjectionResponse {
        projection_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        scenario: state.config().scenario().name.clone(),
        granularity,
        milestones: kpis.milestones.clone(),
        kpis,
        periods,
        months: run.months,
        warnings: run.warnings,
        duration_us: duration.as_micros() as u64,
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for POST /audit endpoint.
///
/// Explains one period's totals by service code and by role.
async fn audit_handler(
    State(state): State<AppState>,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing audit request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let label = request.period.trim().to_string();
    let granularity = match request.granularity {
        Some(granularity) => granularity,
        None => match label.parse::<Period>() {
            Ok(period) => period.granularity(),
            Err(_) => {
                warn!(correlation_id = %correlation_id, period = %label, "Unrecognised period label");
                return error_response(EngineError::PeriodNotFound { label });
            }
        },
    };

    let result = run_request(state.config(), request.into())
        .and_then(|(_, run)| explain_label(&run.months, granularity, &label));
    match result {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                period = %label,
                staff_lines = breakdown.staff.len(),
                "Audit completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(breakdown),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Audit failed");
            error_response(err)
        }
    }
}

/// Handler for POST /export/{sheet} endpoint.
///
/// Returns one workbook sheet as CSV. The summary sheet uses the requested
/// granularity, yearly by default.
async fn export_handler(
    State(state): State<AppState>,
    Path(sheet): Path<String>,
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, sheet = %sheet, "Processing export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let granularity = request.granularity.unwrap_or(Granularity::Yearly);
    let result = run_request(state.config(), request).and_then(|(_, run)| {
        let workbook = Workbook::build(&run.months, &aggregate(&run.months, granularity));
        workbook.sheet(&sheet)?.to_csv()
    });

    match result {
        Ok(csv) => {
            info!(
                correlation_id = %correlation_id,
                sheet = %sheet,
                bytes = csv.len(),
                "Export completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
                csv,
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Export failed");
            error_response(err)
        }
    }
}

/// Overlays request overrides onto the loaded scenario and runs the projection.
fn run_request(
    config: &ConfigLoader,
    request: ProjectionRequest,
) -> EngineResult<(AssumptionSet, ScenarioRun)> {
    let assumptions = match request.assumptions.as_ref() {
        Some(patch) => config.assumptions().overlay(patch)?,
        None => config.assumptions().clone(),
    };
    let run = match request.roadmap.as_deref() {
        Some(rows) => run_scenario(rows, &assumptions),
        None => run_scenario(config.roadmap(), &assumptions),
    };
    Ok((assumptions, run))
}

fn error_response(err: EngineError) -> Response {
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
