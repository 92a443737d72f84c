//! Response types for the projection API.
//!
//! This module defines the success envelope and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{HeadlineKpis, MilestoneResult};
use crate::error::EngineError;
use crate::models::{AuditWarning, Granularity, MonthRecord, PeriodRecord};

/// Response body for `/project`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionResponse {
    /// Unique identifier for this projection run.
    pub projection_id: Uuid,
    /// When the projection was produced.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced it.
    pub engine_version: String,
    /// Name of the scenario the defaults came from.
    pub scenario: String,
    /// Granularity of `periods`.
    pub granularity: Granularity,
    /// The 60 projected months.
    pub months: Vec<MonthRecord>,
    /// The aggregated view.
    pub periods: Vec<PeriodRecord>,
    /// Cumulative-profit milestones.
    pub milestones: Vec<MilestoneResult>,
    /// Headline KPIs.
    pub kpis: HeadlineKpis,
    /// Input coercions and exclusions.
    pub warnings: Vec<AuditWarning>,
    /// Time spent projecting, in microseconds.
    pub duration_us: u64,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a period not found error response.
    pub fn period_not_found(label: &str) -> Self {
        Self::with_details(
            "PERIOD_NOT_FOUND",
            format!("Period not found: {}", label),
            "Use a label from the aggregated view, e.g. 'Month 5', 'Year 2 Q1' or 'Year 3'",
        )
    }

    /// Creates a sheet not found error response.
    pub fn sheet_not_found(name: &str) -> Self {
        Self::with_details(
            "SHEET_NOT_FOUND",
            format!("Sheet not found: {}", name),
            "Available sheets: Monthly_Detailed, Executive_Summary",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::PeriodNotFound { label } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::period_not_found(&label),
            },
            EngineError::SheetNotFound { name } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::sheet_not_found(&name),
            },
            EngineError::InvalidAssumptions { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    "Assumption override does not match the assumption set",
                    message,
                ),
            },
            EngineError::ExportError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}
