//! HTTP API module for the projection engine.
//!
//! This module provides the REST endpoints that take assumption and
//! roadmap overrides in and return the projected series, drill-downs and
//! spreadsheet sheets.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AuditRequest, ProjectionRequest};
pub use response::{ApiError, ApiErrorResponse, ProjectionResponse};
pub use state::AppState;
