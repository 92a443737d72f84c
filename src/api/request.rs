//! Request types for the projection API.
//!
//! Every field is optional; anything omitted falls back to the scenario
//! loaded at startup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Granularity, RoadmapRow};

/// Request body for `/project` and `/export/{sheet}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// Partial assumptions overlaid onto the loaded scenario's.
    #[serde(default)]
    pub assumptions: Option<Value>,
    /// Hiring roadmap rows replacing the loaded scenario's.
    #[serde(default)]
    pub roadmap: Option<Vec<RoadmapRow>>,
    /// Reporting granularity for the aggregated view.
    #[serde(default)]
    pub granularity: Option<Granularity>,
    /// Cumulative-profit milestone targets.
    #[serde(default)]
    pub milestone_targets: Option<Vec<Decimal>>,
}

/// Request body for `/audit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    /// Label of the period to explain ("Month 5", "Year 2 Q1", "Year 3").
    pub period: String,
    /// Partial assumptions overlaid onto the loaded scenario's.
    #[serde(default)]
    pub assumptions: Option<Value>,
    /// Hiring roadmap rows replacing the loaded scenario's.
    #[serde(default)]
    pub roadmap: Option<Vec<RoadmapRow>>,
    /// Granularity the label belongs to; inferred from the label when absent.
    #[serde(default)]
    pub granularity: Option<Granularity>,
}

impl From<AuditRequest> for ProjectionRequest {
    fn from(request: AuditRequest) -> Self {
        ProjectionRequest {
            assumptions: request.assumptions,
            roadmap: request.roadmap,
            granularity: request.granularity,
            milestone_targets: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_deserializes() {
        let request: ProjectionRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.assumptions.is_none());
        assert!(request.roadmap.is_none());
        assert!(request.granularity.is_none());
    }

    #[test]
    fn test_partial_assumptions_are_kept_as_sent() {
        let request: ProjectionRequest = serde_json::from_value(json!({
            "assumptions": {"caseload": {"monthly_growth": "8"}},
            "granularity": "quarterly",
            "milestone_targets": ["250000"]
        }))
        .unwrap();

        assert_eq!(
            request.assumptions,
            Some(json!({"caseload": {"monthly_growth": "8"}}))
        );
        assert_eq!(request.granularity, Some(Granularity::Quarterly));
        assert_eq!(request.milestone_targets, Some(vec![Decimal::from(250000)]));
    }

    #[test]
    fn test_audit_request_requires_period() {
        let missing = serde_json::from_value::<AuditRequest>(json!({}));
        assert!(missing.is_err());

        let request: AuditRequest =
            serde_json::from_value(json!({"period": "Year 1 Q2"})).unwrap();
        let projection: ProjectionRequest = request.into();
        assert!(projection.milestone_targets.is_none());
    }
}
