//! Runs a projection from raw roadmap rows.

use tracing::warn;

use crate::config::AssumptionSet;
use crate::models::{AuditWarning, HireEntry, MonthRecord, RoadmapRow, resolve_roadmap};

use super::fixed_labor::roadmap_warnings;
use super::projection::project;

/// A projection together with the resolved roadmap it ran on.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    /// Typed roadmap entries.
    pub hires: Vec<HireEntry>,
    /// Cell coercions and excluded hires.
    pub warnings: Vec<AuditWarning>,
    /// The projected months.
    pub months: Vec<MonthRecord>,
}

/// Resolves roadmap rows and projects 60 months.
///
/// Never fails: malformed cells become zero and are reported as warnings.
pub fn run_scenario(rows: &[RoadmapRow], assumptions: &AssumptionSet) -> ScenarioRun {
    let (hires, mut warnings) = resolve_roadmap(rows);
    warnings.extend(roadmap_warnings(&hires, assumptions));

    for warning in &warnings {
        warn!(code = %warning.code, message = %warning.message, "Roadmap input adjusted");
    }

    let months = project(&hires, assumptions);
    ScenarioRun {
        hires,
        warnings,
        months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::CLINIC_HIRE_WITHOUT_DIVISION;
    use crate::config::FeatureFlags;
    use crate::models::{MAX_ANNUAL_SALARY, MAX_HEADCOUNT, ROADMAP_CELL_COERCED};
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_collects_coercion_and_exclusion_warnings() {
        let rows: Vec<RoadmapRow> = serde_json::from_value(json!([
            {"month": 1, "role": "Clinical Director", "salary": 140000, "count": 1},
            {"month": 13, "role": "Clinic Manager", "salary": "", "count": 1},
        ]))
        .unwrap();

        let run = run_scenario(&rows, &AssumptionSet::default());
        assert_eq!(run.hires.len(), 2);
        assert_eq!(run.months.len(), 60);

        let codes: Vec<&str> = run.warnings.iter().map(|w| w.code.as_str()).collect();
        assert_eq!(codes, vec![ROADMAP_CELL_COERCED, CLINIC_HIRE_WITHOUT_DIVISION]);
    }

    /// SC-001: oversized cells are clamped and the series still completes
    #[test]
    fn test_oversized_cells_still_project() {
        let rows: Vec<RoadmapRow> = serde_json::from_value(json!([
            {"month": 1, "role": "Care Coordinator", "salary": "60000000000000000000000000000", "count": 2},
            {"month": 1, "role": "Clinic Manager", "salary": 85000, "count": "1e40"},
        ]))
        .unwrap();
        let mut assumptions = AssumptionSet::default();
        assumptions.features = FeatureFlags {
            clinic_division: true,
            cancellation_buffer: true,
            itemized_overhead: true,
            profit_share: true,
            cfo_threshold: true,
        };

        let run = run_scenario(&rows, &assumptions);

        assert_eq!(run.months.len(), 60);
        assert_eq!(run.hires[0].annual_salary, MAX_ANNUAL_SALARY);
        assert_eq!(run.hires[1].headcount, MAX_HEADCOUNT);
        assert_eq!(run.warnings.len(), 2);
        assert!(run.months[59].cumulative_ebitda < Decimal::ZERO);
    }

    /// SC-002: far-future and fractional months do not book early
    #[test]
    fn test_month_cells_never_book_early() {
        let rows: Vec<RoadmapRow> = serde_json::from_value(json!([
            {"month": 1e20, "role": "Clinical Director", "salary": 120000, "count": 1},
            {"month": 1.5, "role": "Admin/Billing", "salary": 120000, "count": 1},
        ]))
        .unwrap();

        let run = run_scenario(&rows, &AssumptionSet::default());

        assert!(run.warnings.is_empty());
        assert_eq!(run.months[0].fixed_labor, Decimal::ZERO);
        assert_eq!(run.months[1].fixed_labor, Decimal::from(12000));
        assert_eq!(run.months[59].fixed_labor, Decimal::from(12000));
    }

    #[test]
    fn test_clean_roadmap_has_no_warnings() {
        let run = run_scenario(&[], &AssumptionSet::default());
        assert!(run.warnings.is_empty());
        assert!(run.hires.is_empty());
    }
}
