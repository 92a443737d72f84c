//! Calculation logic for the projection engine.
//!
//! One module per projection step (case volume, billable hours, revenue,
//! variable labor, fixed labor, operating expense, profit share), each
//! returning its figures together with an [`AuditStep`](crate::models::AuditStep).
//! The projection driver chains them month by month; aggregation, milestone
//! detection, drill-down and headline KPIs work on the resulting series.

mod aggregation;
mod billable_hours;
mod drilldown;
mod fixed_labor;
mod kpi;
mod milestone;
mod operating_expense;
mod profit_share;
mod projection;
mod revenue;
mod scenario;
mod variable_labor;
mod volume;

use rust_decimal::Decimal;

pub use aggregation::{aggregate, margin_pct};
pub use billable_hours::{
    BillableHoursResult, REASSESSMENT_INTERVAL_MONTHS, WEEKS_PER_MONTH, calculate_billable_hours,
    weekly_direct_hours,
};
pub use drilldown::{explain, explain_label};
pub use fixed_labor::{
    CASES_PER_COORDINATOR, CLINIC_HIRE_WITHOUT_DIVISION, FixedLaborResult, calculate_fixed_labor,
    hire_is_booked, required_coordinators, resolved_count, roadmap_warnings,
};
pub use kpi::{DEFAULT_MILESTONE_TARGETS, HeadlineKpis, MilestoneResult, headline_kpis};
pub use milestone::{Milestone, MilestoneField, find_first_month};
pub use operating_expense::{
    DOCUMENTATION_CASES_PER_SEAT, OperatingExpenseResult, OperatingInputs,
    calculate_operating_expense, direct_care_headcount, documentation_seats,
};
pub use profit_share::{ProfitShareResult, calculate_profit_share};
pub use projection::project;
pub use revenue::{RevenueResult, UNITS_PER_HOUR, calculate_revenue};
pub use scenario::{ScenarioRun, run_scenario};
pub use variable_labor::{VariableLaborResult, calculate_variable_labor};
pub use volume::{
    CaseVolumeResult, PROJECTION_MONTHS, calculate_case_volume, clinic_caseload, clinic_launched,
    in_home_caseload,
};

/// Renders a decimal for audit step payloads.
pub(crate) fn audit_value(value: Decimal) -> String {
    value.round_dp(4).normalize().to_string()
}
