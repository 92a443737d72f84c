//! Audit models: per-step calculation records, warnings, and the
//! drill-down breakdown that explains a period's totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Division, Period, ServiceCode, VariableLabor};

/// A single step in a month's calculation.
///
/// Each step captures the input, output, and reasoning for one formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number within the month.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The billing code or business policy the rule implements.
    pub policy_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// A warning raised while preparing inputs.
///
/// Warnings never stop a projection; they tell the caller which inputs were
/// replaced by defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// Hours and revenue for one service code within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLine {
    /// The service category.
    pub code: ServiceCode,
    /// The CPT code billed.
    pub cpt_code: String,
    /// Billable hours.
    pub hours: Decimal,
    /// Revenue across all divisions.
    pub revenue: Decimal,
    /// Revenue from the in-home division.
    pub in_home_revenue: Decimal,
    /// Revenue from the clinic division, absent when there is no clinic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_revenue: Option<Decimal>,
}

/// Fixed-labor cost of one role within a period.
///
/// Costs are summed across the months the role was active, not
/// deduplicated: a role on payroll for a full quarter appears with three
/// months of cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffCostLine {
    /// Role label.
    pub role: String,
    /// Division the cost is booked to.
    pub division: Division,
    /// Number of months in the period the role was on payroll.
    pub months_active: u32,
    /// Resolved headcount in the last month of the period.
    pub resolved_count: Decimal,
    /// Summed fixed-labor cost across the period.
    pub total_cost: Decimal,
}

/// Everything needed to explain one period's totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditBreakdown {
    /// The period being explained.
    pub period: Period,
    /// Display label of the period.
    pub label: String,
    /// Per-CPT-code hours and revenue.
    pub services: Vec<ServiceLine>,
    /// Variable labor split by labor category.
    pub variable_labor: VariableLabor,
    /// Fixed-labor cost per role.
    pub staff: Vec<StaffCostLine>,
    /// Sum of the staff cost lines.
    pub fixed_labor_total: Decimal,
    /// Calculation steps for a single month; empty for quarters and years.
    pub steps: Vec<AuditStep>,
}

impl AuditBreakdown {
    /// Total revenue across the service lines.
    pub fn revenue_total(&self) -> Decimal {
        self.services.iter().map(|s| s.revenue).sum()
    }
}
