//! Configuration types for the projection engine.
//!
//! This module contains the strongly-typed assumption set that drives a
//! projection run. Every group deserializes from YAML with per-field
//! defaults, so a partial file overlays the documented baseline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::{RoadmapRow, ServiceCode};

/// Metadata describing a scenario directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetadata {
    /// Short scenario name (e.g., "baseline").
    pub name: String,
    /// Free-text description shown alongside the projection.
    #[serde(default)]
    pub description: String,
}

/// Optional model features.
///
/// One engine serves every combination; these switches decide which
/// terms take part in the monthly formulas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Model a second, clinic-based division with its own launch and ramp.
    pub clinic_division: bool,
    /// Discount scheduled direct-care hours for cancellations and no-shows.
    pub cancellation_buffer: bool,
    /// Use the line-item operating budget instead of the flat formula.
    pub itemized_overhead: bool,
    /// Deduct a share of positive combined profit once the clinic is open.
    pub profit_share: bool,
    /// Replace percentage-of-revenue accounting with a salaried finance
    /// executive above an annualized revenue threshold.
    pub cfo_threshold: bool,
}

/// Reimbursement per 15-minute billing unit for each service code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingRates {
    /// Direct care (CPT 97153) per unit.
    pub direct_care: Decimal,
    /// Supervision (CPT 97155) per unit.
    pub supervision: Decimal,
    /// Assessment (CPT 97151) per unit.
    pub assessment: Decimal,
}

impl Default for BillingRates {
    fn default() -> Self {
        Self {
            direct_care: Decimal::from(17),
            supervision: Decimal::from(23),
            assessment: Decimal::from(29),
        }
    }
}

impl BillingRates {
    /// Returns the unit rate for a service code.
    pub fn unit_rate(&self, code: ServiceCode) -> Decimal {
        match code {
            ServiceCode::DirectCare => self.direct_care,
            ServiceCode::Supervision => self.supervision,
            ServiceCode::Assessment => self.assessment,
        }
    }
}

/// Hourly pay for billable labor plus the payroll load factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayRates {
    /// Behavior technician hourly pay (direct care).
    pub technician_hourly: Decimal,
    /// Behavior analyst billable hourly pay (supervision and assessment).
    pub analyst_hourly: Decimal,
    /// Fringe multiplier applied to every payroll cost (1.20 = 20% load).
    pub fringe_multiplier: Decimal,
}

impl Default for PayRates {
    fn default() -> Self {
        Self {
            technician_hourly: Decimal::from(25),
            analyst_hourly: Decimal::from(85),
            fringe_multiplier: Decimal::new(120, 2),
        }
    }
}

/// Caseload growth and service-intensity drivers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseloadParams {
    /// In-home caseload in month 1.
    pub starting_caseload: Decimal,
    /// Net new in-home cases per month.
    pub monthly_growth: Decimal,
    /// Average weekly direct-care hours per in-home case.
    pub in_home_weekly_hours: Decimal,
    /// Average weekly direct-care hours per clinic case.
    pub clinic_weekly_hours: Decimal,
    /// Weekly supervision hours per case.
    pub supervision_weekly_hours: Decimal,
    /// Hours billed per assessment or re-assessment.
    pub hours_per_assessment: Decimal,
    /// Share of scheduled direct-care hours actually delivered when the
    /// cancellation buffer is enabled.
    pub cancellation_buffer: Decimal,
}

impl Default for CaseloadParams {
    fn default() -> Self {
        Self {
            starting_caseload: Decimal::from(40),
            monthly_growth: Decimal::from(5),
            in_home_weekly_hours: Decimal::from(14),
            clinic_weekly_hours: Decimal::from(30),
            supervision_weekly_hours: Decimal::from(2),
            hours_per_assessment: Decimal::from(8),
            cancellation_buffer: Decimal::new(85, 2),
        }
    }
}

/// Launch and ramp of the clinic division.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicParams {
    /// First month the clinic serves cases.
    pub launch_month: u32,
    /// Months taken to ramp from zero to the target caseload.
    pub ramp_months: u32,
    /// Caseload held once the ramp completes.
    pub target_caseload: Decimal,
}

impl Default for ClinicParams {
    fn default() -> Self {
        Self {
            launch_month: 13,
            ramp_months: 24,
            target_caseload: Decimal::from(20),
        }
    }
}

/// Flat operating-expense formula.
///
/// `base_monthly + revenue * revenue_pct + year * annual_step`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatOverhead {
    /// Fixed monthly base.
    pub base_monthly: Decimal,
    /// Fraction of monthly revenue.
    pub revenue_pct: Decimal,
    /// Administrative step added once per projection year.
    pub annual_step: Decimal,
}

impl Default for FlatOverhead {
    fn default() -> Self {
        Self {
            base_monthly: Decimal::from(5000),
            revenue_pct: Decimal::new(6, 2),
            annual_step: Decimal::from(3000),
        }
    }
}

/// Line-item operating budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemizedOverhead {
    /// Flat marketing and advertising spend per month.
    pub marketing_monthly: Decimal,
    /// Technology cost per head per month.
    pub technology_per_head: Decimal,
    /// Billable hours a full-time technician delivers per month.
    pub full_time_billable_hours: Decimal,
    /// Clinical documentation tooling fee per block of 30 cases.
    pub documentation_per_seat: Decimal,
    /// Billing / revenue-cycle fee as a fraction of revenue.
    pub billing_fee_pct: Decimal,
    /// Compliance subscription per month.
    pub compliance_monthly: Decimal,
    /// Legal retainer per month.
    pub legal_monthly: Decimal,
    /// Recruiting subscription per month.
    pub recruiting_monthly: Decimal,
    /// One-time equipment cost per new head.
    pub equipment_per_new_hire: Decimal,
    /// Fractional bookkeeping as a fraction of revenue.
    pub accounting_revenue_pct: Decimal,
    /// Annual salary of the finance executive hired above the threshold.
    pub cfo_annual_salary: Decimal,
    /// Annualized revenue at which the finance executive replaces bookkeeping.
    pub cfo_revenue_threshold: Decimal,
}

impl Default for ItemizedOverhead {
    fn default() -> Self {
        Self {
            marketing_monthly: Decimal::from(4000),
            technology_per_head: Decimal::from(150),
            full_time_billable_hours: Decimal::from(130),
            documentation_per_seat: Decimal::from(450),
            billing_fee_pct: Decimal::new(6, 2),
            compliance_monthly: Decimal::from(750),
            legal_monthly: Decimal::from(1000),
            recruiting_monthly: Decimal::from(1200),
            equipment_per_new_hire: Decimal::from(1500),
            accounting_revenue_pct: Decimal::new(2, 2),
            cfo_annual_salary: Decimal::from(200_000),
            cfo_revenue_threshold: Decimal::from(3_000_000),
        }
    }
}

/// Profit-sharing obligation tied to the clinic division.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitShareParams {
    /// Fraction of positive combined profit paid out.
    pub rate: Decimal,
}

impl Default for ProfitShareParams {
    fn default() -> Self {
        Self {
            rate: Decimal::new(5, 2),
        }
    }
}

/// The full set of scalar business drivers for one projection run.
///
/// # Example
///
/// ```
/// use aba_proforma::config::AssumptionSet;
/// use rust_decimal::Decimal;
///
/// let assumptions = AssumptionSet::default();
/// assert_eq!(assumptions.caseload.starting_caseload, Decimal::from(40));
/// assert!(!assumptions.features.clinic_division);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionSet {
    /// Optional model features.
    pub features: FeatureFlags,
    /// Billing rates per service code.
    pub billing: BillingRates,
    /// Hourly pay and fringe.
    pub pay: PayRates,
    /// Caseload growth and intensity.
    pub caseload: CaseloadParams,
    /// Clinic launch and ramp.
    pub clinic: ClinicParams,
    /// Flat operating-expense formula.
    pub flat_overhead: FlatOverhead,
    /// Line-item operating budget.
    pub itemized_overhead: ItemizedOverhead,
    /// Profit share once the clinic is open.
    pub profit_share: ProfitShareParams,
}

impl AssumptionSet {
    /// Overlays a partial override onto this set.
    ///
    /// Fields present in `patch` replace the current values at any depth;
    /// everything else is kept, so `{"caseload": {"monthly_growth": 8}}`
    /// changes one driver and leaves the feature flags alone.
    pub fn overlay(&self, patch: &Value) -> EngineResult<Self> {
        let mut merged = serde_json::to_value(self).map_err(invalid_assumptions)?;
        merge_json(&mut merged, patch);
        serde_json::from_value(merged).map_err(invalid_assumptions)
    }
}

fn merge_json(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (&mut Value::Object(ref mut target), &Value::Object(ref patch)) => {
            for (key, value) in patch {
                merge_json(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

fn invalid_assumptions(err: serde_json::Error) -> EngineError {
    EngineError::InvalidAssumptions {
        message: err.to_string(),
    }
}

/// Roadmap file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoadmapConfig {
    /// Planned fixed-salary hires.
    #[serde(default)]
    pub hires: Vec<RoadmapRow>,
}

/// A complete scenario loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    metadata: ScenarioMetadata,
    assumptions: AssumptionSet,
    roadmap: Vec<RoadmapRow>,
}

impl ProjectionConfig {
    /// Creates a new ProjectionConfig from its component parts.
    pub fn new(
        metadata: ScenarioMetadata,
        assumptions: AssumptionSet,
        roadmap: Vec<RoadmapRow>,
    ) -> Self {
        Self {
            metadata,
            assumptions,
            roadmap,
        }
    }

    /// Returns the scenario metadata.
    pub fn scenario(&self) -> &ScenarioMetadata {
        &self.metadata
    }

    /// Returns the assumption set.
    pub fn assumptions(&self) -> &AssumptionSet {
        &self.assumptions
    }

    /// Returns the raw hiring roadmap rows.
    pub fn roadmap(&self) -> &[RoadmapRow] {
        &self.roadmap
    }
}
