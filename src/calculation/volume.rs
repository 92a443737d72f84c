//! Case volume per division.
//!
//! In-home caseload grows linearly without saturation. The clinic division
//! is empty before its launch month, ramps linearly to its target, and then
//! holds flat.

use rust_decimal::Decimal;

use crate::config::{AssumptionSet, CaseloadParams, ClinicParams};
use crate::models::AuditStep;

use super::audit_value;

/// Number of months in a projection.
pub const PROJECTION_MONTHS: u32 = 60;

/// The result of the case-volume step for one month.
#[derive(Debug, Clone)]
pub struct CaseVolumeResult {
    /// In-home caseload.
    pub in_home: Decimal,
    /// In-home cases that entered service this month.
    pub in_home_intake: Decimal,
    /// Clinic caseload; `None` when the model has one division.
    pub clinic: Option<Decimal>,
    /// Clinic cases that entered service this month.
    pub clinic_intake: Option<Decimal>,
    /// Whether the clinic serves cases this month.
    pub clinic_launched: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl CaseVolumeResult {
    /// Combined caseload across divisions.
    pub fn total(&self) -> Decimal {
        self.in_home + self.clinic.unwrap_or(Decimal::ZERO)
    }
}

/// In-home caseload for `month`: `start + growth * (month - 1)`.
///
/// Month 0 is defined by the same line so that month 1's intake equals
/// the growth rate.
///
/// ```
/// use aba_proforma::calculation::in_home_caseload;
/// use aba_proforma::config::CaseloadParams;
/// use rust_decimal::Decimal;
///
/// let params = CaseloadParams::default();
/// assert_eq!(in_home_caseload(1, &params), Decimal::from(40));
/// assert_eq!(in_home_caseload(13, &params), Decimal::from(100));
/// ```
pub fn in_home_caseload(month: u32, params: &CaseloadParams) -> Decimal {
    params.starting_caseload + params.monthly_growth * (Decimal::from(month) - Decimal::ONE)
}

/// Returns true if the clinic serves cases in `month`.
pub fn clinic_launched(month: u32, clinic: &ClinicParams) -> bool {
    month >= clinic.launch_month
}

/// Clinic caseload for `month`.
///
/// `min(month - launch + 1, ramp) * target / ramp` from launch onward, zero
/// before. A zero-length ramp opens at the full target.
pub fn clinic_caseload(month: u32, clinic: &ClinicParams) -> Decimal {
    if !clinic_launched(month, clinic) {
        return Decimal::ZERO;
    }
    if clinic.ramp_months == 0 {
        return clinic.target_caseload;
    }

    let months_open = (month - clinic.launch_month + 1).min(clinic.ramp_months);
    Decimal::from(months_open) * clinic.target_caseload / Decimal::from(clinic.ramp_months)
}

fn intake(current: Decimal, previous: Decimal) -> Decimal {
    (current - previous).max(Decimal::ZERO)
}

/// Computes case volume for every division present in the model.
pub fn calculate_case_volume(
    month: u32,
    assumptions: &AssumptionSet,
    step_number: u32,
) -> CaseVolumeResult {
    let params = &assumptions.caseload;
    let in_home = in_home_caseload(month, params);
    let in_home_intake = intake(in_home, in_home_caseload(month.saturating_sub(1), params));

    let (clinic, clinic_intake, launched) = if assumptions.features.clinic_division {
        let clinic_params = &assumptions.clinic;
        let current = clinic_caseload(month, clinic_params);
        let previous = if month == 0 {
            Decimal::ZERO
        } else {
            clinic_caseload(month - 1, clinic_params)
        };
        (
            Some(current),
            Some(intake(current, previous)),
            clinic_launched(month, clinic_params),
        )
    } else {
        (None, None, false)
    };

    let reasoning = match clinic {
        Some(cases) if launched => format!(
            "Month {}: {} in-home cases ({} new) and {} clinic cases",
            month,
            audit_value(in_home),
            audit_value(in_home_intake),
            audit_value(cases)
        ),
        Some(_) => format!(
            "Month {}: {} in-home cases ({} new); clinic opens in month {}",
            month,
            audit_value(in_home),
            audit_value(in_home_intake),
            assumptions.clinic.launch_month
        ),
        None => format!(
            "Month {}: {} in-home cases ({} new)",
            month,
            audit_value(in_home),
            audit_value(in_home_intake)
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "case_volume".to_string(),
        rule_name: "Case Volume".to_string(),
        policy_ref: "linear growth; clinic linear ramp".to_string(),
        input: serde_json::json!({
            "month": month,
            "starting_caseload": audit_value(params.starting_caseload),
            "monthly_growth": audit_value(params.monthly_growth),
            "clinic_division": assumptions.features.clinic_division
        }),
        output: serde_json::json!({
            "in_home": audit_value(in_home),
            "in_home_intake": audit_value(in_home_intake),
            "clinic": clinic.map(audit_value),
            "clinic_intake": clinic_intake.map(audit_value)
        }),
        reasoning,
    };

    CaseVolumeResult {
        in_home,
        in_home_intake,
        clinic,
        clinic_intake,
        clinic_launched: launched,
        audit_step,
    }
}
