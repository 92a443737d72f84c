//! Billable hours per service code.
//!
//! Direct care and supervision scale with caseload and weekly intensity.
//! Assessment hours come from new intake plus periodic re-authorization of
//! the standing caseload.

use rust_decimal::Decimal;

use crate::config::AssumptionSet;
use crate::models::{AuditStep, Division, ServiceAmounts};

use super::audit_value;

/// Average weeks per month used to convert weekly hours.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Months between re-assessments of a standing case (1/6 of the caseload
/// is re-assessed each month).
pub const REASSESSMENT_INTERVAL_MONTHS: Decimal = Decimal::from_parts(6, 0, 0, false, 0);

/// The result of the billable-hours step for one division.
#[derive(Debug, Clone)]
pub struct BillableHoursResult {
    /// Billable hours per service code.
    pub hours: ServiceAmounts,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Average weekly direct-care hours per case for a division.
pub fn weekly_direct_hours(division: Division, assumptions: &AssumptionSet) -> Decimal {
    match division {
        Division::InHome => assumptions.caseload.in_home_weekly_hours,
        Division::Clinic => assumptions.caseload.clinic_weekly_hours,
    }
}

/// Computes billable hours for one division.
///
/// - direct care = caseload * weekly hours * 4.33 [* cancellation buffer]
/// - supervision = caseload * weekly supervision hours * 4.33
/// - assessment = (new intake + caseload / 6) * hours per assessment
///
/// # Examples
///
/// ```
/// use aba_proforma::calculation::calculate_billable_hours;
/// use aba_proforma::config::AssumptionSet;
/// use aba_proforma::models::Division;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_billable_hours(
///     Division::InHome,
///     Decimal::from(40),
///     Decimal::from(5),
///     &AssumptionSet::default(),
///     1,
/// );
/// // 40 cases * 14 h/week * 4.33
/// assert_eq!(result.hours.direct_care, Decimal::from_str("2424.8").unwrap());
/// // 40 cases * 2 h/week * 4.33
/// assert_eq!(result.hours.supervision, Decimal::from_str("346.4").unwrap());
/// ```
pub fn calculate_billable_hours(
    division: Division,
    caseload: Decimal,
    new_intake: Decimal,
    assumptions: &AssumptionSet,
    step_number: u32,
) -> BillableHoursResult {
    let params = &assumptions.caseload;
    let weekly_hours = weekly_direct_hours(division, assumptions);
    let buffer = if assumptions.features.cancellation_buffer {
        params.cancellation_buffer
    } else {
        Decimal::ONE
    };

    let direct_care = caseload * weekly_hours * WEEKS_PER_MONTH * buffer;
    let supervision = caseload * params.supervision_weekly_hours * WEEKS_PER_MONTH;
    let assessments = new_intake + caseload / REASSESSMENT_INTERVAL_MONTHS;
    let assessment = assessments * params.hours_per_assessment;

    let hours = ServiceAmounts {
        direct_care,
        supervision,
        assessment,
    };

    let division_id = division_id(division);
    let audit_step = AuditStep {
        step_number,
        rule_id: format!("billable_hours_{}", division_id),
        rule_name: "Billable Hours".to_string(),
        policy_ref: "4.33 weeks/month; re-assessment every 6 months".to_string(),
        input: serde_json::json!({
            "division": division_id,
            "caseload": audit_value(caseload),
            "new_intake": audit_value(new_intake),
            "weekly_direct_hours": audit_value(weekly_hours),
            "supervision_weekly_hours": audit_value(params.supervision_weekly_hours),
            "cancellation_buffer": audit_value(buffer)
        }),
        output: serde_json::json!({
            "direct_care": audit_value(direct_care),
            "supervision": audit_value(supervision),
            "assessment": audit_value(assessment)
        }),
        reasoning: format!(
            "{} cases at {}h/week direct care and {}h/week supervision; {} assessments at {}h each",
            audit_value(caseload),
            audit_value(weekly_hours),
            audit_value(params.supervision_weekly_hours),
            audit_value(assessments),
            audit_value(params.hours_per_assessment)
        ),
    };

    BillableHoursResult { hours, audit_step }
}

pub(crate) fn division_id(division: Division) -> &'static str {
    match division {
        Division::InHome => "in_home",
        Division::Clinic => "clinic",
    }
}
