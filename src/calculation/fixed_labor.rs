//! Fixed (salaried) labor from the hiring roadmap.
//!
//! Each active hire costs `salary * resolved_count / 12 * fringe` per month.
//! Care coordinators ignore the planned headcount and follow the
//! span-of-control rule instead: one coordinator per 50 cases, minimum one.

use rust_decimal::Decimal;

use crate::config::AssumptionSet;
use crate::models::{AuditStep, AuditWarning, Division, HireEntry, RoleCategory, StaffCost};

use super::audit_value;
use super::volume::clinic_launched;

/// Active cases one care coordinator can cover.
pub const CASES_PER_COORDINATOR: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Warning code raised when a clinic hire is planned without a clinic division.
pub const CLINIC_HIRE_WITHOUT_DIVISION: &str = "CLINIC_HIRE_WITHOUT_DIVISION";

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The result of the fixed-labor step for one month.
#[derive(Debug, Clone)]
pub struct FixedLaborResult {
    /// Fixed labor booked to the in-home division.
    pub in_home: Decimal,
    /// Fixed labor booked to the clinic division.
    pub clinic: Decimal,
    /// Resolved salaried headcount.
    pub headcount: Decimal,
    /// Active roles with resolved cost.
    pub staff: Vec<StaffCost>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl FixedLaborResult {
    /// Enterprise fixed labor.
    pub fn total(&self) -> Decimal {
        self.in_home + self.clinic
    }
}

/// Coordinators required for a total caseload: `max(1, ceil(caseload / 50))`.
///
/// ```
/// use aba_proforma::calculation::required_coordinators;
/// use rust_decimal::Decimal;
///
/// assert_eq!(required_coordinators(Decimal::from(120)), Decimal::from(3));
/// assert_eq!(required_coordinators(Decimal::from(10)), Decimal::ONE);
/// ```
pub fn required_coordinators(total_caseload: Decimal) -> Decimal {
    (total_caseload / CASES_PER_COORDINATOR).ceil().max(Decimal::ONE)
}

/// Returns true if a hire's cost is booked in `month`.
///
/// Clinic hires are only booked once the clinic division exists and has
/// launched.
pub fn hire_is_booked(hire: &HireEntry, month: u32, assumptions: &AssumptionSet) -> bool {
    if !hire.is_active(month) {
        return false;
    }
    match hire.division {
        Division::InHome => true,
        Division::Clinic => {
            assumptions.features.clinic_division && clinic_launched(month, &assumptions.clinic)
        }
    }
}

/// Resolves the headcount of one hire for a month.
pub fn resolved_count(hire: &HireEntry, total_caseload: Decimal) -> Decimal {
    match hire.category {
        RoleCategory::Standard => hire.headcount,
        RoleCategory::CareCoordinator => required_coordinators(total_caseload),
    }
}

/// Computes fixed labor for one month.
pub fn calculate_fixed_labor(
    month: u32,
    hires: &[HireEntry],
    total_caseload: Decimal,
    assumptions: &AssumptionSet,
    step_number: u32,
) -> FixedLaborResult {
    let fringe = assumptions.pay.fringe_multiplier;
    let mut in_home = Decimal::ZERO;
    let mut clinic = Decimal::ZERO;
    let mut headcount = Decimal::ZERO;
    let mut staff = Vec::new();

    for hire in hires.iter().filter(|h| hire_is_booked(h, month, assumptions)) {
        let count = resolved_count(hire, total_caseload);
        let monthly_cost = hire.annual_salary * count / MONTHS_PER_YEAR * fringe;

        match hire.division {
            Division::InHome => in_home += monthly_cost,
            Division::Clinic => clinic += monthly_cost,
        }
        headcount += count;

        staff.push(StaffCost {
            role: hire.role.clone(),
            division: hire.division,
            category: hire.category,
            resolved_count: count,
            monthly_cost,
        });
    }

    let coordinators: Vec<&StaffCost> = staff
        .iter()
        .filter(|s| s.category == RoleCategory::CareCoordinator)
        .collect();
    let reasoning = if coordinators.is_empty() {
        format!(
            "{} active roles totalling {} heads cost ${} this month",
            staff.len(),
            audit_value(headcount),
            audit_value(in_home + clinic)
        )
    } else {
        format!(
            "{} active roles totalling {} heads cost ${} this month; \
             care coordinators resolved to {} for {} cases",
            staff.len(),
            audit_value(headcount),
            audit_value(in_home + clinic),
            audit_value(required_coordinators(total_caseload)),
            audit_value(total_caseload)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "fixed_labor".to_string(),
        rule_name: "Fixed Labor".to_string(),
        policy_ref: "salary / 12 * fringe; 1 coordinator per 50 cases".to_string(),
        input: serde_json::json!({
            "month": month,
            "roadmap_entries": hires.len(),
            "total_caseload": audit_value(total_caseload),
            "fringe_multiplier": audit_value(fringe)
        }),
        output: serde_json::json!({
            "active_roles": staff.len(),
            "headcount": audit_value(headcount),
            "in_home": audit_value(in_home),
            "clinic": audit_value(clinic)
        }),
        reasoning,
    };

    FixedLaborResult {
        in_home,
        clinic,
        headcount,
        staff,
        audit_step,
    }
}

/// Warnings about roadmap entries the model cannot book.
pub fn roadmap_warnings(hires: &[HireEntry], assumptions: &AssumptionSet) -> Vec<AuditWarning> {
    if assumptions.features.clinic_division {
        return Vec::new();
    }

    hires
        .iter()
        .filter(|h| h.division == Division::Clinic)
        .map(|h| AuditWarning {
            code: CLINIC_HIRE_WITHOUT_DIVISION.to_string(),
            message: format!(
                "'{}' is a clinic hire but the clinic division is disabled; excluded from fixed labor",
                h.role
            ),
            severity: "medium".to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hire(month: u32, role: &str, salary: &str, count: &str) -> HireEntry {
        HireEntry {
            effective_month: month,
            role: role.to_string(),
            annual_salary: dec(salary),
            headcount: dec(count),
            division: Division::infer_from_label(role),
            category: RoleCategory::infer_from_label(role),
        }
    }

    fn clinic_assumptions(launch_month: u32) -> AssumptionSet {
        let mut assumptions = AssumptionSet::default();
        assumptions.features.clinic_division = true;
        assumptions.clinic.launch_month = launch_month;
        assumptions
    }

    /// FL-001: salary / 12 * fringe for active hires only
    #[test]
    fn test_active_hires_only() {
        let hires = vec![
            hire(1, "Clinical Director", "120000", "1"),
            hire(13, "State Director", "150000", "1"),
        ];
        let result =
            calculate_fixed_labor(12, &hires, dec("95"), &AssumptionSet::default(), 1);

        // 120000 / 12 * 1.2
        assert_eq!(result.in_home, dec("12000"));
        assert_eq!(result.clinic, Decimal::ZERO);
        assert_eq!(result.staff.len(), 1);
        assert_eq!(result.headcount, dec("1"));
    }

    /// FL-002: coordinator count follows caseload, not the roadmap
    #[test]
    fn test_coordinator_resolves_by_span_of_control() {
        let hires = vec![hire(1, "Care Coordinator", "60000", "1")];
        let result =
            calculate_fixed_labor(5, &hires, dec("120"), &AssumptionSet::default(), 1);

        assert_eq!(result.staff[0].resolved_count, dec("3"));
        // 60000 * 3 / 12 * 1.2
        assert_eq!(result.total(), dec("18000"));
        assert!(result.audit_step.reasoning.contains("resolved to 3"));
    }

    #[test]
    fn test_coordinator_minimum_one() {
        assert_eq!(required_coordinators(Decimal::ZERO), Decimal::ONE);
        assert_eq!(required_coordinators(dec("-20")), Decimal::ONE);
        assert_eq!(required_coordinators(dec("50")), Decimal::ONE);
        assert_eq!(required_coordinators(dec("50.01")), dec("2"));
    }

    #[test]
    fn test_zero_count_hire_is_listed_with_zero_cost() {
        let hires = vec![hire(1, "State Director", "150000", "0")];
        let result =
            calculate_fixed_labor(1, &hires, dec("40"), &AssumptionSet::default(), 1);
        assert_eq!(result.staff.len(), 1);
        assert_eq!(result.staff[0].monthly_cost, Decimal::ZERO);
    }

    /// FL-003: clinic hires are zero before launch
    #[test]
    fn test_clinic_hire_gated_by_launch() {
        let hires = vec![hire(1, "Clinic Manager", "84000", "1")];
        let assumptions = clinic_assumptions(13);

        let before = calculate_fixed_labor(12, &hires, dec("95"), &assumptions, 1);
        assert_eq!(before.clinic, Decimal::ZERO);
        assert!(before.staff.is_empty());

        let after = calculate_fixed_labor(13, &hires, dec("100"), &assumptions, 1);
        assert_eq!(after.clinic, dec("8400"));
        assert_eq!(after.in_home, Decimal::ZERO);
    }

    #[test]
    fn test_clinic_hire_excluded_without_division() {
        let hires = vec![hire(1, "Clinic Manager", "84000", "1")];
        let result =
            calculate_fixed_labor(30, &hires, dec("40"), &AssumptionSet::default(), 1);
        assert_eq!(result.total(), Decimal::ZERO);

        let warnings = roadmap_warnings(&hires, &AssumptionSet::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, CLINIC_HIRE_WITHOUT_DIVISION);
        assert!(roadmap_warnings(&hires, &clinic_assumptions(13)).is_empty());
    }

    #[test]
    fn test_fractional_headcount() {
        let hires = vec![hire(1, "Bookkeeper", "48000", "0.5")];
        let result =
            calculate_fixed_labor(1, &hires, dec("40"), &AssumptionSet::default(), 1);
        assert_eq!(result.total(), dec("2400"));
        assert_eq!(result.headcount, dec("0.5"));
    }
}
