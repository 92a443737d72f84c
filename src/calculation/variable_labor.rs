//! Variable labor (cost of service).

use rust_decimal::Decimal;

use crate::config::PayRates;
use crate::models::{AuditStep, Division, ServiceAmounts, VariableLabor};

use super::audit_value;
use super::billable_hours::division_id;

/// The result of the variable-labor step for one division.
#[derive(Debug, Clone)]
pub struct VariableLaborResult {
    /// Technician and analyst payroll.
    pub labor: VariableLabor,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Costs billable hours at hourly pay, loaded by the fringe multiplier.
///
/// Technicians deliver direct care; analysts deliver supervision and
/// assessment.
pub fn calculate_variable_labor(
    division: Division,
    hours: &ServiceAmounts,
    pay: &PayRates,
    step_number: u32,
) -> VariableLaborResult {
    let analyst_hours = hours.supervision + hours.assessment;
    let labor = VariableLabor {
        technician: hours.direct_care * pay.technician_hourly * pay.fringe_multiplier,
        analyst: analyst_hours * pay.analyst_hourly * pay.fringe_multiplier,
    };

    let division_id = division_id(division);
    let audit_step = AuditStep {
        step_number,
        rule_id: format!("variable_labor_{}", division_id),
        rule_name: "Variable Labor".to_string(),
        policy_ref: "hourly pay * fringe".to_string(),
        input: serde_json::json!({
            "division": division_id,
            "technician_hours": audit_value(hours.direct_care),
            "analyst_hours": audit_value(analyst_hours),
            "technician_hourly": audit_value(pay.technician_hourly),
            "analyst_hourly": audit_value(pay.analyst_hourly),
            "fringe_multiplier": audit_value(pay.fringe_multiplier)
        }),
        output: serde_json::json!({
            "technician": audit_value(labor.technician),
            "analyst": audit_value(labor.analyst),
            "total": audit_value(labor.total())
        }),
        reasoning: format!(
            "{}h technician at ${} and {}h analyst at ${}, loaded by {}x fringe",
            audit_value(hours.direct_care),
            audit_value(pay.technician_hourly),
            audit_value(analyst_hours),
            audit_value(pay.analyst_hourly),
            audit_value(pay.fringe_multiplier)
        ),
    };

    VariableLaborResult { labor, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// VL-001: technician and analyst payroll with fringe
    #[test]
    fn test_variable_labor_with_fringe() {
        let hours = ServiceAmounts {
            direct_care: dec("100"),
            supervision: dec("10"),
            assessment: dec("5"),
        };
        let result = calculate_variable_labor(Division::InHome, &hours, &PayRates::default(), 1);

        // 100 * 25 * 1.2
        assert_eq!(result.labor.technician, dec("3000"));
        // 15 * 85 * 1.2
        assert_eq!(result.labor.analyst, dec("1530"));
        assert_eq!(result.labor.total(), dec("4530"));
    }

    #[test]
    fn test_fringe_of_one_is_base_pay() {
        let pay = PayRates {
            fringe_multiplier: Decimal::ONE,
            ..PayRates::default()
        };
        let hours = ServiceAmounts {
            direct_care: dec("8"),
            supervision: Decimal::ZERO,
            assessment: Decimal::ZERO,
        };
        let result = calculate_variable_labor(Division::Clinic, &hours, &pay, 1);
        assert_eq!(result.labor.technician, dec("200"));
        assert_eq!(result.labor.analyst, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_reasoning_mentions_fringe() {
        let result = calculate_variable_labor(
            Division::InHome,
            &ServiceAmounts::default(),
            &PayRates::default(),
            4,
        );
        assert_eq!(result.audit_step.rule_id, "variable_labor_in_home");
        assert!(result.audit_step.reasoning.contains("1.2x fringe"));
    }
}
