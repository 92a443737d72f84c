//! Revenue per service code.

use rust_decimal::Decimal;

use crate::config::BillingRates;
use crate::models::{AuditStep, Division, ServiceAmounts};

use super::audit_value;
use super::billable_hours::division_id;

/// Billing units per hour (15-minute increments).
pub const UNITS_PER_HOUR: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// The result of the revenue step for one division.
#[derive(Debug, Clone)]
pub struct RevenueResult {
    /// Billing units per service code.
    pub units: ServiceAmounts,
    /// Revenue per service code.
    pub revenue: ServiceAmounts,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Converts billable hours to revenue: hours * 4 units * unit rate.
///
/// # Examples
///
/// ```
/// use aba_proforma::calculation::calculate_revenue;
/// use aba_proforma::config::BillingRates;
/// use aba_proforma::models::{Division, ServiceAmounts};
/// use rust_decimal::Decimal;
///
/// let hours = ServiceAmounts {
///     direct_care: Decimal::from(10),
///     supervision: Decimal::from(2),
///     assessment: Decimal::from(1),
/// };
/// let result = calculate_revenue(Division::InHome, &hours, &BillingRates::default(), 1);
/// assert_eq!(result.revenue.direct_care, Decimal::from(680));
/// assert_eq!(result.revenue.total(), Decimal::from(680 + 184 + 116));
/// ```
pub fn calculate_revenue(
    division: Division,
    hours: &ServiceAmounts,
    billing: &BillingRates,
    step_number: u32,
) -> RevenueResult {
    let units = hours.map(|_, h| h * UNITS_PER_HOUR);
    let revenue = units.map(|code, u| u * billing.unit_rate(code));

    let division_id = division_id(division);
    let audit_step = AuditStep {
        step_number,
        rule_id: format!("revenue_{}", division_id),
        rule_name: "Service Revenue".to_string(),
        policy_ref: "CPT 97153/97155/97151, 4 units per hour".to_string(),
        input: serde_json::json!({
            "division": division_id,
            "hours": {
                "97153": audit_value(hours.direct_care),
                "97155": audit_value(hours.supervision),
                "97151": audit_value(hours.assessment)
            },
            "unit_rates": {
                "97153": audit_value(billing.direct_care),
                "97155": audit_value(billing.supervision),
                "97151": audit_value(billing.assessment)
            }
        }),
        output: serde_json::json!({
            "97153": audit_value(revenue.direct_care),
            "97155": audit_value(revenue.supervision),
            "97151": audit_value(revenue.assessment),
            "total": audit_value(revenue.total())
        }),
        reasoning: format!(
            "{} billable units across three service codes yield ${}",
            audit_value(units.total()),
            audit_value(revenue.total())
        ),
    };

    RevenueResult {
        units,
        revenue,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// RV-001: each hour bills four units at the code's rate
    #[test]
    fn test_units_and_revenue() {
        let hours = ServiceAmounts {
            direct_care: dec("2424.8"),
            supervision: dec("346.4"),
            assessment: dec("93.3333"),
        };
        let result = calculate_revenue(Division::InHome, &hours, &BillingRates::default(), 1);

        assert_eq!(result.units.direct_care, dec("9699.2"));
        assert_eq!(result.revenue.direct_care, dec("164886.4"));
        assert_eq!(result.revenue.supervision, dec("31868.8"));
        assert_eq!(result.revenue.assessment, dec("93.3333") * dec("116"));
    }

    #[test]
    fn test_zero_hours_zero_revenue() {
        let result = calculate_revenue(
            Division::Clinic,
            &ServiceAmounts::default(),
            &BillingRates::default(),
            2,
        );
        assert_eq!(result.revenue.total(), Decimal::ZERO);
        assert_eq!(result.audit_step.rule_id, "revenue_clinic");
        assert_eq!(result.audit_step.step_number, 2);
    }

    #[test]
    fn test_audit_output_keyed_by_cpt_code() {
        let hours = ServiceAmounts {
            direct_care: dec("1"),
            supervision: dec("1"),
            assessment: dec("1"),
        };
        let result = calculate_revenue(Division::InHome, &hours, &BillingRates::default(), 1);
        assert_eq!(result.audit_step.output["97153"].as_str().unwrap(), "68");
        assert_eq!(result.audit_step.output["97155"].as_str().unwrap(), "92");
        assert_eq!(result.audit_step.output["97151"].as_str().unwrap(), "116");
        assert_eq!(result.audit_step.output["total"].as_str().unwrap(), "276");
    }
}
