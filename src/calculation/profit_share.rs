//! Profit-share obligation on combined profit.
//!
//! Once the clinic division is open, a fixed percentage of positive
//! combined profit is owed to the clinic partner.

use rust_decimal::Decimal;

use crate::config::AssumptionSet;
use crate::models::AuditStep;

use super::audit_value;
use super::volume::clinic_launched;

/// The result of the profit-share step.
#[derive(Debug, Clone)]
pub struct ProfitShareResult {
    /// Amount deducted from EBITDA.
    pub amount: Decimal,
    /// Whether the share applied this month.
    pub applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the profit-share deduction for one month.
///
/// The share applies only when the feature is enabled, the clinic
/// division exists and has launched, and pre-share profit is positive.
pub fn calculate_profit_share(
    month: u32,
    pre_share_profit: Decimal,
    assumptions: &AssumptionSet,
    step_number: u32,
) -> ProfitShareResult {
    let rate = assumptions.profit_share.rate;
    let enabled = assumptions.features.profit_share && assumptions.features.clinic_division;
    let launched = clinic_launched(month, &assumptions.clinic);

    let (amount, applied, reasoning) = if !enabled {
        (
            Decimal::ZERO,
            false,
            "No profit-share agreement in this model".to_string(),
        )
    } else if !launched {
        (
            Decimal::ZERO,
            false,
            format!(
                "Clinic opens in month {}; no share owed in month {}",
                assumptions.clinic.launch_month, month
            ),
        )
    } else if pre_share_profit <= Decimal::ZERO {
        (
            Decimal::ZERO,
            false,
            format!(
                "Combined profit ${} is not positive; no share owed",
                audit_value(pre_share_profit)
            ),
        )
    } else {
        let amount = pre_share_profit * rate;
        (
            amount,
            true,
            format!(
                "{}% of ${} combined profit = ${}",
                audit_value(rate * Decimal::ONE_HUNDRED),
                audit_value(pre_share_profit),
                audit_value(amount)
            ),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "profit_share".to_string(),
        rule_name: "Profit Share".to_string(),
        policy_ref: "share of positive combined profit after clinic launch".to_string(),
        input: serde_json::json!({
            "month": month,
            "pre_share_profit": audit_value(pre_share_profit),
            "rate": audit_value(rate),
            "clinic_launched": enabled && launched
        }),
        output: serde_json::json!({
            "applied": applied,
            "amount": audit_value(amount)
        }),
        reasoning,
    };

    ProfitShareResult {
        amount,
        applied,
        audit_step,
    }
}
