//! Operating expense, flat or itemized.
//!
//! Operating expense is an enterprise cost. It is not allocated to
//! divisions, so divisional figures stop at contribution.

use rust_decimal::Decimal;

use crate::config::AssumptionSet;
use crate::models::{
    AccountingBasis, AuditStep, FlatExpense, ItemizedExpense, OperatingExpense, year_of,
};

use super::audit_value;

/// Cases covered by one clinical documentation tool seat.
pub const DOCUMENTATION_CASES_PER_SEAT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Enterprise figures the operating-expense step depends on.
#[derive(Debug, Clone, Copy)]
pub struct OperatingInputs {
    /// Projection month.
    pub month: u32,
    /// Enterprise revenue.
    pub revenue: Decimal,
    /// Enterprise direct-care hours.
    pub direct_care_hours: Decimal,
    /// Total active caseload.
    pub caseload: Decimal,
    /// Resolved salaried headcount.
    pub fixed_headcount: Decimal,
    /// Total headcount in the previous month (zero before month 1).
    pub previous_headcount: Decimal,
}

/// The result of the operating-expense step.
#[derive(Debug, Clone)]
pub struct OperatingExpenseResult {
    /// Operating expense.
    pub expense: OperatingExpense,
    /// Direct-care headcount implied by billable hours.
    pub direct_care_headcount: Decimal,
    /// Salaried plus direct-care headcount.
    pub total_headcount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Technicians needed to deliver `direct_care_hours`, rounded up.
///
/// Zero when the full-time norm is not positive.
pub fn direct_care_headcount(direct_care_hours: Decimal, full_time_hours: Decimal) -> Decimal {
    if full_time_hours <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (direct_care_hours / full_time_hours).ceil().max(Decimal::ZERO)
}

/// Documentation tool seats for a caseload (one per 30 cases, rounded up).
pub fn documentation_seats(caseload: Decimal) -> Decimal {
    (caseload / DOCUMENTATION_CASES_PER_SEAT)
        .ceil()
        .max(Decimal::ZERO)
}

/// Computes operating expense for one month.
pub fn calculate_operating_expense(
    inputs: &OperatingInputs,
    assumptions: &AssumptionSet,
    step_number: u32,
) -> OperatingExpenseResult {
    let direct_heads = direct_care_headcount(
        inputs.direct_care_hours,
        assumptions.itemized_overhead.full_time_billable_hours,
    );
    let total_headcount = inputs.fixed_headcount + direct_heads;

    let (expense, policy_ref, reasoning) = if assumptions.features.itemized_overhead {
        let items = itemized_expense(inputs, total_headcount, assumptions);
        let reasoning = format!(
            "Line-item budget for {} heads ({} new) and {} cases; accounting as {}",
            audit_value(total_headcount),
            audit_value(items.new_heads),
            audit_value(inputs.caseload),
            match items.accounting_basis {
                AccountingBasis::Bookkeeping => "fractional bookkeeping",
                AccountingBasis::FinanceExecutive => "salaried finance executive",
            }
        );
        (
            OperatingExpense::Itemized(items),
            "itemized operating budget",
            reasoning,
        )
    } else {
        let flat = flat_expense(inputs, assumptions);
        let reasoning = format!(
            "${} base + ${} of revenue + ${} year-{} administrative step",
            audit_value(flat.base),
            audit_value(flat.revenue_share),
            audit_value(flat.annual_step),
            year_of(inputs.month)
        );
        (
            OperatingExpense::Flat(flat),
            "base + % revenue + annual step",
            reasoning,
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "operating_expense".to_string(),
        rule_name: "Operating Expense".to_string(),
        policy_ref: policy_ref.to_string(),
        input: serde_json::json!({
            "month": inputs.month,
            "revenue": audit_value(inputs.revenue),
            "caseload": audit_value(inputs.caseload),
            "fixed_headcount": audit_value(inputs.fixed_headcount),
            "direct_care_headcount": audit_value(direct_heads)
        }),
        output: serde_json::to_value(&expense).unwrap_or(serde_json::Value::Null),
        reasoning,
    };

    OperatingExpenseResult {
        expense,
        direct_care_headcount: direct_heads,
        total_headcount,
        audit_step,
    }
}

fn flat_expense(inputs: &OperatingInputs, assumptions: &AssumptionSet) -> FlatExpense {
    let params = &assumptions.flat_overhead;
    FlatExpense {
        base: params.base_monthly,
        revenue_share: inputs.revenue * params.revenue_pct,
        annual_step: Decimal::from(year_of(inputs.month)) * params.annual_step,
    }
}

fn itemized_expense(
    inputs: &OperatingInputs,
    total_headcount: Decimal,
    assumptions: &AssumptionSet,
) -> ItemizedExpense {
    let params = &assumptions.itemized_overhead;
    let new_heads = (total_headcount - inputs.previous_headcount).max(Decimal::ZERO);

    let annualized_revenue = inputs.revenue * MONTHS_PER_YEAR;
    let (accounting, accounting_basis) = if assumptions.features.cfo_threshold
        && annualized_revenue >= params.cfo_revenue_threshold
    {
        (
            params.cfo_annual_salary / MONTHS_PER_YEAR * assumptions.pay.fringe_multiplier,
            AccountingBasis::FinanceExecutive,
        )
    } else {
        (
            inputs.revenue * params.accounting_revenue_pct,
            AccountingBasis::Bookkeeping,
        )
    };

    ItemizedExpense {
        marketing: params.marketing_monthly,
        technology: total_headcount * params.technology_per_head,
        documentation: documentation_seats(inputs.caseload) * params.documentation_per_seat,
        billing_fees: inputs.revenue * params.billing_fee_pct,
        compliance: params.compliance_monthly,
        legal: params.legal_monthly,
        recruiting: params.recruiting_monthly,
        equipment: new_heads * params.equipment_per_new_hire,
        accounting,
        accounting_basis,
        total_headcount,
        new_heads,
    }
}
