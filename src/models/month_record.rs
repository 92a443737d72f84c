//! Monthly projection records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, Division, RoleCategory, ServiceAmounts, VariableLabor};

/// One division's figures for one month.
///
/// Before a division launches every figure is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionMonth {
    /// The division.
    pub division: Division,
    /// Whether the division is serving cases this month.
    pub launched: bool,
    /// Active caseload (fractional; rounded only for display).
    pub caseload: Decimal,
    /// Cases that entered service this month.
    pub new_intake: Decimal,
    /// Billable hours per service code.
    pub hours: ServiceAmounts,
    /// Revenue per service code.
    pub revenue: ServiceAmounts,
    /// Variable labor (cost of service).
    pub variable_labor: VariableLabor,
    /// Fixed salaried labor booked to the division.
    pub fixed_labor: Decimal,
}

impl DivisionMonth {
    /// A division month with every figure zero.
    pub fn empty(division: Division) -> Self {
        Self {
            division,
            launched: false,
            caseload: Decimal::ZERO,
            new_intake: Decimal::ZERO,
            hours: ServiceAmounts::default(),
            revenue: ServiceAmounts::default(),
            variable_labor: VariableLabor::default(),
            fixed_labor: Decimal::ZERO,
        }
    }

    /// Revenue less variable and fixed labor, before operating expense.
    pub fn contribution(&self) -> Decimal {
        self.revenue.total() - self.variable_labor.total() - self.fixed_labor
    }
}

/// Flat operating-expense components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatExpense {
    /// Fixed monthly base.
    pub base: Decimal,
    /// Percentage-of-revenue component.
    pub revenue_share: Decimal,
    /// Annual administrative step.
    pub annual_step: Decimal,
}

/// Which accounting cost applied in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountingBasis {
    /// Fractional bookkeeping as a percentage of revenue.
    Bookkeeping,
    /// Salaried finance executive above the revenue threshold.
    FinanceExecutive,
}

/// Line-item operating-expense components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemizedExpense {
    /// Marketing and advertising.
    pub marketing: Decimal,
    /// Technology per head.
    pub technology: Decimal,
    /// Clinical documentation tooling.
    pub documentation: Decimal,
    /// Billing / revenue-cycle fee.
    pub billing_fees: Decimal,
    /// Compliance subscription.
    pub compliance: Decimal,
    /// Legal retainer.
    pub legal: Decimal,
    /// Recruiting subscription.
    pub recruiting: Decimal,
    /// Equipment for new heads.
    pub equipment: Decimal,
    /// Bookkeeping or finance executive.
    pub accounting: Decimal,
    /// Which accounting cost applied.
    pub accounting_basis: AccountingBasis,
    /// Total headcount used for per-head costs.
    pub total_headcount: Decimal,
    /// Heads added since the previous month.
    pub new_heads: Decimal,
}

/// Operating expense for a month, flat or itemized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperatingExpense {
    /// Flat formula.
    Flat(FlatExpense),
    /// Line-item budget.
    Itemized(ItemizedExpense),
}

impl OperatingExpense {
    /// Total operating expense.
    pub fn total(&self) -> Decimal {
        match self {
            OperatingExpense::Flat(flat) => flat.base + flat.revenue_share + flat.annual_step,
            OperatingExpense::Itemized(items) => {
                items.marketing
                    + items.technology
                    + items.documentation
                    + items.billing_fees
                    + items.compliance
                    + items.legal
                    + items.recruiting
                    + items.equipment
                    + items.accounting
            }
        }
    }
}

/// An active salaried role and its resolved cost for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffCost {
    /// Role label.
    pub role: String,
    /// Division the cost is booked to.
    pub division: Division,
    /// Headcount resolution rule.
    pub category: RoleCategory,
    /// Headcount after applying the resolution rule.
    pub resolved_count: Decimal,
    /// Monthly cost, fringe included.
    pub monthly_cost: Decimal,
}

/// One projected month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Projection month, 1..=60.
    pub month: u32,
    /// Projection year, 1..=5.
    pub year: u32,
    /// Quarter within the year, 1..=4.
    pub quarter: u32,
    /// In-home division figures.
    pub in_home: DivisionMonth,
    /// Clinic division figures; `None` when the model has one division.
    pub clinic: Option<DivisionMonth>,
    /// Enterprise revenue.
    pub revenue: Decimal,
    /// Enterprise variable labor split.
    pub variable_labor: VariableLabor,
    /// Enterprise fixed labor.
    pub fixed_labor: Decimal,
    /// Resolved salaried headcount.
    pub fixed_headcount: Decimal,
    /// Direct-care headcount implied by billable hours.
    pub direct_care_headcount: Decimal,
    /// Operating expense.
    pub operating_expense: OperatingExpense,
    /// Profit-share deduction.
    pub profit_share: Decimal,
    /// Earnings before interest, taxes, depreciation, amortization.
    pub ebitda: Decimal,
    /// Running sum of EBITDA over months 1..=month.
    pub cumulative_ebitda: Decimal,
    /// Active salaried roles with resolved cost.
    pub staff: Vec<StaffCost>,
    /// Calculation steps for this month.
    pub audit_steps: Vec<AuditStep>,
}

impl MonthRecord {
    /// Divisions present in the model, in-home first.
    pub fn divisions(&self) -> impl Iterator<Item = &DivisionMonth> {
        std::iter::once(&self.in_home).chain(self.clinic.as_ref())
    }

    /// Total active caseload.
    pub fn caseload(&self) -> Decimal {
        self.divisions().map(|d| d.caseload).sum()
    }

    /// Billable hours per service code across divisions.
    pub fn hours(&self) -> ServiceAmounts {
        self.divisions()
            .fold(ServiceAmounts::default(), |acc, d| acc + d.hours)
    }

    /// Revenue per service code across divisions.
    pub fn revenue_by_service(&self) -> ServiceAmounts {
        self.divisions()
            .fold(ServiceAmounts::default(), |acc, d| acc + d.revenue)
    }

    /// Clinic caseload, zero when there is no clinic division.
    pub fn clinic_caseload(&self) -> Decimal {
        self.clinic.as_ref().map_or(Decimal::ZERO, |c| c.caseload)
    }
}
