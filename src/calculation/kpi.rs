//! Headline KPIs shown alongside the projection.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::{format_cases, format_currency, format_margin};
use crate::models::{HireEntry, MonthRecord, roadmap_headcount};

use super::aggregation::margin_pct;
use super::milestone::{Milestone, MilestoneField, find_first_month};

/// Default cumulative-profit milestone targets: $500k, $1M, $2M.
pub const DEFAULT_MILESTONE_TARGETS: [Decimal; 3] = [
    Decimal::from_parts(500_000, 0, 0, false, 0),
    Decimal::from_parts(1_000_000, 0, 0, false, 0),
    Decimal::from_parts(2_000_000, 0, 0, false, 0),
];

const FINAL_YEAR_MONTHS: usize = 12;

/// A cumulative-profit target and the month it is first reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneResult {
    /// Cumulative EBITDA target.
    pub target: Decimal,
    /// First month at or above the target.
    pub reached: Milestone,
}

/// Headline figures for a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlineKpis {
    /// Cumulative-profit milestones in target order.
    pub milestones: Vec<MilestoneResult>,
    /// First month with non-negative EBITDA.
    pub break_even: Milestone,
    /// EBITDA over the last 12 months of the horizon.
    pub final_year_ebitda: Decimal,
    /// EBITDA margin over the last 12 months, zero without revenue.
    pub final_year_margin_pct: Decimal,
    /// Total caseload in the last month.
    pub final_caseload: Decimal,
    /// Literal fixed-salary headcount on the roadmap.
    pub roadmap_headcount: Decimal,
}

impl HeadlineKpis {
    /// Display lines for the headline panel, rounded like the tables.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .milestones
            .iter()
            .map(|m| format!("{} cumulative EBITDA: {}", format_currency(m.target), m.reached))
            .collect();
        lines.push(format!("Break-even: {}", self.break_even));
        lines.push(format!(
            "Final-year EBITDA: {} ({} margin)",
            format_currency(self.final_year_ebitda),
            format_margin(self.final_year_margin_pct)
        ));
        lines.push(format!("Final caseload: {} cases", format_cases(self.final_caseload)));
        lines.push(format!("Roadmap headcount: {}", self.roadmap_headcount.normalize()));
        lines
    }
}

/// Computes headline KPIs.
pub fn headline_kpis(months: &[MonthRecord], hires: &[HireEntry], targets: &[Decimal]) -> HeadlineKpis {
    let milestones = targets
        .iter()
        .map(|&target| MilestoneResult {
            target,
            reached: find_first_month(months, MilestoneField::CumulativeEbitda, target),
        })
        .collect();

    let final_year = &months[months.len().saturating_sub(FINAL_YEAR_MONTHS)..];
    let final_year_ebitda: Decimal = final_year.iter().map(|m| m.ebitda).sum();
    let final_year_revenue: Decimal = final_year.iter().map(|m| m.revenue).sum();

    HeadlineKpis {
        milestones,
        break_even: find_first_month(months, MilestoneField::Ebitda, Decimal::ZERO),
        final_year_ebitda,
        final_year_margin_pct: margin_pct(final_year_ebitda, final_year_revenue),
        final_caseload: months.last().map_or(Decimal::ZERO, |m| m.caseload()),
        roadmap_headcount: roadmap_headcount(hires),
    }
}
