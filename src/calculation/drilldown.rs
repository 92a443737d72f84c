//! Drill-down: explains a period's totals from its constituent months.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditBreakdown, Division, Granularity, MonthRecord, PeriodRecord, ServiceCode, ServiceLine,
    StaffCostLine, VariableLabor,
};

use super::aggregation::aggregate;

/// Builds the audit breakdown for one aggregated period.
///
/// A single month reports its staff snapshot as-is together with its
/// calculation steps. Quarters and years sum each role's cost across every
/// month the role was on payroll.
pub fn explain(period: &PeriodRecord, months: &[MonthRecord]) -> AuditBreakdown {
    let members: Vec<&MonthRecord> = months
        .iter()
        .filter(|m| period.period.contains(m.month))
        .collect();
    let has_clinic = members.iter().any(|m| m.clinic.is_some());

    let services = ServiceCode::ALL
        .iter()
        .map(|&code| ServiceLine {
            code,
            cpt_code: code.cpt_code().to_string(),
            hours: members.iter().map(|m| m.hours().get(code)).sum(),
            revenue: members.iter().map(|m| m.revenue_by_service().get(code)).sum(),
            in_home_revenue: members.iter().map(|m| m.in_home.revenue.get(code)).sum(),
            clinic_revenue: has_clinic.then(|| {
                members
                    .iter()
                    .filter_map(|m| m.clinic.as_ref())
                    .map(|c| c.revenue.get(code))
                    .sum()
            }),
        })
        .collect();

    let variable_labor = members
        .iter()
        .fold(VariableLabor::default(), |acc, m| acc + m.variable_labor);

    let (staff, steps) = match (period.period.granularity(), members.as_slice()) {
        (Granularity::Monthly, [month]) => (snapshot_lines(month), month.audit_steps.clone()),
        _ => (summed_lines(&members), Vec::new()),
    };
    let fixed_labor_total = staff.iter().map(|line| line.total_cost).sum();

    AuditBreakdown {
        period: period.period,
        label: period.label.clone(),
        services,
        variable_labor,
        staff,
        fixed_labor_total,
        steps,
    }
}

/// Aggregates `months` at `granularity` and explains the period labelled
/// `label`.
pub fn explain_label(
    months: &[MonthRecord],
    granularity: Granularity,
    label: &str,
) -> EngineResult<AuditBreakdown> {
    let periods = aggregate(months, granularity);
    let period = periods
        .iter()
        .find(|p| p.label == label)
        .ok_or_else(|| EngineError::PeriodNotFound {
            label: label.to_string(),
        })?;
    Ok(explain(period, months))
}

fn snapshot_lines(month: &MonthRecord) -> Vec<StaffCostLine> {
    month
        .staff
        .iter()
        .map(|s| StaffCostLine {
            role: s.role.clone(),
            division: s.division,
            months_active: 1,
            resolved_count: s.resolved_count,
            total_cost: s.monthly_cost,
        })
        .collect()
}

fn summed_lines(members: &[&MonthRecord]) -> Vec<StaffCostLine> {
    let mut lines: Vec<StaffCostLine> = Vec::new();

    for month in members {
        // Roles listed twice in one month count as one active month.
        let mut seen: Vec<(&str, Division)> = Vec::new();
        for cost in &month.staff {
            let key = (cost.role.as_str(), cost.division);
            let first_in_month = !seen.contains(&key);
            if first_in_month {
                seen.push(key);
            }

            match lines
                .iter_mut()
                .find(|l| l.role == cost.role && l.division == cost.division)
            {
                Some(line) => {
                    line.total_cost += cost.monthly_cost;
                    if first_in_month {
                        line.months_active += 1;
                        line.resolved_count = cost.resolved_count;
                    } else {
                        line.resolved_count += cost.resolved_count;
                    }
                }
                None => lines.push(StaffCostLine {
                    role: cost.role.clone(),
                    division: cost.division,
                    months_active: 1,
                    resolved_count: cost.resolved_count,
                    total_cost: cost.monthly_cost,
                }),
            }
        }
    }

    lines
}
