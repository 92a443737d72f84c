//! Rolls the monthly series up into reporting periods.
//!
//! Additive fields (hours, revenue, costs, EBITDA) are summed; level fields
//! (caseload, headcount) take the maximum across the period's months.
//! Cumulative EBITDA is reported as of the period's last month.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{Granularity, MonthRecord, Period, PeriodRecord};

/// EBITDA as a percentage of revenue; zero when revenue is zero.
///
/// ```
/// use aba_proforma::calculation::margin_pct;
/// use rust_decimal::Decimal;
///
/// assert_eq!(margin_pct(Decimal::from(25), Decimal::from(100)), Decimal::from(25));
/// assert_eq!(margin_pct(Decimal::from(-10), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn margin_pct(ebitda: Decimal, revenue: Decimal) -> Decimal {
    ebitda
        .checked_div(revenue)
        .map_or(Decimal::ZERO, |ratio| ratio * Decimal::ONE_HUNDRED)
}

/// Aggregates months into periods of `granularity`, ordered chronologically.
///
/// # Examples
///
/// ```
/// use aba_proforma::calculation::{aggregate, project};
/// use aba_proforma::config::AssumptionSet;
/// use aba_proforma::models::Granularity;
///
/// let months = project(&[], &AssumptionSet::default());
/// let quarters = aggregate(&months, Granularity::Quarterly);
/// assert_eq!(quarters.len(), 20);
/// assert_eq!(quarters[0].label, "Year 1 Q1");
/// assert_eq!(quarters[19].label, "Year 5 Q4");
/// ```
pub fn aggregate(months: &[MonthRecord], granularity: Granularity) -> Vec<PeriodRecord> {
    let mut groups: BTreeMap<Period, Vec<&MonthRecord>> = BTreeMap::new();
    for record in months {
        groups
            .entry(Period::containing(granularity, record.month))
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .filter_map(|(period, members)| reduce_period(period, &members))
        .collect()
}

fn reduce_period(period: Period, members: &[&MonthRecord]) -> Option<PeriodRecord> {
    let first = members.first()?;
    let last = members.last()?;

    let mut record = PeriodRecord {
        period,
        label: period.to_string(),
        first_month: first.month,
        last_month: last.month,
        caseload: first.caseload(),
        in_home_caseload: first.in_home.caseload,
        clinic_caseload: first.clinic.as_ref().map(|c| c.caseload),
        fixed_headcount: first.fixed_headcount,
        hours: Default::default(),
        revenue_by_service: Default::default(),
        revenue: Decimal::ZERO,
        variable_labor: Default::default(),
        fixed_labor: Decimal::ZERO,
        operating_expense: Decimal::ZERO,
        profit_share: Decimal::ZERO,
        ebitda: Decimal::ZERO,
        cumulative_ebitda: last.cumulative_ebitda,
        margin_pct: Decimal::ZERO,
    };

    for month in members {
        record.caseload = record.caseload.max(month.caseload());
        record.in_home_caseload = record.in_home_caseload.max(month.in_home.caseload);
        record.clinic_caseload = match (record.clinic_caseload, month.clinic.as_ref()) {
            (Some(peak), Some(clinic)) => Some(peak.max(clinic.caseload)),
            (peak, clinic) => peak.or(clinic.map(|c| c.caseload)),
        };
        record.fixed_headcount = record.fixed_headcount.max(month.fixed_headcount);

        record.hours += month.hours();
        record.revenue_by_service += month.revenue_by_service();
        record.revenue += month.revenue;
        record.variable_labor += month.variable_labor;
        record.fixed_labor += month.fixed_labor;
        record.operating_expense += month.operating_expense.total();
        record.profit_share += month.profit_share;
        record.ebitda += month.ebitda;
    }

    record.margin_pct = margin_pct(record.ebitda, record.revenue);
    Some(record)
}
