//! The 60-month projection driver.
//!
//! Runs each calculation step in order for every month and carries the only
//! state that crosses month boundaries: cumulative EBITDA and the previous
//! month's headcount.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::AssumptionSet;
use crate::models::{
    AuditStep, Division, DivisionMonth, HireEntry, MonthRecord, VariableLabor, quarter_of,
    year_of,
};

use super::audit_value;
use super::billable_hours::calculate_billable_hours;
use super::fixed_labor::calculate_fixed_labor;
use super::operating_expense::{OperatingInputs, calculate_operating_expense};
use super::profit_share::calculate_profit_share;
use super::revenue::calculate_revenue;
use super::variable_labor::calculate_variable_labor;
use super::volume::{PROJECTION_MONTHS, calculate_case_volume};

/// Projects 60 months from a hiring roadmap and an assumption set.
///
/// The function is pure: identical inputs always produce identical output,
/// and neither input is modified.
///
/// # Examples
///
/// ```
/// use aba_proforma::calculation::project;
/// use aba_proforma::config::AssumptionSet;
///
/// let months = project(&[], &AssumptionSet::default());
/// assert_eq!(months.len(), 60);
/// assert_eq!(months[0].month, 1);
/// assert_eq!(months[59].month, 60);
/// ```
pub fn project(hires: &[HireEntry], assumptions: &AssumptionSet) -> Vec<MonthRecord> {
    let mut months = Vec::with_capacity(PROJECTION_MONTHS as usize);
    let mut cumulative_ebitda = Decimal::ZERO;
    let mut previous_headcount = Decimal::ZERO;

    for month in 1..=PROJECTION_MONTHS {
        let record = project_month(
            month,
            hires,
            assumptions,
            cumulative_ebitda,
            previous_headcount,
        );
        cumulative_ebitda = record.cumulative_ebitda;
        previous_headcount = record.fixed_headcount + record.direct_care_headcount;
        months.push(record);
    }

    debug!(
        months = months.len(),
        hires = hires.len(),
        clinic_division = assumptions.features.clinic_division,
        cumulative_ebitda = %cumulative_ebitda,
        "Projection complete"
    );

    months
}

fn project_month(
    month: u32,
    hires: &[HireEntry],
    assumptions: &AssumptionSet,
    previous_cumulative: Decimal,
    previous_headcount: Decimal,
) -> MonthRecord {
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let volume = calculate_case_volume(month, assumptions, step_number);
    let total_caseload = volume.total();
    audit_steps.push(volume.audit_step.clone());
    step_number += 1;

    let mut in_home = build_division(
        Division::InHome,
        volume.in_home,
        volume.in_home_intake,
        true,
        assumptions,
        &mut audit_steps,
        &mut step_number,
    );
    let mut clinic = match (volume.clinic, volume.clinic_intake) {
        (Some(caseload), Some(intake)) => Some(build_division(
            Division::Clinic,
            caseload,
            intake,
            volume.clinic_launched,
            assumptions,
            &mut audit_steps,
            &mut step_number,
        )),
        _ => None,
    };

    let fixed = calculate_fixed_labor(month, hires, total_caseload, assumptions, step_number);
    audit_steps.push(fixed.audit_step.clone());
    step_number += 1;
    in_home.fixed_labor = fixed.in_home;
    if let Some(division) = clinic.as_mut() {
        division.fixed_labor = fixed.clinic;
    }

    let divisions = || std::iter::once(&in_home).chain(clinic.as_ref());
    let revenue: Decimal = divisions().map(|d| d.revenue.total()).sum();
    let variable_labor = divisions().fold(VariableLabor::default(), |acc, d| acc + d.variable_labor);
    let direct_care_hours: Decimal = divisions().map(|d| d.hours.direct_care).sum();
    let fixed_labor = fixed.total();

    let opex = calculate_operating_expense(
        &OperatingInputs {
            month,
            revenue,
            direct_care_hours,
            caseload: total_caseload,
            fixed_headcount: fixed.headcount,
            previous_headcount,
        },
        assumptions,
        step_number,
    );
    audit_steps.push(opex.audit_step.clone());
    step_number += 1;
    let operating_expense = opex.expense.total();

    let pre_share_profit = revenue - variable_labor.total() - fixed_labor - operating_expense;
    let share = calculate_profit_share(month, pre_share_profit, assumptions, step_number);
    audit_steps.push(share.audit_step.clone());
    step_number += 1;

    let ebitda = pre_share_profit - share.amount;
    let cumulative_ebitda = previous_cumulative + ebitda;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "ebitda".to_string(),
        rule_name: "EBITDA".to_string(),
        policy_ref: "revenue - variable labor - fixed labor - operating expense - profit share"
            .to_string(),
        input: serde_json::json!({
            "revenue": audit_value(revenue),
            "variable_labor": audit_value(variable_labor.total()),
            "fixed_labor": audit_value(fixed_labor),
            "operating_expense": audit_value(operating_expense),
            "profit_share": audit_value(share.amount),
            "previous_cumulative": audit_value(previous_cumulative)
        }),
        output: serde_json::json!({
            "ebitda": audit_value(ebitda),
            "cumulative_ebitda": audit_value(cumulative_ebitda)
        }),
        reasoning: format!(
            "Month {} EBITDA ${} brings cumulative EBITDA to ${}",
            month,
            audit_value(ebitda),
            audit_value(cumulative_ebitda)
        ),
    });

    MonthRecord {
        month,
        year: year_of(month),
        quarter: quarter_of(month),
        in_home,
        clinic,
        revenue,
        variable_labor,
        fixed_labor,
        fixed_headcount: fixed.headcount,
        direct_care_headcount: opex.direct_care_headcount,
        operating_expense: opex.expense,
        profit_share: share.amount,
        ebitda,
        cumulative_ebitda,
        staff: fixed.staff,
        audit_steps,
    }
}

/// Runs the hours, revenue and variable-labor steps for one division.
fn build_division(
    division: Division,
    caseload: Decimal,
    new_intake: Decimal,
    launched: bool,
    assumptions: &AssumptionSet,
    audit_steps: &mut Vec<AuditStep>,
    step_number: &mut u32,
) -> DivisionMonth {
    let hours = calculate_billable_hours(division, caseload, new_intake, assumptions, *step_number);
    audit_steps.push(hours.audit_step);
    *step_number += 1;

    let revenue = calculate_revenue(division, &hours.hours, &assumptions.billing, *step_number);
    audit_steps.push(revenue.audit_step);
    *step_number += 1;

    let labor = calculate_variable_labor(division, &hours.hours, &assumptions.pay, *step_number);
    audit_steps.push(labor.audit_step);
    *step_number += 1;

    DivisionMonth {
        division,
        launched,
        caseload,
        new_intake,
        hours: hours.hours,
        revenue: revenue.revenue,
        variable_labor: labor.labor,
        fixed_labor: Decimal::ZERO,
    }
}
