//! Property tests for the projection engine.
//!
//! These check structural guarantees over randomly generated assumption
//! sets and hiring roadmaps rather than specific figures.

use proptest::prelude::*;
use rust_decimal::Decimal;

use aba_proforma::calculation::{
    Milestone, MilestoneField, PROJECTION_MONTHS, aggregate, find_first_month, project,
};
use aba_proforma::config::AssumptionSet;
use aba_proforma::models::{Division, Granularity, HireEntry, MonthRecord, RoleCategory};

const ROLES: [&str; 5] = [
    "Clinical Director",
    "Admin/Billing",
    "Care Coordinator",
    "Clinic Manager",
    "Clinic Care Coordinator",
];

fn tolerance() -> Decimal {
    Decimal::new(1, 6)
}

fn arb_assumptions() -> impl Strategy<Value = AssumptionSet> {
    (
        0u32..200,
        0u32..20,
        any::<[bool; 5]>(),
        1u32..70,
        0u32..36,
        0u32..60,
    )
        .prop_map(|(start, growth, flags, launch, ramp, target)| {
            let mut assumptions = AssumptionSet::default();
            assumptions.caseload.starting_caseload = Decimal::from(start);
            assumptions.caseload.monthly_growth = Decimal::from(growth);
            assumptions.features.clinic_division = flags[0];
            assumptions.features.cancellation_buffer = flags[1];
            assumptions.features.itemized_overhead = flags[2];
            assumptions.features.profit_share = flags[3];
            assumptions.features.cfo_threshold = flags[4];
            assumptions.clinic.launch_month = launch;
            assumptions.clinic.ramp_months = ramp;
            assumptions.clinic.target_caseload = Decimal::from(target);
            assumptions
        })
}

fn arb_hire() -> impl Strategy<Value = HireEntry> {
    (0u32..61, 0usize..ROLES.len(), 30u32..250, 0u32..4).prop_map(
        |(month, role_index, salary_thousands, count)| {
            let role = ROLES[role_index];
            HireEntry {
                effective_month: month,
                role: role.to_string(),
                annual_salary: Decimal::from(salary_thousands * 1000),
                headcount: Decimal::from(count),
                division: Division::infer_from_label(role),
                category: RoleCategory::infer_from_label(role),
            }
        },
    )
}

fn arb_roadmap() -> impl Strategy<Value = Vec<HireEntry>> {
    prop::collection::vec(arb_hire(), 0..6)
}

fn total_revenue(months: &[MonthRecord]) -> Decimal {
    months.iter().map(|m| m.revenue).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_sixty_ordered_months(assumptions in arb_assumptions(), hires in arb_roadmap()) {
        let months = project(&hires, &assumptions);

        prop_assert_eq!(months.len(), PROJECTION_MONTHS as usize);
        for (index, record) in months.iter().enumerate() {
            prop_assert_eq!(record.month, index as u32 + 1);
            prop_assert_eq!(record.clinic.is_some(), assumptions.features.clinic_division);
        }
    }

    #[test]
    fn prop_cumulative_ebitda_is_running_sum(assumptions in arb_assumptions(), hires in arb_roadmap()) {
        let months = project(&hires, &assumptions);

        let mut running = Decimal::ZERO;
        for record in &months {
            running += record.ebitda;
            prop_assert_eq!(record.cumulative_ebitda, running);
        }
    }

    #[test]
    fn prop_ebitda_identity(assumptions in arb_assumptions(), hires in arb_roadmap()) {
        for record in project(&hires, &assumptions) {
            let expected = record.revenue
                - record.variable_labor.total()
                - record.fixed_labor
                - record.operating_expense.total()
                - record.profit_share;
            prop_assert!((record.ebitda - expected).abs() < tolerance());
            prop_assert!(record.profit_share >= Decimal::ZERO);
        }
    }

    #[test]
    fn prop_clinic_is_zero_before_launch(assumptions in arb_assumptions(), hires in arb_roadmap()) {
        let launch = assumptions.clinic.launch_month;

        for record in project(&hires, &assumptions) {
            let Some(clinic) = record.clinic.as_ref() else { continue };
            if record.month < launch {
                prop_assert!(!clinic.launched);
                prop_assert_eq!(clinic.caseload, Decimal::ZERO);
                prop_assert_eq!(clinic.revenue.total(), Decimal::ZERO);
                prop_assert_eq!(clinic.variable_labor.total(), Decimal::ZERO);
                prop_assert_eq!(clinic.fixed_labor, Decimal::ZERO);
                prop_assert_eq!(record.profit_share, Decimal::ZERO);
            }
        }
    }

    #[test]
    fn prop_aggregation_preserves_totals(assumptions in arb_assumptions(), hires in arb_roadmap()) {
        let months = project(&hires, &assumptions);
        let monthly_total = total_revenue(&months);

        for granularity in [Granularity::Quarterly, Granularity::Yearly] {
            let periods = aggregate(&months, granularity);
            let period_total: Decimal = periods.iter().map(|p| p.revenue).sum();
            prop_assert!((period_total - monthly_total).abs() < tolerance());

            let last = periods.last().unwrap();
            prop_assert_eq!(last.cumulative_ebitda, months[59].cumulative_ebitda);
        }
    }

    #[test]
    fn prop_margin_is_zero_without_revenue(hires in arb_roadmap()) {
        let mut assumptions = AssumptionSet::default();
        assumptions.caseload.starting_caseload = Decimal::ZERO;
        assumptions.caseload.monthly_growth = Decimal::ZERO;

        let months = project(&hires, &assumptions);
        prop_assert_eq!(total_revenue(&months), Decimal::ZERO);

        for period in aggregate(&months, Granularity::Yearly) {
            prop_assert_eq!(period.margin_pct, Decimal::ZERO);
        }
    }

    #[test]
    fn prop_milestone_is_first_crossing(
        assumptions in arb_assumptions(),
        hires in arb_roadmap(),
        target_thousands in -500i64..5_000,
    ) {
        let months = project(&hires, &assumptions);
        let target = Decimal::from(target_thousands * 1000);

        match find_first_month(&months, MilestoneField::CumulativeEbitda, target) {
            Milestone::Reached(month) => {
                let index = month as usize - 1;
                prop_assert!(months[index].cumulative_ebitda >= target);
                prop_assert!(months[..index].iter().all(|m| m.cumulative_ebitda < target));
            }
            Milestone::NotReached => {
                prop_assert!(months.iter().all(|m| m.cumulative_ebitda < target));
            }
        }
    }

    #[test]
    fn prop_projection_is_deterministic(assumptions in arb_assumptions(), hires in arb_roadmap()) {
        prop_assert_eq!(project(&hires, &assumptions), project(&hires, &assumptions));
    }
}
