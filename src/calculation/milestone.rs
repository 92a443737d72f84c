//! Milestone detection on the monthly series.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::MonthRecord;

/// The monthly figure a milestone is measured on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneField {
    /// Running sum of EBITDA.
    #[default]
    CumulativeEbitda,
    /// Single-month EBITDA.
    Ebitda,
}

impl MilestoneField {
    /// Reads this field from a month.
    pub fn value(self, record: &MonthRecord) -> Decimal {
        match self {
            MilestoneField::CumulativeEbitda => record.cumulative_ebitda,
            MilestoneField::Ebitda => record.ebitda,
        }
    }
}

/// The month a target is first reached, if ever.
///
/// Displays and serializes as `"Month {n}"` or `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// First reached in this month.
    Reached(u32),
    /// Not reached within the projection horizon.
    NotReached,
}

impl Milestone {
    /// The month number, if reached.
    pub fn month(self) -> Option<u32> {
        match self {
            Milestone::Reached(month) => Some(month),
            Milestone::NotReached => None,
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Milestone::Reached(month) => write!(f, "Month {}", month),
            Milestone::NotReached => write!(f, "N/A"),
        }
    }
}

impl Serialize for Milestone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// First month whose `field` is at or above `target`.
///
/// A plain forward scan: cumulative EBITDA can dip after unprofitable
/// months, so the first crossing is reported even if the series later
/// falls back below the target.
///
/// # Examples
///
/// ```
/// use aba_proforma::calculation::{find_first_month, project, Milestone, MilestoneField};
/// use aba_proforma::config::AssumptionSet;
/// use rust_decimal::Decimal;
///
/// let months = project(&[], &AssumptionSet::default());
/// let never = find_first_month(&months, MilestoneField::CumulativeEbitda, Decimal::MAX);
/// assert_eq!(never, Milestone::NotReached);
/// assert_eq!(never.to_string(), "N/A");
/// ```
pub fn find_first_month(
    months: &[MonthRecord],
    field: MilestoneField,
    target: Decimal,
) -> Milestone {
    months
        .iter()
        .find(|record| field.value(record) >= target)
        .map_or(Milestone::NotReached, |record| Milestone::Reached(record.month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::project;
    use crate::config::AssumptionSet;
    use crate::models::{Division, HireEntry, RoleCategory};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn months_with_ebitda(values: &[&str]) -> Vec<MonthRecord> {
        let template = project(&[], &AssumptionSet::default());
        let mut cumulative = Decimal::ZERO;
        values
            .iter()
            .zip(template)
            .map(|(value, mut record)| {
                record.ebitda = dec(value);
                cumulative += record.ebitda;
                record.cumulative_ebitda = cumulative;
                record
            })
            .collect()
    }

    /// MS-001: first crossing, not the last
    #[test]
    fn test_first_crossing_on_non_monotonic_series() {
        // cumulative: 100, 250, 150, 300
        let months = months_with_ebitda(&["100", "150", "-100", "150"]);
        let milestone = find_first_month(&months, MilestoneField::CumulativeEbitda, dec("200"));
        assert_eq!(milestone, Milestone::Reached(2));
        assert_eq!(milestone.to_string(), "Month 2");
    }

    #[test]
    fn test_exact_target_counts_as_reached() {
        let months = months_with_ebitda(&["100", "100"]);
        assert_eq!(
            find_first_month(&months, MilestoneField::CumulativeEbitda, dec("200")),
            Milestone::Reached(2)
        );
    }

    /// MS-002: not reached yields N/A
    #[test]
    fn test_not_reached() {
        let months = months_with_ebitda(&["100", "100"]);
        let milestone = find_first_month(&months, MilestoneField::CumulativeEbitda, dec("201"));
        assert_eq!(milestone, Milestone::NotReached);
        assert_eq!(milestone.month(), None);
    }

    #[test]
    fn test_monthly_break_even() {
        let months = months_with_ebitda(&["-500", "-10", "0", "40"]);
        assert_eq!(
            find_first_month(&months, MilestoneField::Ebitda, Decimal::ZERO),
            Milestone::Reached(3)
        );
    }

    #[test]
    fn test_break_even_with_heavy_hires() {
        let hires = vec![HireEntry {
            effective_month: 1,
            role: "Regional Leadership".to_string(),
            annual_salary: dec("1000000"),
            headcount: dec("1"),
            division: Division::InHome,
            category: RoleCategory::Standard,
        }];
        let months = project(&hires, &AssumptionSet::default());
        let break_even = find_first_month(&months, MilestoneField::Ebitda, Decimal::ZERO);
        let month = break_even.month().unwrap();
        assert!(month > 1);
        assert!(months[month as usize - 2].ebitda < Decimal::ZERO);
    }

    #[test]
    fn test_serializes_as_display_string() {
        assert_eq!(
            serde_json::to_string(&Milestone::Reached(14)).unwrap(),
            "\"Month 14\""
        );
        assert_eq!(serde_json::to_string(&Milestone::NotReached).unwrap(), "\"N/A\"");
    }

    #[test]
    fn test_empty_series_not_reached() {
        assert_eq!(
            find_first_month(&[], MilestoneField::CumulativeEbitda, Decimal::ZERO),
            Milestone::NotReached
        );
    }
}
