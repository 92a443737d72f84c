//! Reporting periods and aggregated period records.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ServiceAmounts, VariableLabor};

/// How the monthly series is rolled up for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One period per month.
    #[default]
    Monthly,
    /// One period per (year, quarter).
    Quarterly,
    /// One period per year.
    Yearly,
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Granularity::Monthly),
            "quarterly" => Ok(Granularity::Quarterly),
            "yearly" => Ok(Granularity::Yearly),
            other => Err(format!("Unknown granularity: {}", other)),
        }
    }
}

/// Projection year (1-based) containing `month`.
pub fn year_of(month: u32) -> u32 {
    month.div_ceil(12)
}

/// Quarter within the year (1..=4) containing `month`.
pub fn quarter_of(month: u32) -> u32 {
    ((month.saturating_sub(1)) % 12 + 1).div_ceil(3)
}

/// A reporting period key.
///
/// Periods of one granularity order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "granularity", rename_all = "snake_case")]
pub enum Period {
    /// A single month.
    Month {
        /// Projection month.
        month: u32,
    },
    /// A quarter of a projection year.
    Quarter {
        /// Projection year.
        year: u32,
        /// Quarter within the year.
        quarter: u32,
    },
    /// A projection year.
    Year {
        /// Projection year.
        year: u32,
    },
}

impl Period {
    /// The period of `granularity` that contains `month`.
    ///
    /// ```
    /// use aba_proforma::models::{Granularity, Period};
    ///
    /// let period = Period::containing(Granularity::Quarterly, 14);
    /// assert_eq!(period, Period::Quarter { year: 2, quarter: 1 });
    /// assert_eq!(period.to_string(), "Year 2 Q1");
    /// ```
    pub fn containing(granularity: Granularity, month: u32) -> Self {
        match granularity {
            Granularity::Monthly => Period::Month { month },
            Granularity::Quarterly => Period::Quarter {
                year: year_of(month),
                quarter: quarter_of(month),
            },
            Granularity::Yearly => Period::Year {
                year: year_of(month),
            },
        }
    }

    /// Granularity of this period.
    pub fn granularity(&self) -> Granularity {
        match self {
            Period::Month { .. } => Granularity::Monthly,
            Period::Quarter { .. } => Granularity::Quarterly,
            Period::Year { .. } => Granularity::Yearly,
        }
    }

    /// Returns true if `month` falls inside this period.
    pub fn contains(&self, month: u32) -> bool {
        Period::containing(self.granularity(), month) == *self
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Month { month } => write!(f, "Month {}", month),
            Period::Quarter { year, quarter } => write!(f, "Year {} Q{}", year, quarter),
            Period::Year { year } => write!(f, "Year {}", year),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    /// Parses a display label back into a period key.
    ///
    /// ```
    /// use aba_proforma::models::Period;
    ///
    /// assert_eq!("Month 7".parse::<Period>(), Ok(Period::Month { month: 7 }));
    /// assert_eq!("Year 2 Q3".parse::<Period>(), Ok(Period::Quarter { year: 2, quarter: 3 }));
    /// assert!("Week 4".parse::<Period>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Unknown period label: {}", s);
        let parts: Vec<&str> = s.split_whitespace().collect();
        let number = |text: &str| text.parse::<u32>().map_err(|_| invalid());

        match parts.as_slice() {
            ["Month", month] => Ok(Period::Month {
                month: number(month)?,
            }),
            ["Year", year] => Ok(Period::Year {
                year: number(year)?,
            }),
            ["Year", year, quarter] => {
                let quarter = quarter.strip_prefix('Q').ok_or_else(invalid)?;
                Ok(Period::Quarter {
                    year: number(year)?,
                    quarter: number(quarter)?,
                })
            }
            _ => Err(invalid()),
        }
    }
}

/// An aggregated reporting period.
///
/// Additive fields are summed over the constituent months; level fields
/// (caseload, headcount) take the maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// The period key.
    pub period: Period,
    /// Display label ("Month 3", "Year 1 Q2", "Year 4").
    pub label: String,
    /// First projection month in the period.
    pub first_month: u32,
    /// Last projection month in the period.
    pub last_month: u32,
    /// Peak total caseload.
    pub caseload: Decimal,
    /// Peak in-home caseload.
    pub in_home_caseload: Decimal,
    /// Peak clinic caseload, absent when there is no clinic division.
    pub clinic_caseload: Option<Decimal>,
    /// Peak resolved salaried headcount.
    pub fixed_headcount: Decimal,
    /// Billable hours per service code.
    pub hours: ServiceAmounts,
    /// Revenue per service code.
    pub revenue_by_service: ServiceAmounts,
    /// Revenue.
    pub revenue: Decimal,
    /// Variable labor split.
    pub variable_labor: VariableLabor,
    /// Fixed labor.
    pub fixed_labor: Decimal,
    /// Operating expense.
    pub operating_expense: Decimal,
    /// Profit-share deduction.
    pub profit_share: Decimal,
    /// EBITDA.
    pub ebitda: Decimal,
    /// Cumulative EBITDA at the end of the period.
    pub cumulative_ebitda: Decimal,
    /// EBITDA / revenue * 100, zero when revenue is zero.
    pub margin_pct: Decimal,
}
