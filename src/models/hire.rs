//! Hiring roadmap entries.
//!
//! [`RoadmapRow`] is the loosely-typed row an editing surface sends;
//! [`HireEntry`] is the typed entry the engine consumes. Conversion never
//! fails: cells that are not numbers become zero and raise a warning.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AuditWarning;

/// Warning code raised when a roadmap cell is coerced to zero.
pub const ROADMAP_CELL_COERCED: &str = "ROADMAP_CELL_COERCED";

/// Largest annual salary a roadmap cell may carry; larger magnitudes are clamped.
pub const MAX_ANNUAL_SALARY: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Largest headcount a roadmap cell may carry; larger magnitudes are clamped.
pub const MAX_HEADCOUNT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

const CLINIC_MARKER: &str = "Clinic";
const CARE_COORDINATOR_MARKER: &str = "Care Coordinator";

/// The service division a hire or case belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Division {
    /// Care delivered in the client's home.
    #[default]
    InHome,
    /// Care delivered at a clinic site.
    Clinic,
}

impl Division {
    /// Infers a division from a free-text role label.
    ///
    /// ```
    /// use aba_proforma::models::Division;
    ///
    /// assert_eq!(Division::infer_from_label("Clinic Manager"), Division::Clinic);
    /// assert_eq!(Division::infer_from_label("Admin/Billing"), Division::InHome);
    /// ```
    pub fn infer_from_label(label: &str) -> Self {
        if label.contains(CLINIC_MARKER) {
            Division::Clinic
        } else {
            Division::InHome
        }
    }
}

/// How a role's headcount is resolved each month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    /// Headcount follows the roadmap entry.
    #[default]
    Standard,
    /// Headcount follows the span-of-control rule on total caseload.
    CareCoordinator,
}

impl RoleCategory {
    /// Infers a role category from a free-text role label.
    pub fn infer_from_label(label: &str) -> Self {
        if label.contains(CARE_COORDINATOR_MARKER) {
            RoleCategory::CareCoordinator
        } else {
            RoleCategory::Standard
        }
    }
}

/// A planned fixed-salary hire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HireEntry {
    /// First projection month the hire is on payroll.
    pub effective_month: u32,
    /// Role label.
    pub role: String,
    /// Annual base salary per head.
    pub annual_salary: Decimal,
    /// Planned headcount (may be fractional).
    pub headcount: Decimal,
    /// Division the cost is booked to.
    pub division: Division,
    /// Headcount resolution rule.
    pub category: RoleCategory,
}

impl HireEntry {
    /// Returns true if the hire is on payroll in `month`.
    pub fn is_active(&self, month: u32) -> bool {
        self.effective_month <= month
    }
}

/// One raw roadmap row as edited in a table.
///
/// `month`, `salary` and `count` accept numbers, numeric strings, or
/// anything else (coerced to zero).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapRow {
    /// Effective month cell.
    #[serde(default)]
    pub month: Value,
    /// Role label.
    #[serde(default)]
    pub role: String,
    /// Annual salary cell.
    #[serde(default)]
    pub salary: Value,
    /// Headcount cell.
    #[serde(default)]
    pub count: Value,
    /// Explicit division; inferred from the role label when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<Division>,
    /// Explicit role category; inferred from the role label when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<RoleCategory>,
}

impl RoadmapRow {
    /// Convenience constructor for a fully numeric row.
    pub fn new(month: u32, role: impl Into<String>, salary: Decimal, count: Decimal) -> Self {
        Self {
            month: Value::from(month),
            role: role.into(),
            salary: Value::String(salary.to_string()),
            count: Value::String(count.to_string()),
            division: None,
            category: None,
        }
    }

    /// Converts the row into a typed entry, collecting coercion warnings.
    pub fn to_hire_entry(&self, row_index: usize) -> (HireEntry, Vec<AuditWarning>) {
        let mut warnings = Vec::new();

        let month = coerce_cell(&self.month, row_index, "Month", &mut warnings);
        let salary = coerce_cell(&self.salary, row_index, "Salary", &mut warnings);
        let annual_salary =
            clamp_cell(salary, MAX_ANNUAL_SALARY, row_index, "Salary", &mut warnings);
        let count = coerce_cell(&self.count, row_index, "Count", &mut warnings);
        let headcount = clamp_cell(count, MAX_HEADCOUNT, row_index, "Count", &mut warnings);

        let entry = HireEntry {
            effective_month: effective_month(month),
            role: self.role.clone(),
            annual_salary,
            headcount,
            division: self
                .division
                .unwrap_or_else(|| Division::infer_from_label(&self.role)),
            category: self
                .category
                .unwrap_or_else(|| RoleCategory::infer_from_label(&self.role)),
        };

        (entry, warnings)
    }
}

/// Converts every roadmap row, preserving order.
///
/// # Example
///
/// ```
/// use aba_proforma::models::{resolve_roadmap, RoadmapRow};
/// use serde_json::json;
///
/// let rows: Vec<RoadmapRow> = serde_json::from_value(json!([
///     {"month": 1, "role": "Clinical Director", "salary": 140000, "count": 1},
///     {"month": "abc", "role": "Care Coordinator", "salary": "52000", "count": null},
/// ])).unwrap();
///
/// let (hires, warnings) = resolve_roadmap(&rows);
/// assert_eq!(hires.len(), 2);
/// assert_eq!(hires[1].effective_month, 0);
/// assert_eq!(warnings.len(), 2);
/// ```
pub fn resolve_roadmap(rows: &[RoadmapRow]) -> (Vec<HireEntry>, Vec<AuditWarning>) {
    let mut hires = Vec::with_capacity(rows.len());
    let mut warnings = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let (entry, row_warnings) = row.to_hire_entry(index);
        hires.push(entry);
        warnings.extend(row_warnings);
    }

    (hires, warnings)
}

/// Literal fixed-salary headcount on the roadmap (sum of counts).
pub fn roadmap_headcount(hires: &[HireEntry]) -> Decimal {
    hires.iter().map(|h| h.headcount).sum()
}

/// First month a hire is on payroll for a coerced Month cell.
///
/// A fractional month starts on the next whole month. Negative months start
/// in month 1; months past `u32::MAX` are never reached.
fn effective_month(month: Decimal) -> u32 {
    month.ceil().to_u32().unwrap_or(if month.is_sign_negative() {
        0
    } else {
        u32::MAX
    })
}

fn coerce_cell(
    cell: &Value,
    row_index: usize,
    column: &str,
    warnings: &mut Vec<AuditWarning>,
) -> Decimal {
    let parsed = match cell {
        Value::Number(n) => {
            parse_decimal(&n.to_string()).or_else(|| n.as_f64().and_then(saturate))
        }
        Value::String(s) => {
            let text = s.trim();
            parse_decimal(text).or_else(|| text.parse::<f64>().ok().and_then(saturate))
        }
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        warnings.push(AuditWarning {
            code: ROADMAP_CELL_COERCED.to_string(),
            message: format!(
                "Row {} column '{}' value {} is not numeric; using 0",
                row_index + 1,
                column,
                cell
            ),
            severity: "low".to_string(),
        });
        Decimal::ZERO
    })
}

fn clamp_cell(
    value: Decimal,
    limit: Decimal,
    row_index: usize,
    column: &str,
    warnings: &mut Vec<AuditWarning>,
) -> Decimal {
    if value.abs() <= limit {
        return value;
    }

    let clamped = if value.is_sign_negative() { -limit } else { limit };
    warnings.push(AuditWarning {
        code: ROADMAP_CELL_COERCED.to_string(),
        message: format!(
            "Row {} column '{}' value {} is out of range; using {}",
            row_index + 1,
            column,
            value,
            clamped
        ),
        severity: "medium".to_string(),
    });
    clamped
}

/// Numbers beyond `Decimal`'s range saturate to its bounds.
fn saturate(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Some(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(value: Value) -> RoadmapRow {
        serde_json::from_value(value).unwrap()
    }

    /// HR-001: numeric cells pass through unchanged
    #[test]
    fn test_numeric_row_converts_without_warnings() {
        let (entry, warnings) = row(json!({
            "month": 13, "role": "State Director", "salary": 150000, "count": 2
        }))
        .to_hire_entry(0);

        assert!(warnings.is_empty());
        assert_eq!(entry.effective_month, 13);
        assert_eq!(entry.annual_salary, dec("150000"));
        assert_eq!(entry.headcount, dec("2"));
        assert_eq!(entry.division, Division::InHome);
        assert_eq!(entry.category, RoleCategory::Standard);
    }

    /// HR-002: numeric strings are parsed
    #[test]
    fn test_numeric_strings_are_parsed() {
        let (entry, warnings) = row(json!({
            "month": "7", "role": "Admin", "salary": " 60000.50 ", "count": "1.5"
        }))
        .to_hire_entry(0);

        assert!(warnings.is_empty());
        assert_eq!(entry.effective_month, 7);
        assert_eq!(entry.annual_salary, dec("60000.50"));
        assert_eq!(entry.headcount, dec("1.5"));
    }

    /// HR-003: malformed cells coerce to zero with a warning each
    #[test]
    fn test_malformed_cells_coerce_to_zero() {
        let (entry, warnings) = row(json!({
            "month": "next spring", "role": "BCBA", "salary": null, "count": true
        }))
        .to_hire_entry(4);

        assert_eq!(entry.effective_month, 0);
        assert_eq!(entry.annual_salary, Decimal::ZERO);
        assert_eq!(entry.headcount, Decimal::ZERO);
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| w.code == ROADMAP_CELL_COERCED));
        assert!(warnings[0].message.contains("Row 5"));
        assert!(warnings[0].message.contains("Month"));
    }

    #[test]
    fn test_missing_cells_coerce_to_zero() {
        let (entry, warnings) = row(json!({"role": "Office Manager"})).to_hire_entry(0);
        assert_eq!(entry.effective_month, 0);
        assert_eq!(warnings.len(), 3);
    }

    /// HR-005: a fractional month starts on the next whole month
    #[test]
    fn test_fractional_month_rounds_up() {
        let (entry, _) = row(json!({"month": 12.9, "role": "x", "salary": 1, "count": 1}))
            .to_hire_entry(0);
        assert_eq!(entry.effective_month, 13);

        let (entry, warnings) = row(json!({"month": "1.5", "role": "x", "salary": 1, "count": 1}))
            .to_hire_entry(0);
        assert!(warnings.is_empty());
        assert_eq!(entry.effective_month, 2);
        assert!(!entry.is_active(1));
        assert!(entry.is_active(2));
    }

    /// HR-006: a month past the u32 range is never reached
    #[test]
    fn test_month_beyond_range_is_never_active() {
        for month in [json!(1e20), json!("1e20"), json!(1e40)] {
            let (entry, warnings) = row(json!({
                "month": month, "role": "x", "salary": 120000, "count": 1
            }))
            .to_hire_entry(0);

            assert!(warnings.is_empty());
            assert_eq!(entry.effective_month, u32::MAX);
            assert!(!entry.is_active(60));
        }
    }

    /// HR-007: salary and count cells are clamped with a warning
    #[test]
    fn test_oversized_cells_are_clamped() {
        let (entry, warnings) = row(json!({
            "month": 1,
            "role": "x",
            "salary": "60000000000000000000000000000",
            "count": 1e300
        }))
        .to_hire_entry(2);

        assert_eq!(entry.annual_salary, MAX_ANNUAL_SALARY);
        assert_eq!(entry.headcount, MAX_HEADCOUNT);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.code == ROADMAP_CELL_COERCED));
        assert!(warnings[0].message.contains("Row 3"));
        assert!(warnings[0].message.contains("out of range"));
    }

    #[test]
    fn test_negative_salary_clamps_to_negative_limit() {
        let (entry, warnings) = row(json!({
            "month": 1, "role": "x", "salary": "-1e20", "count": 1
        }))
        .to_hire_entry(0);

        assert_eq!(entry.annual_salary, -MAX_ANNUAL_SALARY);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_limits() {
        assert_eq!(MAX_ANNUAL_SALARY, dec("10000000000"));
        assert_eq!(MAX_HEADCOUNT, dec("100000"));
    }

    #[test]
    fn test_negative_month_clamps_to_zero() {
        let (entry, _) = row(json!({"month": -3, "role": "x", "salary": 1, "count": 1}))
            .to_hire_entry(0);
        assert_eq!(entry.effective_month, 0);
    }

    /// HR-004: labels infer division and category when not explicit
    #[test]
    fn test_label_inference() {
        let (entry, _) = row(json!({
            "month": 1, "role": "Clinic Care Coordinator", "salary": 50000, "count": 1
        }))
        .to_hire_entry(0);

        assert_eq!(entry.division, Division::Clinic);
        assert_eq!(entry.category, RoleCategory::CareCoordinator);
    }

    #[test]
    fn test_explicit_fields_override_label() {
        let (entry, _) = row(json!({
            "month": 1, "role": "Clinic Liaison", "salary": 50000, "count": 1,
            "division": "in_home", "category": "care_coordinator"
        }))
        .to_hire_entry(0);

        assert_eq!(entry.division, Division::InHome);
        assert_eq!(entry.category, RoleCategory::CareCoordinator);
    }

    #[test]
    fn test_is_active() {
        let (entry, _) = RoadmapRow::new(13, "State Director", dec("150000"), dec("1"))
            .to_hire_entry(0);
        assert!(!entry.is_active(12));
        assert!(entry.is_active(13));
        assert!(entry.is_active(60));
    }

    #[test]
    fn test_roadmap_headcount_sums_counts() {
        let rows = vec![
            RoadmapRow::new(1, "Clinical Director", dec("140000"), dec("1")),
            RoadmapRow::new(1, "Admin/Billing", dec("60000"), dec("1")),
            RoadmapRow::new(13, "State Director", dec("150000"), dec("0")),
        ];
        let (hires, warnings) = resolve_roadmap(&rows);
        assert!(warnings.is_empty());
        assert_eq!(roadmap_headcount(&hires), dec("2"));
    }
}
