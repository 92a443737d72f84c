//! Spreadsheet export.
//!
//! A [`Workbook`] holds two sheets: `Monthly_Detailed` (one row per
//! projected month) and `Executive_Summary` (one row per aggregated
//! period). Cells use the same rounding as the on-screen tables.

use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::info;

use crate::calculation::margin_pct;
use crate::error::{EngineError, EngineResult};
use crate::format::{margin_cell, whole_cell};
use crate::models::{MonthRecord, PeriodRecord};

/// Name of the monthly detail sheet.
pub const MONTHLY_SHEET: &str = "Monthly_Detailed";

/// Name of the aggregated summary sheet.
pub const SUMMARY_SHEET: &str = "Executive_Summary";

/// One sheet of a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name.
    pub name: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows, already formatted.
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Renders the sheet as CSV text.
    pub fn to_csv(&self) -> EngineResult<String> {
        let mut wtr = Writer::from_writer(Vec::new());
        self.write_to(&mut wtr)?;
        let bytes = wtr.into_inner().map_err(|err| EngineError::ExportError {
            message: err.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|err| EngineError::ExportError {
            message: err.to_string(),
        })
    }

    fn write_to<W: std::io::Write>(&self, wtr: &mut Writer<W>) -> EngineResult<()> {
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// A projection rendered as spreadsheet sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    /// Sheets in workbook order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Builds the monthly detail and summary sheets.
    pub fn build(months: &[MonthRecord], periods: &[PeriodRecord]) -> Self {
        Self {
            sheets: vec![monthly_sheet(months), summary_sheet(periods)],
        }
    }

    /// Looks up a sheet by name.
    pub fn sheet(&self, name: &str) -> EngineResult<&Sheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| EngineError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Writes one `<sheet>.csv` file per sheet into `dir`, creating it if
    /// needed. Returns the written paths.
    pub fn write_csv_dir(&self, dir: &Path) -> EngineResult<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.sheets.len());
        for sheet in &self.sheets {
            let path = dir.join(format!("{}.csv", sheet.name));
            let mut wtr = Writer::from_path(&path)?;
            sheet.write_to(&mut wtr)?;
            info!(
                sheet = %sheet.name,
                rows = sheet.rows.len(),
                path = %path.display(),
                "Wrote sheet"
            );
            written.push(path);
        }

        Ok(written)
    }
}

fn monthly_sheet(months: &[MonthRecord]) -> Sheet {
    let has_clinic = months.iter().any(|m| m.clinic.is_some());

    let mut headers = vec!["Month", "Year", "Quarter", "Cases", "In-Home Cases"];
    if has_clinic {
        headers.push("Clinic Cases");
    }
    headers.extend([
        "Direct Hours",
        "Supervision Hours",
        "Assessment Hours",
        "Rev 97153",
        "Rev 97155",
        "Rev 97151",
        "Revenue",
        "Technician Labor",
        "Analyst Labor",
        "Fixed Labor",
        "Fixed Headcount",
        "Direct-Care Headcount",
        "Operating Expense",
        "Profit Share",
        "EBITDA",
        "Cumulative EBITDA",
        "Margin %",
    ]);

    let rows = months
        .iter()
        .map(|m| {
            let hours = m.hours();
            let revenue = m.revenue_by_service();
            let mut row = vec![
                m.month.to_string(),
                m.year.to_string(),
                m.quarter.to_string(),
                whole_cell(m.caseload()),
                whole_cell(m.in_home.caseload),
            ];
            if has_clinic {
                row.push(whole_cell(m.clinic_caseload()));
            }
            row.extend([
                whole_cell(hours.direct_care),
                whole_cell(hours.supervision),
                whole_cell(hours.assessment),
                whole_cell(revenue.direct_care),
                whole_cell(revenue.supervision),
                whole_cell(revenue.assessment),
                whole_cell(m.revenue),
                whole_cell(m.variable_labor.technician),
                whole_cell(m.variable_labor.analyst),
                whole_cell(m.fixed_labor),
                m.fixed_headcount.normalize().to_string(),
                whole_cell(m.direct_care_headcount),
                whole_cell(m.operating_expense.total()),
                whole_cell(m.profit_share),
                whole_cell(m.ebitda),
                whole_cell(m.cumulative_ebitda),
                margin_cell(margin_pct(m.ebitda, m.revenue)),
            ]);
            row
        })
        .collect();

    Sheet {
        name: MONTHLY_SHEET.to_string(),
        headers: headers.into_iter().map(String::from).collect(),
        rows,
    }
}

fn summary_sheet(periods: &[PeriodRecord]) -> Sheet {
    let headers = [
        "Period",
        "Cases",
        "Revenue",
        "Variable Labor",
        "Fixed Labor",
        "Operating Expense",
        "Profit Share",
        "EBITDA",
        "Cumulative EBITDA",
        "Margin %",
    ];

    let rows = periods
        .iter()
        .map(|p| {
            vec![
                p.label.clone(),
                whole_cell(p.caseload),
                whole_cell(p.revenue),
                whole_cell(p.variable_labor.total()),
                whole_cell(p.fixed_labor),
                whole_cell(p.operating_expense),
                whole_cell(p.profit_share),
                whole_cell(p.ebitda),
                whole_cell(p.cumulative_ebitda),
                margin_cell(p.margin_pct),
            ]
        })
        .collect();

    Sheet {
        name: SUMMARY_SHEET.to_string(),
        headers: headers.into_iter().map(String::from).collect(),
        rows,
    }
}
