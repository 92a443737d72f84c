//! Core data models for the projection engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod hire;
mod month_record;
mod period;
mod service;

pub use audit::{AuditBreakdown, AuditStep, AuditWarning, ServiceLine, StaffCostLine};
pub use hire::{
    Division, HireEntry, MAX_ANNUAL_SALARY, MAX_HEADCOUNT, ROADMAP_CELL_COERCED, RoadmapRow,
    RoleCategory, resolve_roadmap, roadmap_headcount,
};
pub use month_record::{
    AccountingBasis, DivisionMonth, FlatExpense, ItemizedExpense, MonthRecord, OperatingExpense,
    StaffCost,
};
pub use period::{Granularity, Period, PeriodRecord, quarter_of, year_of};
pub use service::{ServiceAmounts, ServiceCode, VariableLabor};
