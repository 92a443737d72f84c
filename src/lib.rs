//! Five-year financial projection engine for an ABA therapy provider.
//!
//! This crate projects 60 months of case volume, billable hours, revenue,
//! labor cost, operating expense and EBITDA across an in-home division and
//! an optional clinic division, then rolls the series up into quarters and
//! years, finds profit milestones and explains any period's totals.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod models;
