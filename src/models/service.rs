//! Billing service codes and per-code amounts.

use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A billable service category, each mapped to one CPT code.
///
/// # Example
///
/// ```
/// use aba_proforma::models::ServiceCode;
///
/// assert_eq!(ServiceCode::DirectCare.cpt_code(), "97153");
/// assert_eq!(ServiceCode::ALL.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCode {
    /// Direct one-on-one care delivered by a technician (97153).
    DirectCare,
    /// Protocol modification and supervision by an analyst (97155).
    Supervision,
    /// Behavior identification assessment (97151).
    Assessment,
}

impl ServiceCode {
    /// Every service code in reporting order.
    pub const ALL: [ServiceCode; 3] = [
        ServiceCode::DirectCare,
        ServiceCode::Supervision,
        ServiceCode::Assessment,
    ];

    /// Returns the CPT code billed for this service.
    pub fn cpt_code(self) -> &'static str {
        match self {
            ServiceCode::DirectCare => "97153",
            ServiceCode::Supervision => "97155",
            ServiceCode::Assessment => "97151",
        }
    }

    /// Returns a short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ServiceCode::DirectCare => "Direct",
            ServiceCode::Supervision => "Super",
            ServiceCode::Assessment => "Assess",
        }
    }
}

/// One amount per service code (hours or dollars).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAmounts {
    /// Direct care (97153).
    pub direct_care: Decimal,
    /// Supervision (97155).
    pub supervision: Decimal,
    /// Assessment (97151).
    pub assessment: Decimal,
}

impl ServiceAmounts {
    /// Returns the amount for one service code.
    pub fn get(&self, code: ServiceCode) -> Decimal {
        match code {
            ServiceCode::DirectCare => self.direct_care,
            ServiceCode::Supervision => self.supervision,
            ServiceCode::Assessment => self.assessment,
        }
    }

    /// Sum across all service codes.
    pub fn total(&self) -> Decimal {
        self.direct_care + self.supervision + self.assessment
    }

    /// Applies `f` to every code's amount.
    pub fn map(self, f: impl Fn(ServiceCode, Decimal) -> Decimal) -> Self {
        Self {
            direct_care: f(ServiceCode::DirectCare, self.direct_care),
            supervision: f(ServiceCode::Supervision, self.supervision),
            assessment: f(ServiceCode::Assessment, self.assessment),
        }
    }
}

impl Add for ServiceAmounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            direct_care: self.direct_care + rhs.direct_care,
            supervision: self.supervision + rhs.supervision,
            assessment: self.assessment + rhs.assessment,
        }
    }
}

impl AddAssign for ServiceAmounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Variable (billable) labor cost split by labor category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableLabor {
    /// Technician payroll for direct-care hours, fringe included.
    pub technician: Decimal,
    /// Analyst payroll for supervision and assessment hours, fringe included.
    pub analyst: Decimal,
}

impl VariableLabor {
    /// Total variable labor (cost of service).
    pub fn total(&self) -> Decimal {
        self.technician + self.analyst
    }
}

impl Add for VariableLabor {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            technician: self.technician + rhs.technician,
            analyst: self.analyst + rhs.analyst,
        }
    }
}

impl AddAssign for VariableLabor {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
