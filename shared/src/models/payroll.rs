//! Payroll Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payroll entry for an employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollEntry {
    pub id: Option<String>,
    pub employee_name: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Amount in currency unit
    pub amount: f64,
    pub notes: Option<String>,
    pub recorded_by: String,
}
