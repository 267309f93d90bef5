//! Period selection: which month is "current" and which is "previous".

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::period::Period;

/// The operator's choice for one request.
///
/// `month: None` means "use the default", i.e. the first month listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub month: Option<Period>,
}

impl Selection {
    pub fn month(period: Period) -> Self {
        Self {
            month: Some(period),
        }
    }
}

/// The selected month and the calendar month before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub current: Period,
    pub previous: Option<Period>,
    /// Whether any row falls in `previous`.
    pub previous_present: bool,
}

impl PeriodWindow {
    /// Resolve a selection against the months present in the data.
    ///
    /// `available` is in list order; its first entry is the default. The
    /// previous month comes from calendar arithmetic, not list position.
    pub fn resolve(selection: &Selection, available: &[Period]) -> Result<Self> {
        let current = match selection.month {
            Some(p) if available.contains(&p) => p,
            Some(p) => {
                return Err(DashboardError::NotFound(format!(
                    "No transactions in {}",
                    p
                )))
            }
            None => *available.first().ok_or(DashboardError::NotFound(
                "Dataset contains no transactions".to_string(),
            ))?,
        };
        Ok(Self::for_period(current, available))
    }

    /// Build the window for a known month.
    pub fn for_period(current: Period, available: &[Period]) -> Self {
        let previous = current.previous();
        let previous_present = previous.map(|p| available.contains(&p)).unwrap_or(false);
        Self {
            current,
            previous,
            previous_present,
        }
    }
}
