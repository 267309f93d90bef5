use serde::{Deserialize, Serialize};

use crate::period::Period;

// ---------------------------------------------------------------------------
// Kpis: Headline totals for one period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_sales: f64,
    /// Number of distinct transaction ids.
    pub total_orders: i64,
    pub total_quantity: f64,
}

// ---------------------------------------------------------------------------
// KpiComparison: Current vs previous month
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiComparison {
    pub period: Period,
    pub previous_period: Option<Period>,
    pub current: Kpis,
    /// All zero when the previous month has no rows.
    pub previous: Kpis,
    pub sales_change: f64,
    pub orders_change: f64,
    pub quantity_change: f64,
}

// ---------------------------------------------------------------------------
// Advisory: Message keyed off the sales change
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    Increase,
    Decrease,
    Neutral,
}

impl Advisory {
    /// Classify a sales change (percent) against a symmetric threshold.
    pub fn from_change(sales_change: f64, threshold: f64) -> Self {
        if sales_change > threshold {
            Advisory::Increase
        } else if sales_change < -threshold {
            Advisory::Decrease
        } else {
            Advisory::Neutral
        }
    }

    /// Text shown to the operator, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Advisory::Increase => Some(crate::config::INCREASE_MESSAGE),
            Advisory::Decrease => Some(crate::config::DECREASE_MESSAGE),
            Advisory::Neutral => None,
        }
    }
}
