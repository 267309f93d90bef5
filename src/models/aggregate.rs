use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GroupTotal: Summed revenue for one grouping key (query result)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Breakdown: Ordered mapping from key to summed revenue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub entries: Vec<GroupTotal>,
}

impl Breakdown {
    pub fn new(entries: Vec<GroupTotal>) -> Self {
        Self { entries }
    }

    /// Sum of every entry's value.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// HeatmapCell: Summed revenue for one (weekday, hour) pair (query result)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub weekday: u32,
    pub hour: u32,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Heatmap: Weekday x hour grid
// ---------------------------------------------------------------------------

/// Revenue grid with one row per weekday and one column per hour.
///
/// Only weekdays and hours that occur in the data get a row or column;
/// combinations with no sales inside that grid are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub weekdays: Vec<u32>,
    pub hours: Vec<u32>,
    /// `cells[row][col]` is the revenue for `weekdays[row]` at `hours[col]`.
    pub cells: Vec<Vec<f64>>,
}

impl Heatmap {
    /// Pivot sparse cells into a dense, zero-filled grid.
    pub fn from_cells(cells: &[HeatmapCell]) -> Self {
        let weekdays: Vec<u32> = cells
            .iter()
            .map(|c| c.weekday)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let hours: Vec<u32> = cells
            .iter()
            .map(|c| c.hour)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut sums: BTreeMap<(u32, u32), f64> = BTreeMap::new();
        for c in cells {
            *sums.entry((c.weekday, c.hour)).or_default() += c.value;
        }

        let grid = weekdays
            .iter()
            .map(|w| {
                hours
                    .iter()
                    .map(|h| sums.get(&(*w, *h)).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();

        Self {
            weekdays,
            hours,
            cells: grid,
        }
    }

    /// Revenue for a weekday/hour pair; zero when outside the grid.
    pub fn value(&self, weekday: u32, hour: u32) -> f64 {
        let row = self.weekdays.iter().position(|w| *w == weekday);
        let col = self.hours.iter().position(|h| *h == hour);
        match (row, col) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => 0.0,
        }
    }

    /// Sum over every cell.
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
