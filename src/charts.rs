//! Vega-Lite chart specifications for the dashboard widgets.
//!
//! Each function returns a complete Vega-Lite v5 spec as a
//! `serde_json::Value` with the data inlined, ready for `vegaEmbed`.

use serde_json::{json, Value};

use crate::config::WEEKDAY_NAMES;
use crate::models::{Breakdown, Heatmap};

const SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

fn breakdown_values(breakdown: &Breakdown) -> Vec<Value> {
    breakdown
        .entries
        .iter()
        .map(|e| json!({ "key": e.key, "sales": e.value }))
        .collect()
}

/// Daily revenue as a line over time.
pub fn line_chart(title: &str, series: &Breakdown) -> Value {
    json!({
        "$schema": SCHEMA,
        "title": title,
        "width": "container",
        "height": 280,
        "data": { "values": breakdown_values(series) },
        "mark": { "type": "line", "point": true, "tooltip": true },
        "encoding": {
            "x": { "field": "key", "type": "temporal", "title": "Date" },
            "y": { "field": "sales", "type": "quantitative", "title": "Sales" }
        }
    })
}

/// Bars in the breakdown's own order (ascending by value for the dashboard).
pub fn bar_chart(title: &str, key_title: &str, breakdown: &Breakdown) -> Value {
    json!({
        "$schema": SCHEMA,
        "title": title,
        "width": "container",
        "height": 280,
        "data": { "values": breakdown_values(breakdown) },
        "mark": { "type": "bar", "tooltip": true },
        "encoding": {
            "x": {
                "field": "key",
                "type": "nominal",
                "title": key_title,
                "sort": breakdown.keys()
            },
            "y": { "field": "sales", "type": "quantitative", "title": "Sales" }
        }
    })
}

/// Share of revenue per key as a pie.
pub fn pie_chart(title: &str, breakdown: &Breakdown) -> Value {
    json!({
        "$schema": SCHEMA,
        "title": title,
        "width": "container",
        "height": 280,
        "data": { "values": breakdown_values(breakdown) },
        "mark": { "type": "arc", "tooltip": true },
        "encoding": {
            "theta": { "field": "sales", "type": "quantitative", "stack": true },
            "color": {
                "field": "key",
                "type": "nominal",
                "title": null,
                "sort": breakdown.keys()
            },
            "order": { "field": "order", "type": "quantitative" }
        },
        "transform": [{ "window": [{ "op": "row_number", "as": "order" }] }]
    })
}

/// Weekday x hour grid coloured by revenue, each cell annotated with its
/// value to one decimal.
pub fn heatmap_chart(heatmap: &Heatmap) -> Value {
    let mut values = Vec::with_capacity(heatmap.weekdays.len() * heatmap.hours.len());
    for (row, weekday) in heatmap.weekdays.iter().enumerate() {
        for (col, hour) in heatmap.hours.iter().enumerate() {
            values.push(json!({
                "weekday": weekday_label(*weekday),
                "hour": hour,
                "sales": heatmap.cells[row][col],
            }));
        }
    }
    let weekday_order: Vec<String> = heatmap.weekdays.iter().map(|w| weekday_label(*w)).collect();

    json!({
        "$schema": SCHEMA,
        "title": "Sales Heatmap",
        "width": "container",
        "height": 40 * heatmap.weekdays.len().max(1),
        "data": { "values": values },
        "encoding": {
            "x": { "field": "hour", "type": "ordinal", "title": "Hour of Day" },
            "y": {
                "field": "weekday",
                "type": "ordinal",
                "title": "Day of Week",
                "sort": weekday_order
            }
        },
        "layer": [
            {
                "mark": { "type": "rect", "tooltip": true },
                "encoding": {
                    "color": {
                        "field": "sales",
                        "type": "quantitative",
                        "title": "Sales",
                        "scale": { "scheme": "yelloworangered" }
                    }
                }
            },
            {
                "mark": { "type": "text", "fontSize": 9 },
                "encoding": {
                    "text": { "field": "sales", "type": "quantitative", "format": ".1f" }
                }
            }
        ]
    })
}

fn weekday_label(weekday: u32) -> String {
    WEEKDAY_NAMES
        .get(weekday as usize)
        .map(|n| n.to_string())
        .unwrap_or_else(|| weekday.to_string())
}
