//! HTML rendering of the dashboard page.
//!
//! The page is self-contained apart from the Vega-Lite runtime, which is
//! loaded from a CDN and draws the specs produced by [`crate::charts`].

use std::fmt::Write as _;

use serde_json::Value;

use crate::charts;
use crate::config::{ABOUT_TEXT, HOVER_CAPTION, INSTRUCTIONS_TEXT, UPLOAD_PROMPT};
use crate::models::Advisory;
use crate::period::Period;
use crate::report::DashboardReport;

const TITLE: &str = "☕ Coffee Shop Sales Dashboard";

const VEGA_SCRIPTS: &str = r#"<script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
<script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
<script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>"#;

const STYLE: &str = r#"<style>
body { margin: 0; font-family: sans-serif; display: flex; color: #262730; }
aside { width: 280px; min-height: 100vh; padding: 1.5rem; background: #f0f2f6; box-sizing: border-box; }
main { flex: 1; padding: 1.5rem 3rem; min-width: 0; }
.tiles { display: flex; gap: 2rem; margin: 1rem 0; }
.tile .label { font-size: 0.9rem; }
.tile .value { font-size: 2.2rem; }
.delta.up { color: #09ab3b; } .delta.down { color: #ff2b2b; } .delta.flat { color: #808495; }
.alert { padding: 1rem; border-radius: 0.5rem; margin: 1rem 0; }
.alert.success { background: #dff5e3; } .alert.warning { background: #fffbe0; } .alert.info { background: #e0efff; }
.chart { width: 100%; margin-bottom: 2rem; }
.caption { color: #808495; font-size: 0.85rem; }
</style>"#;

/// Page shown before any dataset has been uploaded.
pub fn render_upload_prompt() -> String {
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>", escape_html(TITLE));
    let _ = write!(
        body,
        r#"<div class="alert warning">{}</div>"#,
        escape_html(UPLOAD_PROMPT)
    );
    page(&sidebar(&[], None), &body, "")
}

/// Page for a selection that cannot be shown, keeping the sidebar usable.
///
/// With no months loaded the upload prompt is repeated under the message.
pub fn render_notice(message: &str, periods: &[Period]) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>", escape_html(TITLE));
    let _ = write!(
        body,
        r#"<div class="alert warning">{}</div>"#,
        escape_html(message)
    );
    if periods.is_empty() {
        let _ = write!(
            body,
            r#"<div class="alert warning">{}</div>"#,
            escape_html(UPLOAD_PROMPT)
        );
    }
    page(&sidebar(periods, None), &body, "")
}

/// The full dashboard for one report.
pub fn render_dashboard(report: &DashboardReport) -> String {
    let period = report.period().to_string();
    let kpis = &report.kpis;

    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>", escape_html(TITLE));
    let _ = write!(body, "<h3>Sales Report for {}</h3>", escape_html(&period));

    body.push_str(r#"<div class="tiles">"#);
    body.push_str(&tile(
        "Total Sales",
        &format!("${}", format_thousands(kpis.current.total_sales)),
        kpis.sales_change,
    ));
    body.push_str(&tile(
        "Total Orders",
        &format_thousands(kpis.current.total_orders as f64),
        kpis.orders_change,
    ));
    body.push_str(&tile(
        "Total Quantity Sold",
        &format_thousands(kpis.current.total_quantity),
        kpis.quantity_change,
    ));
    body.push_str("</div>");

    let specs: Vec<(&str, Option<&str>, Value)> = vec![
        (
            "trend",
            Some("Sales Trend Over the Period"),
            charts::line_chart("Daily Sales", &report.sales_trend),
        ),
        (
            "weekday",
            None,
            charts::pie_chart("Sales by Weekday", &report.weekday_sales),
        ),
        (
            "day-type",
            None,
            charts::pie_chart("Sales by Weekday / Weekend", &report.day_type_sales),
        ),
        (
            "store",
            Some("Sales by Store Location"),
            charts::bar_chart("Store Sales", "Store Location", &report.store_sales),
        ),
        (
            "category",
            Some("Sales by Product Category"),
            charts::bar_chart("Category Sales", "Product Category", &report.category_sales),
        ),
        (
            "product-type",
            Some("Sales by Product Type"),
            charts::bar_chart("Product Type Sales", "Product Type", &report.product_type_sales),
        ),
        (
            "heatmap",
            Some("Sales by Days and Hours"),
            charts::heatmap_chart(&report.heatmap),
        ),
    ];

    let mut script = String::new();
    for (id, subheader, spec) in &specs {
        if let Some(text) = subheader {
            let _ = write!(body, "<h3>{}</h3>", escape_html(text));
        }
        let _ = write!(body, r#"<div class="chart" id="chart-{}"></div>"#, id);
        let _ = writeln!(
            script,
            "vegaEmbed('#chart-{}', {}, {{ actions: false }});",
            id,
            script_json(spec)
        );
    }

    let _ = write!(body, r#"<p class="caption">{}</p>"#, escape_html(HOVER_CAPTION));

    if let Some(message) = report.advisory.message() {
        let class = match report.advisory {
            Advisory::Increase => "success",
            _ => "warning",
        };
        let _ = write!(
            body,
            r#"<div class="alert {}">{}</div>"#,
            class,
            escape_html(message)
        );
    }

    page(&sidebar(&report.periods, Some(report.period())), &body, &script)
}

fn tile(label: &str, value: &str, change: f64) -> String {
    let class = if change > 0.0 {
        "up"
    } else if change < 0.0 {
        "down"
    } else {
        "flat"
    };
    format!(
        r#"<div class="tile"><div class="label">{}</div><div class="value">{}</div><div class="delta {}">{}</div></div>"#,
        escape_html(label),
        escape_html(value),
        class,
        escape_html(&format_delta(change))
    )
}

fn sidebar(periods: &[Period], selected: Option<Period>) -> String {
    let mut out = String::new();
    out.push_str(
        r#"<form method="post" action="/upload" enctype="multipart/form-data">
<h4>Upload Coffee Shop Sales Dataset</h4>
<input type="file" name="file" accept=".csv" required>
<button type="submit">Upload</button>
</form>"#,
    );

    if !periods.is_empty() {
        out.push_str(r#"<h2>Filter Panel</h2><form method="get" action="/">"#);
        out.push_str(r#"<label for="month">Select Month</label><br>"#);
        out.push_str(r#"<select id="month" name="month" onchange="this.form.submit()">"#);
        for p in periods {
            let value = escape_html(&p.to_string());
            let marker = if Some(*p) == selected { " selected" } else { "" };
            let _ = write!(out, r#"<option value="{0}"{1}>{0}</option>"#, value, marker);
        }
        out.push_str("</select></form>");
    }

    let _ = write!(
        out,
        r#"<h4>Instructions</h4><div class="alert info">{}</div><h4>About</h4><p>{}</p>"#,
        escape_html(INSTRUCTIONS_TEXT),
        escape_html(ABOUT_TEXT)
    );
    out
}

fn page(sidebar: &str, body: &str, script: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n{style}\n{vega}\n</head>\n<body>\n<aside>{sidebar}</aside>\n<main>{body}</main>\n<script>\n{script}</script>\n</body>\n</html>\n",
        title = escape_html(TITLE),
        style = STYLE,
        vega = VEGA_SCRIPTS,
        sidebar = sidebar,
        body = body,
        script = script,
    )
}

/// Serialize a spec for inlining inside a `<script>` element.
fn script_json(spec: &Value) -> String {
    spec.to_string().replace("</", "<\\/")
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Round to a whole number and group thousands with commas.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", rounded.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

/// Month-over-month delta text, e.g. `-40.0% vs LM`.
pub fn format_delta(change: f64) -> String {
    format!("{:.1}% vs LM", change)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1234.0), "1,234");
        assert_eq!(format_thousands(1234567.8), "1,234,568");
        assert_eq!(format_thousands(-2500.0), "-2,500");
    }

    #[test]
    fn delta_has_one_decimal() {
        assert_eq!(format_delta(-40.0), "-40.0% vs LM");
        assert_eq!(format_delta(0.0), "0.0% vs LM");
        assert_eq!(format_delta(12.345), "12.3% vs LM");
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Hell's" & Co</b>"#),
            "&lt;b&gt;&quot;Hell&#39;s&quot; &amp; Co&lt;/b&gt;"
        );
    }

    #[test]
    fn script_json_cannot_close_script_tag() {
        let spec = serde_json::json!({ "title": "</script><script>alert(1)" });
        assert!(!script_json(&spec).contains("</script>"));
    }

    #[test]
    fn notice_keeps_upload_form_and_month_list() {
        let periods: [Period; 2] = ["2023-01".parse().unwrap(), "2023-02".parse().unwrap()];
        let html = render_notice("Not found: No transactions in 2030-01", &periods);
        assert!(html.contains("No transactions in 2030-01"));
        assert!(html.contains(r#"action="/upload""#));
        assert!(html.contains(r#"<option value="2023-02">2023-02</option>"#));
        assert!(!html.contains(" selected>"));
        assert!(!html.contains(UPLOAD_PROMPT));
    }

    #[test]
    fn notice_without_months_repeats_upload_prompt() {
        let html = render_notice("Not found: Dataset contains no transactions", &[]);
        assert!(html.contains(UPLOAD_PROMPT));
        assert!(html.contains(r#"action="/upload""#));
        assert!(!html.contains("Filter Panel"));
    }

    #[test]
    fn upload_prompt_page_asks_for_dataset() {
        let html = render_upload_prompt();
        assert!(html.contains(UPLOAD_PROMPT));
        assert!(html.contains(r#"action="/upload""#));
        assert!(!html.contains("Filter Panel"));
    }
}
