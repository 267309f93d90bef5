//! Shared test fixtures for the sales dashboard integration tests.
//!
//! Datasets are written as CSV temp files and loaded through the public
//! builder, so every test exercises the real loader and DuckDB queries.

#![allow(dead_code)]

use sales_dashboard::SalesDashboard;
use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str =
    "transaction_id,transaction_date,transaction_qty,unit_price,store_location,product_category,product_type";

/// One CSV row in the required column layout.
#[derive(Debug, Clone)]
pub struct SaleRow {
    pub id: String,
    pub date: String,
    pub qty: f64,
    pub price: f64,
    pub store: &'static str,
    pub category: &'static str,
    pub product_type: &'static str,
}

impl SaleRow {
    pub fn new(id: impl ToString, date: &str, qty: f64, price: f64) -> Self {
        Self {
            id: id.to_string(),
            date: date.to_string(),
            qty,
            price,
            store: "Lower Manhattan",
            category: "Coffee",
            product_type: "Barista Espresso",
        }
    }

    pub fn at(mut self, store: &'static str, category: &'static str, product_type: &'static str) -> Self {
        self.store = store;
        self.category = category;
        self.product_type = product_type;
        self
    }

    fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.id, self.date, self.qty, self.price, self.store, self.category, self.product_type
        )
    }
}

/// Write a header line plus raw lines to a `.csv` temp file.
pub fn write_csv(header: &str, lines: &[String]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "{}", header).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

/// Load rows into a fresh dashboard.
///
/// DuckDB copies the CSV into an in-memory table, so the temp file can be
/// dropped as soon as loading returns.
pub fn load_rows(rows: &[SaleRow]) -> SalesDashboard {
    let lines: Vec<String> = rows.iter().map(SaleRow::to_csv_line).collect();
    let file = write_csv(HEADER, &lines);
    SalesDashboard::builder().load_csv(file.path()).unwrap()
}

/// CSV bytes for `rows`, as an upload would deliver them.
pub fn csv_bytes(rows: &[SaleRow]) -> Vec<u8> {
    let mut out = format!("{}\n", HEADER);
    for row in rows {
        out.push_str(&row.to_csv_line());
        out.push('\n');
    }
    out.into_bytes()
}

/// Two months of coffee-shop sales.
///
/// January 2023: 4 orders, 7 units, $23.00.
/// February 2023: 4 orders (one id spans two lines), 10 units, $27.00.
pub fn sample_rows() -> Vec<SaleRow> {
    vec![
        SaleRow::new(1, "2023-01-02 07:15:00", 2.0, 3.0),
        SaleRow::new(2, "2023-01-02 08:30:00", 1.0, 2.5).at("Astoria", "Tea", "Brewed Chai tea"),
        SaleRow::new(3, "2023-01-07 09:05:00", 3.0, 3.5).at("Hell's Kitchen", "Bakery", "Scone"),
        SaleRow::new(4, "2023-01-07 09:45:00", 1.0, 4.0).at("Lower Manhattan", "Coffee", "Gourmet brewed coffee"),
        SaleRow::new(5, "2023-02-01 07:10:00", 1.0, 3.0),
        SaleRow::new(6, "2023-02-01 07:40:00", 2.0, 2.5).at("Astoria", "Tea", "Brewed Chai tea"),
        SaleRow::new(7, "2023-02-05 10:20:00", 2.0, 3.5).at("Hell's Kitchen", "Bakery", "Scone"),
        SaleRow::new(7, "2023-02-05 10:20:00", 1.0, 4.0).at("Hell's Kitchen", "Coffee", "Gourmet brewed coffee"),
        SaleRow::new(8, "2023-02-05 11:00:00", 4.0, 2.0).at("Astoria", "Coffee", "Drip coffee"),
    ]
}

pub fn sample_dashboard() -> SalesDashboard {
    load_rows(&sample_rows())
}

/// January: 100 rows at $5.00 ($500). February: 50 rows of 2 x $3.00 ($300).
pub fn two_month_scenario_rows() -> Vec<SaleRow> {
    let mut rows = Vec::with_capacity(150);
    for i in 0..100 {
        let date = format!("2023-01-{:02} {:02}:00:00", 1 + i % 28, 7 + i % 10);
        rows.push(SaleRow::new(1000 + i, &date, 1.0, 5.0));
    }
    for i in 0..50 {
        let date = format!("2023-02-{:02} {:02}:30:00", 1 + i % 28, 7 + i % 10);
        rows.push(SaleRow::new(2000 + i, &date, 2.0, 3.0).at("Astoria", "Tea", "Brewed Chai tea"));
    }
    rows
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
