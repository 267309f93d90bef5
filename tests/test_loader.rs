//! Loader tests: CSV ingestion and derived columns.

mod common;

use common::{approx, SaleRow};
use sales_dashboard::{DashboardError, Period, SalesDashboard};

fn p(s: &str) -> Period {
    s.parse().unwrap()
}

// ---------------------------------------------------------------------------
// Derived columns
// ---------------------------------------------------------------------------

#[test]
fn derives_period_weekday_hour_and_revenue() {
    let dashboard = common::sample_dashboard();
    let rows = dashboard.transactions().list(p("2023-01"), None).unwrap();
    assert_eq!(rows.len(), 4);

    let first = &rows[0];
    assert_eq!(first.transaction_id.as_deref(), Some("1"));
    assert_eq!(first.transaction_ts, "2023-01-02 07:15:00");
    assert_eq!(first.month_period, "2023-01");
    assert_eq!(first.sale_date, "2023-01-02");
    assert_eq!(first.weekday, 0); // Monday
    assert_eq!(first.hour, 7);
    assert!(approx(first.sales.unwrap(), 6.0));

    let saturday = &rows[2];
    assert_eq!(saturday.weekday, 5);
    assert_eq!(saturday.store_location.as_deref(), Some("Hell's Kitchen"));
    assert!(approx(saturday.sales.unwrap(), 10.5));
}

#[test]
fn revenue_is_quantity_times_price_for_every_row() {
    let dashboard = common::sample_dashboard();
    for period in dashboard.periods().unwrap() {
        for row in dashboard.transactions().list(period, None).unwrap() {
            let expected = row.transaction_qty.unwrap() * row.unit_price.unwrap();
            assert!(approx(row.sales.unwrap(), expected));
        }
    }
}

#[test]
fn list_respects_limit_and_file_order() {
    let dashboard = common::sample_dashboard();
    let rows = dashboard.transactions().list(p("2023-02"), Some(2)).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].source_row < rows[1].source_row);
    assert_eq!(rows[0].transaction_id.as_deref(), Some("5"));
}

#[test]
fn row_count_matches_file() {
    let dashboard = common::sample_dashboard();
    assert_eq!(dashboard.row_count(), 9);
    assert_eq!(dashboard.transactions().count().unwrap(), 9);
}

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

#[test]
fn periods_follow_first_appearance_in_file() {
    let mut rows = common::sample_rows();
    rows.rotate_left(4); // February rows first
    let dashboard = common::load_rows(&rows);

    assert_eq!(dashboard.periods().unwrap(), vec![p("2023-02"), p("2023-01")]);
    assert_eq!(dashboard.default_period().unwrap(), Some(p("2023-02")));
}

#[test]
fn header_only_file_has_no_periods() {
    let dashboard = common::load_rows(&[]);
    assert_eq!(dashboard.row_count(), 0);
    assert!(dashboard.periods().unwrap().is_empty());
    assert_eq!(dashboard.default_period().unwrap(), None);
}

// ---------------------------------------------------------------------------
// Timestamp formats
// ---------------------------------------------------------------------------

#[test]
fn plain_iso_dates_load_at_midnight() {
    let dashboard = common::load_rows(&[SaleRow::new("a", "2023-03-15", 1.0, 2.0)]);
    let rows = dashboard.transactions().list(p("2023-03"), None).unwrap();
    assert_eq!(rows[0].hour, 0);
    assert_eq!(rows[0].weekday, 2); // Wednesday
}

#[test]
fn us_dates_with_separate_time_column() {
    let file = common::write_csv(
        "transaction_id,transaction_date,transaction_time,transaction_qty,store_id,store_location,product_id,unit_price,product_category,product_type,product_detail",
        &[
            "1,1/1/2023,7:06:11,2,5,Lower Manhattan,32,3,Coffee,Gourmet brewed coffee,Ethiopia Rg".to_string(),
            "2,1/31/2023,19:59:59,1,8,Hell's Kitchen,57,3.1,Tea,Brewed Chai tea,Spicy Eye Opener Chai Lg".to_string(),
        ],
    );
    let dashboard = SalesDashboard::builder().load_csv(file.path()).unwrap();
    let rows = dashboard.transactions().list(p("2023-01"), None).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].transaction_ts, "2023-01-01 07:06:11");
    assert_eq!(rows[0].hour, 7);
    assert_eq!(rows[0].weekday, 6); // Sunday
    assert_eq!(rows[1].hour, 19);
    assert!(approx(rows[1].sales.unwrap(), 3.1));
}

#[test]
fn empty_cells_load_as_missing_values() {
    let file = common::write_csv(
        common::HEADER,
        &[
            "1,2023-04-03 08:00:00,2,3.0,,Coffee,Latte".to_string(),
            "2,2023-04-03 09:00:00,,3.0,Astoria,,Latte".to_string(),
            "3,2023-04-04 10:00:00,1,4.0,Astoria,Coffee,Latte".to_string(),
        ],
    );
    let dashboard = SalesDashboard::builder().load_csv(file.path()).unwrap();
    let rows = dashboard.transactions().list(p("2023-04"), None).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].store_location, None);
    assert!(approx(rows[0].sales.unwrap(), 6.0));
    assert_eq!(rows[1].transaction_qty, None);
    assert_eq!(rows[1].sales, None);
    assert_eq!(rows[1].product_category, None);

    // NULL keys drop out of the breakdowns; NULL sales add nothing
    let stores = dashboard.breakdowns().by_store_location(p("2023-04")).unwrap();
    assert_eq!(stores.keys(), vec!["Astoria"]);
    assert!(approx(stores.get("Astoria").unwrap(), 4.0));
    let totals = dashboard.kpis().totals(p("2023-04")).unwrap();
    assert!(approx(totals.total_sales, 10.0));
}

#[test]
fn load_from_bytes_matches_load_from_file() {
    let bytes = common::csv_bytes(&common::sample_rows());
    let dashboard = SalesDashboard::builder().load_csv_bytes(&bytes).unwrap();
    assert_eq!(dashboard.row_count(), 9);
    assert_eq!(dashboard.periods().unwrap(), vec![p("2023-01"), p("2023-02")]);
}

// ---------------------------------------------------------------------------
// Unvalidated input surfaces as DuckDB errors
// ---------------------------------------------------------------------------

#[test]
fn missing_required_column_fails_load() {
    let file = common::write_csv(
        "transaction_id,transaction_date,transaction_qty,store_location,product_category,product_type",
        &["1,2023-01-02,1,Astoria,Tea,Brewed Chai tea".to_string()],
    );
    let err = SalesDashboard::builder().load_csv(file.path()).unwrap_err();
    assert!(matches!(err, DashboardError::DuckDb(_)));
}

#[test]
fn non_numeric_quantity_fails_load() {
    let file = common::write_csv(
        common::HEADER,
        &["1,2023-01-02,two,3.0,Astoria,Tea,Brewed Chai tea".to_string()],
    );
    assert!(SalesDashboard::builder().load_csv(file.path()).is_err());
}

#[test]
fn unparseable_date_fails_load() {
    let file = common::write_csv(
        common::HEADER,
        &["1,sometime,1,3.0,Astoria,Tea,Brewed Chai tea".to_string()],
    );
    assert!(SalesDashboard::builder().load_csv(file.path()).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let err = SalesDashboard::builder()
        .load_csv("/nonexistent/coffee_shop_sales.csv")
        .unwrap_err();
    assert!(matches!(err, DashboardError::DuckDb(_)));
}
