mod common;

use chrono::{NaiveDate, TimeZone, Utc};
use reform_storefront::{
    reports::{self, format_amount, format_date, format_date_str, format_inr, safe_filename},
    seed,
    services::{business_service, mitra_service, report_service},
    models::UserRole,
};

#[test]
fn inr_uses_indian_grouping() {
    assert_eq!(format_inr(0.0), "₹0");
    assert_eq!(format_inr(899.0), "₹899");
    assert_eq!(format_inr(2499.0), "₹2,499");
    assert_eq!(format_inr(284000.0), "₹2,84,000");
    assert_eq!(format_inr(12345678.0), "₹1,23,45,678");
    assert_eq!(format_inr(1234.6), "₹1,235");
}

#[test]
fn dates_and_amounts_read_naturally() {
    let christmas = NaiveDate::from_ymd_opt(2024, 12, 25).expect("date");
    assert_eq!(format_date(christmas), "25 December 2024");
    assert_eq!(format_date_str("2024-01-05"), "5 January 2024");
    assert_eq!(format_date_str("soon"), "soon");
    assert_eq!(format_amount(45.0), "45");
    assert_eq!(format_amount(12.5), "12.5");
}

#[test]
fn invoice_lists_items_totals_and_delivery() -> anyhow::Result<()> {
    let order = seed::orders()?
        .into_iter()
        .find(|o| o.id == "ORD-1735123456789")
        .expect("seed order");
    let now = Utc.with_ymd_and_hms(2024, 12, 26, 6, 0, 0).single().expect("time");

    let report = reports::invoice(&order, now);
    assert_eq!(report.filename, "ReForm_Invoice_ORD-1735123456789.txt");
    assert!(report.content.contains("ReForm"));
    assert!(report.content.contains("Report Title: Order Invoice"));
    assert!(report.content.contains("Generated on: 26 December 2024, 11:30 AM IST"));
    assert!(report.content.contains(&format!("Order ID: {}", order.id)));
    assert!(report.content.contains("Total Amount (Cash): ₹2,499"));
    assert!(report.content.contains("Shipping: FREE"));
    assert!(report.content.contains("Cash on Delivery (COD)"));
    assert!(report.content.contains(&order.shipping_address.pincode));
    assert!(report.content.contains("© 2024 ReForm"));
    Ok(())
}

#[tokio::test]
async fn portal_reports_are_built_for_the_session() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;

    let mitra = common::session(UserRole::Mitra, "raj@reform.dev", "Raj Kumar");
    let report = mitra_service::performance_report(&state, &mitra).await?;
    assert!(report.filename.starts_with("ReForm_Mitra_Performance_Report_"));
    assert!(report.content.contains("Mitra Name: Raj Kumar"));
    assert!(report.content.contains("Electronic Waste: 2 collections, 77 kg, ₹2,310"));
    assert!(report.content.contains("Efficiency Rating: 98%"));

    let business = common::session(UserRole::Business, "contact@greencorp.com", "John Smith");
    let report = business_service::summary_report(&state, &business).await?;
    assert!(report.filename.starts_with("ReForm_Business_Summary_Green_Corp_Ltd_"));
    assert!(report.content.contains("Total GreenCredits Earned: 180"));
    assert!(report.content.contains("Total Collections Scheduled: 2"));

    let cert = business_service::certificate_download(&state, &business, "EPR-2024-001").await?;
    assert_eq!(cert.filename, "ReForm_Certificate_EPR-2024-001.txt");
    assert!(cert.content.contains("Company Name: Green Corp Ltd"));

    let customer = common::customer();
    let report = report_service::customer_data(&state, &customer).await?;
    assert!(report.filename.starts_with("ReForm_Customer_Data_Test_User_"));
    assert!(report.content.contains("Total Orders: 3"));
    assert!(report.content.contains("Cancelled Orders: 0"));

    let invoice = report_service::invoice(&state, &customer, "ORD-1735123456790").await?;
    assert!(invoice.content.contains("GreenCredits"));
    Ok(())
}

#[test]
fn download_names_keep_only_safe_characters() {
    assert_eq!(safe_filename("Test User"), "Test_User");
    assert_eq!(safe_filename("O\"Brien\r\nX-Ray.txt"), "OBrien_X-Ray.txt");
    assert_eq!(safe_filename("  Ana   Maria  "), "Ana_Maria");
}

#[tokio::test]
async fn registered_names_cannot_break_the_download_header() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let sneaky = common::session(UserRole::Customer, "q@example.com", "Bob \"; x=\ny");

    let report = report_service::customer_data(&state, &sneaky).await?;
    assert!(report.filename.starts_with("ReForm_Customer_Data_Bob__x_y_"));
    assert!(
        report
            .filename
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    );
    Ok(())
}
