//! Plain-text documents offered as downloads: invoices, certificates and
//! the per-portal summary reports. Everything here is pure string assembly
//! over records handed in by the services, with `now` passed explicitly.

use std::fmt::Write as _;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    models::{
        BusinessProfile, Certificate, Collection, CollectionStatus, MitraProfile, Order,
        OrderStatus, PaymentMethod, WasteContribution,
    },
    stores::rates::WASTE_TYPES,
};

const RULE: &str =
    "================================================================================";

#[derive(Debug, Clone)]
pub struct Report {
    pub filename: String,
    pub title: String,
    pub content: String,
}

/// Keeps a download name to ASCII letters, digits, `-`, `_` and `.`, so it
/// can sit inside a quoted `Content-Disposition` value.
pub fn safe_filename(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}

impl Report {
    fn branded(filename: String, title: &str, body: &str, now: DateTime<Utc>) -> Self {
        let mut content = String::new();
        content.push_str(&header(title, now));
        content.push_str(body);
        content.push_str(&footer(now));
        Self {
            filename: safe_filename(&filename),
            title: title.to_string(),
            content,
        }
    }
}

/// Rupees with Indian digit grouping and no fraction, e.g. `₹2,84,000`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}₹{}", group_indian(rounded.unsigned_abs()))
}

fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// `25 December 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Accepts `YYYY-MM-DD` or RFC 3339; anything else is returned untouched.
pub fn format_date_str(raw: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return format_date(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return format_date(ts.date_naive());
    }
    raw.to_string()
}

/// Whole numbers print bare, fractions keep up to three decimals.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{value:.3}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn ist_timestamp(now: DateTime<Utc>) -> String {
    let ist = now.naive_utc() + Duration::minutes(330);
    ist.format("%-d %B %Y, %I:%M %p IST").to_string()
}

fn file_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

fn header(title: &str, now: DateTime<Utc>) -> String {
    format!(
        "\n{RULE}\n{:^80}\n{:^80}\n{RULE}\n\n\
         Report Title: {title}\n\
         Generated on: {}\n\
         Platform: ReForm Waste Management Platform\n\
         Website: https://reform.dev\n\
         Support: support@reform.dev\n\n\
         {RULE}\n\n",
        "ReForm",
        "Reimagining Urban Mining",
        ist_timestamp(now),
    )
}

fn footer(now: DateTime<Utc>) -> String {
    format!(
        "\n\n{RULE}\n{:^80}\n{RULE}\n\n\
         About ReForm:\n\
         ReForm is India's leading waste-to-resource platform, transforming e-waste\n\
         crisis into sustainable, profitable opportunities through technology-driven\n\
         solutions and innovative circular economy practices.\n\n\
         Contact Information:\n\
         - Email: info@reform.dev\n\
         - Phone: +91 (555) 123-4567\n\
         - Address: Mumbai, India\n\n\
         © {} ReForm. All rights reserved.\n\
         Confidential and proprietary information of ReForm Platform.\n\n\
         {RULE}\n",
        "End of Report",
        now.format("%Y"),
    )
}

fn payment_description(label: &str) -> &'static str {
    match label {
        "Credits" => "GreenCredits",
        "Mixed" => "Cash on Delivery (COD) + GreenCredits",
        _ => "Cash on Delivery (COD)",
    }
}

pub fn invoice(order: &Order, now: DateTime<Utc>) -> Report {
    let address = &order.shipping_address;
    let mut body = String::from("INVOICE\n\n");
    let _ = writeln!(body, "Order ID: {}", order.id);
    let _ = writeln!(body, "Order Date: {}", format_date(order.created_at.date_naive()));
    let _ = writeln!(body, "Payment Method: {}\n", order.payment_method);

    body.push_str("BILLING & SHIPPING ADDRESS:\n");
    let _ = writeln!(body, "{}", address.full_name);
    let _ = writeln!(body, "{}", address.address);
    if let Some(landmark) = address.landmark.as_deref().filter(|l| !l.is_empty()) {
        let _ = writeln!(body, "{landmark}");
    }
    let _ = writeln!(body, "{}, {} - {}", address.city, address.state, address.pincode);
    let _ = writeln!(body, "Phone: {}", address.phone);
    let _ = writeln!(body, "Email: {}\n", address.email);

    body.push_str("ORDER ITEMS:\n");
    let _ = writeln!(body, "{:<40} {:<5} {:<12} {:>15}", "Item", "Qty", "Payment", "Amount");
    let _ = writeln!(body, "{}", "-".repeat(80));
    for item in &order.items {
        let name: String = if item.product.name.chars().count() > 35 {
            let cut: String = item.product.name.chars().take(35).collect();
            format!("{cut}...")
        } else {
            item.product.name.clone()
        };
        let amount = match item.payment_method {
            PaymentMethod::Cash => format_inr(item.cash_amount() as f64),
            PaymentMethod::Credits => format!("{} credits", item.credit_amount()),
        };
        let _ = writeln!(
            body,
            "{:<40} {:<5} {:<12} {:>15}",
            name,
            item.quantity,
            item.payment_method.label(),
            amount
        );
    }
    let _ = writeln!(body, "{}", "-".repeat(80));
    let total_items: i64 = order.items
        .iter()
        .map(|item| item.quantity)
        .fold(0, i64::saturating_add);
    let _ = writeln!(body, "Total Items: {total_items}");
    if order.total_price > 0 {
        let _ = writeln!(body, "Total Amount (Cash): {}", format_inr(order.total_price as f64));
    }
    if order.total_credits > 0 {
        let _ = writeln!(body, "Total Amount (Credits): {} GreenCredits", order.total_credits);
    }
    body.push_str("Shipping: FREE\n\n");

    body.push_str("PAYMENT INFORMATION:\n");
    let _ = writeln!(body, "Payment Method: {}", payment_description(&order.payment_method));
    body.push_str("Payment Status: Pending (Pay on delivery)\n\n");

    body.push_str("DELIVERY INFORMATION:\n");
    let eta = order.created_at + Duration::days(5);
    let _ = writeln!(body, "Estimated Delivery: {}", format_date(eta.date_naive()));
    let _ = writeln!(body, "Order Status: {}", order.status.as_str());
    body.push_str("Delivery Method: Standard Delivery\n");
    body.push_str("Tracking: Available after shipment\n\n");

    body.push_str("TERMS & CONDITIONS:\n");
    body.push_str("- Please keep exact change ready for COD orders\n");
    body.push_str("- Delivery within 3-7 business days\n");
    body.push_str("- Items are non-returnable due to their sustainable nature\n");
    body.push_str("- For support, contact: support@reform.dev\n\n");
    body.push_str("Thank you for choosing ReForm and supporting sustainable practices!\n");

    Report::branded(
        format!("ReForm_Invoice_{}.txt", order.id),
        "Order Invoice",
        &body,
        now,
    )
}

pub fn certificate(cert: &Certificate, business: &BusinessProfile, now: DateTime<Utc>) -> Report {
    let mut body = String::from("SUSTAINABILITY CERTIFICATE\n\n");
    let _ = writeln!(body, "Certificate Type: {}", cert.certificate_type);
    let _ = writeln!(body, "Certificate ID: {}", cert.certificate_id);
    let _ = writeln!(body, "Issued Date: {}", format_date_str(&cert.issued_date));
    let _ = writeln!(body, "Valid Until: {}", format_date_str(&cert.valid_until));
    let _ = writeln!(body, "Status: {}\n", cert.status);

    body.push_str("BUSINESS INFORMATION:\n");
    let _ = writeln!(body, "Company Name: {}", business.name);
    let _ = writeln!(body, "Contact Person: {}", business.contact_person);
    let _ = writeln!(body, "Email: {}\n", business.email);

    body.push_str("ENVIRONMENTAL IMPACT:\n");
    let _ = writeln!(body, "Waste Processed: {}", cert.waste_amount);
    let _ = writeln!(body, "CO₂ Saved: {}", cert.co2_saved);
    body.push_str("Environmental Benefit: Significant reduction in landfill waste\n\n");

    body.push_str("CERTIFICATION DETAILS:\n");
    body.push_str("This certificate confirms that the above-mentioned organization has\n");
    body.push_str("successfully participated in ReForm's waste management program and\n");
    body.push_str("has made significant contributions to environmental sustainability.\n\n");
    body.push_str("VERIFICATION:\n");
    body.push_str("This certificate has been verified by ReForm's quality assurance team\n");
    body.push_str("and meets all requirements for ESG compliance reporting.\n\n");
    body.push_str("For verification of this certificate, please contact:\n");
    body.push_str("Email: certificates@reform.dev\n");
    body.push_str("Phone: +91 (555) 123-4567\n\n");

    Report::branded(
        format!("ReForm_Certificate_{}.txt", cert.certificate_id),
        "Sustainability Certificate",
        &body,
        now,
    )
}

pub fn mitra_performance(
    mitra: &MitraProfile,
    collections: &[&Collection],
    top_partner: Option<&str>,
    now: DateTime<Utc>,
) -> Report {
    let month = now.format("%Y-%m").to_string();
    let today = file_date(now);
    let monthly: Vec<&&Collection> = collections
        .iter()
        .filter(|c| c.date.starts_with(&month))
        .collect();
    let todays: Vec<&&Collection> = collections.iter().filter(|c| c.date == today).collect();
    let total_weight: f64 = collections.iter().map(|c| c.weight).sum();
    let total_earnings: f64 = collections.iter().map(|c| c.earnings).sum();

    let mut body = String::from("MITRA PERFORMANCE REPORT\n\n");
    let _ = writeln!(body, "Mitra Name: {}", mitra.name);
    let _ = writeln!(body, "Mitra ID: {}", mitra.id);
    let _ = writeln!(body, "Report Date: {}", format_date(now.date_naive()));
    let _ = writeln!(body, "Report Period: {}\n", now.format("%B %Y"));

    body.push_str("MONTHLY SUMMARY:\n");
    let _ = writeln!(body, "Total Collections: {}", monthly.len());
    let _ = writeln!(
        body,
        "Total Earnings: {}",
        format_inr(monthly.iter().map(|c| c.earnings).sum())
    );
    let _ = writeln!(body, "Total Waste Collected: {} kg", format_amount(total_weight));
    let _ = writeln!(body, "Efficiency Rating: {}%", mitra.efficiency);
    let _ = writeln!(body, "Customer Rating: {}/5\n", mitra.rating);

    body.push_str("DAILY PERFORMANCE:\n");
    let _ = writeln!(body, "Today's Collections: {}", todays.len());
    let _ = writeln!(
        body,
        "Completed Today: {}",
        todays
            .iter()
            .filter(|c| c.status == CollectionStatus::Completed)
            .count()
    );
    let _ = writeln!(
        body,
        "Today's Earnings: {}\n",
        format_inr(todays.iter().map(|c| c.earnings).sum())
    );

    body.push_str("COLLECTION BREAKDOWN BY TYPE:\n");
    let mut busiest: Option<(&str, f64)> = None;
    for waste_type in WASTE_TYPES {
        let of_type: Vec<&&Collection> = collections
            .iter()
            .filter(|c| c.waste_type == waste_type)
            .collect();
        let weight: f64 = of_type.iter().map(|c| c.weight).sum();
        let earnings: f64 = of_type.iter().map(|c| c.earnings).sum();
        if weight > 0.0 {
            let _ = writeln!(
                body,
                "{waste_type}: {} collections, {} kg, {}",
                of_type.len(),
                format_amount(weight),
                format_inr(earnings)
            );
            if busiest.is_none_or(|(_, best)| weight > best) {
                busiest = Some((waste_type, weight));
            }
        }
    }

    body.push_str("\nRECENT COLLECTIONS:\n");
    for (idx, c) in collections.iter().take(10).enumerate() {
        let _ = writeln!(
            body,
            "{}. {} - {} - {} - {} kg - {}",
            idx + 1,
            format_date_str(&c.date),
            c.business_name,
            c.waste_type,
            format_amount(c.weight),
            format_inr(c.earnings)
        );
    }

    let count = collections.len().max(1) as f64;
    body.push_str("\nPERFORMANCE METRICS:\n");
    let _ = writeln!(body, "Average Collection Weight: {:.1} kg", total_weight / count);
    let _ = writeln!(
        body,
        "Average Earnings per Collection: {}",
        format_inr(total_earnings / count)
    );
    let _ = writeln!(
        body,
        "Most Collected Waste Type: {}",
        busiest.map(|(t, _)| t).unwrap_or("N/A")
    );
    let _ = writeln!(body, "Top Business Partner: {}\n", top_partner.unwrap_or("N/A"));

    body.push_str("ACHIEVEMENTS:\n");
    let _ = writeln!(body, "- {} collections logged on the platform", mitra.total_collections);
    let _ = writeln!(body, "- {} successful collections in this report", collections.len());
    let _ = writeln!(
        body,
        "- {:.2} tons of CO₂ emissions prevented\n",
        total_weight * 0.001
    );

    body.push_str("RECOMMENDATIONS:\n");
    body.push_str("- Continue maintaining high efficiency standards\n");
    body.push_str("- Focus on electronic waste collections for higher earnings\n");
    body.push_str("- Explore new business partnerships in your area\n\n");

    Report::branded(
        format!("ReForm_Mitra_Performance_Report_{today}.txt"),
        "Mitra Performance Report",
        &body,
        now,
    )
}

pub fn business_summary(
    business: &BusinessProfile,
    contributions: &[&WasteContribution],
    collections: &[&Collection],
    now: DateTime<Utc>,
) -> Report {
    let total_weight: f64 = contributions.iter().map(|c| c.weight).sum();
    let total_credits: i64 = contributions
        .iter()
        .map(|c| c.credits_earned)
        .fold(0, i64::saturating_add);
    let total_co2: f64 = contributions.iter().map(|c| c.co2_impact).sum();

    let mut body = String::from("BUSINESS SUSTAINABILITY SUMMARY REPORT\n\n");
    let _ = writeln!(body, "Business Name: {}", business.name);
    let _ = writeln!(body, "Contact Person: {}", business.contact_person);
    let _ = writeln!(body, "Email: {}", business.email);
    let _ = writeln!(body, "Report Date: {}\n", format_date(now.date_naive()));

    body.push_str("WASTE CONTRIBUTION SUMMARY:\n");
    let _ = writeln!(body, "Total Waste Contributed: {} kg", format_amount(total_weight));
    let _ = writeln!(body, "Total GreenCredits Earned: {total_credits}");
    let _ = writeln!(body, "Total CO₂ Saved: {total_co2:.3} tons");
    let _ = writeln!(body, "Number of Contributions: {}\n", contributions.len());

    body.push_str("WASTE BREAKDOWN BY TYPE:\n");
    for waste_type in WASTE_TYPES {
        let of_type: Vec<&&WasteContribution> = contributions
            .iter()
            .filter(|c| c.waste_type == waste_type)
            .collect();
        let weight: f64 = of_type.iter().map(|c| c.weight).sum();
        let credits: i64 = of_type.iter().map(|c| c.credits_earned).fold(0, i64::saturating_add);
        if weight > 0.0 {
            let _ = writeln!(
                body,
                "{waste_type}: {} kg ({credits} credits)",
                format_amount(weight)
            );
        }
    }

    body.push_str("\nCOLLECTION HISTORY:\n");
    let _ = writeln!(body, "Total Collections Scheduled: {}", collections.len());
    let _ = writeln!(
        body,
        "Completed Collections: {}",
        collections
            .iter()
            .filter(|c| c.status == CollectionStatus::Completed)
            .count()
    );
    let _ = writeln!(
        body,
        "Pending Collections: {}\n",
        collections
            .iter()
            .filter(|c| c.status == CollectionStatus::Scheduled)
            .count()
    );

    body.push_str("RECENT CONTRIBUTIONS:\n");
    for (idx, c) in contributions.iter().take(10).enumerate() {
        let _ = writeln!(
            body,
            "{}. {} - {} - {} kg - {} credits",
            idx + 1,
            format_date_str(&c.date),
            c.waste_type,
            format_amount(c.weight),
            c.credits_earned
        );
    }

    body.push_str("\nENVIRONMENTAL IMPACT:\n");
    body.push_str("By participating in ReForm's waste management program, your business has:\n");
    let _ = writeln!(body, "- Diverted {} kg of waste from landfills", format_amount(total_weight));
    let _ = writeln!(body, "- Saved {total_co2:.3} tons of CO₂ emissions");
    let _ = writeln!(body, "- Earned {total_credits} GreenCredits for sustainable practices");
    body.push_str("- Contributed to the circular economy through responsible waste management\n\n");

    body.push_str("RECOMMENDATIONS:\n");
    body.push_str("- Continue regular waste segregation and contribution\n");
    body.push_str("- Consider increasing electronic waste recycling\n");
    body.push_str("- Explore opportunities for waste reduction at source\n\n");

    Report::branded(
        format!(
            "ReForm_Business_Summary_{}_{}.txt",
            business.name.split_whitespace().collect::<Vec<_>>().join("_"),
            file_date(now)
        ),
        "Business Sustainability Summary Report",
        &body,
        now,
    )
}

pub fn customer_data(
    name: &str,
    email: &str,
    orders: &[&Order],
    cart_item_count: i64,
    now: DateTime<Utc>,
) -> Report {
    let spent: i64 = orders.iter().map(|o| o.total_price).fold(0, i64::saturating_add);
    let credits_used: i64 = orders.iter().map(|o| o.total_credits).fold(0, i64::saturating_add);
    let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
    let latest_address = orders.first().map(|o| &o.shipping_address);

    let mut body = String::from("CUSTOMER DATA REPORT\n\n");
    let _ = writeln!(body, "Customer Name: {name}");
    let _ = writeln!(body, "Email: {email}");
    body.push_str("Account Type: Customer\n");
    let _ = writeln!(body, "Report Date: {}\n", format_date(now.date_naive()));

    body.push_str("PROFILE INFORMATION:\n");
    match latest_address {
        Some(address) => {
            let _ = writeln!(body, "Full Name: {}", address.full_name);
            let _ = writeln!(body, "Phone Number: {}", address.phone);
            let _ = writeln!(
                body,
                "Address: {}, {}, {} {}\n",
                address.address, address.city, address.state, address.pincode
            );
        }
        None => body.push_str("No shipping details on file\n\n"),
    }

    body.push_str("ORDER HISTORY:\n");
    let _ = writeln!(body, "Total Orders: {}", orders.len());
    let _ = writeln!(body, "Completed Orders: {}", count(OrderStatus::Delivered));
    let _ = writeln!(
        body,
        "Pending Orders: {}",
        orders.iter().filter(|o| o.status.is_open()).count()
    );
    let _ = writeln!(body, "Cancelled Orders: {}", count(OrderStatus::Cancelled));
    let _ = writeln!(body, "Total Amount Spent: {}", format_inr(spent as f64));
    let _ = writeln!(body, "Total Credits Used: {credits_used}\n");

    if !orders.is_empty() {
        body.push_str("RECENT ORDERS:\n");
        for (idx, order) in orders.iter().take(10).enumerate() {
            let amount = if order.total_price > 0 {
                format_inr(order.total_price as f64)
            } else {
                format!("{} credits", order.total_credits)
            };
            let _ = writeln!(
                body,
                "{}. {} - {} - {} - {amount}",
                idx + 1,
                order.id,
                format_date(order.created_at.date_naive()),
                order.status.as_str()
            );
        }
        body.push('\n');
    }

    body.push_str("SHOPPING BEHAVIOR:\n");
    if orders.is_empty() {
        body.push_str("Average Order Value: N/A\n");
        body.push_str("Preferred Payment Method: N/A\n");
    } else {
        let _ = writeln!(
            body,
            "Average Order Value: {}",
            format_inr(spent as f64 / orders.len() as f64)
        );
        let cash_orders = orders.iter().filter(|o| o.total_price > 0).count();
        let credit_orders = orders.iter().filter(|o| o.total_credits > 0).count();
        let preferred = if cash_orders > credit_orders { "Cash" } else { "Credits" };
        let _ = writeln!(body, "Preferred Payment Method: {preferred}");
    }
    let _ = writeln!(body, "Current Cart Items: {cart_item_count}\n");

    body.push_str("SUSTAINABILITY IMPACT:\n");
    let _ = writeln!(body, "Sustainable Purchases: {}", orders.len());
    let _ = writeln!(
        body,
        "Estimated Waste Diverted: {:.1} kg",
        orders.len() as f64 * 2.3
    );
    let _ = writeln!(body, "CO₂ Emissions Saved: {:.1} kg\n", orders.len() as f64 * 0.5);

    body.push_str("DATA USAGE CONSENT:\n");
    body.push_str("This report contains personal data processed in accordance with our Privacy Policy.\n");
    body.push_str("You have the right to request data deletion or modification at any time.\n");
    body.push_str("Email: privacy@reform.dev\n\n");

    Report::branded(
        format!(
            "ReForm_Customer_Data_{}_{}.txt",
            name.split_whitespace().collect::<Vec<_>>().join("_"),
            file_date(now)
        ),
        "Customer Data Report",
        &body,
        now,
    )
}
