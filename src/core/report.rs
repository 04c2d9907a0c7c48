//! Report rendering.
//!
//! Turns bookings and monthly statistics into plain text that the bot layer
//! drops into messages and embeds. Nothing here touches the store.

use crate::core::{
    booking::{BookingRecord, PieceCategory},
    service::ServiceOffering,
    stats::MonthlyStat,
};
use std::fmt::Write;

/// One-line summary of a booking, e.g.
/// `🕒 #1700000000000 | Ana | 5 pcs | 2025-03-02 09:00 | Wash, Ironing`.
#[must_use]
pub fn format_booking_summary(booking: &BookingRecord) -> String {
    let when = format!("{} {}", booking.date, booking.time);
    format!(
        "{} #{} | {} | {} pcs | {} | {}",
        booking.status.emoji(),
        booking.id,
        booking.name,
        booking.quantity,
        when.trim(),
        booking.services.join(", ")
    )
}

/// Full multi-line description of a booking for the admin detail view.
#[must_use]
pub fn format_booking_details(booking: &BookingRecord) -> String {
    let mut out = String::new();
    // write! into a String cannot fail
    let _ = writeln!(out, "**Status:** {} {}", booking.status.emoji(), booking.status);
    let _ = writeln!(out, "**Customer:** {} ({})", booking.name, booking.phone);
    let _ = writeln!(out, "**When:** {} {}", booking.date, booking.time);
    let _ = writeln!(out, "**Services:** {}", booking.services.join(", "));
    let _ = writeln!(out, "**Pieces:** {}", booking.quantity);

    for category in PieceCategory::ALL {
        let count = booking.breakdown.count(category);
        if count > 0 {
            let _ = writeln!(out, "  {} {}: {count}", category.icon(), category.label());
        }
    }
    for item in &booking.breakdown.extra_items {
        let _ = writeln!(out, "  📦 {}: {}", item.name, item.quantity);
    }

    if let Some(pickup) = &booking.pickup_address {
        let _ = writeln!(out, "**Pickup:** {pickup}");
    }
    if let Some(delivery) = &booking.delivery_address {
        let _ = writeln!(out, "**Delivery:** {delivery}");
    }
    if let Some(obs) = &booking.obs {
        let _ = writeln!(out, "**Notes:** {obs}");
    }

    out.trim_end().to_string()
}

/// Catalog line, e.g. `👕 **Professional Wash** - Everyday care`.
#[must_use]
pub fn format_service_line(service: &ServiceOffering) -> String {
    if service.description.is_empty() {
        format!("{} **{}**", service.icon, service.name)
    } else {
        format!("{} **{}** - {}", service.icon, service.name, service.description)
    }
}

/// Body of one month in the admin report: totals, non-zero piece categories
/// (extras included) and services by popularity.
#[must_use]
pub fn format_monthly_stat(stat: &MonthlyStat) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "**Orders:** {} | **Pieces:** {}",
        stat.total_orders, stat.total_pieces
    );

    let mut pieces: Vec<String> = PieceCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let total = stat.pieces_breakdown.get(category);
            (total > 0).then(|| format!("{} {} {total}", category.icon(), category.label()))
        })
        .collect();
    if stat.pieces_breakdown.extras > 0 {
        pieces.push(format!("📦 Extra items {}", stat.pieces_breakdown.extras));
    }
    if !pieces.is_empty() {
        let _ = writeln!(out, "{}", pieces.join(" · "));
    }

    let services = stat.services_by_popularity();
    if !services.is_empty() {
        let _ = writeln!(out, "**Services:**");
        for (name, count) in services {
            let _ = writeln!(out, "  {name}: {count}");
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        booking::{BookingStatus, ExtraItem, PieceBreakdown},
        stats::aggregate_monthly_stats,
    };
    use crate::test_utils::sample_record;

    #[test]
    fn test_format_booking_summary() {
        let mut record = sample_record(
            "42",
            "2025-03-02",
            PieceBreakdown::default().with(PieceCategory::Shirt, 3),
            &["Wash", "Ironing"],
        );
        record.time = "09:00".to_string();
        record.status = BookingStatus::Ready;

        assert_eq!(
            format_booking_summary(&record),
            "✅ #42 | Test Customer | 3 pcs | 2025-03-02 09:00 | Wash, Ironing"
        );
    }

    #[test]
    fn test_format_booking_details_lists_non_zero_pieces() {
        let mut breakdown = PieceBreakdown::default().with(PieceCategory::Sheet, 2);
        breakdown.extra_items = vec![ExtraItem::new("Rug", 1)];
        let mut record = sample_record("7", "2025-03-02", breakdown, &["Wash"]);
        record.obs = Some("Fragile".to_string());

        let details = format_booking_details(&record);

        assert!(details.contains("Sheets: 2"));
        assert!(details.contains("Rug: 1"));
        assert!(details.contains("**Notes:** Fragile"));
        assert!(!details.contains("Shirts"));
        assert!(!details.contains("**Pickup:**"));
    }

    #[test]
    fn test_format_service_line() {
        let service = ServiceOffering {
            id: "1".to_string(),
            name: "Shoes".to_string(),
            icon: "👟".to_string(),
            description: String::new(),
        };
        assert_eq!(format_service_line(&service), "👟 **Shoes**");
    }

    #[test]
    fn test_format_monthly_stat() {
        let mut breakdown = PieceBreakdown::default().with(PieceCategory::Pants, 2);
        breakdown.extra_items = vec![ExtraItem::new("Rug", 3)];
        let record = sample_record("1", "2025-03-02", breakdown, &["Wash", "Dry"]);
        let other = sample_record(
            "2",
            "2025-03-05",
            PieceBreakdown::default().with(PieceCategory::Pants, 1),
            &["Dry"],
        );

        let stats = aggregate_monthly_stats(&[record, other]);
        let text = format_monthly_stat(&stats[0]);

        assert_eq!(
            text,
            "**Orders:** 2 | **Pieces:** 6\n\
             👖 Pants 3 · 📦 Extra items 3\n\
             **Services:**\n  Dry: 2\n  Wash: 1"
        );
    }
}
