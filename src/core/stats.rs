//! Monthly statistics over booking records.
//!
//! [`aggregate_monthly_stats`] folds the full booking collection into one
//! bucket per calendar month. It is pure and never fails: a booking whose date
//! cannot be read lands in the [`MonthKey::Unknown`] bucket instead of being
//! guessed into another month. Buckets come out in the order their month was
//! first seen; [`sort_chronologically`] reorders them by year and month.

use crate::core::booking::{BookingRecord, PieceBreakdown, PieceCategory};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Bucket key of a monthly statistic.
///
/// Ordering is year, then month, with `Unknown` after every real month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MonthKey {
    /// A calendar month; `month` is 1-12
    Month { year: i32, month: u32 },
    /// Booking date missing or unparseable
    Unknown,
}

impl MonthKey {
    /// Derives the bucket key from a booking's free-text date.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM[:SS]`.
    #[must_use]
    pub fn from_booking_date(date: &str) -> Self {
        let date = date.trim();
        parse_booking_date(date).map_or(Self::Unknown, |d| Self::Month {
            year: d.year(),
            month: d.month(),
        })
    }

    /// Report label such as `"March / 2025"`.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Month { year, month } => {
                let name = usize::try_from(month)
                    .ok()
                    .and_then(|m| m.checked_sub(1))
                    .and_then(|idx| MONTH_NAMES.get(idx))
                    .copied()
                    .unwrap_or("?");
                format!("{name} / {year}")
            }
            Self::Unknown => "Unknown date".to_string(),
        }
    }
}

fn parse_booking_date(date: &str) -> Option<NaiveDate> {
    if date.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M"))
                .ok()
                .map(|dt| dt.date())
        })
}

/// Running piece totals of one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PieceTotals {
    pub shirt: u64,
    pub sweatshirt: u64,
    pub t_shirt: u64,
    pub pants: u64,
    pub suit: u64,
    pub bath_towel: u64,
    pub face_towel: u64,
    pub sheet: u64,
    /// Sum of every extra item quantity
    pub extras: u64,
}

impl PieceTotals {
    /// Total for one fixed category.
    #[must_use]
    pub const fn get(&self, category: PieceCategory) -> u64 {
        match category {
            PieceCategory::Shirt => self.shirt,
            PieceCategory::Sweatshirt => self.sweatshirt,
            PieceCategory::TShirt => self.t_shirt,
            PieceCategory::Pants => self.pants,
            PieceCategory::Suit => self.suit,
            PieceCategory::BathTowel => self.bath_towel,
            PieceCategory::FaceTowel => self.face_towel,
            PieceCategory::Sheet => self.sheet,
        }
    }

    fn get_mut(&mut self, category: PieceCategory) -> &mut u64 {
        match category {
            PieceCategory::Shirt => &mut self.shirt,
            PieceCategory::Sweatshirt => &mut self.sweatshirt,
            PieceCategory::TShirt => &mut self.t_shirt,
            PieceCategory::Pants => &mut self.pants,
            PieceCategory::Suit => &mut self.suit,
            PieceCategory::BathTowel => &mut self.bath_towel,
            PieceCategory::FaceTowel => &mut self.face_towel,
            PieceCategory::Sheet => &mut self.sheet,
        }
    }

    /// Adds one booking's breakdown to the running totals.
    pub fn add(&mut self, breakdown: &PieceBreakdown) {
        for category in PieceCategory::ALL {
            *self.get_mut(category) += u64::from(breakdown.count(category));
        }
        self.extras += breakdown.extras_total();
    }
}

/// Aggregate of all bookings sharing a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyStat {
    pub key: MonthKey,
    /// Display label of `key`
    pub month_year: String,
    pub total_orders: u64,
    pub total_pieces: u64,
    /// Service name to number of bookings requesting it
    pub services_breakdown: BTreeMap<String, u64>,
    pub pieces_breakdown: PieceTotals,
}

impl MonthlyStat {
    /// Creates an empty bucket.
    #[must_use]
    pub fn new(key: MonthKey) -> Self {
        Self {
            key,
            month_year: key.label(),
            total_orders: 0,
            total_pieces: 0,
            services_breakdown: BTreeMap::new(),
            pieces_breakdown: PieceTotals::default(),
        }
    }

    /// Folds one booking into this bucket.
    ///
    /// A service listed more than once on the same booking is counted once.
    pub fn record(&mut self, booking: &BookingRecord) {
        self.total_orders += 1;
        self.total_pieces += booking.quantity;

        for (idx, service) in booking.services.iter().enumerate() {
            if booking.services[..idx].contains(service) {
                continue;
            }
            *self.services_breakdown.entry(service.clone()).or_insert(0) += 1;
        }

        self.pieces_breakdown.add(&booking.breakdown);
    }

    /// Services sorted by descending count, ties by name.
    #[must_use]
    pub fn services_by_popularity(&self) -> Vec<(&str, u64)> {
        let mut services: Vec<(&str, u64)> = self
            .services_breakdown
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        services.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        services
    }
}

/// Groups bookings by the month of their date.
///
/// Buckets appear in the order their month is first encountered while scanning
/// `bookings`; no sorting is applied.
#[must_use]
pub fn aggregate_monthly_stats(bookings: &[BookingRecord]) -> Vec<MonthlyStat> {
    let mut stats: Vec<MonthlyStat> = Vec::new();
    let mut index: HashMap<MonthKey, usize> = HashMap::new();

    for booking in bookings {
        let key = MonthKey::from_booking_date(&booking.date);
        let slot = *index.entry(key).or_insert_with(|| {
            stats.push(MonthlyStat::new(key));
            stats.len() - 1
        });
        stats[slot].record(booking);
    }

    stats
}

/// Orders buckets by year then month, with the unknown-date bucket last.
pub fn sort_chronologically(stats: &mut [MonthlyStat]) {
    stats.sort_by_key(|stat| stat.key);
}
