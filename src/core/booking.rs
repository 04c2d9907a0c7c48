//! Booking records - the customer requests held by the store.
//!
//! A booking is built from a [`NewBooking`] submission by [`build_booking`],
//! which validates the input, drops blank extra items and derives the total
//! piece count. Once built, only the status of a record ever changes.

use crate::errors::{Error, ValidationError};
use serde::{Deserialize, Serialize};
use std::{fmt, num::IntErrorKind, str::FromStr};

/// Lifecycle marker of a booking, set freely by an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Just submitted
    #[default]
    Pending,
    /// Being washed
    Washing,
    /// Ready for pickup or delivery
    Ready,
    /// Handed back to the customer
    Delivered,
}

impl BookingStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Washing, Self::Ready, Self::Delivered];

    /// Display name, also accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Washing => "Washing",
            Self::Ready => "Ready",
            Self::Delivered => "Delivered",
        }
    }

    /// Short glyph used in listings.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Pending => "🕒",
            Self::Washing => "🫧",
            Self::Ready => "✅",
            Self::Delivered => "📦",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidStatus {
                value: s.to_string(),
            })
    }
}

/// The eight fixed garment categories of a [`PieceBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceCategory {
    Shirt,
    Sweatshirt,
    TShirt,
    Pants,
    Suit,
    BathTowel,
    FaceTowel,
    Sheet,
}

impl PieceCategory {
    /// All categories in display order.
    pub const ALL: [Self; 8] = [
        Self::Shirt,
        Self::Sweatshirt,
        Self::TShirt,
        Self::Pants,
        Self::Suit,
        Self::BathTowel,
        Self::FaceTowel,
        Self::Sheet,
    ];

    /// Plural label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shirt => "Shirts",
            Self::Sweatshirt => "Sweatshirts",
            Self::TShirt => "T-shirts",
            Self::Pants => "Pants",
            Self::Suit => "Suits",
            Self::BathTowel => "Bath towels",
            Self::FaceTowel => "Face towels",
            Self::Sheet => "Sheets",
        }
    }

    /// Display glyph.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Shirt => "👔",
            Self::Sweatshirt => "🧥",
            Self::TShirt => "👕",
            Self::Pants => "👖",
            Self::Suit => "🕴️",
            Self::BathTowel => "🛁",
            Self::FaceTowel => "🧼",
            Self::Sheet => "🛏️",
        }
    }
}

/// A free-form item outside the fixed categories (e.g. a rug).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraItem {
    /// What the item is
    pub name: String,
    /// How many, at least 1
    pub quantity: u32,
}

impl ExtraItem {
    /// Creates an extra item, raising the quantity to 1 if it is lower.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.max(1),
        }
    }

    /// Parses a list like `"Rug: 2; Curtain"` into extra items.
    ///
    /// Entries are separated by `;`. A missing or unparseable quantity counts
    /// as 1, and a quantity too large for `u32` is capped at `u32::MAX`.
    /// Entries with blank names are kept here and filtered later by
    /// [`build_booking`], the same as blank rows of a submission form.
    #[must_use]
    pub fn parse_list(input: &str) -> Vec<Self> {
        input
            .split(';')
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| match entry.rsplit_once(':') {
                Some((name, qty)) => Self::new(name.trim(), parse_quantity(qty.trim())),
                None => Self::new(entry.trim(), 1),
            })
            .collect()
    }

    /// Whether the quantity hit the cap applied by [`ExtraItem::parse_list`].
    #[must_use]
    pub const fn is_capped(&self) -> bool {
        self.quantity == u32::MAX
    }
}

fn parse_quantity(raw: &str) -> u32 {
    match raw.parse::<u32>() {
        Ok(quantity) => quantity,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => 1,
    }
}

/// Per-category piece counts plus the extra items of one booking.
///
/// Missing counts in stored data deserialize as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PieceBreakdown {
    pub shirt: u32,
    pub sweatshirt: u32,
    pub t_shirt: u32,
    pub pants: u32,
    pub suit: u32,
    pub bath_towel: u32,
    pub face_towel: u32,
    pub sheet: u32,
    pub extra_items: Vec<ExtraItem>,
}

impl PieceBreakdown {
    /// Count for one fixed category.
    #[must_use]
    pub const fn count(&self, category: PieceCategory) -> u32 {
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

    /// Mutable count for one fixed category.
    pub fn count_mut(&mut self, category: PieceCategory) -> &mut u32 {
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

    /// Builder-style setter, mostly for tests and form adapters.
    #[must_use]
    pub fn with(mut self, category: PieceCategory, count: u32) -> Self {
        *self.count_mut(category) = count;
        self
    }

    /// Sum of the eight fixed categories.
    #[must_use]
    pub fn fixed_total(&self) -> u64 {
        PieceCategory::ALL
            .into_iter()
            .map(|category| u64::from(self.count(category)))
            .sum()
    }

    /// Sum of all extra item quantities.
    #[must_use]
    pub fn extras_total(&self) -> u64 {
        self.extra_items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Total number of pieces.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.fixed_total() + self.extras_total()
    }
}

/// One customer laundry request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Always `breakdown.total()`, fixed at creation
    #[serde(default)]
    pub quantity: u64,
    #[serde(default)]
    pub breakdown: PieceBreakdown,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
}

/// Booking submission as handed over by the display layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    /// Fixed counts plus the raw extra item rows, blank names included
    pub breakdown: PieceBreakdown,
    pub services: Vec<String>,
    pub date: String,
    pub time: String,
    pub obs: Option<String>,
    pub pickup_address: Option<String>,
    pub delivery_address: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_services(services: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(services.len());
    for service in services {
        let service = service.trim();
        if !service.is_empty() && !seen.iter().any(|s| s == service) {
            seen.push(service.to_string());
        }
    }
    seen
}

/// Validates a submission and builds the record stored under `id`.
///
/// Checks run in this order: required contact fields, at least one piece, at
/// least one service. Extra items with blank names are removed before the
/// piece total is computed.
pub fn build_booking(input: NewBooking, id: String) -> Result<BookingRecord, ValidationError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(ValidationError::MissingField { field: "name" });
    }
    let phone = input.phone.trim().to_string();
    if phone.is_empty() {
        return Err(ValidationError::MissingField { field: "phone" });
    }

    let mut breakdown = input.breakdown;
    breakdown.extra_items = breakdown
        .extra_items
        .into_iter()
        .filter(|item| !item.name.trim().is_empty())
        .map(|item| ExtraItem::new(item.name.trim(), item.quantity))
        .collect();

    let quantity = breakdown.total();
    if quantity == 0 {
        return Err(ValidationError::NoPieces);
    }

    let services = normalize_services(input.services);
    if services.is_empty() {
        return Err(ValidationError::NoServiceSelected);
    }

    Ok(BookingRecord {
        id,
        name,
        phone,
        quantity,
        breakdown,
        services,
        date: input.date.trim().to_string(),
        time: input.time.trim().to_string(),
        obs: non_blank(input.obs),
        pickup_address: non_blank(input.pickup_address),
        delivery_address: non_blank(input.delivery_address),
        status: BookingStatus::Pending,
    })
}
