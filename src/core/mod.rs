//! Core business logic - framework-agnostic booking, catalog and statistics
//! operations. Nothing in here knows about Discord.

/// Admin credential check
pub mod auth;
/// Booking records, piece breakdowns and submission validation
pub mod booking;
/// Text rendering of bookings, services and monthly statistics
pub mod report;
/// Service catalog entries
pub mod service;
/// Monthly statistics aggregation
pub mod stats;
/// Keyed snapshot persistence
pub mod storage;
/// The record store owning both collections
pub mod store;
