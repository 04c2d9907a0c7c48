//! Unified error types for Laundry Desk.
//!
//! Validation failures are kept in their own enum so the display layer can
//! match on them and answer the user without treating them as faults.

use poise::serenity_prelude as serenity;
use thiserror::Error;

/// Rejections of user input. The store is never mutated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The booking has no pieces at all (fixed categories and extras sum to zero)
    #[error("no pieces")]
    NoPieces,

    /// The booking selects no service
    #[error("no service selected")]
    NoServiceSelected,

    /// A required free-text field is blank
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the blank field
        field: &'static str,
    },
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or stored data that cannot be interpreted
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable explanation
        message: String,
    },

    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No booking with this id
    #[error("Booking not found: {id}")]
    BookingNotFound {
        /// The id that was looked up
        id: String,
    },

    /// No service offering with this id
    #[error("Service not found: {id}")]
    ServiceNotFound {
        /// The id that was looked up
        id: String,
    },

    /// A status name that is not one of the four lifecycle markers
    #[error("Invalid status: {value}")]
    InvalidStatus {
        /// The rejected input
        value: String,
    },

    /// Admin credential mismatch
    #[error("Invalid username or password")]
    Auth,

    /// Admin-only operation attempted without a successful login
    #[error("Admin login required")]
    AdminRequired,

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Errors raised by serenity or poise
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<serenity::Error>),
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
