//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Admin session, booking management and report commands
pub mod admin;

/// Customer booking command
pub mod booking;

/// Service catalog commands
pub mod catalog;

/// General utility commands
pub mod general;

// Export commands
pub use admin::*;
pub use booking::*;
pub use catalog::*;
pub use general::*;
