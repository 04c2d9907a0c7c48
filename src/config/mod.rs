/// Admin credentials from environment variables
pub mod admin;

/// Database configuration and connection management
pub mod database;

/// Service catalog seed loading from config.toml
pub mod services;
