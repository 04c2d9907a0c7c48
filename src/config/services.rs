//! Service catalog seed loading from config.toml
//!
//! The services listed in config.toml seed the catalog the first time the
//! store is opened. Without a config file the built-in catalog is used.

use crate::core::service::{FALLBACK_ICON, ServiceOffering};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Catalog entries to seed
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

/// Configuration for a single seeded service
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Display name, also the value bookings refer to
    pub name: String,
    /// Short display glyph
    #[serde(default)]
    pub icon: Option<String>,
    /// Catalog description
    #[serde(default)]
    pub description: String,
}

impl Config {
    /// Turns the configured entries into catalog entries with ids `"1"`, `"2"`, ...
    #[must_use]
    pub fn seed_services(&self) -> Vec<ServiceOffering> {
        self.services
            .iter()
            .zip(1..)
            .map(|(svc, id)| ServiceOffering {
                id: id.to_string(),
                name: svc.name.trim().to_string(),
                icon: svc
                    .icon
                    .as_deref()
                    .map(str::trim)
                    .filter(|icon| !icon.is_empty())
                    .unwrap_or(FALLBACK_ICON)
                    .to_string(),
                description: svc.description.clone(),
            })
            .collect()
    }
}

/// Built-in catalog used when no config.toml is present.
#[must_use]
pub fn default_services() -> Vec<ServiceOffering> {
    [
        ("Professional Wash", "👕", "Complete care for everyday whites and colors."),
        ("Delicates", "🎀", "Ultra-gentle process for lace, silk and delicate dresses."),
        ("Executive Line", "👔", "Washing and flawless pressing for suits and dress shirts."),
        ("Bed & Bath", "🏡", "Deep cleaning of duvets, comforters and bedding."),
        ("Sneaker Cleaning", "👟", "Detailed cleaning and restoration of sneakers and casual shoes."),
        ("Master Ironing", "💨", "Pressed with care and precision, ready to wear."),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, icon, description), id): ((&str, &str, &str), u32)| ServiceOffering {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
    })
    .collect()
}

/// Loads the seed configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {path_ref:?}: {e}"),
    })
}

/// Seed catalog from `path`, or the built-in catalog if the file does not exist.
///
/// A file that exists but does not parse is still an error.
pub fn load_seed_services<P: AsRef<Path>>(path: P) -> Result<Vec<ServiceOffering>> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        tracing::info!("No config file at {path_ref:?}, using the built-in service catalog");
        return Ok(default_services());
    }

    let seed = load_config(path_ref)?.seed_services();
    if seed.is_empty() {
        tracing::info!("Config file lists no services, using the built-in service catalog");
        return Ok(default_services());
    }
    Ok(seed)
}

/// Seed catalog from the default location (./config.toml)
pub fn load_default_seed_services() -> Result<Vec<ServiceOffering>> {
    load_seed_services("config.toml")
}
