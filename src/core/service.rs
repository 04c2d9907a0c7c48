//! Service catalog entries.
//!
//! Services are only ever added or removed. Bookings reference them by name,
//! so removing a service never touches existing bookings.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// Glyph used when a service is added without an icon.
pub const FALLBACK_ICON: &str = "✨";

/// A catalog entry describing a purchasable laundry service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

/// Input for adding a service to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewService {
    pub name: String,
    pub icon: Option<String>,
    pub description: String,
}

impl NewService {
    /// Convenience constructor.
    #[must_use]
    pub fn new(name: impl Into<String>, icon: Option<&str>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.map(str::to_string),
            description: description.into(),
        }
    }
}

/// Validates the input and builds the catalog entry stored under `id`.
///
/// A blank icon falls back to [`FALLBACK_ICON`].
pub fn build_service(input: NewService, id: String) -> Result<ServiceOffering, ValidationError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(ValidationError::MissingField { field: "name" });
    }

    let icon = input
        .icon
        .map(|icon| icon.trim().to_string())
        .filter(|icon| !icon.is_empty())
        .unwrap_or_else(|| FALLBACK_ICON.to_string());

    Ok(ServiceOffering {
        id,
        name,
        icon,
        description: input.description.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_blank_icon_uses_fallback() {
        let service = build_service(NewService::new("Dry Cleaning", Some("  "), "Suits"), "9".to_string())
            .unwrap();
        assert_eq!(service.icon, FALLBACK_ICON);

        let service =
            build_service(NewService::new("Dry Cleaning", None, "Suits"), "9".to_string()).unwrap();
        assert_eq!(service.icon, FALLBACK_ICON);
    }

    #[test]
    fn test_icon_is_kept() {
        let service =
            build_service(NewService::new("Shoes", Some("👟"), ""), "10".to_string()).unwrap();
        assert_eq!(service.icon, "👟");
        assert_eq!(service.id, "10");
    }

    #[test]
    fn test_name_required() {
        let err = build_service(NewService::new("  ", None, "x"), "1".to_string()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "name" });
    }
}
