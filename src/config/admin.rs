//! Admin credential configuration from environment variables.
//!
//! `ADMIN_USERNAME` and `ADMIN_PASSWORD` override the built-in pair. Each
//! variable falls back on its own, so setting only the password keeps the
//! default username.

use crate::core::auth::AdminCredentials;

const DEFAULT_ADMIN_USERNAME: &str = "dono1";
const DEFAULT_ADMIN_PASSWORD: &str = "312546!!";

/// Builds the admin credentials from the environment.
#[must_use]
pub fn get_admin_credentials() -> AdminCredentials {
    credentials_from(|key| std::env::var(key).ok())
}

/// Builds the admin credentials from `lookup`, falling back to the built-in
/// pair for each variable it does not provide.
fn credentials_from(lookup: impl Fn(&str) -> Option<String>) -> AdminCredentials {
    let username = lookup("ADMIN_USERNAME").unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string());
    let password = lookup("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string());

    if username == DEFAULT_ADMIN_USERNAME && password == DEFAULT_ADMIN_PASSWORD {
        tracing::warn!("Using the built-in admin credentials; set ADMIN_USERNAME/ADMIN_PASSWORD to change them");
    }

    AdminCredentials::new(username, password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_back_to_built_in_pair() {
        let creds = credentials_from(|_| None);
        assert_eq!(creds.username(), DEFAULT_ADMIN_USERNAME);
        assert!(creds.verify(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).is_ok());
    }

    #[test]
    fn test_env_overrides_each_variable() {
        let creds = credentials_from(|key| (key == "ADMIN_PASSWORD").then(|| "s3cret".to_string()));
        assert_eq!(creds.username(), DEFAULT_ADMIN_USERNAME);
        assert!(creds.verify(DEFAULT_ADMIN_USERNAME, "s3cret").is_ok());
        assert!(creds.verify(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).is_err());

        let creds = credentials_from(|key| match key {
            "ADMIN_USERNAME" => Some("owner".to_string()),
            "ADMIN_PASSWORD" => Some("hunter2".to_string()),
            _ => None,
        });
        assert_eq!(creds.username(), "owner");
        assert!(creds.verify("owner", "hunter2").is_ok());
    }
}
