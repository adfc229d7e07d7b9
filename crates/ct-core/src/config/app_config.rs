use std::path::PathBuf;

/// Firebase project settings (pure data).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    /// Identity Toolkit base URL; empty means the hosted endpoint.
    pub auth_endpoint: String,
    /// Firestore base URL; empty means the hosted endpoint.
    pub firestore_endpoint: String,
    /// Secure Token (ID token refresh) base URL; empty means the hosted
    /// endpoint.
    pub token_endpoint: String,
    /// Request timeout in seconds; 0 means no local timeout.
    pub timeout_secs: u64,
}

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Data directory (may be empty - the caller picks a platform default)
    pub data_dir: PathBuf,

    /// Remote user service provider name: `memory` or `firebase`
    pub remote_provider: String,

    pub firebase: FirebaseConfig,

    /// Catalog source name: `memory` or `remote`
    pub catalog_source: String,
}

fn str_at<'a>(value: &'a toml::Value, section: &str, key: &str) -> &'a str {
    value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            data_dir: PathBuf::from(str_at(toml_value, "storage", "data_dir")),
            remote_provider: str_at(toml_value, "remote", "provider").to_string(),
            firebase: FirebaseConfig {
                api_key: str_at(toml_value, "firebase", "api_key").to_string(),
                project_id: str_at(toml_value, "firebase", "project_id").to_string(),
                auth_endpoint: str_at(toml_value, "firebase", "auth_endpoint").to_string(),
                firestore_endpoint: str_at(toml_value, "firebase", "firestore_endpoint")
                    .to_string(),
                token_endpoint: str_at(toml_value, "firebase", "token_endpoint").to_string(),
                timeout_secs: toml_value
                    .get("firebase")
                    .and_then(|f| f.get("timeout_secs"))
                    .and_then(|v| v.as_integer())
                    .unwrap_or(0)
                    .max(0) as u64,
            },
            catalog_source: str_at(toml_value, "catalog", "source").to_string(),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            data_dir: PathBuf::new(),
            remote_provider: String::new(),
            firebase: FirebaseConfig::default(),
            catalog_source: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_every_section() {
        let toml_str = r#"
            [storage]
            data_dir = "/var/lib/comtam"

            [remote]
            provider = "firebase"

            [firebase]
            api_key = "AIza-test"
            project_id = "comtam-dev"
            auth_endpoint = "http://localhost:9099/identitytoolkit.googleapis.com"
            firestore_endpoint = "http://localhost:8080"
            token_endpoint = "http://localhost:9099/securetoken.googleapis.com"
            timeout_secs = 15

            [catalog]
            source = "remote"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/comtam"));
        assert_eq!(config.remote_provider, "firebase");
        assert_eq!(config.firebase.api_key, "AIza-test");
        assert_eq!(config.firebase.project_id, "comtam-dev");
        assert_eq!(config.firebase.firestore_endpoint, "http://localhost:8080");
        assert_eq!(
            config.firebase.token_endpoint,
            "http://localhost:9099/securetoken.googleapis.com"
        );
        assert_eq!(config.firebase.timeout_secs, 15);
        assert_eq!(config.catalog_source, "remote");
    }

    #[test]
    fn test_from_toml_returns_empty_values_when_missing() {
        let toml_value: Value = toml::from_str("[storage]\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        // Empty values are valid facts
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_negative_timeout_is_clamped_to_zero() {
        let toml_value: Value = toml::from_str("[firebase]\ntimeout_secs = -5\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.firebase.timeout_secs, 0);
    }
}
