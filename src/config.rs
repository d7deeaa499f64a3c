use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::{AligoError, Result, credentials::Credentials};

/// Aligo API base url.
pub const DEFAULT_BASE_URL: &str = "https://apis.aligo.in";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// api base url, defaults to `https://apis.aligo.in`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// record failed items as error entries instead of aborting the run
    #[serde(default)]
    pub continue_on_fail: bool,
    /// request timeout in milliseconds, the transport default applies when unset
    #[serde(default)]
    pub timeout: Option<u64>,
    /// account credentials
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            continue_on_fail: false,
            timeout: None,
            credentials: None,
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path)?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        if config.base_url.is_empty() {
            return Err(AligoError::Config("base_url must not be empty".to_string()));
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use crate::{AligoError, Config, credentials::Credentials};

    #[test]
    fn test_config_deserialize() {
        let toml_str = r#"
        continue_on_fail = true
        timeout = 5000

        [credentials]
        api_key = "abcdef"
        user_id = "tester"
        "#;
        let config = Config::load_from_str(toml_str).unwrap();
        assert_eq!(config.base_url, "https://apis.aligo.in");
        assert!(config.continue_on_fail);
        assert_eq!(config.timeout(), Some(Duration::from_millis(5000)));
        assert_eq!(config.credentials, Some(Credentials::new("abcdef", "tester")));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::load_from_str("").unwrap();
        assert_eq!(config.base_url, "https://apis.aligo.in");
        assert!(!config.continue_on_fail);
        assert_eq!(config.timeout(), None);
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_config_errors() {
        assert!(matches!(Config::load_from_str("timeout = \"soon\""), Err(AligoError::Config(_))));
        assert!(matches!(Config::load_from_str("base_url = \"\""), Err(AligoError::Config(_))));
        assert!(matches!(Config::create("/nonexistent/aligo.toml"), Err(AligoError::IoError(_))));
    }
}
