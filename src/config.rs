use crate::models::GeoDbInstanceType;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub client: ClientSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// How to reach and authenticate against GeoDB
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ClientSettings {
    #[serde(default)]
    pub instance: GeoDbInstanceType,
    #[validate(length(min = 1))]
    pub api_key: Option<String>,
    /// Overrides the instance URI
    #[validate(url)]
    pub base_url: Option<String>,
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GEODB__)
    /// 5. `GEODB_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GEODB__CLIENT__API_KEY -> client.api_key
            .add_source(
                Environment::with_prefix("GEODB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("GEODB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }
}

/// Apply the plain `GEODB_API_KEY` variable on top of everything else
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("GEODB_API_KEY") {
        Ok(api_key) if !api_key.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("client.api_key", api_key)?
            .build(),
        _ => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Tests touching process env vars must not interleave
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_settings(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("geodb-{}-{}.toml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", contents).unwrap();
        path
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "pretty");
    }

    #[test]
    fn test_default_client_settings_are_valid() {
        let client = ClientSettings::default();
        assert_eq!(client.instance, GeoDbInstanceType::Free);
        assert!(client.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let client = ClientSettings {
            api_key: Some(String::new()),
            base_url: Some("not a url".to_string()),
            timeout_secs: Some(0),
            ..Default::default()
        };
        let errors = client.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("api_key"));
        assert!(fields.contains_key("base_url"));
        assert!(fields.contains_key("timeout_secs"));
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::remove_var("GEODB_API_KEY");

        let path = write_settings(
            "file",
            "[client]\ninstance = \"pro\"\napi_key = \"from-file\"\ntimeout_secs = 15\n\n[logging]\nlevel = \"debug\"",
        );
        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.client.instance, GeoDbInstanceType::Pro);
        assert_eq!(settings.client.api_key.as_deref(), Some("from-file"));
        assert_eq!(settings.client.timeout_secs, Some(15));
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, "pretty");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let path = write_settings("env", "[client]\napi_key = \"from-file\"\ntimeout_secs = 15");

        std::env::set_var("GEODB__CLIENT__TIMEOUT_SECS", "45");
        std::env::set_var("GEODB_API_KEY", "from-env");
        let overridden = Settings::load_from(&path);

        // An empty key leaves the file value in place
        std::env::set_var("GEODB_API_KEY", "");
        let empty_key = Settings::load_from(&path);

        std::env::remove_var("GEODB_API_KEY");
        std::env::remove_var("GEODB__CLIENT__TIMEOUT_SECS");
        std::fs::remove_file(&path).ok();

        let overridden = overridden.unwrap();
        assert_eq!(overridden.client.api_key.as_deref(), Some("from-env"));
        assert_eq!(overridden.client.timeout_secs, Some(45));

        let empty_key = empty_key.unwrap();
        assert_eq!(empty_key.client.api_key.as_deref(), Some("from-file"));
        assert_eq!(empty_key.client.timeout_secs, Some(45));
    }

    #[test]
    fn test_load_applies_api_key_override() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("GEODB_API_KEY", "plain-key");
        let settings = Settings::load();
        std::env::remove_var("GEODB_API_KEY");

        assert_eq!(settings.unwrap().client.api_key.as_deref(), Some("plain-key"));
    }
}
