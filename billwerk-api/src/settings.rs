use config::{Config, ConfigError, File};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Private API key, sent as the basic-auth user name
    #[serde(default, deserialize_with = "secret")]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.reepay.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let key = Option::<String>::deserialize(deserializer)?;
    Ok(key.filter(|key| !key.is_empty()).map(SecretString::from))
}

impl Settings {
    /// Reads `billwerk.toml` (or the file named by `BILLWERK_CONFIG`) and `BILLWERK__*`
    /// environment variables, the latter taking precedence.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("BILLWERK_CONFIG").unwrap_or_else(|_| "billwerk.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("BILLWERK").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_none() {
            return Err("api_key is required".to_string());
        }
        if !self.base_url.starts_with("http") {
            return Err("base_url must be a valid HTTP(S) URL".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}
