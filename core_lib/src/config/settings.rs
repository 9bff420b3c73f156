use config::{Config, ConfigError, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "config.toml";

/// Provider-specific variables accepted alongside the `APP_` namespace.
const PROVIDER_ENV_KEYS: [(&str, &str); 3] = [
    ("SENDGRID_API_KEY", "email.api_key"),
    ("SENDGRID_FROM", "email.from"),
    ("EMAIL_TO", "email.to"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub email: EmailConfig,
    pub limits: LimitsConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub api_key: String,
    pub from: String,
    pub to: String,
    pub api_base_url: String,
    pub subject_prefix: String,
    pub default_subject: String,
    /// Zero leaves the HTTP client's default in place.
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_body_bytes: usize,
    pub max_name_length: u64,
    pub max_email_length: u64,
    pub max_subject_length: u64,
    pub max_message_length: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            email: EmailConfig::default(),
            limits: LimitsConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            from: String::new(),
            to: String::new(),
            api_base_url: "https://api.sendgrid.com".to_string(),
            subject_prefix: "Portfolio Lead: ".to_string(),
            default_subject: "New Message".to_string(),
            timeout_seconds: 0,
        }
    }
}

// The API key never reaches the logs.
impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &"<redacted>")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("api_base_url", &self.api_base_url)
            .field("subject_prefix", &self.subject_prefix)
            .field("default_subject", &self.default_subject)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
            max_name_length: 100,
            max_email_length: 254,
            max_subject_length: 200,
            max_message_length: 5000,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads defaults, then `config.toml`, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE), std::env::vars().collect())
    }

    pub fn load_from(config_file: &Path, env: Map<String, String>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if config_file.exists() {
            builder = builder.add_source(File::from(config_file));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        for (var, key) in PROVIDER_ENV_KEYS {
            let value = env.get(var).filter(|v| !v.is_empty()).cloned();
            builder = builder.set_override_option(key, value)?;
        }

        let app_config: AppConfig = builder.build()?.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.email.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "SendGrid API key is required (SENDGRID_API_KEY)".to_string(),
            ));
        }

        if !is_plausible_address(&self.email.from) {
            return Err(ConfigError::Message(
                "Sender address must be a verified email address (SENDGRID_FROM)".to_string(),
            ));
        }

        if !is_plausible_address(&self.email.to) {
            return Err(ConfigError::Message(
                "Recipient address must be an email address (EMAIL_TO)".to_string(),
            ));
        }

        if self.email.api_base_url.is_empty() {
            return Err(ConfigError::Message(
                "Email API base URL cannot be empty".to_string(),
            ));
        }

        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::Message(
                "Max body size must be greater than 0".to_string(),
            ));
        }

        let bounds = [
            self.limits.max_name_length,
            self.limits.max_email_length,
            self.limits.max_subject_length,
            self.limits.max_message_length,
        ];
        if bounds.contains(&0) {
            return Err(ConfigError::Message(
                "Field length limits must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_plausible_address(address: &str) -> bool {
    let address = address.trim();
    !address.is_empty() && address.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.email.api_key = "SG.test-key".to_string();
        config.email.from = "noreply@example.com".to_string();
        config.email.to = "owner@example.com".to_string();
        config
    }

    fn provider_env() -> Map<String, String> {
        let mut env = Map::new();
        env.insert("SENDGRID_API_KEY".to_string(), "SG.env-key".to_string());
        env.insert("SENDGRID_FROM".to_string(), "site@example.com".to_string());
        env.insert("EMAIL_TO".to_string(), "me@example.com".to_string());
        env
    }

    fn missing_file() -> &'static Path {
        Path::new("does-not-exist/config.toml")
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.email.subject_prefix, "Portfolio Lead: ");
        assert_eq!(config.email.default_subject, "New Message");
        assert_eq!(config.email.timeout_seconds, 0);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_default_config_requires_credentials() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());

        config = valid_config();
        config.email.from = "not-an-address".to_string();
        assert!(config.validate().is_err());

        config = valid_config();
        config.email.to = "   ".to_string();
        assert!(config.validate().is_err());

        config = valid_config();
        config.limits.max_message_length = 0;
        assert!(config.validate().is_err());

        config = valid_config();
        config.limits.max_body_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");

        let mut config = AppConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_provider_environment_variables() {
        let config = AppConfig::load_from(missing_file(), provider_env())
            .expect("provider variables should satisfy validation");

        assert_eq!(config.email.api_key, "SG.env-key");
        assert_eq!(config.email.from, "site@example.com");
        assert_eq!(config.email.to, "me@example.com");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_credentials_fail_to_load() {
        let result = AppConfig::load_from(missing_file(), Map::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_prefixed_environment_overrides() {
        let mut env = provider_env();
        env.insert("APP_SERVER__PORT".to_string(), "8081".to_string());
        env.insert("APP_EMAIL__SUBJECT_PREFIX".to_string(), "Lead: ".to_string());
        env.insert(
            "APP_CORS__ALLOWED_ORIGINS".to_string(),
            "https://example.com,https://www.example.com".to_string(),
        );

        let config = AppConfig::load_from(missing_file(), env).unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.email.subject_prefix, "Lead: ");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://example.com", "https://www.example.com"]
        );
    }

    #[test]
    fn test_config_file_layer() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
host = "0.0.0.0"
port = 9000

[email]
api_key = "SG.file-key"
from = "file@example.com"
to = "inbox@example.com"
default_subject = "Hello there"

[logging]
format = "json"
level = "debug"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path(), Map::new()).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.email.api_key, "SG.file-key");
        assert_eq!(config.email.default_subject, "Hello there");
        assert_eq!(config.email.subject_prefix, "Portfolio Lead: ");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_environment_wins_over_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[email]
api_key = "SG.file-key"
from = "file@example.com"
to = "inbox@example.com"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path(), provider_env()).unwrap();
        assert_eq!(config.email.api_key, "SG.env-key");
        assert_eq!(config.email.to, "me@example.com");
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("SG.test-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
