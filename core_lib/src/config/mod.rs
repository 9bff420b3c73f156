//! Application configuration, assembled once at startup

pub mod settings;

pub use settings::{
    AppConfig, CorsConfig, EmailConfig, LimitsConfig, LogFormat, LoggingConfig, ServerConfig,
    CONFIG_FILE,
};
