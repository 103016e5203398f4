use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// Runtime configuration, loaded once at startup. Secret values are held
/// here and never logged.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub image_host_upload_url: String,
    pub image_host_api_key: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub mail_from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: optional_parsed("PORT", 3001)?,
            image_host_upload_url: required("IMAGE_HOST_UPLOAD_URL")?,
            image_host_api_key: required("IMAGE_HOST_API_KEY")?,
            smtp_host: required("SMTP_HOST")?,
            smtp_port: optional_parsed("SMTP_PORT", 587)?,
            smtp_username: required("SMTP_USERNAME")?,
            smtp_password: required("SMTP_PASSWORD")?,
            mail_from: required("MAIL_FROM")?,
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

fn optional_parsed<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidVar(key, e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_var_names_the_variable() {
        env::remove_var("TESSERA_TEST_REQUIRED");
        let err = required("TESSERA_TEST_REQUIRED").unwrap_err();
        assert!(err.to_string().contains("TESSERA_TEST_REQUIRED"));
    }

    #[test]
    fn optional_var_falls_back_to_default() {
        env::remove_var("TESSERA_TEST_PORT_UNSET");
        let port: u16 = optional_parsed("TESSERA_TEST_PORT_UNSET", 3001).unwrap();
        assert_eq!(port, 3001);
    }

    #[test]
    fn unparseable_optional_var_is_an_error() {
        env::set_var("TESSERA_TEST_PORT_BAD", "not-a-port");
        let result: Result<u16, _> = optional_parsed("TESSERA_TEST_PORT_BAD", 3001);
        assert!(result.is_err());
        env::remove_var("TESSERA_TEST_PORT_BAD");
    }
}
