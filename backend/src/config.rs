use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{0} must be set when SMTP_HOST is set")]
    MissingSmtp(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub inbox: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub frontend_url: String,
    pub static_dir: PathBuf,
    pub delivery_timeout: Duration,
    pub smtp: Option<SmtpSettings>,
    pub sentry_dsn: Option<String>,
    /// `development`, `staging` or `production`; tags Sentry events.
    pub environment: String,
    /// Set when a reverse proxy fronts the server and owns `X-Forwarded-For`.
    pub trust_proxy: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = get("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let port = match get("PORT") {
            Some(raw) => parse(&raw, "PORT", "port number")?,
            None => match environment.as_str() {
                "staging" => 3100,
                _ => 3000,
            },
        };
        let delivery_secs: u64 = match get("CONTACT_DELIVERY_TIMEOUT_SECS") {
            Some(raw) => parse(&raw, "CONTACT_DELIVERY_TIMEOUT_SECS", "number of seconds")?,
            None => 10,
        };

        let smtp = match get("SMTP_HOST").filter(|h| !h.is_empty()) {
            Some(host) => {
                let require = |name: &'static str| get(name).ok_or(ConfigError::MissingSmtp(name));
                let smtp_port = match get("SMTP_PORT") {
                    Some(raw) => parse(&raw, "SMTP_PORT", "port number")?,
                    None => 587,
                };
                Some(SmtpSettings {
                    host,
                    port: smtp_port,
                    username: require("SMTP_USERNAME")?,
                    password: require("SMTP_PASSWORD")?,
                    from: require("SMTP_FROM")?,
                    inbox: require("CONTACT_INBOX")?,
                })
            }
            None => None,
        };

        Ok(Self {
            port,
            frontend_url: get("FRONTEND_URL").unwrap_or_else(|| "http://localhost:8080".to_string()),
            static_dir: PathBuf::from(get("STATIC_DIR").unwrap_or_else(|| "frontend/dist".to_string())),
            delivery_timeout: Duration::from_secs(delivery_secs),
            smtp,
            sentry_dsn: get("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            trust_proxy: matches!(get("TRUST_PROXY").as_deref(), Some("true" | "1")),
            environment,
        })
    }
}

fn parse<T: std::str::FromStr>(raw: &str, name: &'static str, expected: &'static str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_for_development() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.delivery_timeout, Duration::from_secs(10));
        assert_eq!(config.frontend_url, "http://localhost:8080");
        assert!(config.smtp.is_none());
        assert!(config.sentry_dsn.is_none());
        assert_eq!(config.environment, "development");
        assert!(!config.trust_proxy);
    }

    #[test]
    fn staging_uses_its_own_port_unless_overridden() {
        assert_eq!(config_from(&[("ENVIRONMENT", "staging")]).unwrap().port, 3100);
        let config = config_from(&[("ENVIRONMENT", "staging"), ("PORT", "8000")]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, "staging");
    }

    #[test]
    fn bad_numbers_are_reported() {
        assert_eq!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid {
                name: "PORT",
                expected: "port number",
                value: "eighty".into(),
            })
        );
        assert!(config_from(&[("CONTACT_DELIVERY_TIMEOUT_SECS", "-1")]).is_err());
    }

    #[test]
    fn forwarded_for_is_trusted_only_when_asked() {
        assert!(config_from(&[("TRUST_PROXY", "true")]).unwrap().trust_proxy);
        assert!(config_from(&[("TRUST_PROXY", "1")]).unwrap().trust_proxy);
        assert!(!config_from(&[("TRUST_PROXY", "yes please")]).unwrap().trust_proxy);
    }

    #[test]
    fn smtp_requires_the_full_set() {
        assert_eq!(
            config_from(&[("SMTP_HOST", "smtp.example.com")]),
            Err(ConfigError::MissingSmtp("SMTP_USERNAME"))
        );
        let config = config_from(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USERNAME", "web"),
            ("SMTP_PASSWORD", "secret"),
            ("SMTP_FROM", "Emyux Web <web@emyux.com>"),
            ("CONTACT_INBOX", "team@emyux.com"),
        ])
        .unwrap();
        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.inbox, "team@emyux.com");
    }
}
