use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("Listener and admin listener cannot share a port")]
    PortCollision,

    #[error("Empty statsd host")]
    EmptyStatsdHost,
}

fn default_false() -> bool {
    false
}

/// Gateway configuration, loaded from YAML. Vendor credentials are not here;
/// those come from the environment so secrets stay out of config files.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Main listener for `/api/{vendor}/...` traffic
    pub listener: Listener,
    /// Admin listener for health and readiness probes
    pub admin_listener: Listener,
    /// When set, partner-gated Sales Navigator rejections are answered with
    /// labeled mock payloads instead of the vendor error
    #[serde(default = "default_false")]
    pub simulation: bool,
    /// Optional statsd sink for metrics
    #[serde(default)]
    pub statsd: Option<StatsdConfig>,
    /// Optional Sentry DSN for error reporting
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listener.validate()?;
        self.admin_listener.validate()?;

        if self.listener.host == self.admin_listener.host
            && self.listener.port == self.admin_listener.port
        {
            return Err(ValidationError::PortCollision);
        }

        if let Some(statsd) = &self.statsd
            && statsd.host.is_empty()
        {
            return Err(ValidationError::EmptyStatsdHost);
        }

        Ok(())
    }
}

/// Network listener configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Listener {
    /// Host address to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

impl Listener {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StatsdConfig {
    pub host: String,
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_config() {
        let yaml = r#"
listener:
    host: "0.0.0.0"
    port: 3000
admin_listener:
    host: "127.0.0.1"
    port: 3001
simulation: true
statsd:
    host: "127.0.0.1"
    port: 8125
sentry_dsn: "https://key@sentry.example.com/1"
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.listener.port, 3000);
        assert!(config.simulation);
        assert_eq!(config.statsd.as_ref().unwrap().port, 8125);
    }

    #[test]
    fn optional_fields_default() {
        let yaml = r#"
listener: {host: "0.0.0.0", port: 3000}
admin_listener: {host: "127.0.0.1", port: 3001}
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.simulation);
        assert!(config.statsd.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn validation_errors() {
        let base: Config = serde_yaml::from_str(
            r#"
listener: {host: "0.0.0.0", port: 3000}
admin_listener: {host: "127.0.0.1", port: 3001}
"#,
        )
        .unwrap();

        let mut config = base.clone();
        config.listener.port = 0;
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::InvalidPort
        ));

        let mut config = base.clone();
        config.admin_listener = config.listener.clone();
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::PortCollision
        ));

        let mut config = base;
        config.statsd = Some(StatsdConfig {
            host: String::new(),
            port: 8125,
        });
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::EmptyStatsdHost
        ));
    }

    #[test]
    fn deserialization_errors() {
        assert!(
            serde_yaml::from_str::<Config>(
                r#"
listener: {host: "0.0.0.0", port: "not_a_number"}
"#
            )
            .is_err()
        );

        assert!(
            serde_yaml::from_str::<Config>(
                r#"
listener: {host: "0.0.0.0"}
"#
            )
            .is_err()
        );
    }
}
