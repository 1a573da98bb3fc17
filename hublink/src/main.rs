use clap::Parser;
use connectors::{Connectors, credentials::Credentials};
use gateway::config::Config;
use metrics_exporter_statsd::StatsdBuilder;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "HTTP gateway in front of SaaS vendor APIs")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: PathBuf,
}

#[derive(Error, Debug)]
enum StartupError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Validate(#[from] gateway::config::ValidationError),

    #[error("failed to set up statsd exporter: {0}")]
    Statsd(#[from] metrics_exporter_statsd::StatsdError),

    #[error("failed to install metrics recorder: {0}")]
    Metrics(#[from] metrics::SetRecorderError<metrics_exporter_statsd::StatsdRecorder>),

    #[error(transparent)]
    Gateway(#[from] gateway::errors::GatewayError),
}

fn load_config(path: &PathBuf) -> Result<Config, StartupError> {
    let raw = std::fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), StartupError> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Keep the guard alive for the life of the process.
    let _sentry_guard = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    if let Some(statsd) = &config.statsd {
        let recorder = StatsdBuilder::from(statsd.host.as_str(), statsd.port)
            .with_queue_size(5000)
            .with_buffer_size(1024)
            .build(Some("hublink"))?;
        metrics::set_global_recorder(recorder)?;
    }

    let credentials = Credentials::from_env();
    let connectors = Connectors::from_credentials(&credentials, config.simulation);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(gateway::run(config, connectors))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_config_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
listener: {{host: "127.0.0.1", port: 3000}}
admin_listener: {{host: "127.0.0.1", port: 3001}}
"#
        )
        .unwrap();
        let config = load_config(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.listener.port, 3000);
    }

    #[test]
    fn load_config_rejects_port_collision() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
listener: {{host: "127.0.0.1", port: 3000}}
admin_listener: {{host: "127.0.0.1", port: 3000}}
"#
        )
        .unwrap();
        assert!(matches!(
            load_config(&file.path().to_path_buf()),
            Err(StartupError::Validate(_))
        ));
    }
}
