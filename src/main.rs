use anyhow::Result;
use house_price_api::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

/// Builds the log filter. `RUST_LOG` may hold any filter directive and overrides the
/// configured level, which must be a plain level name.
fn log_filter(config_level: &str, rust_log: Option<&str>) -> Result<EnvFilter> {
    validate_log_level(config_level)?;

    let directives = rust_log.unwrap_or(config_level);
    EnvFilter::try_new(directives)
        .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG filter '{}': {}", directives, e))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = match log_filter(&config.server.logs.level, rust_log.as_deref()) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(
        "Starting house price server with log filter: {}",
        rust_log.as_deref().unwrap_or(&config.server.logs.level)
    );
    info!(
        "Artifacts: preprocessor={} model={}",
        config.artifacts.preprocessor_path, config.artifacts.model_path
    );

    server::run(config).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_level_used_without_rust_log() {
        assert!(log_filter("debug", None).is_ok());
    }

    #[test]
    fn test_rust_log_accepts_per_target_directives() {
        let filter = log_filter("info", Some("house_price_api=debug,tower_http=info"));
        assert!(filter.is_ok());
    }

    #[test]
    fn test_invalid_config_level_is_rejected() {
        assert!(log_filter("verbose", None).is_err());
        assert!(log_filter("verbose", Some("info")).is_err());
    }

    #[test]
    fn test_invalid_rust_log_is_rejected() {
        assert!(log_filter("info", Some("house_price_api=loud")).is_err());
    }
}
