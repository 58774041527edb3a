use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use scout_engine::{BackendSettings, FixedDelay};

use crate::LogDestination;

#[derive(Debug, Clone, Parser)]
#[command(name = "scout", version, about = "Collect phone leads from a listings page")]
pub struct AppConfig {
    /// Base URL of the lead backend.
    #[arg(long, env = "SCOUT_BACKEND_URL", default_value = "http://localhost:5000/")]
    pub backend_url: String,

    /// Directory holding the saved session.
    #[arg(long, env = "SCOUT_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Pause before each candidate request, in milliseconds (at least 300).
    #[arg(long, env = "SCOUT_DELAY_MS", default_value_t = 300)]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds.
    #[arg(long, env = "SCOUT_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Source page to preload, replacing the restored one.
    pub source_url: Option<String>,
}

impl AppConfig {
    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.backend_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            ..BackendSettings::default()
        }
    }

    pub fn request_delay(&self) -> FixedDelay {
        FixedDelay::new(Duration::from_millis(self.delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_clamped_to_the_minimum() {
        let config = AppConfig::parse_from(["scout", "--delay-ms", "50"]);
        assert_eq!(config.request_delay().interval(), Duration::from_millis(300));

        let config = AppConfig::parse_from(["scout", "--delay-ms", "1200"]);
        assert_eq!(config.request_delay().interval(), Duration::from_millis(1200));
    }

    #[test]
    fn positional_source_url_and_backend_settings() {
        let config = AppConfig::parse_from([
            "scout",
            "--backend-url",
            "http://leads.internal:8080",
            "--request-timeout-secs",
            "5",
            "https://board.example.com/list",
        ]);
        assert_eq!(
            config.source_url.as_deref(),
            Some("https://board.example.com/list")
        );
        let settings = config.backend_settings();
        assert_eq!(settings.base_url, "http://leads.internal:8080");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log, LogDestination::File);
    }
}
