use crate::config::PollerConfig;
use crate::error::Result;
use crate::logging::LogFormat;
use clap::Parser;
use std::path::PathBuf;

/// Poll a submitted debit until the payment rail settles it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Transaction identifier returned by the debit submission
    #[arg(long)]
    pub transaction_id: String,

    /// Booking identifier of the reserved tickets
    #[arg(long)]
    pub booking_id: String,

    /// Backend API base URL (overrides the config file)
    #[arg(long, env = "POLLER_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// JSON config file with poller settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Replay a comma-separated status script instead of calling the backend,
    /// e.g. `PEND,ERR,ACCP:REF123:7|42`
    #[arg(long)]
    pub simulate: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Resolves the effective configuration: defaults, then the config file,
    /// then command-line overrides.
    pub fn resolve_config(&self) -> Result<PollerConfig> {
        let mut config = match &self.config {
            Some(path) => PollerConfig::from_file(path)?,
            None => PollerConfig::default(),
        };
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        config.validate()?;
        Ok(config)
    }
}
