//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::DurationCycle;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "caffeine-tile")]
#[command(about = "A Quick Settings caffeine tile that keeps the display awake for timed durations")]
#[command(version = "1.1.0")]
pub struct Config {
    /// Port to bind the host surface to
    #[arg(short, long, default_value = "21080")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Finite keep-awake presets in seconds; the infinite preset is always
    /// appended last
    #[arg(short, long, value_delimiter = ',', default_value = "300,600,1800")]
    pub durations: Vec<u64>,

    /// Clicks closer together than this many seconds cycle durations
    /// instead of toggling off
    #[arg(long, default_value = "5")]
    pub double_click_window: u64,

    /// Hold the wake lock through systemd-inhibit instead of the virtual
    /// logging backend
    #[arg(long)]
    pub system_inhibit: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Build the duration cycle from the configured presets
    pub fn duration_cycle(&self) -> Result<DurationCycle, String> {
        DurationCycle::from_secs(&self.durations)
    }
}
