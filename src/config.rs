//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "workout-timer")]
#[command(about = "A tick-driven workout timer with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Milliseconds between ticks; every tick advances the timer one second
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Calories per minute used when a configuration does not specify one
    #[arg(long, default_value = "8.0")]
    pub calorie_rate: f64,

    /// Number of completed sessions kept in memory
    #[arg(long, default_value = "50")]
    pub history_limit: usize,

    /// Command invoked as `<cmd> <cue-name>` to play audio cues
    #[arg(long)]
    pub sound_command: Option<String>,

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

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["workout-timer"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.calorie_rate, 8.0);
        assert_eq!(config.history_limit, 50);
        assert!(config.sound_command.is_none());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "workout-timer",
            "-p",
            "8080",
            "--tick-ms",
            "250",
            "--sound-command",
            "paplay",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.tick_period(), Duration::from_millis(250));
        assert_eq!(config.sound_command.as_deref(), Some("paplay"));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_zero_tick_period() {
        assert!(Config::try_parse_from(["workout-timer", "--tick-ms", "0"]).is_err());
    }
}
