//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "circle-timer")]
#[command(about = "A single-session countdown timer with a circular control")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Preference file (defaults to the user config directory)
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Audio player invoked with a clip path
    #[arg(long, default_value = "paplay")]
    pub player: String,

    /// Clip played when the countdown starts or resumes
    #[arg(long, default_value = "/usr/share/sounds/freedesktop/stereo/bell.oga")]
    pub start_clip: PathBuf,

    /// Clip played when the countdown finishes
    #[arg(long, default_value = "/usr/share/sounds/freedesktop/stereo/complete.oga")]
    pub finish_clip: PathBuf,

    /// Disable audio cues
    #[arg(long)]
    pub mute: bool,

    /// Do not keep the screen awake while running
    #[arg(long)]
    pub no_wake_lock: bool,

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
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the preference file location
    pub fn prefs_path(&self) -> PathBuf {
        if let Some(path) = &self.prefs {
            return path.clone();
        }
        dirs::config_dir()
            .map(|dir| dir.join("circle-timer").join("prefs.json"))
            .unwrap_or_else(|| PathBuf::from("circle-timer-prefs.json"))
    }
}
