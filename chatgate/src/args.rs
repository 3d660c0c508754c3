use std::{borrow::Cow, fmt, io::IsTerminal, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use logforth::filter::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "Chatgate", version, long_about = concat!("Chatgate v", env!("CARGO_PKG_VERSION")))]
pub struct Args {
    /// IP address on which the server will listen for incoming connections.
    /// Default: 0.0.0.0:8000
    #[arg(short, long, env = "CHATGATE_LISTEN_ADDRESS", global = true)]
    pub listen_address: Option<SocketAddr>,
    /// Path to the TOML configuration file
    #[arg(long, short, env = "CHATGATE_CONFIG_PATH", default_value = "./chatgate.toml", global = true)]
    pub config: PathBuf,
    /// Set the logging level for all workspace crates.
    #[arg(long = "log", env = "CHATGATE_LOG", default_value_t = LogLevel::default(), global = true)]
    pub log_level: LogLevel,
    /// Set the style of log output
    #[arg(long, env = "CHATGATE_LOG_STYLE", default_value_t = LogStyle::default(), global = true)]
    pub log_style: LogStyle,
    /// What to run. Serves the API when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the chat API (default)
    Serve,
    /// Interactively pick a model and write the environment file
    Setup {
        /// Where to write the environment file
        #[arg(long, short, default_value = ".env")]
        output: PathBuf,
    },
    /// Generate load against a running service and print a summary
    Loadtest {
        /// Base URL of the service under test
        #[arg(long, default_value = "http://localhost:8000")]
        host: String,
        /// Number of concurrent virtual users
        #[arg(long, short, default_value_t = 10)]
        users: usize,
        /// Virtual users started per second
        #[arg(long, short = 'r', default_value_t = 1.0)]
        spawn_rate: f64,
        /// Stop after this long, e.g. `60s` or `5m`. Runs until Ctrl+C when unset.
        #[arg(long, short = 't', value_parser = parse_duration)]
        run_time: Option<Duration>,
    },
}

fn parse_duration(value: &str) -> Result<Duration, String> {
    duration_str::parse(value).map_err(|e| e.to_string())
}

impl Args {
    /// Loads the configuration file if present and layers the environment on top.
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = if self.config.exists() {
            Config::load(&self.config)?
        } else {
            Config::default()
        };

        config.apply_env(|name| std::env::var(name).ok())?;

        Ok(config)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogStyle {
    /// Colorized text, used as the default with TTY output
    Color,
    /// Standard text, used as the default with non-TTY output
    Text,
    /// JSON objects
    Json,
}

impl Default for LogStyle {
    fn default() -> Self {
        if std::io::stdout().is_terminal() {
            LogStyle::Color
        } else {
            LogStyle::Text
        }
    }
}

impl AsRef<str> for LogStyle {
    fn as_ref(&self) -> &str {
        match self {
            LogStyle::Color => "color",
            LogStyle::Text => "text",
            LogStyle::Json => "json",
        }
    }
}

impl fmt::Display for LogStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogLevel {
    /// Disable logging
    Off,
    /// Only log errors
    Error,
    /// Log errors, and warnings
    Warn,
    /// Log errors, warnings, and info messages
    #[default]
    Info,
    /// Log errors, warnings, info, and debug messages
    Debug,
    /// Log errors, warnings, info, debug, and trace messages
    Trace,
}

impl LogLevel {
    fn filter_directive(self) -> Cow<'static, str> {
        match self {
            LogLevel::Off => Cow::Borrowed("off"),
            // Dependencies stay at warn, workspace crates follow the selected level.
            level => Cow::Owned(format!(
                "warn,chatgate={level},server={level},config={level},llm={level},loadtest={level}"
            )),
        }
    }

    pub fn env_filter(self) -> EnvFilter {
        EnvFilter::from_str(&self.filter_directive()).expect("These all are valid env filters.")
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

impl AsRef<str> for LogLevel {
    fn as_ref(&self) -> &str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
