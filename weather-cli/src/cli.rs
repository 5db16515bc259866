use std::{fmt, process::ExitCode};

use clap::Parser;
use tracing::{error, warn};
use weather_core::{Config, CoordinateDirective, WeatherContext, WeatherError, WeatherSession};

/// Device GPS is only offered where the platform has a locator.
pub const DEFAULT_COORDINATES: &str = if cfg!(windows) { "gps" } else { "ip" };

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "daily-weather", version, about = "Today's weather for a coordinate")]
pub struct Cli {
    /// Coordinate source: gps, ip, or c:<latitude>,<longitude>.
    #[arg(long, default_value = DEFAULT_COORDINATES)]
    pub coordinates: String,

    /// Output language for the weather description.
    #[arg(long, default_value = "tr")]
    pub language: String,

    /// Unit group: metric, us, uk or base.
    #[arg(long = "unitGroup", default_value = "metric")]
    pub unit_group: String,
}

/// Why a run produced no weather line.
#[derive(Debug)]
pub enum RunError {
    /// Bad command-line input.
    Usage(WeatherError),
    /// Missing credential or unreadable config.
    Config(anyhow::Error),
    /// The weather pipeline itself failed.
    Weather(WeatherError),
}

impl RunError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RunError::Usage(_) => ExitCode::from(2),
            RunError::Config(_) | RunError::Weather(_) => ExitCode::FAILURE,
        }
    }

    /// Log the failure and print a user-facing hint to stderr.
    pub fn report(&self) {
        match self {
            RunError::Usage(err) => {
                warn!(error = %err, "Invalid arguments");
                eprintln!("{}", err.user_message());
            }
            RunError::Config(err) => {
                warn!(error = %err, "Configuration error");
                eprintln!("{err:#}");
            }
            RunError::Weather(err) => {
                if err.is_user_actionable() {
                    warn!(error = %err, "Weather request failed");
                } else {
                    error!(error = %err, "Weather request failed");
                }
                eprintln!("{}", err.user_message());
            }
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Usage(err) | RunError::Weather(err) => write!(f, "{err}"),
            RunError::Config(err) => write!(f, "{err:#}"),
        }
    }
}

impl Cli {
    pub fn directive(&self) -> Result<CoordinateDirective, RunError> {
        self.coordinates.parse().map_err(RunError::Usage)
    }

    pub fn language(&self) -> String {
        self.language.trim().to_lowercase()
    }

    pub fn unit_group(&self) -> String {
        self.unit_group.trim().to_lowercase()
    }

    /// Resolve, fetch and format. Returns the single output line.
    pub async fn run(self, config: anyhow::Result<Config>) -> Result<String, RunError> {
        let directive = self.directive()?;

        let config = config.map_err(RunError::Config)?;
        let ctx = WeatherContext::from_config(&config).map_err(RunError::Config)?;

        ctx.resolver().ensure_supported(&directive).map_err(RunError::Usage)?;

        let session = WeatherSession::new(&ctx, &directive, &self.language(), &self.unit_group())
            .await
            .map_err(RunError::Weather)?;

        session.describe_current_weather().await.map_err(RunError::Weather)
    }
}
