use thiserror::Error;

/// Every way a weather session or job can fail.
///
/// None of these are retried internally; the caller decides whether to try
/// again. Use [`WeatherError::user_message`] for console output.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WeatherError {
    #[error("invalid coordinates '{0}'")]
    InvalidCoordinateFormat(String),

    #[error("location access was denied")]
    PermissionDenied,

    #[error("device reported no position fix")]
    LocationUnavailable,

    #[error("location provider failed: {0}")]
    LocationProviderError(String),

    #[error("device geolocation is not available on this platform")]
    DeviceLocationUnsupported,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("malformed IP geolocation response: {0}")]
    MalformedLocationResponse(String),

    #[error("malformed weather response: {0}")]
    MalformedResponse(String),

    #[error("weather provider returned status {status}: {body}")]
    ProviderError { status: u16, body: String },

    #[error("weather response contained no days")]
    NoDayData,

    #[error("unknown unit group '{0}'")]
    InvalidUnitGroup(String),

    #[error("job queue is closed")]
    QueueClosed,

    #[error("job was cancelled")]
    Cancelled,
}

impl WeatherError {
    /// Short, actionable text for the person at the terminal.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::InvalidCoordinateFormat(_) => {
                "Format of coordinates should be latitude,longitude (e.g. c:39.9272,32.8644)."
            }
            WeatherError::PermissionDenied => "Permission error! Please allow location access.",
            WeatherError::LocationUnavailable => "Unable to fetch coordinates from the device.",
            WeatherError::LocationProviderError(_) => {
                "The device location service failed. Try --coordinates ip instead."
            }
            WeatherError::DeviceLocationUnsupported => {
                "GPS is not available on this platform. Use --coordinates ip or c:<lat>,<lon>."
            }
            WeatherError::NetworkError(_) | WeatherError::ProviderError { .. } => {
                "Please check your network connection or credential."
            }
            WeatherError::MalformedLocationResponse(_) => {
                "The IP geolocation service returned an unexpected response. Check your token."
            }
            WeatherError::MalformedResponse(_) => {
                "Response is not valid! Please check the connection and API key and try again."
            }
            WeatherError::NoDayData => "The weather service returned no data for today.",
            WeatherError::InvalidUnitGroup(_) => "Unit group must be one of: metric, us, uk, base.",
            WeatherError::QueueClosed => "The job queue is not running.",
            WeatherError::Cancelled => "The weather request was cancelled.",
        }
    }

    /// Errors the user can fix by changing input, permissions or settings.
    ///
    /// These are reported as warnings; everything else is a transport or
    /// contract failure and reported as an error.
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            WeatherError::InvalidCoordinateFormat(_)
                | WeatherError::PermissionDenied
                | WeatherError::DeviceLocationUnsupported
                | WeatherError::InvalidUnitGroup(_)
                | WeatherError::Cancelled
        )
    }
}

/// Request URLs carry credentials, so they are stripped before the error is
/// rendered anywhere.
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::NetworkError(err.without_url().to_string())
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
