use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between reading the input field and rendering a reading.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a city name")]
    EmptyQuery,

    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    #[error("City not found. Please check the spelling and try again.")]
    NotFound,

    #[error("Invalid API key. Please check your configuration.")]
    Unauthorized,

    /// Any other non-success HTTP status.
    #[error("Failed to fetch weather data. Please try again later.")]
    Status(StatusCode),

    /// Transport level fault: DNS, connect, reading the body.
    #[error("Failed to fetch weather data. Please try again later.")]
    Request(#[from] reqwest::Error),

    /// The body was not a usable current-weather payload.
    #[error("Failed to fetch weather data. Please try again later.")]
    Parse(String),
}

/// Coarse categories a front end may branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    InvalidInput,
    NotFound,
    Unauthorized,
    Failed,
}

impl WeatherError {
    /// Map a non-success status to its error.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => WeatherError::NotFound,
            StatusCode::UNAUTHORIZED => WeatherError::Unauthorized,
            other => WeatherError::Status(other),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::EmptyQuery => ErrorKind::EmptyInput,
            WeatherError::InvalidCoordinates => ErrorKind::InvalidInput,
            WeatherError::NotFound => ErrorKind::NotFound,
            WeatherError::Unauthorized => ErrorKind::Unauthorized,
            WeatherError::Status(_) | WeatherError::Request(_) | WeatherError::Parse(_) => {
                ErrorKind::Failed
            }
        }
    }

    /// True when no request was issued because the query itself was rejected.
    pub fn is_input_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::EmptyInput | ErrorKind::InvalidInput)
    }
}
