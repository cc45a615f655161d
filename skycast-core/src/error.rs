//! Typed failures surfaced by forecast providers.
//!
//! The session state keeps only the rendered message; the typed kind
//! stays available at the provider layer so callers and tests can match
//! on it instead of on substrings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Invalid API key. Please check your OpenWeatherMap API key.")]
    Unauthorized,

    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("City not found: '{0}'. Please enter a valid city name.")]
    NotFound(String),

    #[error("No response from the server. Please check your internet connection.")]
    Network(#[from] reqwest::Error),

    #[error("Error {status}: {message}")]
    Unknown { status: u16, message: String },
}

impl ProviderError {
    /// Map a non-success HTTP status from the forecast API to an error kind.
    pub fn from_status(status: reqwest::StatusCode, city: &str) -> Self {
        match status.as_u16() {
            401 => ProviderError::Unauthorized,
            404 => ProviderError::NotFound(city.to_string()),
            429 => ProviderError::RateLimited,
            code => ProviderError::Unknown {
                status: code,
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_mapping_covers_the_known_kinds() {
        assert!(matches!(
            ProviderError::from_status(StatusCode::UNAUTHORIZED, "London"),
            ProviderError::Unauthorized
        ));
        assert!(matches!(
            ProviderError::from_status(StatusCode::TOO_MANY_REQUESTS, "London"),
            ProviderError::RateLimited
        ));

        match ProviderError::from_status(StatusCode::NOT_FOUND, "Paris") {
            ProviderError::NotFound(city) => assert_eq!(city, "Paris"),
            other => panic!("expected NotFound, got {other:?}"),
        }

        match ProviderError::from_status(StatusCode::BAD_GATEWAY, "London") {
            ProviderError::Unknown { status, .. } => assert_eq!(status, 502),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn messages_are_fixed_and_human_readable() {
        assert_eq!(
            ProviderError::Unauthorized.to_string(),
            "Invalid API key. Please check your OpenWeatherMap API key."
        );
        assert_eq!(
            ProviderError::RateLimited.to_string(),
            "API rate limit exceeded. Please try again later."
        );
        assert_eq!(
            ProviderError::NotFound("Paris".to_string()).to_string(),
            "City not found: 'Paris'. Please enter a valid city name."
        );
        assert_eq!(
            ProviderError::Unknown {
                status: 500,
                message: "Internal Server Error".to_string()
            }
            .to_string(),
            "Error 500: Internal Server Error"
        );
    }
}
