use thiserror::Error;

/// Main error type for the integrity monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Authentication setup error: {0}")]
    Auth(String),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error from {endpoint}: HTTP {status}")]
    Api { endpoint: String, status: u16 },

    // Serialization errors
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    // Response shape errors
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    // Poller deadline
    #[error("Integrity checks still running after {attempts} poll attempts")]
    ChecksStillRunning { attempts: u32 },
}

/// Result type alias using MonitorError
pub type Result<T> = std::result::Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = MonitorError::Api {
            endpoint: "/api/dataIntegrity".to_string(),
            status: 502,
        };
        assert_eq!(
            err.to_string(),
            "API error from /api/dataIntegrity: HTTP 502"
        );
    }

    #[test]
    fn test_deadline_error_display() {
        let err = MonitorError::ChecksStillRunning { attempts: 120 };
        assert!(err.to_string().contains("120 poll attempts"));
    }
}
