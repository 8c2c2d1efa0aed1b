use thiserror::Error;

/// Message shown when a failure carries no detail of its own
pub const GENERIC_ERROR: &str = "An error occurred";

/// Failures of the primary deals lookup.
///
/// Both variants collapse into a single user-facing message, see
/// [`SearchError::user_message`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport failure or a non-2xx response
    #[error("Failed to fetch deals{}", status_suffix(.status))]
    Network {
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Payload was not a JSON array of listings
    #[error("Failed to read deals: {0}")]
    Decode(String),
}

impl SearchError {
    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::Network {
            status: Some(status.as_u16()),
            source: None,
        }
    }

    pub fn transport(err: reqwest::Error) -> Self {
        Self::Network {
            status: err.status().map(|s| s.as_u16()),
            source: Some(err),
        }
    }

    /// Summary written into the session's error message
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            message
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}
