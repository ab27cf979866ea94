use thiserror::Error;

/// Message shown for an empty query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a city name";

/// Message shown for every lookup failure past validation.
pub const LOOKUP_FAILED_MESSAGE: &str = "Could not find weather data for this city";

/// Why a lookup did not produce a record.
///
/// The variants stay distinct for logging and tests; users only ever see
/// [`LookupError::user_message`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("no place found for '{query}'")]
    NotFound { query: String },

    #[error("weather provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },
}

impl LookupError {
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound { query: query.into() }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::ProviderUnavailable { reason: reason.into() }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::EmptyQuery => EMPTY_QUERY_MESSAGE,
            LookupError::NotFound { .. } | LookupError::ProviderUnavailable { .. } => {
                LOOKUP_FAILED_MESSAGE
            }
        }
    }
}
