use reqwest::StatusCode;

/// Failures while bringing the session up (health probe and catalog load)
///
/// All of these are terminal for the session.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Backend data not loaded (movies_loaded: {movies_loaded}, ratings_loaded: {ratings_loaded})")]
    DataNotLoaded {
        movies_loaded: bool,
        ratings_loaded: bool,
    },

    #[error("Catalog fetch failed ({status}): {detail}")]
    CatalogFetchError { status: StatusCode, detail: String },
}

/// Failures of a single recommendation submission
///
/// These are recoverable: the session returns to `Ready` with the selection intact.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecommendationError {
    #[error("recommendation request failed ({status}): {body}")]
    RecommendationRequestError { status: StatusCode, body: String },

    #[error("recommendation request failed: {0}")]
    Transport(String),

    #[error("recommendation response malformed: {0}")]
    Malformed(String),
}

/// Rejected session events and controller calls
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Event {event} is not allowed in state {state}")]
    IllegalTransition {
        state: &'static str,
        event: &'static str,
    },

    #[error("A submission is already in flight")]
    SubmitInFlight,

    #[error("Session has not finished loading")]
    NotLoaded,
}

pub type BackendResult<T> = Result<T, BackendError>;

pub type RecommendationResult<T> = Result<T, RecommendationError>;

pub type SessionResult<T> = Result<T, SessionError>;

impl BackendError {
    pub(crate) fn unavailable(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::BackendUnavailable(format!("request timed out: {}", err))
        } else {
            BackendError::BackendUnavailable(err.to_string())
        }
    }
}

impl From<reqwest::Error> for RecommendationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RecommendationError::Transport(format!("request timed out: {}", err))
        } else {
            RecommendationError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_error_message_includes_body() {
        let err = RecommendationError::RecommendationRequestError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "model error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "recommendation request failed (500 Internal Server Error): model error"
        );
    }

    #[test]
    fn test_data_not_loaded_message_reports_flags() {
        let err = BackendError::DataNotLoaded {
            movies_loaded: true,
            ratings_loaded: false,
        };
        assert_eq!(
            err.to_string(),
            "Backend data not loaded (movies_loaded: true, ratings_loaded: false)"
        );
    }

    #[test]
    fn test_catalog_fetch_error_carries_status() {
        let err = BackendError::CatalogFetchError {
            status: StatusCode::SERVICE_UNAVAILABLE,
            detail: "upstream down".to_string(),
        };
        assert!(err.to_string().contains("503"));
    }
}
