pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Everything that can end an analysis attempt. All variants leave the
/// controller ready for another submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// Rejected before any request was built.
    #[error("{0}")]
    Validation(String),

    /// The service answered with a non-success status.
    #[error("service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    /// A success status whose body breaks the response contract.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Transport failure. Timeouts land here too; `timed_out` only feeds the logs.
    #[error("network error: {detail}")]
    Network { detail: String, timed_out: bool },
}

impl AnalysisError {
    pub fn network(err: &reqwest::Error) -> Self {
        AnalysisError::Network {
            detail: err.to_string(),
            timed_out: err.is_timeout(),
        }
    }

    /// The single line shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Validation(message) => message.clone(),
            AnalysisError::Service { message, .. } => message.clone(),
            AnalysisError::MalformedResponse(_) => {
                "The analysis service returned an unexpected response.".to_string()
            }
            AnalysisError::Network { .. } => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "validation",
            AnalysisError::Service { .. } => "service",
            AnalysisError::MalformedResponse(_) => "malformed_response",
            AnalysisError::Network { .. } => "network",
        }
    }
}
