//! Planner error type.

use thiserror::Error;

/// Errors produced while planning a route.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The search completed but the target is unreachable from the start.
    #[error("no path found from node {start} to node {end}")]
    NoPath { start: usize, end: usize },

    /// The request failed boundary validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Road routing was requested but no provider is configured.
    #[error("a route provider is required for road routing")]
    ProviderUnavailable,

    /// Transport-level failure talking to the provider.
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-OK status.
    #[error("provider returned {code}: {message}")]
    Provider { code: String, message: String },

    /// The provider answered with a body we could not use.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl PlannerError {
    /// `true` when the failure should surface as "not found" to clients.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoPath { .. })
    }

    /// `true` when the failure originated in the distance/route provider.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable
                | Self::Http(_)
                | Self::Provider { .. }
                | Self::MalformedResponse(_)
        )
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_is_not_found() {
        let err = PlannerError::NoPath { start: 0, end: 3 };
        assert!(err.is_not_found());
        assert!(!err.is_provider_failure());
        assert_eq!(err.to_string(), "no path found from node 0 to node 3");
    }

    #[test]
    fn provider_message_is_forwarded() {
        let err = PlannerError::Provider {
            code: "InvalidQuery".to_string(),
            message: "Too many coordinates".to_string(),
        };
        assert!(err.is_provider_failure());
        assert!(err.to_string().contains("Too many coordinates"));
    }

    #[test]
    fn invalid_request_is_neither() {
        let err = PlannerError::InvalidRequest("bad".to_string());
        assert!(!err.is_not_found());
        assert!(!err.is_provider_failure());
    }
}
