//! Error types for the routing client.

use thiserror::Error;

/// Errors that can occur when fetching a route.
///
/// `Clone` so a failure can be stored in session state and surfaced to the
/// presentation layer verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    /// Network/transport failure calling the routing provider. Retryable.
    #[error("routing provider unreachable: {0}")]
    ProviderUnreachable(String),

    /// The provider responded with a non-2xx HTTP status.
    #[error("routing provider returned HTTP {0}")]
    ProviderStatus(u16),

    /// The provider responded but no usable path exists between the given
    /// points. Not retryable with the same inputs.
    #[error("no route found between the requested points")]
    NotFound,

    /// The provider response could not be parsed.
    #[error("malformed routing response: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = RouteError::ProviderStatus(429);
        assert_eq!(error.to_string(), "routing provider returned HTTP 429");

        let error = RouteError::NotFound;
        assert!(error.to_string().contains("no route found"));
    }
}
