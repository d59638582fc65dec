//! Error types for the underwriting pipeline.
//!
//! Collector failures are deliberately absent here: a source that times out
//! or returns garbage degrades its own signal (`SourceSignal::failed`) and
//! never surfaces as a request-level error.

use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Request-fatal errors of the underwriting pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Caller omitted a required input or supplied an unrecognized
    /// collateral asset. Rejected before any external call is made.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Required scoring-engine credential is missing. Raised before any
    /// network call is attempted.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The scoring engine replied, but the reply contains no parsable JSON
    /// object or the parsed object is missing required fields. The raw
    /// reply text is kept for diagnosis. Not retried.
    #[error("engine contract violation: {message}")]
    UpstreamContract { message: String, raw: String },

    /// The scoring-engine call itself failed (transport error, non-success
    /// status, or timeout).
    #[error("engine unavailable: {message}")]
    Engine { message: String },
}

impl PipelineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn upstream_contract(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::UpstreamContract {
            message: message.into(),
            raw: raw.into(),
        }
    }

    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }

    /// HTTP status the server layer publishes for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Configuration { .. } | Self::UpstreamContract { .. } | Self::Engine { .. } => 500,
        }
    }

    /// True for errors caused by the upstream engine rather than the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamContract { .. } | Self::Engine { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineError;

    #[test]
    fn validation_maps_to_400_everything_else_to_500() {
        assert_eq!(PipelineError::validation("missing asset").http_status(), 400);
        assert_eq!(PipelineError::configuration("no key").http_status(), 500);
        assert_eq!(
            PipelineError::upstream_contract("no json", "raw").http_status(),
            500
        );
        assert_eq!(PipelineError::engine("timeout").http_status(), 500);
    }

    #[test]
    fn upstream_classification() {
        assert!(PipelineError::engine("down").is_upstream());
        assert!(PipelineError::upstream_contract("bad", "raw").is_upstream());
        assert!(!PipelineError::validation("bad input").is_upstream());
        assert!(!PipelineError::configuration("no key").is_upstream());
    }
}
