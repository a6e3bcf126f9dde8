use thiserror::Error;

/// Errors surfaced to the caller of a sky query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Time must be in ISO format (YYYY-MM-DDTHH:MM:SS): {0}")]
    InvalidTimeFormat(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SkyError {
    /// True for failures caused by the request itself (bad coordinates, bad time).
    pub fn is_client_error(&self) -> bool {
        matches!(self, SkyError::InvalidInput(_) | SkyError::InvalidTimeFormat(_))
    }
}

/// Why a single catalog entry could not be resolved.
///
/// Every variant except [`ResolutionFailure::Unavailable`] is recovered locally:
/// the entry is dropped and the query carries on with the rest of the catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionFailure {
    #[error("Body is not defined at the requested instant: {0}")]
    Undefined(String),

    #[error("Malformed coordinate '{value}': {reason}")]
    MalformedCoordinate { value: String, reason: String },

    #[error("Position computation failed: {0}")]
    Computation(String),

    #[error("Resolver cannot handle this entry: {0}")]
    Unsupported(String),

    #[error("Position resolver unavailable: {0}")]
    Unavailable(String),
}

impl ResolutionFailure {
    /// Whether the failure concerns only this entry (and may be skipped).
    pub fn is_isolated(&self) -> bool {
        !matches!(self, ResolutionFailure::Unavailable(_))
    }
}

impl From<ResolutionFailure> for SkyError {
    fn from(err: ResolutionFailure) -> Self {
        SkyError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(SkyError::InvalidInput("lat".into()).is_client_error());
        assert!(SkyError::InvalidTimeFormat("x".into()).is_client_error());
        assert!(!SkyError::Internal("boom".into()).is_client_error());
    }

    #[test]
    fn test_unavailable_is_not_isolated() {
        assert!(ResolutionFailure::Computation("nan".into()).is_isolated());
        assert!(!ResolutionFailure::Unavailable("down".into()).is_isolated());
        let err: SkyError = ResolutionFailure::Unavailable("down".into()).into();
        assert_eq!(
            err,
            SkyError::Internal("Position resolver unavailable: down".into())
        );
    }
}
