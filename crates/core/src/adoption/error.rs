use thiserror::Error;

/// Errors raised while validating or completing an adoption.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdoptionError {
    #[error("Bad request parameters")]
    MissingParameters,
    #[error("illegal memory allocation")]
    ErrorModeTriggered,
    #[error("Status update failed: {0}")]
    StatusUpdateFailed(String),
}

impl AdoptionError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AdoptionError::MissingParameters => 400,
            AdoptionError::ErrorModeTriggered => 500,
            AdoptionError::StatusUpdateFailed(_) => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adoption_error_display() {
        assert_eq!(
            AdoptionError::MissingParameters.to_string(),
            "Bad request parameters"
        );
        assert_eq!(
            AdoptionError::ErrorModeTriggered.to_string(),
            "illegal memory allocation"
        );
        assert_eq!(
            AdoptionError::StatusUpdateFailed("timeout".to_string()).to_string(),
            "Status update failed: timeout"
        );
    }

    #[test]
    fn test_adoption_error_status_codes() {
        assert_eq!(AdoptionError::MissingParameters.status_code(), 400);
        assert_eq!(AdoptionError::ErrorModeTriggered.status_code(), 500);
        assert_eq!(
            AdoptionError::StatusUpdateFailed(String::new()).status_code(),
            502
        );
    }
}
