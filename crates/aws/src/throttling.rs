//! Throttling classification for AWS SDK errors.

use aws_sdk_ssm::error::ProvideErrorMetadata;
use petadoptions_core::retry::is_throttling_error;

/// Whether an SDK error (or service error) reports request-rate limiting.
///
/// Works for any `SdkError<E, R>` whose service error exposes metadata, which
/// is every operation error of the generated clients.
pub fn is_throttling_sdk_error<E: ProvideErrorMetadata>(err: &E) -> bool {
    is_throttling_error(err.code(), err.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ssm::error::ErrorMetadata;

    #[test]
    fn test_throttling_code_is_detected() {
        let err = ErrorMetadata::builder()
            .code("ThrottlingException")
            .message("slow down")
            .build();
        assert!(is_throttling_sdk_error(&err));
    }

    #[test]
    fn test_rate_exceeded_message_is_detected() {
        let err = ErrorMetadata::builder()
            .code("SomeServiceError")
            .message("Rate exceeded")
            .build();
        assert!(is_throttling_sdk_error(&err));
    }

    #[test]
    fn test_other_errors_are_not_throttling() {
        let err = ErrorMetadata::builder()
            .code("ParameterNotFound")
            .message("not found")
            .build();
        assert!(!is_throttling_sdk_error(&err));
    }
}
