/// Error codes AWS services use to signal request-rate limiting.
pub const THROTTLING_ERROR_CODES: [&str; 5] = [
    "ThrottlingException",
    "TooManyRequestsException",
    "Throttling",
    "RequestLimitExceeded",
    "RequestThrottled",
];

/// Message fragment some services send instead of a throttling code.
pub const RATE_EXCEEDED_MESSAGE: &str = "Rate exceeded";

/// Returns `true` when an error code or message identifies a throttled call.
///
/// ```
/// use petadoptions_core::retry::is_throttling_error;
///
/// assert!(is_throttling_error(Some("ThrottlingException"), None));
/// assert!(is_throttling_error(None, Some("Rate exceeded for operation")));
/// assert!(!is_throttling_error(Some("AccessDeniedException"), Some("denied")));
/// ```
pub fn is_throttling_error(code: Option<&str>, message: Option<&str>) -> bool {
    code.is_some_and(|c| THROTTLING_ERROR_CODES.contains(&c))
        || message.is_some_and(|m| m.contains(RATE_EXCEEDED_MESSAGE))
}

/// Errors that know whether they were caused by throttling.
pub trait Throttled {
    fn is_throttled(&self) -> bool;
}
