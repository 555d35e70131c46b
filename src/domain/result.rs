//! Result type alias for Scrubgate

use super::errors::ScrubError;

/// Result type alias for Scrubgate operations
///
/// # Examples
///
/// ```
/// use scrubgate::domain::result::Result;
/// use scrubgate::domain::errors::ScrubError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ScrubError::InvalidRequest("No JSON data".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ScrubError>;
