//! Result type alias for Embark

use super::errors::EmbarkError;

/// Result type alias for Embark operations
///
/// # Examples
///
/// ```
/// use embark::domain::result::Result;
/// use embark::domain::errors::EmbarkError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EmbarkError::Export("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EmbarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
