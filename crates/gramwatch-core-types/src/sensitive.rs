//! Sensitive data marker for automatic redaction
//!
//! Platform passwords and bot tokens travel through configuration and the
//! collaborators; the `Sensitive<T>` wrapper ensures they are never
//! accidentally logged or displayed.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use gramwatch_core_types::Sensitive;
///
/// let password = Sensitive::new("hunter2".to_string());
/// assert_eq!(format!("{:?}", password), "***REDACTED***");
///
/// // Access the actual value only at the authentication boundary
/// assert_eq!(password.expose(), "hunter2");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    ///
    /// Use sparingly: only at the point the credential is actually
    /// handed to the platform or the notification transport.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
