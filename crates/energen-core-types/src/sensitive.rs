//! Sensitive data marker for automatic redaction
//!
//! The `Sensitive<T>` wrapper ensures that customer PII (addresses,
//! zip codes, contact details) is never accidentally logged or displayed.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use energen_core_types::Sensitive;
///
/// let address = Sensitive::new("1 Cyclotron Road");
/// println!("{:?}", address); // Prints: ***REDACTED***
/// println!("{}", address);   // Prints: ***REDACTED***
///
/// // Access the actual value when needed
/// assert_eq!(address.expose(), &"1 Cyclotron Road");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    ///
    /// Use this method sparingly and only at the point the value is
    /// genuinely needed (e.g. building the snapshot record).
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
