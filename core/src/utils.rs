//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a string for `Debug` output.
///
/// - Empty input prints `EMPTY`.
/// - Input built with [`Redact::full`] always prints `***`.
/// - Input shorter than 12 characters, or not ASCII, is redacted entirely.
/// - Otherwise only the first three and the last three characters are kept.
pub struct Redact<'a> {
    value: &'a str,
    full: bool,
}

impl<'a> Redact<'a> {
    /// Redact every character of `value`, used for secrets.
    pub fn full(value: &'a str) -> Self {
        Redact { value, full: true }
    }
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact { value, full: false }
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::from(value.as_str())
    }
}

impl<'a> Debug for Redact<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.value.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if self.full || length < 12 || !self.value.is_ascii() {
            f.write_str("***")
        } else {
            f.write_str(&self.value[..3])?;
            f.write_str("***")?;
            f.write_str(&self.value[length - 3..])
        }
    }
}
