//! In-memory secret handling for the static provider credential.
//!
//! ```rust
//! use cprovider::SecretString;
//!
//! let key = SecretString::new("co-123");
//! assert_eq!(format!("{key:?}"), "[REDACTED]");
//! assert_eq!(key.expose(), "co-123");
//! ```

use std::fmt::{Debug, Formatter};

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl Debug for SecretString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // SAFETY: zero bytes are valid UTF-8, so the string stays well-formed.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SecretString;

    #[test]
    fn debug_output_is_redacted() {
        let secret = SecretString::new("co-live-abc");
        let rendered = format!("{secret:?}");

        assert_eq!(rendered, "[REDACTED]");
        assert!(!rendered.contains("co-live"));
    }

    #[test]
    fn whitespace_only_secret_counts_as_empty() {
        assert!(SecretString::new("  ").is_empty());
        assert!(!SecretString::new("key").is_empty());
    }
}
