//! Credential strings that are wiped on drop
//!
//! Passwords, id tokens and refresh tokens travel through the session layer
//! in `SecretString`, which zeroes its buffer when dropped and never prints
//! its contents.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string that zeros its contents on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Get the string contents
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Deref for SecretString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretString")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_are_accessible() {
        let s = SecretString::new("hunter22");
        assert_eq!(s.expose(), "hunter22");
        assert_eq!(s.len(), 8);
        assert!(s.starts_with("hunter"));
    }

    #[test]
    fn test_debug_and_display_redact() {
        let s = SecretString::new("secret-token");
        let debug = format!("{:?}", s);
        let display = format!("{}", s);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("SecretString"));
        assert!(display.contains("REDACTED"));
    }

    #[test]
    fn test_zeroize_clears() {
        let mut s = SecretString::new("abc");
        s.zeroize();
        assert!(s.is_empty());
    }

    #[test]
    fn test_serde_keeps_value() {
        let s = SecretString::new("tok");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"tok\"");
        let back: SecretString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
