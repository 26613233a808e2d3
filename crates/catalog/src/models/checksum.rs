use serde::Deserialize;
use std::fmt;

/// SHA-256 hex digest of a firmware artifact.
///
/// Normalized to lowercase on construction, so equality is case-insensitive
/// with respect to whatever the vendor API (or an old history file) sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub struct Checksum(String);
impl Checksum {
    pub fn new(hex: impl AsRef<str>) -> Self {
        Self(hex.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for Checksum {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
impl From<&str> for Checksum {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
impl AsRef<str> for Checksum {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(Checksum::new("ABCDEF0123"), Checksum::new("abcdef0123"));
        assert_eq!(Checksum::new(" AbC \n").as_str(), "abc");
    }

    #[test]
    fn test_deserialize() {
        let checksum: Checksum = serde_json::from_str(r#""DEADBEEF""#).unwrap();
        assert_eq!(checksum.to_string(), "deadbeef");
    }
}
