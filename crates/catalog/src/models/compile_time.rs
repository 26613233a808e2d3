use serde::{Deserialize, Deserializer};
use std::fmt;

/// Build timestamp of a firmware image.
///
/// The vendor API sends either an integer or a numeric string. The textual
/// form is kept verbatim (it ends up in release tags) and parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompileTime(String);
impl CompileTime {
    /// Seconds since the Unix epoch, if the value is numeric.
    pub fn unix(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<i64> for CompileTime {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}
impl From<&str> for CompileTime {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
impl fmt::Display for CompileTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for CompileTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(match Raw::deserialize(deserializer)? {
            Raw::Signed(n) => n.to_string(),
            Raw::Unsigned(n) => n.to_string(),
            Raw::Text(s) => s,
        }))
    }
}
