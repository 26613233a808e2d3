use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Firmware release channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Stage {
    /// Stable, production firmware.
    Release,
    Testing,
    Snapshot,
    /// Any channel the vendor introduces later; kept uppercased.
    Other(String),
}
impl Stage {
    pub fn is_release(&self) -> bool {
        matches!(self, Self::Release)
    }

    /// Canonical uppercase name (`RELEASE`, `TESTING`, ...).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Release => "RELEASE",
            Self::Testing => "TESTING",
            Self::Snapshot => "SNAPSHOT",
            Self::Other(other) => other,
        }
    }

    /// `Release`, `Testing`, `Snapshot`, for titles.
    pub fn title_case(&self) -> String {
        let lower = self.as_str().to_lowercase();
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
impl FromStr for Stage {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Ok(match upper.as_str() {
            "RELEASE" => Self::Release,
            "TESTING" => Self::Testing,
            "SNAPSHOT" => Self::Snapshot,
            _ => Self::Other(upper),
        })
    }
}
impl From<String> for Stage {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(stage) => stage,
            Err(infallible) => match infallible {},
        }
    }
}
impl From<&str> for Stage {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}
impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
