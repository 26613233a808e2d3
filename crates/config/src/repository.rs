use crate::error::{Error, ErrorKind};
use std::fmt;
use std::str::FromStr;

/// A validated `owner/repo` identifier for the release target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    owner: String,
    name: String,
}
impl Repository {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
impl FromStr for Repository {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || exn::Exn::from(ErrorKind::InvalidRepository(s.to_string()));
        let (owner, name) = trimmed.split_once('/').ok_or_else(invalid)?;
        let valid_segment = |segment: &str| {
            !segment.is_empty() && !segment.contains('/') && !segment.chars().any(char::is_whitespace)
        };
        if !valid_segment(owner) || !valid_segment(name) {
            return Err(invalid());
        }
        Ok(Self { owner: owner.to_string(), name: name.to_string() })
    }
}
impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
