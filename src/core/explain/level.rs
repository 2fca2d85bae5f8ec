use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target comprehension level of an explanation.
///
/// On the wire a level is its numeric code (`"1"`, `"2"`, `"3"`), which is
/// what the web and terminal front ends send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Explain like I'm five
    #[serde(rename = "1")]
    Child,
    /// Teenager, 13-17
    #[serde(rename = "2")]
    Teen,
    /// Working professional, no jargon
    #[serde(rename = "3")]
    Professional,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Child, Level::Teen, Level::Professional];

    /// Numeric wire code
    pub fn code(&self) -> &'static str {
        match self {
            Level::Child => "1",
            Level::Teen => "2",
            Level::Professional => "3",
        }
    }

    /// Human-readable audience label
    pub fn label(&self) -> &'static str {
        match self {
            Level::Child => "5-year-old",
            Level::Teen => "teenager",
            Level::Professional => "professional",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid level '{0}'. Must be: 1 (5-year-old), 2 (teenager), or 3 (professional)")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "child" | "kid" => Ok(Level::Child),
            "2" | "teen" | "teenager" => Ok(Level::Teen),
            "3" | "professional" | "adult" => Ok(Level::Professional),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
