//! Path tier (medallion) classification.

use serde::{Deserialize, Serialize};

use crate::errors::ClassifyError;

/// Storage-quality tier of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Medallion {
    /// Raw intake tier; writes always allowed.
    Bronze,
    /// Validated tier; writes gated on external approval.
    Silver,
    /// Released tier; writes gated on external approval.
    Gold,
    /// Outside both storage roots.
    Root,
}

impl Medallion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "BRONZE",
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Root => "ROOT",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "bronze" => Some(Self::Bronze),
            "silver" => Some(Self::Silver),
            "gold" => Some(Self::Gold),
            _ => None,
        }
    }
}

impl std::fmt::Display for Medallion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary storage axis, orthogonal to the medallion. Absent for ROOT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Temperature {
    Hot,
    Cold,
}

impl Temperature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "HOT",
            Self::Cold => "COLD",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "hot" => Some(Self::Hot),
            "cold" => Some(Self::Cold),
            _ => None,
        }
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a path: medallion crossed with temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathClass {
    pub medallion: Medallion,
    pub temperature: Option<Temperature>,
}

/// Classify a path against the two storage roots.
///
/// Separators are normalized and leading separators stripped before
/// matching, so `\hot\bronze\x.ts` and `hot/bronze/x.ts` classify
/// identically. Anything outside `hot/` and `cold/` is ROOT with no
/// temperature. An empty path is an input-contract violation.
pub fn classify_path(path: &str) -> Result<PathClass, ClassifyError> {
    let normalized = path.replace('\\', "/");
    let trimmed = normalized.trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(ClassifyError::EmptyPath);
    }

    let mut segments = trimmed.split('/');
    let first = segments.next().unwrap_or_default();

    if let Some(temperature) = Temperature::from_segment(first) {
        if let Some(medallion) = segments.next().and_then(Medallion::from_segment) {
            return Ok(PathClass {
                medallion,
                temperature: Some(temperature),
            });
        }
    }

    Ok(PathClass {
        medallion: Medallion::Root,
        temperature: None,
    })
}
