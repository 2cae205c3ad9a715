//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// How extracted segments are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Stream copy. Fast and lossless, but segment boundaries snap to
    /// the nearest preceding keyframe.
    #[default]
    Copy,
    /// Full decode/encode. Frame-accurate but slower.
    Reencode,
}

impl EncodingMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Reencode => "reencode",
        }
    }

    /// Get all available modes.
    pub fn all() -> &'static [EncodingMode] {
        &[Self::Copy, Self::Reencode]
    }

    /// Create from index (for UI combo boxes).
    pub fn from_index(index: usize) -> Self {
        Self::all().get(index).copied().unwrap_or_default()
    }

    /// Get index of this mode (for UI combo boxes).
    pub fn to_index(&self) -> usize {
        Self::all().iter().position(|m| m == self).unwrap_or(0)
    }
}

impl std::fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for EncodingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copy" => Ok(Self::Copy),
            "reencode" => Ok(Self::Reencode),
            other => Err(format!(
                "unknown encoding mode '{}' (expected 'copy' or 'reencode')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_serializes_lowercase() {
        let json = serde_json::to_string(&EncodingMode::Reencode).unwrap();
        assert_eq!(json, "\"reencode\"");
    }

    #[test]
    fn mode_deserializes_lowercase() {
        let mode: EncodingMode = serde_json::from_str("\"copy\"").unwrap();
        assert_eq!(mode, EncodingMode::Copy);
    }

    #[test]
    fn mode_parses_from_str() {
        assert_eq!("copy".parse::<EncodingMode>().unwrap(), EncodingMode::Copy);
        assert!("fast".parse::<EncodingMode>().is_err());
    }

    #[test]
    fn mode_index_round_trips() {
        for mode in EncodingMode::all() {
            assert_eq!(EncodingMode::from_index(mode.to_index()), *mode);
        }
    }
}
