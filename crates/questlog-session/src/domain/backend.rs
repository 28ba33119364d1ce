//! Which narration service a session talks to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Narration backend chosen when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationBackend {
    /// Google Gemini.
    #[default]
    Gemini,
    /// Zhipu GLM.
    Glm,
}

impl NarrationBackend {
    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Glm => "glm",
        }
    }

    /// Parses a wire name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "glm" => Some(Self::Glm),
            _ => None,
        }
    }
}

impl fmt::Display for NarrationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_value(NarrationBackend::Glm).unwrap(), "glm");
        assert_eq!(NarrationBackend::from_name("GEMINI"), Some(NarrationBackend::Gemini));
        assert_eq!(NarrationBackend::from_name("claude"), None);
    }

    #[test]
    fn test_defaults_to_gemini() {
        assert_eq!(NarrationBackend::default(), NarrationBackend::Gemini);
    }
}
