use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::TtsError;

/// Speaker profiles accepted by the Qwen-TTS models.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Voice {
    Chelsie,
    Cherry,
    Ethan,
    Serena,
    #[default]
    Dylan,
    Jada,
    Sunny,
}

impl Voice {
    pub const ALL: [Voice; 7] = [
        Voice::Chelsie,
        Voice::Cherry,
        Voice::Ethan,
        Voice::Serena,
        Voice::Dylan,
        Voice::Jada,
        Voice::Sunny,
    ];

    /// Identifier sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Chelsie => "Chelsie",
            Voice::Cherry => "Cherry",
            Voice::Ethan => "Ethan",
            Voice::Serena => "Serena",
            Voice::Dylan => "Dylan",
            Voice::Jada => "Jada",
            Voice::Sunny => "Sunny",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Voice::Chelsie => "Chelsie (female)",
            Voice::Cherry => "Cherry (female)",
            Voice::Ethan => "Ethan (male)",
            Voice::Serena => "Serena (female)",
            Voice::Dylan => "Dylan (Beijing dialect - Male)",
            Voice::Jada => "Jada (Shanghainese - Female)",
            Voice::Sunny => "Sunny (Sichuan dialect - Female)",
        }
    }

    /// (display label, voice) pairs in form order.
    pub fn options() -> Vec<(&'static str, Voice)> {
        Self::ALL.iter().map(|voice| (voice.label(), *voice)).collect()
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = TtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|voice| voice.as_str() == s)
            .copied()
            .ok_or_else(|| TtsError::invalid_input(format!("Unsupported voice: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_voices() {
        for voice in Voice::ALL {
            assert_eq!(voice.as_str().parse::<Voice>().unwrap(), voice);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(matches!(
            "cherry".parse::<Voice>(),
            Err(TtsError::InvalidInput(_))
        ));
        assert!("".parse::<Voice>().is_err());
    }

    #[test]
    fn test_default_is_dylan() {
        assert_eq!(Voice::default(), Voice::Dylan);
    }

    #[test]
    fn test_options_order_and_labels() {
        let options = Voice::options();
        assert_eq!(options.len(), 7);
        assert_eq!(options[0], ("Chelsie (female)", Voice::Chelsie));
        assert_eq!(options[6], ("Sunny (Sichuan dialect - Female)", Voice::Sunny));
    }

    #[test]
    fn test_serde_uses_api_tokens() {
        assert_eq!(serde_json::to_string(&Voice::Jada).unwrap(), "\"Jada\"");
        let voice: Voice = serde_json::from_str("\"Serena\"").unwrap();
        assert_eq!(voice, Voice::Serena);
    }
}
