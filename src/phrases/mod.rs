//! Phrase to audio clip lookup table
//!
//! A `PhraseAudioMap` pairs exact reply phrases with the locator of a
//! pre-recorded clip. The reserved `default` entry is stored apart from the
//! phrases and is always present. The table is read-only once built.

mod builtin;

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result};

/// Reserved key holding the fallback locator
pub const DEFAULT_KEY: &str = "default";

/// Immutable phrase → asset locator table
///
/// Iteration follows declaration order, which is also the tie break for
/// equally long partial matches.
#[derive(Debug, Clone)]
pub struct PhraseAudioMap {
    phrases: IndexMap<String, String>,
    default_locator: String,
}

/// On-disk phrase table schema
///
/// ```toml
/// default = "/static/audio/kannada_sample.mp3"
///
/// [[phrase]]
/// text = "ನಮಸ್ಕಾರ"
/// audio = "/static/audio/namaskara.mp3"
/// ```
#[derive(Debug, Deserialize)]
struct PhraseFile {
    default: Option<String>,
    #[serde(default, rename = "phrase")]
    phrases: Vec<PhraseEntry>,
}

#[derive(Debug, Deserialize)]
struct PhraseEntry {
    text: String,
    audio: String,
}

impl PhraseAudioMap {
    /// Build a table from `(phrase, locator)` pairs plus the fallback locator
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a phrase is empty, repeated, or uses the
    /// reserved `default` key, or if any locator is empty
    pub fn new<I, K, V>(entries: I, default_locator: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let default_locator = default_locator.into();
        if default_locator.is_empty() {
            return Err(Error::Config("default locator must not be empty".to_string()));
        }

        let mut phrases = IndexMap::new();
        for (phrase, locator) in entries {
            let phrase = phrase.into();
            let locator = locator.into();

            if phrase.is_empty() {
                return Err(Error::Config("phrase must not be empty".to_string()));
            }
            if phrase == DEFAULT_KEY {
                return Err(Error::Config(format!(
                    "\"{DEFAULT_KEY}\" is reserved for the fallback locator"
                )));
            }
            if locator.is_empty() {
                return Err(Error::Config(format!("empty locator for phrase \"{phrase}\"")));
            }
            if phrases.contains_key(&phrase) {
                return Err(Error::Config(format!("duplicate phrase \"{phrase}\"")));
            }

            phrases.insert(phrase, locator);
        }

        Ok(Self {
            phrases,
            default_locator,
        })
    }

    /// Build a table from a flat map that carries `default` as an ordinary key
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the `default` key is missing or any entry is
    /// invalid
    pub fn from_flat<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut default_locator = None;
        let mut phrases = Vec::new();

        for (key, locator) in entries {
            let key = key.into();
            if key == DEFAULT_KEY {
                if default_locator.is_some() {
                    return Err(Error::Config(format!(
                        "duplicate \"{DEFAULT_KEY}\" entry in phrase table"
                    )));
                }
                default_locator = Some(locator.into());
            } else {
                phrases.push((key, locator.into()));
            }
        }

        let default_locator = default_locator
            .ok_or_else(|| Error::Config(format!("phrase table has no \"{DEFAULT_KEY}\" entry")))?;

        Self::new(phrases, default_locator)
    }

    /// Parse a phrase table from TOML
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed or the table is invalid
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: PhraseFile = toml::from_str(content)?;

        let default_locator = file
            .default
            .ok_or_else(|| Error::Config(format!("phrase table has no \"{DEFAULT_KEY}\" entry")))?;

        Self::new(
            file.phrases.into_iter().map(|entry| (entry.text, entry.audio)),
            default_locator,
        )
    }

    /// Load a phrase table from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read phrase table {}: {e}", path.display()))
        })?;

        let map = Self::from_toml_str(&content)?;

        tracing::info!(
            path = %path.display(),
            phrases = map.len(),
            "loaded phrase table"
        );

        Ok(map)
    }

    /// The built-in Kannada reply table
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            phrases: builtin::PHRASES
                .iter()
                .map(|(phrase, locator)| ((*phrase).to_string(), (*locator).to_string()))
                .collect(),
            default_locator: builtin::DEFAULT_LOCATOR.to_string(),
        }
    }

    /// Locator for an exact phrase
    ///
    /// The reserved `default` key resolves to the fallback locator.
    #[must_use]
    pub fn get(&self, phrase: &str) -> Option<&str> {
        if phrase == DEFAULT_KEY {
            return Some(&self.default_locator);
        }
        self.phrases.get(phrase).map(String::as_str)
    }

    /// Fallback locator
    #[must_use]
    pub fn default_locator(&self) -> &str {
        &self.default_locator
    }

    /// Phrases and their locators in declaration order (without `default`)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.phrases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of phrases, not counting `default`
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether the table holds only the fallback entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl Default for PhraseAudioMap {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_map_requires_default() {
        let err = PhraseAudioMap::from_flat([("ನಮಸ್ಕಾರ", "A.mp3")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let map = PhraseAudioMap::from_flat([("ನಮಸ್ಕಾರ", "A.mp3"), ("default", "D.mp3")]).unwrap();
        assert_eq!(map.default_locator(), "D.mp3");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_flat_map_rejects_repeated_default() {
        let err = PhraseAudioMap::from_flat([
            ("default", "D.mp3"),
            ("ನಮಸ್ಕಾರ", "A.mp3"),
            ("default", "E.mp3"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_phrases() {
        assert!(PhraseAudioMap::new([("", "A.mp3")], "D.mp3").is_err());
        assert!(PhraseAudioMap::new([("x", "A.mp3"), ("x", "B.mp3")], "D.mp3").is_err());
        assert!(PhraseAudioMap::new([("x", "")], "D.mp3").is_err());
        assert!(PhraseAudioMap::new([("default", "A.mp3")], "D.mp3").is_err());
        assert!(PhraseAudioMap::new(Vec::<(String, String)>::new(), "").is_err());
    }

    #[test]
    fn test_default_key_lookup() {
        let map = PhraseAudioMap::new([("ಸ್ವಾಗತ", "W.mp3")], "D.mp3").unwrap();
        assert_eq!(map.get("default"), Some("D.mp3"));
        assert_eq!(map.get("ಸ್ವಾಗತ"), Some("W.mp3"));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn test_iteration_keeps_declaration_order() {
        let map = PhraseAudioMap::new([("c", "3"), ("a", "1"), ("b", "2")], "D.mp3").unwrap();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
default = "/static/audio/fallback.mp3"

[[phrase]]
text = "ನಮಸ್ಕಾರ"
audio = "/static/audio/hello.mp3"

[[phrase]]
text = "ಧನ್ಯವಾದಗಳು"
audio = "/static/audio/thanks.mp3"
"#;
        let map = PhraseAudioMap::from_toml_str(toml).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("ಧನ್ಯವಾದಗಳು"), Some("/static/audio/thanks.mp3"));
        assert_eq!(map.default_locator(), "/static/audio/fallback.mp3");
    }

    #[test]
    fn test_from_toml_without_default() {
        let toml = r#"
[[phrase]]
text = "ನಮಸ್ಕಾರ"
audio = "/static/audio/hello.mp3"
"#;
        assert!(matches!(
            PhraseAudioMap::from_toml_str(toml),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let map = PhraseAudioMap::builtin();
        assert!(!map.is_empty());
        assert!(!map.default_locator().is_empty());

        // Same invariants as a table built through the validating constructor
        let rebuilt = PhraseAudioMap::new(map.iter(), map.default_locator()).unwrap();
        assert_eq!(rebuilt.len(), map.len());
    }
}
