//! TOML configuration file loading
//!
//! Supports `~/.config/jansamvaad/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct VoiceConfigFile {
    /// Clip assets and phrase table
    #[serde(default)]
    pub audio: AudioFileConfig,

    /// Matching thresholds
    #[serde(default)]
    pub matcher: MatcherFileConfig,

    /// Speech synthesis fallback
    #[serde(default)]
    pub tts: TtsFileConfig,
}

/// Clip asset configuration
#[derive(Debug, Default, Deserialize)]
pub struct AudioFileConfig {
    /// Directory that rooted locators resolve against
    pub asset_root: Option<String>,

    /// Phrase table TOML file (built-in table when unset)
    pub phrases: Option<String>,

    /// How long loaded clips stay cached
    pub cache_ttl_secs: Option<u64>,

    /// Maximum number of cached clips
    pub cache_capacity: Option<u64>,
}

/// Matching thresholds
#[derive(Debug, Default, Deserialize)]
pub struct MatcherFileConfig {
    /// Shortest phrase (in characters) used for partial matches
    pub min_partial_len: Option<usize>,

    /// Script character share above which text is target-language
    pub ratio_threshold: Option<f64>,

    /// First code point of the target script
    pub script_start: Option<u32>,

    /// Last code point of the target script
    pub script_end: Option<u32>,
}

/// Speech synthesis configuration
#[derive(Debug, Default, Deserialize)]
pub struct TtsFileConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub model: Option<String>,

    /// Voice identifier (e.g. "alloy")
    pub voice: Option<String>,

    /// Speed multiplier
    pub speed: Option<f32>,

    /// API key
    pub api_key: Option<String>,
}

impl VoiceConfigFile {
    /// Parse a config file from TOML
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a config file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config {}: {e}", path.display()))
        })?;
        let file = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "loaded config file");
        Ok(file)
    }
}

/// Load the TOML config file from the standard path
///
/// Returns `VoiceConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> VoiceConfigFile {
    let Some(path) = config_file_path() else {
        return VoiceConfigFile::default();
    };

    if !path.exists() {
        return VoiceConfigFile::default();
    }

    match VoiceConfigFile::read(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to load config file, using defaults"
            );
            VoiceConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/jansamvaad/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("jansamvaad").join("config.toml"))
}
