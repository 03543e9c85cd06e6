//! Configuration management for the voice core
//!
//! Settings come from the TOML file overlay, then environment variables,
//! then built-in defaults.

pub mod file;

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;

use crate::matcher::{AudioMatcher, MatcherConfig, ScriptRange};
use crate::phrases::PhraseAudioMap;
use crate::{Error, Result};

pub use file::VoiceConfigFile;

/// Voice core configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Clip asset configuration
    pub audio: AudioConfig,

    /// Matching thresholds
    pub matcher: MatcherConfig,

    /// Speech synthesis fallback
    pub tts: TtsConfig,
}

/// Clip asset configuration
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Directory that rooted locators resolve against
    pub asset_root: PathBuf,

    /// Phrase table file; `None` uses the built-in table
    pub phrases: Option<PathBuf>,

    /// How long loaded clips stay cached
    pub cache_ttl: Duration,

    /// Maximum number of cached clips
    pub cache_capacity: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("."),
            phrases: None,
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 64,
        }
    }
}

/// Speech synthesis configuration
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,

    /// TTS model
    pub model: String,

    /// Voice identifier
    pub voice: String,

    /// Speed multiplier (0.25 to 4.0)
    pub speed: f32,

    /// API key; synthesis is disabled without one
    pub api_key: Option<SecretString>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            speed: 1.0,
            api_key: None,
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// With `path`, that file must exist and parse. Without it, the standard
    /// config file is used if present.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit config file cannot be loaded or a value is
    /// out of range
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => VoiceConfigFile::read(path)?,
            None => file::load_config_file(),
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Build configuration from a parsed file and an environment lookup
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a value is out of range
    pub fn from_sources(
        file: VoiceConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let audio_defaults = AudioConfig::default();
        let audio = AudioConfig {
            asset_root: env("JANSAMVAAD_ASSET_ROOT")
                .or(file.audio.asset_root)
                .map_or(audio_defaults.asset_root, PathBuf::from),
            phrases: env("JANSAMVAAD_PHRASES")
                .or(file.audio.phrases)
                .map(PathBuf::from),
            cache_ttl: file
                .audio
                .cache_ttl_secs
                .map_or(audio_defaults.cache_ttl, Duration::from_secs),
            cache_capacity: file
                .audio
                .cache_capacity
                .unwrap_or(audio_defaults.cache_capacity),
        };

        let matcher_defaults = MatcherConfig::default();
        let matcher = MatcherConfig {
            min_partial_len: file
                .matcher
                .min_partial_len
                .unwrap_or(matcher_defaults.min_partial_len),
            ratio_threshold: file
                .matcher
                .ratio_threshold
                .unwrap_or(matcher_defaults.ratio_threshold),
            script: ScriptRange {
                start: file
                    .matcher
                    .script_start
                    .unwrap_or(matcher_defaults.script.start),
                end: file
                    .matcher
                    .script_end
                    .unwrap_or(matcher_defaults.script.end),
            },
        };

        if !(0.0..=1.0).contains(&matcher.ratio_threshold) {
            return Err(Error::Config(format!(
                "matcher.ratio_threshold must be between 0 and 1, got {}",
                matcher.ratio_threshold
            )));
        }
        if matcher.script.start > matcher.script.end {
            return Err(Error::Config(format!(
                "matcher script range is empty: {:#X}..={:#X}",
                matcher.script.start, matcher.script.end
            )));
        }

        let tts_defaults = TtsConfig::default();
        let tts = TtsConfig {
            base_url: env("JANSAMVAAD_TTS_URL")
                .or(file.tts.base_url)
                .unwrap_or(tts_defaults.base_url),
            model: env("JANSAMVAAD_TTS_MODEL")
                .or(file.tts.model)
                .unwrap_or(tts_defaults.model),
            voice: env("JANSAMVAAD_TTS_VOICE")
                .or(file.tts.voice)
                .unwrap_or(tts_defaults.voice),
            speed: file.tts.speed.unwrap_or(tts_defaults.speed),
            api_key: env("OPENAI_API_KEY")
                .or(file.tts.api_key)
                .filter(|key| !key.is_empty())
                .map(SecretString::from),
        };

        if !(0.25..=4.0).contains(&tts.speed) {
            return Err(Error::Config(format!(
                "tts.speed must be between 0.25 and 4.0, got {}",
                tts.speed
            )));
        }

        Ok(Self {
            audio,
            matcher,
            tts,
        })
    }

    /// Load the configured phrase table
    ///
    /// # Errors
    ///
    /// Returns error if a phrase file is configured but cannot be loaded
    pub fn phrase_map(&self) -> Result<PhraseAudioMap> {
        self.audio
            .phrases
            .as_deref()
            .map_or_else(|| Ok(PhraseAudioMap::builtin()), PhraseAudioMap::load)
    }

    /// Build the clip matcher for this configuration
    ///
    /// # Errors
    ///
    /// Returns error if the phrase table cannot be loaded
    pub fn matcher(&self) -> Result<AudioMatcher> {
        Ok(AudioMatcher::new(self.phrase_map()?, self.matcher))
    }
}
