//! JanSamvaad Voice - spoken replies for the JanSamvaad civic assistant
//!
//! This library provides:
//! - Phrase → clip matching for assistant replies, with a fallback clip
//! - Target-language (Kannada) text classification
//! - A playback manager that keeps at most one clip playing at a time
//! - A reply speaker that falls back to speech synthesis for unrecorded replies
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 Chat reply text                      │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │  ReplySpeaker   │  AudioMatcher  │  PhraseAudioMap  │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │  PlaybackManager  →  AudioBackend (assets + cpal)   │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod matcher;
pub mod phrases;
pub mod voice;

pub use config::Config;
pub use error::{Error, Result};
pub use matcher::{AudioMatch, AudioMatcher, MatchKind, MatcherConfig, ScriptRange, script_ratio};
pub use phrases::PhraseAudioMap;
pub use voice::{
    AudioBackend, DeviceBackend, PlaybackManager, ReplySpeaker, SessionHandle, SessionState,
    SpeechSynthesizer, StopSignal,
};
