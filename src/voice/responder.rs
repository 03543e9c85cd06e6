//! Speaking assistant replies
//!
//! Target-language replies get a recorded clip; everything else goes through
//! speech synthesis when a synthesizer is available.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::session::{PlaybackManager, SessionHandle};
use super::tts::SpeechSynthesizer;
use crate::Result;

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("valid regex"));

/// Remove HTML tags from a reply and trim surrounding whitespace
#[must_use]
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").trim().to_string()
}

/// Speaks chat replies through a playback manager
pub struct ReplySpeaker {
    manager: PlaybackManager,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
}

impl ReplySpeaker {
    /// Create a speaker; without a synthesizer only recorded clips are used
    #[must_use]
    pub fn new(manager: PlaybackManager, synthesizer: Option<Arc<dyn SpeechSynthesizer>>) -> Self {
        Self {
            manager,
            synthesizer,
        }
    }

    /// Underlying playback manager
    #[must_use]
    pub const fn manager(&self) -> &PlaybackManager {
        &self.manager
    }

    /// Mutable access to the playback manager (e.g. to stop playback)
    pub const fn manager_mut(&mut self) -> &mut PlaybackManager {
        &mut self.manager
    }

    /// Speak a reply
    ///
    /// Returns `None` when there is nothing to say or no way to say it.
    ///
    /// # Errors
    ///
    /// Returns error if speech synthesis fails; playback errors are reported
    /// through the session, not here
    pub async fn speak_reply(&mut self, text: &str) -> Result<Option<SessionHandle>> {
        let plain = strip_markup(text);
        if plain.is_empty() {
            return Ok(None);
        }

        if self.manager.matcher().is_target_language_text(&plain) {
            let handle = self.manager.play_audio(
                &plain,
                || tracing::debug!("reply clip finished"),
                |e| tracing::warn!(error = %e, "reply clip failed"),
            );
            return Ok(Some(handle));
        }

        let Some(synthesizer) = self.synthesizer.clone() else {
            tracing::debug!("no synthesizer configured, reply not spoken");
            return Ok(None);
        };

        // Silence the previous reply while the new one is synthesized
        self.manager.stop_audio();

        let mp3 = synthesizer.synthesize(&plain).await?;
        let handle = self.manager.play_bytes(
            mp3,
            "tts",
            || tracing::debug!("synthesized reply finished"),
            |e| tracing::warn!(error = %e, "synthesized reply failed"),
        );

        Ok(Some(handle))
    }

    /// Stop whatever is being spoken
    pub fn stop(&mut self) {
        self.manager.stop_audio();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<b>ನಮಸ್ಕಾರ</b>"), "ನಮಸ್ಕಾರ");
        assert_eq!(strip_markup("  <p>Hello <i>there</i></p>\n"), "Hello there");
        assert_eq!(strip_markup("plain"), "plain");
        assert_eq!(strip_markup("<br>"), "");
        // Unterminated tag at the end is dropped too
        assert_eq!(strip_markup("text <span"), "text");
    }
}
