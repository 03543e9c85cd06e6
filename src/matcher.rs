//! Reply text to audio clip matching
//!
//! Picks the pre-recorded clip that best fits an assistant reply and decides
//! whether a reply is target-language text. Phrase lengths are counted in
//! Unicode scalar values, never bytes.

use serde::{Deserialize, Serialize};

use crate::phrases::PhraseAudioMap;

/// Kannada block, U+0C80..=U+0CFF
pub const KANNADA: ScriptRange = ScriptRange {
    start: 0x0C80,
    end: 0x0CFF,
};

/// Inclusive code point range of the target script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRange {
    /// First code point of the block
    pub start: u32,
    /// Last code point of the block
    pub end: u32,
}

impl ScriptRange {
    /// Whether `c` falls inside the range
    #[must_use]
    pub const fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        cp >= self.start && cp <= self.end
    }
}

impl Default for ScriptRange {
    fn default() -> Self {
        KANNADA
    }
}

/// Matching thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Shortest phrase considered for partial (substring) matches
    pub min_partial_len: usize,
    /// Share of script characters above which text counts as target-language
    pub ratio_threshold: f64,
    /// Target script
    pub script: ScriptRange,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_partial_len: 10,
            ratio_threshold: 0.3,
            script: KANNADA,
        }
    }
}

/// How a locator was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Text is exactly a phrase
    Exact,
    /// Text contains a phrase
    Partial,
    /// Nothing matched
    Default,
}

impl MatchKind {
    /// Short name used in logs and CLI output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Partial => "partial",
            Self::Default => "default",
        }
    }
}

/// Result of a clip lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMatch<'a> {
    /// Locator of the chosen clip
    pub locator: &'a str,
    /// Phrase that matched, if any
    pub phrase: Option<&'a str>,
    /// How the clip was chosen
    pub kind: MatchKind,
}

/// Selects pre-recorded clips for reply text
#[derive(Debug, Clone)]
pub struct AudioMatcher {
    phrases: PhraseAudioMap,
    config: MatcherConfig,
}

impl AudioMatcher {
    /// Create a matcher over a phrase table
    #[must_use]
    pub const fn new(phrases: PhraseAudioMap, config: MatcherConfig) -> Self {
        Self { phrases, config }
    }

    /// Underlying phrase table
    #[must_use]
    pub const fn phrases(&self) -> &PhraseAudioMap {
        &self.phrases
    }

    /// Active thresholds
    #[must_use]
    pub const fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Locator of the clip to play for `text`
    ///
    /// Never fails: unmatched text gets the fallback locator.
    #[must_use]
    pub fn select_audio<'a>(&'a self, text: &'a str) -> &'a str {
        self.find(text).locator
    }

    /// Look up the best clip for `text`
    ///
    /// Exact phrase first, then the longest phrase of at least
    /// `min_partial_len` characters contained in `text` (first in table
    /// order on ties), then the fallback.
    #[must_use]
    pub fn find<'a>(&'a self, text: &'a str) -> AudioMatch<'a> {
        if let Some(locator) = self.phrases.get(text) {
            tracing::debug!(text, "exact clip match");
            return AudioMatch {
                locator,
                phrase: Some(text),
                kind: MatchKind::Exact,
            };
        }

        let mut best: Option<(&str, &str, usize)> = None;
        for (phrase, locator) in self.phrases.iter() {
            let len = phrase.chars().count();
            if len < self.config.min_partial_len {
                continue;
            }
            if best.is_some_and(|(_, _, best_len)| len <= best_len) {
                continue;
            }
            if text.contains(phrase) {
                best = Some((phrase, locator, len));
            }
        }

        if let Some((phrase, locator, _)) = best {
            tracing::debug!(phrase, text, "partial clip match");
            return AudioMatch {
                locator,
                phrase: Some(phrase),
                kind: MatchKind::Partial,
            };
        }

        tracing::debug!(text, "no clip match, using default");
        AudioMatch {
            locator: self.phrases.default_locator(),
            phrase: None,
            kind: MatchKind::Default,
        }
    }

    /// Whether `text` counts as target-language text
    ///
    /// True when more than `ratio_threshold` of its characters fall in the
    /// script range, or when it contains a phrase longer than
    /// `min_partial_len` characters. Empty text is never target-language.
    #[must_use]
    pub fn is_target_language_text(&self, text: &str) -> bool {
        script_ratio(text, self.config.script) > self.config.ratio_threshold
            || self.phrases.iter().any(|(phrase, _)| {
                phrase.chars().count() > self.config.min_partial_len && text.contains(phrase)
            })
    }
}

/// Share of characters in `text` that fall inside `script`
///
/// Empty text has a ratio of zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn script_ratio(text: &str, script: ScriptRange) -> f64 {
    let (total, matched) = text.chars().fold((0usize, 0usize), |(total, matched), c| {
        (total + 1, matched + usize::from(script.contains(c)))
    });

    if total == 0 {
        return 0.0;
    }

    matched as f64 / total as f64
}
