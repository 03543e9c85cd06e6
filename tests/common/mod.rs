//! Shared test utilities

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jansamvaad_voice::{
    AudioBackend, AudioMatcher, Error, MatcherConfig, PhraseAudioMap, PlaybackManager, Result,
    StopSignal,
};

/// Table from the reference scenario
#[must_use]
pub fn scenario_map() -> PhraseAudioMap {
    PhraseAudioMap::from_flat([
        ("ನಮಸ್ಕಾರ", "A.mp3"),
        ("ಧನ್ಯವಾದಗಳು", "B.mp3"),
        ("default", "D.mp3"),
    ])
    .expect("scenario map is valid")
}

/// Matcher over the scenario table with default thresholds
#[must_use]
pub fn scenario_matcher() -> Arc<AudioMatcher> {
    Arc::new(AudioMatcher::new(scenario_map(), MatcherConfig::default()))
}

/// What the scripted backend does for a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Play to the end straight away
    Complete,
    /// Fail as if the asset were missing
    Missing,
    /// Fail as if the output refused to play
    Rejected,
    /// Keep playing until stopped
    UntilStopped,
}

/// In-memory backend that follows a script instead of touching hardware
pub struct ScriptedBackend {
    default_outcome: Outcome,
    outcomes: HashMap<String, Outcome>,
    played: Mutex<Vec<String>>,
    signals: Mutex<Vec<StopSignal>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    #[must_use]
    pub fn new(default_outcome: Outcome) -> Self {
        Self {
            default_outcome,
            outcomes: HashMap::new(),
            played: Mutex::new(Vec::new()),
            signals: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Override the outcome for one locator (or synthesized label)
    #[must_use]
    pub fn with(mut self, locator: &str, outcome: Outcome) -> Self {
        self.outcomes.insert(locator.to_string(), outcome);
        self
    }

    /// Locators played so far, in order
    pub fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }

    /// Whether the stop signal handed to the `n`th playback has been raised
    pub fn stop_raised(&self, n: usize) -> bool {
        *self.signals.lock().unwrap()[n].borrow()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self, locator: &str, stop: &StopSignal) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.played.lock().unwrap().push(locator.to_string());
        self.signals.lock().unwrap().push(stop.clone());
        self.outcomes
            .get(locator)
            .copied()
            .unwrap_or(self.default_outcome)
    }

    async fn run(outcome: Outcome, locator: String, mut stop: StopSignal) -> Result<()> {
        match outcome {
            Outcome::Complete => {
                tokio::task::yield_now().await;
                Ok(())
            }
            Outcome::Missing => Err(Error::PlaybackLoad(format!("no such clip: {locator}"))),
            Outcome::Rejected => Err(Error::PlaybackRejected("autoplay blocked".to_string())),
            Outcome::UntilStopped => {
                loop {
                    let stopped = *stop.borrow_and_update();
                    if stopped || stop.changed().await.is_err() {
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[async_trait]
impl AudioBackend for ScriptedBackend {
    async fn play(&self, locator: &str, stop: StopSignal) -> Result<()> {
        let outcome = self.record(locator, &stop);
        Self::run(outcome, locator.to_string(), stop).await
    }

    async fn play_bytes(&self, mp3: Arc<Vec<u8>>, stop: StopSignal) -> Result<()> {
        let label = String::from_utf8_lossy(&mp3).into_owned();
        let outcome = self.record(&label, &stop);
        Self::run(outcome, label, stop).await
    }
}

/// Build a manager over the scenario table and a scripted backend
#[must_use]
pub fn scripted_manager(backend: ScriptedBackend) -> (PlaybackManager, Arc<ScriptedBackend>) {
    let backend = Arc::new(backend);
    let manager = PlaybackManager::new(scenario_matcher(), backend.clone());
    (manager, backend)
}

/// Records callback invocations for one playback
#[derive(Clone, Default)]
pub struct Recorder {
    completed: Arc<AtomicUsize>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_complete(&self) -> impl FnOnce() + Send + 'static {
        let completed = Arc::clone(&self.completed);
        move || {
            completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn on_error(&self) -> impl FnOnce(Error) + Send + 'static {
        let errors = Arc::clone(&self.errors);
        move |e| errors.lock().unwrap().push(e.to_string())
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    /// No callback has run
    pub fn silent(&self) -> bool {
        self.completed() == 0 && self.errors().is_empty()
    }
}
