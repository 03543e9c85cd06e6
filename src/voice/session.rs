//! Single-session playback management
//!
//! A `PlaybackManager` owns at most one playing clip. Starting a new clip
//! always terminates the previous one first, so two replies never talk over
//! each other.

use std::sync::Arc;

use tokio::sync::watch;

use super::StopSignal;
use super::backend::AudioBackend;
use crate::matcher::AudioMatcher;
use crate::{Error, Result};

/// Lifecycle of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Clip is loading or playing
    Playing,
    /// Clip played to the end
    Completed,
    /// Clip failed to load or play
    Errored,
    /// Terminated by `stop_audio` or a newer session
    Stopped,
}

impl SessionState {
    /// Whether the session has left `Playing`
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// What a session plays
enum Source {
    Locator(String),
    Bytes(Arc<Vec<u8>>),
}

/// Caller-side view of a session
///
/// Only observes; termination goes through `PlaybackManager::stop_audio`.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: u64,
    locator: String,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    /// Session identifier, unique per manager
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Locator (or label) of the clip being played
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Wait until the session leaves `Playing` and return the final state
    pub async fn wait(&self) -> SessionState {
        let mut state = self.state.clone();
        match state.wait_for(|s| s.is_finished()).await {
            Ok(final_state) => *final_state,
            // Sender gone without a final state: the manager was torn down
            Err(_) => SessionState::Stopped,
        }
    }
}

/// The active session as owned by the manager
struct PlaybackSession {
    id: u64,
    locator: String,
    state: Arc<watch::Sender<SessionState>>,
    stop: watch::Sender<bool>,
}

impl PlaybackSession {
    fn is_playing(&self) -> bool {
        !self.state.borrow().is_finished()
    }

    /// Stop playback and mark the session `Stopped` if it was still playing
    fn terminate(self) {
        let stopped = self.state.send_if_modified(|state| {
            if state.is_finished() {
                false
            } else {
                *state = SessionState::Stopped;
                true
            }
        });

        // Receiver may already be gone if the task finished
        let _ = self.stop.send(true);

        if stopped {
            tracing::debug!(session = self.id, locator = %self.locator, "playback stopped");
        }
    }
}

/// Owns the single active playback session
pub struct PlaybackManager {
    matcher: Arc<AudioMatcher>,
    backend: Arc<dyn AudioBackend>,
    active: Option<PlaybackSession>,
    next_id: u64,
}

impl PlaybackManager {
    /// Create a manager that matches reply text with `matcher` and plays
    /// through `backend`
    #[must_use]
    pub fn new(matcher: Arc<AudioMatcher>, backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            matcher,
            backend,
            active: None,
            next_id: 1,
        }
    }

    /// Matcher used to pick clips
    #[must_use]
    pub fn matcher(&self) -> &AudioMatcher {
        &self.matcher
    }

    /// Play the clip matched to `text`
    ///
    /// Any active session is terminated before the new one starts.
    /// `on_complete` runs when the clip plays to the end, `on_error` when it
    /// fails to load or play; a stopped session runs neither.
    ///
    /// Must be called from within a tokio runtime.
    pub fn play_audio<C, E>(&mut self, text: &str, on_complete: C, on_error: E) -> SessionHandle
    where
        C: FnOnce() + Send + 'static,
        E: FnOnce(Error) + Send + 'static,
    {
        self.stop_audio();

        let found = self.matcher.find(text);
        tracing::info!(
            kind = found.kind.as_str(),
            locator = found.locator,
            "playing reply clip"
        );

        let locator = found.locator.to_string();
        self.start(Source::Locator(locator.clone()), locator, on_complete, on_error)
    }

    /// Play a specific locator, bypassing phrase matching
    pub fn play_locator<C, E>(
        &mut self,
        locator: &str,
        on_complete: C,
        on_error: E,
    ) -> SessionHandle
    where
        C: FnOnce() + Send + 'static,
        E: FnOnce(Error) + Send + 'static,
    {
        self.stop_audio();
        self.start(
            Source::Locator(locator.to_string()),
            locator.to_string(),
            on_complete,
            on_error,
        )
    }

    /// Play in-memory MP3 bytes under a descriptive label
    pub fn play_bytes<C, E>(
        &mut self,
        mp3: Vec<u8>,
        label: &str,
        on_complete: C,
        on_error: E,
    ) -> SessionHandle
    where
        C: FnOnce() + Send + 'static,
        E: FnOnce(Error) + Send + 'static,
    {
        self.stop_audio();
        self.start(
            Source::Bytes(Arc::new(mp3)),
            label.to_string(),
            on_complete,
            on_error,
        )
    }

    /// Stop the active session, if any
    ///
    /// No-op when nothing is playing; safe to call repeatedly.
    pub fn stop_audio(&mut self) {
        if let Some(session) = self.active.take() {
            session.terminate();
        }
    }

    /// Whether a session is currently playing
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.active.as_ref().is_some_and(PlaybackSession::is_playing)
    }

    /// Handle to the currently playing session
    #[must_use]
    pub fn active(&self) -> Option<SessionHandle> {
        self.active
            .as_ref()
            .filter(|session| session.is_playing())
            .map(|session| SessionHandle {
                id: session.id,
                locator: session.locator.clone(),
                state: session.state.subscribe(),
            })
    }

    /// Play the clip matched to `text` and wait for it to finish
    ///
    /// # Errors
    ///
    /// Returns the playback error if the clip failed, or `Error::Audio` if the
    /// session was stopped before finishing
    pub async fn play_to_end(&mut self, text: &str) -> Result<()> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let err_tx = Arc::new(std::sync::Mutex::new(Some(tx)));
        let ok_tx = Arc::clone(&err_tx);

        let handle = self.play_audio(
            text,
            move || {
                if let Some(tx) = ok_tx.lock().ok().and_then(|mut slot| slot.take()) {
                    let _ = tx.send(Ok(()));
                }
            },
            move |e| {
                if let Some(tx) = err_tx.lock().ok().and_then(|mut slot| slot.take()) {
                    let _ = tx.send(Err(e));
                }
            },
        );

        match handle.wait().await {
            SessionState::Stopped => Err(Error::Audio("playback stopped".to_string())),
            _ => rx
                .await
                .unwrap_or_else(|_| Err(Error::Audio("playback ended without outcome".to_string()))),
        }
    }

    fn start<C, E>(
        &mut self,
        source: Source,
        locator: String,
        on_complete: C,
        on_error: E,
    ) -> SessionHandle
    where
        C: FnOnce() + Send + 'static,
        E: FnOnce(Error) + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        let (state_tx, state_rx) = watch::channel(SessionState::Playing);
        let state_tx = Arc::new(state_tx);
        let (stop_tx, stop_rx) = watch::channel(false);

        let backend = Arc::clone(&self.backend);
        let task_state = Arc::clone(&state_tx);
        let task_locator = locator.clone();

        tokio::spawn(async move {
            let playback = async {
                match &source {
                    Source::Locator(locator) => backend.play(locator, stop_rx.clone()).await,
                    Source::Bytes(bytes) => {
                        backend.play_bytes(Arc::clone(bytes), stop_rx.clone()).await
                    }
                }
            };

            let result = tokio::select! {
                result = playback => Some(result),
                () = stop_requested(stop_rx.clone()) => None,
            };

            let Some(result) = result else {
                return;
            };

            let outcome = if result.is_ok() {
                SessionState::Completed
            } else {
                SessionState::Errored
            };

            let won = task_state.send_if_modified(|state| {
                if state.is_finished() {
                    false
                } else {
                    *state = outcome;
                    true
                }
            });

            // Stopped in the meantime: the stop wins and no callback runs
            if !won {
                return;
            }

            match result {
                Ok(()) => {
                    tracing::debug!(session = id, locator = %task_locator, "playback complete");
                    on_complete();
                }
                Err(e) => {
                    tracing::warn!(
                        session = id,
                        locator = %task_locator,
                        error = %e,
                        "playback failed"
                    );
                    on_error(e);
                }
            }
        });

        self.active = Some(PlaybackSession {
            id,
            locator: locator.clone(),
            state: state_tx,
            stop: stop_tx,
        });

        SessionHandle {
            id,
            locator,
            state: state_rx,
        }
    }
}

impl Drop for PlaybackManager {
    fn drop(&mut self) {
        self.stop_audio();
    }
}

/// Resolve once a stop has been requested or the requester has gone away
async fn stop_requested(mut stop: StopSignal) {
    loop {
        let stopped = *stop.borrow_and_update();
        if stopped {
            return;
        }
        if stop.changed().await.is_err() {
            return;
        }
    }
}
