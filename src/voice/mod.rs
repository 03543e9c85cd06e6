//! Voice output
//!
//! Clip loading and decoding, device playback, the single-session playback
//! manager, and the reply speaker that chooses between recorded clips and
//! synthesized speech.

mod assets;
mod backend;
mod playback;
mod responder;
mod session;
mod tts;

pub use assets::{AssetLoader, AssetSource};
pub use backend::{AudioBackend, DeviceBackend};
pub use playback::{AudioPlayback, DecodedClip, decode_mp3, resample};
pub use responder::{ReplySpeaker, strip_markup};
pub use session::{PlaybackManager, SessionHandle, SessionState};
pub use tts::{SpeechSynthesizer, TextToSpeech};

/// Stop request observed by a playing clip; `true` means stop
pub type StopSignal = tokio::sync::watch::Receiver<bool>;

/// A stop signal that is never raised
#[must_use]
pub fn never_stop() -> StopSignal {
    let (tx, rx) = tokio::sync::watch::channel(false);
    // `borrow()` keeps returning `false` once the sender is gone
    drop(tx);
    rx
}
