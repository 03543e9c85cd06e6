//! Playback backends

use std::sync::Arc;

use async_trait::async_trait;

use super::StopSignal;
use super::assets::AssetLoader;
use super::playback::{AudioPlayback, DecodedClip, decode_mp3};
use crate::{Error, Result};

/// Plays clips for a playback session
///
/// Implementations return once the clip has finished or `stop` has been
/// raised. Errors should be `Error::PlaybackLoad` when the clip could not be
/// obtained or decoded and `Error::PlaybackRejected` when the output refused
/// to play it.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Play the clip behind an asset locator
    async fn play(&self, locator: &str, stop: StopSignal) -> Result<()>;

    /// Play already-loaded MP3 bytes (e.g. synthesized speech)
    async fn play_bytes(&self, mp3: Arc<Vec<u8>>, stop: StopSignal) -> Result<()>;
}

/// Backend that loads clips through an `AssetLoader` and plays them on the
/// default output device
pub struct DeviceBackend {
    loader: AssetLoader,
}

impl DeviceBackend {
    /// Create a backend over an asset loader
    #[must_use]
    pub const fn new(loader: AssetLoader) -> Self {
        Self { loader }
    }

    /// Asset loader used for locators
    #[must_use]
    pub const fn loader(&self) -> &AssetLoader {
        &self.loader
    }

    async fn play_clip(clip: DecodedClip, stop: StopSignal) -> Result<()> {
        tracing::debug!(
            samples = clip.samples.len(),
            sample_rate = clip.sample_rate,
            duration_ms = clip.duration().as_millis(),
            "starting clip"
        );

        tokio::task::spawn_blocking(move || {
            let playback = AudioPlayback::new()?;
            playback.play_blocking(&clip, &stop)
        })
        .await
        .map_err(|e| Error::Audio(format!("playback task failed: {e}")))?
    }
}

#[async_trait]
impl AudioBackend for DeviceBackend {
    async fn play(&self, locator: &str, stop: StopSignal) -> Result<()> {
        let bytes = self.loader.load(locator).await?;
        self.play_bytes(bytes, stop).await
    }

    async fn play_bytes(&self, mp3: Arc<Vec<u8>>, stop: StopSignal) -> Result<()> {
        let clip = decode_mp3(&mp3)?;
        Self::play_clip(clip, stop).await
    }
}
