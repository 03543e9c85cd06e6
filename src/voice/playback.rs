//! Audio playback to speakers

use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, SampleRate, StreamConfig};

use super::StopSignal;
use crate::{Error, Result};

/// How often the blocking loop checks for completion or a stop request
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Grace period past the expected clip duration before giving up
const COMPLETION_SLACK: Duration = Duration::from_millis(500);

/// Where a playing stream stands after one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drain {
    /// Samples still playing
    Pending,
    /// Stop was requested
    Stopped,
    /// Every sample reached the device
    Finished,
}

/// Decide what the poll loop does next
///
/// A stream error wins over everything else. A stream that has not drained
/// by `timeout` stopped pulling samples and counts as a failure.
fn check_drain(
    stopped: bool,
    finished: bool,
    stream_error: Option<&str>,
    elapsed: Duration,
    timeout: Duration,
) -> Result<Drain> {
    if let Some(err) = stream_error {
        return Err(Error::PlaybackRejected(format!("output stream failed: {err}")));
    }
    if stopped {
        return Ok(Drain::Stopped);
    }
    if finished {
        return Ok(Drain::Finished);
    }
    if elapsed > timeout {
        return Err(Error::PlaybackRejected(format!(
            "output stopped consuming samples after {}ms",
            elapsed.as_millis()
        )));
    }
    Ok(Drain::Pending)
}

/// Decoded mono clip
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedClip {
    /// Mono samples in [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl DecodedClip {
    /// Clip duration at its own sample rate
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / f64::from(self.sample_rate))
    }
}

/// Plays clips on the default output device
///
/// Holds no stream between calls; each clip opens and drops its own stream,
/// since cpal streams cannot leave the thread that built them.
pub struct AudioPlayback {
    device: Device,
}

impl AudioPlayback {
    /// Open the default output device
    ///
    /// # Errors
    ///
    /// Returns `Error::PlaybackRejected` if no output device is available
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| Error::PlaybackRejected("no output device available".to_string()))?;

        tracing::debug!(
            device = device.name().unwrap_or_default(),
            "audio playback initialized"
        );

        Ok(Self { device })
    }

    /// Play a clip, blocking until it ends or `stop` is raised
    ///
    /// # Errors
    ///
    /// Returns `Error::PlaybackRejected` if the device has no usable output
    /// config, refuses to start the stream, reports a stream error, or stops
    /// pulling samples before the clip ends
    pub fn play_blocking(&self, clip: &DecodedClip, stop: &StopSignal) -> Result<()> {
        if clip.samples.is_empty() {
            return Ok(());
        }

        let (config, resample_to) = self.output_config(clip.sample_rate)?;
        let samples = match resample_to {
            Some(rate) => resample(&clip.samples, clip.sample_rate, rate)?,
            None => clip.samples.clone(),
        };
        let output_rate = config.sample_rate.0;
        let channels = usize::from(config.channels);

        let samples = Arc::new(samples);
        let position = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicBool::new(false));
        let stream_error: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

        let stream = {
            let samples = Arc::clone(&samples);
            let position = Arc::clone(&position);
            let finished = Arc::clone(&finished);
            let failure = Arc::clone(&stream_error);

            self.device
                .build_output_stream(
                    &config,
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        let mut pos = position.load(Ordering::Acquire);
                        for frame in data.chunks_mut(channels) {
                            let sample = samples.get(pos).copied().unwrap_or(0.0);
                            if pos < samples.len() {
                                pos += 1;
                            } else {
                                finished.store(true, Ordering::Release);
                            }
                            frame.fill(sample);
                        }
                        position.store(pos, Ordering::Release);
                    },
                    move |err| {
                        tracing::error!(error = %err, "audio playback error");
                        if let Ok(mut slot) = failure.lock() {
                            slot.get_or_insert_with(|| err.to_string());
                        }
                    },
                    None,
                )
                .map_err(|e| Error::PlaybackRejected(e.to_string()))?
        };

        stream
            .play()
            .map_err(|e| Error::PlaybackRejected(e.to_string()))?;

        #[allow(clippy::cast_precision_loss)]
        let timeout = Duration::from_secs_f64(samples.len() as f64 / f64::from(output_rate))
            + COMPLETION_SLACK;
        let start = Instant::now();

        let outcome = loop {
            let failure = stream_error.lock().ok().and_then(|slot| slot.clone());
            let drain = check_drain(
                *stop.borrow(),
                finished.load(Ordering::Acquire),
                failure.as_deref(),
                start.elapsed(),
                timeout,
            );

            match drain {
                Ok(Drain::Pending) => std::thread::sleep(POLL_INTERVAL),
                Ok(Drain::Stopped) => {
                    tracing::debug!(
                        played = position.load(Ordering::Acquire),
                        total = samples.len(),
                        "playback stopped early"
                    );
                    break Ok(());
                }
                Ok(Drain::Finished) => {
                    tracing::debug!(samples = samples.len(), "playback complete");
                    break Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        played = position.load(Ordering::Acquire),
                        total = samples.len(),
                        error = %e,
                        "playback aborted"
                    );
                    break Err(e);
                }
            }
        };

        drop(stream);
        outcome
    }

    /// Pick an output config for a clip rate
    ///
    /// Prefers a mono or stereo f32 config that runs at the clip's own rate;
    /// otherwise falls back to the device default and asks for resampling.
    fn output_config(&self, clip_rate: u32) -> Result<(StreamConfig, Option<u32>)> {
        let rate = SampleRate(clip_rate);

        let native = self
            .device
            .supported_output_configs()
            .map_err(|e| Error::PlaybackRejected(e.to_string()))?
            .filter(|c| c.sample_format() == SampleFormat::F32)
            .filter(|c| c.min_sample_rate() <= rate && c.max_sample_rate() >= rate)
            .min_by_key(cpal::SupportedStreamConfigRange::channels)
            .filter(|c| c.channels() <= 2);

        if let Some(supported) = native {
            let config = supported.with_sample_rate(rate).config();
            tracing::trace!(
                sample_rate = clip_rate,
                channels = config.channels,
                "using native output config"
            );
            return Ok((config, None));
        }

        let fallback = self
            .device
            .default_output_config()
            .map_err(|e| Error::PlaybackRejected(e.to_string()))?;

        if fallback.sample_format() != SampleFormat::F32 {
            return Err(Error::PlaybackRejected(format!(
                "unsupported output sample format {:?}",
                fallback.sample_format()
            )));
        }

        let config = fallback.config();
        tracing::debug!(
            clip_rate,
            device_rate = config.sample_rate.0,
            channels = config.channels,
            "resampling clip to device rate"
        );

        let device_rate = config.sample_rate.0;
        Ok((config, Some(device_rate)))
    }
}

/// Decode MP3 bytes to a mono clip
///
/// # Errors
///
/// Returns `Error::PlaybackLoad` if the data is not decodable MP3
pub fn decode_mp3(mp3_data: &[u8]) -> Result<DecodedClip> {
    let mut decoder = minimp3::Decoder::new(Cursor::new(mp3_data));
    let mut samples = Vec::new();
    let mut sample_rate = None;

    loop {
        match decoder.next_frame() {
            Ok(frame) => {
                if sample_rate.is_none() {
                    sample_rate = u32::try_from(frame.sample_rate).ok();
                }

                if frame.channels == 2 {
                    samples.extend(frame.data.chunks(2).map(|chunk| {
                        let left = f32::from(chunk[0]) / 32768.0;
                        let right = f32::from(chunk.get(1).copied().unwrap_or(chunk[0])) / 32768.0;
                        f32::midpoint(left, right)
                    }));
                } else {
                    samples.extend(frame.data.iter().map(|&s| f32::from(s) / 32768.0));
                }
            }
            Err(minimp3::Error::Eof) => break,
            Err(e) => return Err(Error::PlaybackLoad(format!("MP3 decode error: {e}"))),
        }
    }

    match sample_rate {
        Some(sample_rate) if !samples.is_empty() => Ok(DecodedClip {
            samples,
            sample_rate,
        }),
        _ => Err(Error::PlaybackLoad("no audio frames in clip".to_string())),
    }
}

/// Resample mono audio using rubato
///
/// # Errors
///
/// Returns `Error::Audio` if the resampler cannot be built or fails
#[allow(clippy::cast_possible_truncation)]
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    use rubato::{FftFixedIn, Resampler};

    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let chunk_size = 1024;
    let sub_chunks = 2;

    let mut resampler =
        FftFixedIn::<f64>::new(from_rate as usize, to_rate as usize, chunk_size, sub_chunks, 1)
            .map_err(|e| Error::Audio(format!("resampler init failed: {e}")))?;

    let input: Vec<f64> = samples.iter().map(|&s| f64::from(s)).collect();
    let mut output = Vec::with_capacity(samples.len() * to_rate as usize / from_rate as usize);

    for chunk in input.chunks(chunk_size) {
        // Zero-pad the tail so the last partial chunk is not dropped
        let mut block = chunk.to_vec();
        block.resize(chunk_size, 0.0);

        let result = resampler
            .process(&[block], None)
            .map_err(|e| Error::Audio(format!("resample failed: {e}")))?;
        output.extend_from_slice(&result[0]);
    }

    Ok(output.iter().map(|&s| s as f32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_states() {
        let timeout = Duration::from_secs(2);
        let early = Duration::from_millis(100);

        assert_eq!(
            check_drain(false, false, None, early, timeout).unwrap(),
            Drain::Pending
        );
        assert_eq!(
            check_drain(true, false, None, early, timeout).unwrap(),
            Drain::Stopped
        );
        assert_eq!(
            check_drain(false, true, None, early, timeout).unwrap(),
            Drain::Finished
        );
    }

    #[test]
    fn test_stream_error_fails_playback() {
        let timeout = Duration::from_secs(2);
        let early = Duration::from_millis(100);

        let err = check_drain(false, false, Some("device unplugged"), early, timeout).unwrap_err();
        assert!(matches!(err, Error::PlaybackRejected(ref msg) if msg.contains("device unplugged")));

        // An error already raised is not masked by a late finish
        assert!(check_drain(false, true, Some("underrun"), early, timeout).is_err());
    }

    #[test]
    fn test_undrained_stream_times_out() {
        let timeout = Duration::from_secs(2);

        let err = check_drain(false, false, None, Duration::from_secs(3), timeout).unwrap_err();
        assert!(matches!(err, Error::PlaybackRejected(_)));

        // Finishing or stopping right at the deadline is still fine
        assert_eq!(
            check_drain(false, true, None, Duration::from_secs(3), timeout).unwrap(),
            Drain::Finished
        );
        assert_eq!(
            check_drain(true, false, None, Duration::from_secs(3), timeout).unwrap(),
            Drain::Stopped
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_mp3(b"definitely not an mp3 stream").unwrap_err();
        assert!(matches!(err, Error::PlaybackLoad(_)));
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(matches!(decode_mp3(&[]), Err(Error::PlaybackLoad(_))));
    }

    #[test]
    fn test_clip_duration() {
        let clip = DecodedClip {
            samples: vec![0.0; 24_000],
            sample_rate: 24_000,
        };
        assert_eq!(clip.duration(), Duration::from_secs(1));

        let silent = DecodedClip {
            samples: Vec::new(),
            sample_rate: 0,
        };
        assert_eq!(silent.duration(), Duration::ZERO);
    }

    #[test]
    fn test_resample_same_rate_is_identity() {
        let samples = vec![0.1, -0.2, 0.3];
        assert_eq!(resample(&samples, 16_000, 16_000).unwrap(), samples);
    }

    #[test]
    fn test_resample_changes_length() {
        let samples = vec![0.0f32; 4096];
        let out = resample(&samples, 24_000, 48_000).unwrap();
        // Roughly double, allowing for resampler delay and tail padding
        assert!(out.len() >= 7000 && out.len() <= 9000, "got {}", out.len());
    }
}
