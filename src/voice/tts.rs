//! Text-to-speech (TTS) for replies without a recorded clip

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::TtsConfig;
use crate::{Error, Result};

/// Turns reply text into MP3 audio
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text`, returning MP3 bytes
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Synthesizes speech through an OpenAI-compatible `/v1/audio/speech` API
pub struct TextToSpeech {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
    voice: String,
    speed: f32,
}

impl std::fmt::Debug for TextToSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextToSpeech")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("voice", &self.voice)
            .field("speed", &self.speed)
            .finish_non_exhaustive()
    }
}

impl TextToSpeech {
    /// Create a TTS client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if no API key is configured
    pub fn new(config: &TtsConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().is_empty())
            .ok_or_else(|| Error::Config("API key required for TTS".to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/v1/audio/speech", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            voice: config.voice.clone(),
            speed: config.speed,
        })
    }

    /// Full URL of the speech endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SpeechSynthesizer for TextToSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        #[derive(serde::Serialize)]
        struct TtsRequest<'a> {
            model: &'a str,
            input: &'a str,
            voice: &'a str,
            speed: f32,
            response_format: &'a str,
        }

        let request = TtsRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            speed: self.speed,
            response_format: "mp3",
        };

        tracing::debug!(
            model = %self.model,
            voice = %self.voice,
            chars = text.chars().count(),
            "synthesizing reply"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tts(format!(
                "TTS error {status}: {}",
                api_error_message(&body)
            )));
        }

        let audio = response.bytes().await?;
        Ok(audio.to_vec())
    }
}

/// Pull `error.message` out of an API error body, falling back to the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
