use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jansamvaad_voice::voice::{
    AssetLoader, AudioPlayback, DecodedClip, DeviceBackend, SpeechSynthesizer, TextToSpeech,
    never_stop,
};
use jansamvaad_voice::{Config, PlaybackManager, ReplySpeaker, SessionState};

/// JanSamvaad voice - spoken replies for the civic assistant
#[derive(Parser)]
#[command(name = "jansamvaad", version, about)]
struct Cli {
    /// Config file (defaults to ~/.config/jansamvaad/config.toml)
    #[arg(short, long, env = "JANSAMVAAD_CONFIG")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show which clip a reply would play
    Select {
        /// Reply text
        text: String,
    },
    /// Check whether a reply counts as Kannada text
    Classify {
        /// Reply text
        text: String,
    },
    /// List the phrase table
    Phrases,
    /// Play the clip matched to a reply
    Play {
        /// Reply text
        text: String,
    },
    /// Speak a reply: recorded clip for Kannada, synthesized speech otherwise
    Speak {
        /// Reply text (HTML allowed)
        text: String,
    },
    /// Test speaker output
    TestSpeaker,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,jansamvaad_voice=info",
        1 => "info,jansamvaad_voice=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Command::Select { text } => cmd_select(&config, &text),
        Command::Classify { text } => cmd_classify(&config, &text),
        Command::Phrases => cmd_phrases(&config),
        Command::Play { text } => cmd_play(&config, &text).await,
        Command::Speak { text } => cmd_speak(&config, &text).await,
        Command::TestSpeaker => test_speaker().await,
    }
}

/// Show the clip chosen for a reply
fn cmd_select(config: &Config, text: &str) -> anyhow::Result<()> {
    let matcher = config.matcher()?;
    let found = matcher.find(text);

    println!("{}", found.locator);
    match found.phrase {
        Some(phrase) => println!("  {} match on \"{phrase}\"", found.kind.as_str()),
        None => println!("  {} clip", found.kind.as_str()),
    }

    Ok(())
}

/// Report whether a reply is Kannada text
fn cmd_classify(config: &Config, text: &str) -> anyhow::Result<()> {
    let matcher = config.matcher()?;
    let ratio = jansamvaad_voice::script_ratio(text, matcher.config().script);
    let is_target = matcher.is_target_language_text(text);

    println!("{is_target}");
    println!(
        "  script ratio {ratio:.2} (threshold {:.2})",
        matcher.config().ratio_threshold
    );

    Ok(())
}

/// Print the phrase table
fn cmd_phrases(config: &Config) -> anyhow::Result<()> {
    let phrases = config.phrase_map()?;

    for (phrase, locator) in phrases.iter() {
        println!("{phrase}\t{locator}");
    }
    println!("default\t{}", phrases.default_locator());
    println!("---\n{} phrases", phrases.len());

    Ok(())
}

fn build_manager(config: &Config) -> anyhow::Result<PlaybackManager> {
    let matcher = Arc::new(config.matcher()?);
    let loader = AssetLoader::new(
        &config.audio.asset_root,
        config.audio.cache_ttl,
        config.audio.cache_capacity,
    );
    Ok(PlaybackManager::new(matcher, Arc::new(DeviceBackend::new(loader))))
}

/// Play the clip matched to a reply, stopping on Ctrl-C
async fn cmd_play(config: &Config, text: &str) -> anyhow::Result<()> {
    let mut manager = build_manager(config)?;

    let outcome = tokio::select! {
        result = manager.play_to_end(text) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(result) => result?,
        None => {
            manager.stop_audio();
            println!("Interrupted");
        }
    }

    Ok(())
}

/// Speak a reply through the reply speaker
async fn cmd_speak(config: &Config, text: &str) -> anyhow::Result<()> {
    let manager = build_manager(config)?;

    let synthesizer: Option<Arc<dyn SpeechSynthesizer>> = match TextToSpeech::new(&config.tts) {
        Ok(tts) => Some(Arc::new(tts)),
        Err(e) => {
            tracing::info!(error = %e, "speech synthesis disabled");
            None
        }
    };

    let mut speaker = ReplySpeaker::new(manager, synthesizer);

    let Some(handle) = speaker.speak_reply(text).await? else {
        println!("Nothing to speak (no recorded clip match and no synthesizer)");
        return Ok(());
    };

    println!("Playing {}", handle.locator());

    let state = tokio::select! {
        state = handle.wait() => state,
        _ = tokio::signal::ctrl_c() => {
            speaker.stop();
            SessionState::Stopped
        }
    };

    match state {
        SessionState::Completed | SessionState::Playing => Ok(()),
        SessionState::Stopped => {
            println!("Interrupted");
            Ok(())
        }
        SessionState::Errored => anyhow::bail!("playback of {} failed", handle.locator()),
    }
}

/// Test speaker output with a sine wave
async fn test_speaker() -> anyhow::Result<()> {
    println!("Testing speaker output...");
    println!("You should hear a 440Hz tone for 2 seconds\n");

    // Generate 2 seconds of 440Hz sine wave at 24kHz sample rate
    let sample_rate = 24000_u32;
    let frequency = 440.0_f32;
    let duration_secs = 2.0_f32;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let num_samples = (sample_rate as f32 * duration_secs) as usize;

    #[allow(clippy::cast_precision_loss)]
    let samples: Vec<f32> = (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * std::f32::consts::PI * frequency * t).sin() * 0.3 // 30% volume
        })
        .collect();

    println!("Playing {} samples at {} Hz...", samples.len(), sample_rate);

    let clip = DecodedClip {
        samples,
        sample_rate,
    };
    tokio::task::spawn_blocking(move || {
        let playback = AudioPlayback::new()?;
        playback.play_blocking(&clip, &never_stop())
    })
    .await??;

    println!("\n---");
    println!("If you heard the tone, your speakers are working!");
    println!("If you didn't hear anything, check:");
    println!("  1. Run: pactl info | grep 'Default Sink'");
    println!("  2. Run: pactl list sinks short");
    println!("  3. Try: pavucontrol (to check output levels)");

    Ok(())
}
