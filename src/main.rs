use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kitchen_assistant::voice::{AudioCapture, AudioPlayback, calculate_energy};
use kitchen_assistant::{
    Catalog, Config, ConsoleVoice, DialogueSettings, IngredientSource, MicrophoneVoice, Session,
    SessionEnd, VoiceIo, find_feasible, load_catalog,
};

/// Kitchen - voice-driven kitchen assistant
#[derive(Parser)]
#[command(name = "kitchen", version, about)]
struct Cli {
    /// Path to the recipes JSON file
    #[arg(short, long, env = "KITCHEN_RECIPES")]
    recipes: Option<PathBuf>,

    /// Type instead of talking (no microphone or speakers)
    #[arg(long, env = "KITCHEN_TEXT_MODE")]
    text: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
#[allow(clippy::enum_variant_names)]
enum Command {
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Test speaker output
    TestSpeaker,
    /// Test TTS output
    TestTts {
        /// Text to speak
        #[arg(default_value = "Hello! I'm your kitchen assistant.")]
        text: String,
    },
    /// Listen once and print what was recognized
    TestListen,
    /// List the recipes in the catalog
    Recipes {
        /// Only recipes that can be made with what's on hand
        #[arg(short, long)]
        feasible: bool,
    },
    /// Interactive first-run setup
    Setup,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,kitchen_assistant=info",
        1 => "info,kitchen_assistant=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(cmd) = cli.command {
        return match cmd {
            Command::TestMic { duration } => test_mic(duration).await,
            Command::TestSpeaker => test_speaker().await,
            Command::TestTts { text } => test_tts(&text).await,
            Command::TestListen => test_listen().await,
            Command::Recipes { feasible } => list_recipes(cli.recipes, feasible),
            Command::Setup => kitchen_assistant::setup::run_setup(),
        };
    }

    let config = Config::load_with_options(cli.recipes.as_deref(), cli.text)?;
    tracing::debug!(?config, "loaded configuration");

    let catalog = load_catalog(&config.recipes_path);
    let pantry = config.pantry.build();

    let end = if config.voice.enabled {
        let stt = config.voice.speech_to_text(&config.api_keys)?;
        let tts = config.voice.text_to_speech(&config.api_keys)?;
        let mut voice = MicrophoneVoice::new(stt, tts, config.voice.listen)?;
        converse(&mut voice, &catalog, pantry.as_ref(), &config.dialogue).await
    } else {
        let mut voice = ConsoleVoice::new();
        converse(&mut voice, &catalog, pantry.as_ref(), &config.dialogue).await
    };

    if end == SessionEnd::CatalogUnavailable {
        anyhow::bail!("no recipes loaded from {}", config.recipes_path.display());
    }

    Ok(())
}

/// Run one session, stopping early on Ctrl-C
#[allow(clippy::future_not_send)]
async fn converse<V: VoiceIo>(
    voice: &mut V,
    catalog: &Catalog,
    pantry: &dyn IngredientSource,
    settings: &DialogueSettings,
) -> SessionEnd {
    let session = Session::new(voice, catalog, pantry, settings);

    tokio::select! {
        end = session.run() => end,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
            SessionEnd::UserExit
        }
    }
}

/// Print the catalog, or the part of it that can be made right now
fn list_recipes(recipes: Option<PathBuf>, feasible_only: bool) -> anyhow::Result<()> {
    let config = Config::load_with_options(recipes.as_deref(), true)?;
    let catalog = load_catalog(&config.recipes_path);

    if catalog.is_empty() {
        anyhow::bail!("no recipes loaded from {}", config.recipes_path.display());
    }

    let listed = if feasible_only {
        let available = config.pantry.build().available();
        find_feasible(&available, &catalog)
    } else {
        catalog.iter().collect()
    };

    for (i, recipe) in listed.iter().enumerate() {
        println!("{:2}. {} ({})", i + 1, recipe.name, recipe.ingredient_list());
    }
    println!("\n{} of {} recipes", listed.len(), catalog.len());

    Ok(())
}

/// Test microphone input
#[allow(clippy::future_not_send)]
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let mut capture = AudioCapture::new()?;
    capture.start()?;

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.take_buffer();
        let energy = calculate_energy(&samples);
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (energy * 100.0).min(50.0) as usize;
        let meter = "#".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!("[{:2}s] RMS: {energy:.4} | Peak: {peak:.4} | [{meter}]", i + 1);
    }

    capture.stop();

    println!("\n---");
    println!("If you saw movement in the meter, your mic is working!");
    println!("If RMS stayed near 0, check:");
    println!("  1. Is your mic plugged in?");
    println!("  2. Run: arecord -l (to list devices)");

    Ok(())
}

/// Test speaker output with a sine wave
#[allow(clippy::future_not_send)]
async fn test_speaker() -> anyhow::Result<()> {
    println!("Testing speaker output...");
    println!("You should hear a 440Hz tone for 2 seconds\n");

    let mut playback = AudioPlayback::new()?;

    let sample_rate = kitchen_assistant::voice::PLAYBACK_SAMPLE_RATE;
    #[allow(clippy::cast_precision_loss)]
    let samples: Vec<f32> = (0..sample_rate * 2)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.3
        })
        .collect();

    playback.play(samples).await?;

    println!("If you heard the tone, your speakers are working!");
    Ok(())
}

/// Test TTS output
#[allow(clippy::future_not_send)]
async fn test_tts(text: &str) -> anyhow::Result<()> {
    println!("Testing TTS with text: \"{text}\"\n");

    let config = Config::load()?;
    let tts = config.voice.text_to_speech(&config.api_keys)?;

    println!("Synthesizing speech...");
    let mp3_data = tts.synthesize(text).await?;
    println!("Got {} bytes of audio data", mp3_data.len());

    let mut playback = AudioPlayback::new()?;
    playback.play_mp3(&mp3_data).await?;

    println!("If you heard the speech, TTS is working!");
    Ok(())
}

/// Listen once through the full capture and STT path
#[allow(clippy::future_not_send)]
async fn test_listen() -> anyhow::Result<()> {
    let config = Config::load()?;
    let stt = config.voice.speech_to_text(&config.api_keys)?;
    let tts = config.voice.text_to_speech(&config.api_keys)?;
    let mut voice = MicrophoneVoice::new(stt, tts, config.voice.listen)?;

    println!("Say something after the calibration pause...");
    let heard = voice.listen().await;

    if heard.is_empty() {
        println!("Nothing was recognized");
    } else {
        println!("Heard: \"{heard}\"");
    }
    Ok(())
}
