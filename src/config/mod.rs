//! Configuration management for the kitchen assistant

pub mod file;

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::dialogue::{DialogueSettings, Keywords};
use crate::recipe::{FilePantry, IngredientSource, StaticPantry, default_kitchen};
use crate::voice::{ListenSettings, SpeechToText, SttProvider, TextToSpeech, TtsProvider};
use crate::{Error, Result};

use file::{DialogueFileConfig, KitchenConfigFile};

/// Default recipes file, relative to the working directory
pub const DEFAULT_RECIPES_PATH: &str = "recipes.json";

/// Kitchen assistant configuration
#[derive(Debug)]
pub struct Config {
    /// Path to the recipes JSON file
    pub recipes_path: PathBuf,

    /// Voice configuration
    pub voice: VoiceConfig,

    /// Where ingredient availability comes from
    pub pantry: PantryConfig,

    /// Conversation behavior
    pub dialogue: DialogueSettings,

    /// API keys
    pub api_keys: ApiKeys,
}

/// Voice processing configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Use microphone and speakers; false runs in text mode
    pub enabled: bool,

    /// STT backend
    pub stt_provider: SttProvider,

    /// STT model (e.g. "whisper-1", "nova-2")
    pub stt_model: String,

    /// Recognition language
    pub language: String,

    /// TTS backend
    pub tts_provider: TtsProvider,

    /// TTS model (e.g. "tts-1", "eleven_monolingual_v1")
    pub tts_model: String,

    /// TTS voice identifier
    pub tts_voice: String,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f64,

    /// Capture windows for each listen
    pub listen: ListenSettings,
}

impl VoiceConfig {
    /// Build the configured speech-to-text client
    ///
    /// # Errors
    ///
    /// Returns error if the provider's API key is missing
    pub fn speech_to_text(&self, keys: &ApiKeys) -> Result<SpeechToText> {
        SpeechToText::new(
            self.stt_provider,
            keys.for_stt(self.stt_provider),
            self.stt_model.clone(),
            self.language.clone(),
        )
    }

    /// Build the configured text-to-speech client
    ///
    /// # Errors
    ///
    /// Returns error if the provider's API key is missing
    pub fn text_to_speech(&self, keys: &ApiKeys) -> Result<TextToSpeech> {
        TextToSpeech::new(
            self.tts_provider,
            keys.for_tts(self.tts_provider),
            self.tts_voice.clone(),
            self.tts_speed,
            self.tts_model.clone(),
        )
    }
}

/// Source of ingredient availability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PantryConfig {
    /// The reference kitchen's fixed stock
    Kitchen,
    /// A configured list
    Items(Vec<String>),
    /// A JSON inventory file
    File(PathBuf),
}

impl PantryConfig {
    /// Build the configured ingredient source
    #[must_use]
    pub fn build(&self) -> Box<dyn IngredientSource> {
        match self {
            Self::Kitchen => Box::new(default_kitchen()),
            Self::Items(items) => Box::new(StaticPantry::new(items.iter().cloned())),
            Self::File(path) => Box::new(FilePantry::new(path.clone())),
        }
    }
}

/// API keys for speech services
#[derive(Debug, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (Whisper and TTS)
    pub openai: Option<SecretString>,

    /// `ElevenLabs` API key (optional TTS)
    pub elevenlabs: Option<SecretString>,

    /// `Deepgram` API key (optional STT)
    pub deepgram: Option<SecretString>,
}

impl ApiKeys {
    /// Key for the given STT provider
    #[must_use]
    pub fn for_stt(&self, provider: SttProvider) -> Option<SecretString> {
        let key = match provider {
            SttProvider::Whisper => &self.openai,
            SttProvider::Deepgram => &self.deepgram,
        };
        key.as_ref().map(copy_secret)
    }

    /// Key for the given TTS provider
    #[must_use]
    pub fn for_tts(&self, provider: TtsProvider) -> Option<SecretString> {
        let key = match provider {
            TtsProvider::OpenAI => &self.openai,
            TtsProvider::ElevenLabs => &self.elevenlabs,
        };
        key.as_ref().map(copy_secret)
    }
}

fn copy_secret(secret: &SecretString) -> SecretString {
    SecretString::from(secret.expose_secret().to_string())
}

impl Config {
    /// Load configuration from the environment and the config file
    ///
    /// # Errors
    ///
    /// Returns error if a configured provider name is not recognized
    pub fn load() -> Result<Self> {
        Self::load_with_options(None, false)
    }

    /// Load configuration with command-line overrides
    ///
    /// # Errors
    ///
    /// Returns error if a configured provider name is not recognized
    pub fn load_with_options(recipes: Option<&Path>, disable_voice: bool) -> Result<Self> {
        Self::from_file(file::load_config_file(), recipes, disable_voice)
    }

    /// Resolve configuration from a parsed config file (env > toml > default)
    ///
    /// # Errors
    ///
    /// Returns error if a configured provider name or number is not recognized
    pub fn from_file(
        fc: KitchenConfigFile,
        recipes: Option<&Path>,
        disable_voice: bool,
    ) -> Result<Self> {
        let recipes_path = recipes.map_or_else(
            || {
                env("KITCHEN_RECIPES")
                    .or(fc.recipes)
                    .map_or_else(|| PathBuf::from(DEFAULT_RECIPES_PATH), PathBuf::from)
            },
            Path::to_path_buf,
        );

        let api_keys = ApiKeys {
            openai: env("OPENAI_API_KEY").or(fc.api_keys.openai).map(SecretString::from),
            elevenlabs: env("ELEVENLABS_API_KEY")
                .or(fc.api_keys.elevenlabs)
                .map(SecretString::from),
            deepgram: env("DEEPGRAM_API_KEY")
                .or(fc.api_keys.deepgram)
                .map(SecretString::from),
        };

        let voice_enabled = if disable_voice {
            tracing::info!("voice explicitly disabled, using text mode");
            false
        } else {
            fc.voice.enabled.unwrap_or(true)
        };

        let stt_provider = env("KITCHEN_STT_PROVIDER")
            .or(fc.voice.stt_provider)
            .map(|p| p.parse::<SttProvider>())
            .transpose()?
            .unwrap_or_default();
        let tts_provider = env("KITCHEN_TTS_PROVIDER")
            .or(fc.voice.tts_provider)
            .map(|p| p.parse::<TtsProvider>())
            .transpose()?
            .unwrap_or_default();

        let defaults = ListenSettings::default();
        let voice = VoiceConfig {
            enabled: voice_enabled,
            stt_provider,
            stt_model: env("KITCHEN_STT_MODEL")
                .or(fc.voice.stt_model)
                .unwrap_or_else(|| default_stt_model(stt_provider).to_string()),
            language: fc.voice.language.unwrap_or_else(|| "en-US".to_string()),
            tts_provider,
            tts_model: env("KITCHEN_TTS_MODEL")
                .or(fc.voice.tts_model)
                .unwrap_or_else(|| default_tts_model(tts_provider).to_string()),
            tts_voice: env("KITCHEN_TTS_VOICE")
                .or(fc.voice.tts_voice)
                .unwrap_or_else(|| "alloy".to_string()),
            tts_speed: fc.voice.tts_speed.unwrap_or(1.0),
            listen: ListenSettings {
                timeout: seconds(fc.voice.listen_timeout_secs, defaults.timeout)?,
                phrase_limit: seconds(fc.voice.phrase_limit_secs, defaults.phrase_limit)?,
                calibration: seconds(fc.voice.calibration_secs, defaults.calibration)?,
            },
        };

        let pantry = match (fc.pantry.file, fc.pantry.ingredients) {
            (Some(path), _) => PantryConfig::File(PathBuf::from(path)),
            (None, Some(items)) => PantryConfig::Items(items),
            (None, None) => PantryConfig::Kitchen,
        };

        let dialogue = dialogue_settings(fc.dialogue, env("KITCHEN_MAX_RETRIES"))?;

        Ok(Self {
            recipes_path,
            voice,
            pantry,
            dialogue,
            api_keys,
        })
    }
}

/// Resolve dialogue settings, `max_retries` from the environment winning over the file
fn dialogue_settings(
    file: DialogueFileConfig,
    env_max_retries: Option<String>,
) -> Result<DialogueSettings> {
    let max_retries = match env_max_retries {
        Some(value) => Some(value.parse::<usize>().map_err(|e| {
            Error::Config(format!("invalid KITCHEN_MAX_RETRIES {value:?}: {e}"))
        })?),
        None => file.max_retries,
    };

    Ok(DialogueSettings {
        keywords: Keywords::default().with_extra(
            &file.specific_keywords.unwrap_or_default(),
            &file.recommended_keywords.unwrap_or_default(),
        ),
        max_retries,
    })
}

/// Non-empty environment variable
fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn seconds(value: Option<f64>, default: Duration) -> Result<Duration> {
    value.map_or(Ok(default), |secs| {
        Duration::try_from_secs_f64(secs)
            .map_err(|e| Error::Config(format!("invalid duration {secs}: {e}")))
    })
}

const fn default_stt_model(provider: SttProvider) -> &'static str {
    match provider {
        SttProvider::Whisper => "whisper-1",
        SttProvider::Deepgram => "nova-2",
    }
}

const fn default_tts_model(provider: TtsProvider) -> &'static str {
    match provider {
        TtsProvider::OpenAI => "tts-1",
        TtsProvider::ElevenLabs => "eleven_monolingual_v1",
    }
}
