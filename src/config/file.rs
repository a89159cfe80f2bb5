//! TOML configuration file loading
//!
//! Supports `~/.config/omni/kitchen/config.toml` as a persistent config source.
//! All fields are optional: the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KitchenConfigFile {
    /// Path to the recipes JSON file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<String>,

    /// Voice/audio configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// Ingredient availability
    #[serde(default)]
    pub pantry: PantryFileConfig,

    /// Conversation behavior
    #[serde(default)]
    pub dialogue: DialogueFileConfig,

    /// API keys for speech services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,
}

/// Voice processing configuration
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VoiceFileConfig {
    /// Use microphone and speakers; false runs in text mode
    pub enabled: Option<bool>,

    /// STT provider ("whisper" or "deepgram")
    pub stt_provider: Option<String>,

    /// STT model (e.g. "whisper-1", "nova-2")
    pub stt_model: Option<String>,

    /// Recognition language (e.g. "en-US")
    pub language: Option<String>,

    /// TTS provider ("openai" or "elevenlabs")
    pub tts_provider: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,

    /// TTS voice name or voice ID
    pub tts_voice: Option<String>,

    /// TTS speed multiplier
    pub tts_speed: Option<f64>,

    /// Seconds to wait for speech to start
    pub listen_timeout_secs: Option<f64>,

    /// Longest phrase in seconds
    pub phrase_limit_secs: Option<f64>,

    /// Seconds of ambient noise sampled before each listen
    pub calibration_secs: Option<f64>,
}

/// Pantry configuration; `file` takes precedence over `ingredients`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PantryFileConfig {
    /// Fixed list of ingredients on hand
    pub ingredients: Option<Vec<String>>,

    /// JSON inventory file re-read on every check
    pub file: Option<String>,
}

/// Dialogue configuration
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DialogueFileConfig {
    /// Give up after this many unproductive turns at one prompt
    pub max_retries: Option<usize>,

    /// Extra words that select the specific-recipe mode
    pub specific_keywords: Option<Vec<String>>,

    /// Extra words that select the recommended-recipe mode
    pub recommended_keywords: Option<Vec<String>>,
}

/// API keys configuration
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiKeysFileConfig {
    pub openai: Option<String>,
    pub elevenlabs: Option<String>,
    pub deepgram: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `KitchenConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_file() -> KitchenConfigFile {
    config_file_path().map_or_else(KitchenConfigFile::default, |path| load_config_from(&path))
}

/// Load a TOML config file from `path`, falling back to defaults
#[must_use]
pub fn load_config_from(path: &Path) -> KitchenConfigFile {
    if !path.exists() {
        return KitchenConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                KitchenConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            KitchenConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/omni/kitchen/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| {
        d.config_dir()
            .join("omni")
            .join("kitchen")
            .join("config.toml")
    })
}
