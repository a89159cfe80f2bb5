//! Interactive first-run setup wizard (`kitchen setup`)

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, Select};

use crate::config::file::{KitchenConfigFile, VoiceFileConfig};
use crate::config::DEFAULT_RECIPES_PATH;
use crate::recipe::Catalog;

/// Run the interactive setup wizard
///
/// # Errors
///
/// Returns error if user input fails or config cannot be written
pub fn run_setup() -> anyhow::Result<()> {
    println!("Kitchen Assistant Setup\n");

    let existing = crate::config::file::load_config_file();
    let config_path = crate::config::file::config_file_path()
        .unwrap_or_else(|| PathBuf::from("~/.config/omni/kitchen/config.toml"));

    if config_path.exists() {
        println!("Existing config found at {}\n", config_path.display());
    }

    // 1. Recipes file
    let recipes: String = Input::new()
        .with_prompt("Path to recipes file")
        .default(
            existing
                .recipes
                .clone()
                .unwrap_or_else(|| DEFAULT_RECIPES_PATH.to_string()),
        )
        .interact_text()?;

    match Catalog::from_path(Path::new(&recipes)) {
        Ok(catalog) => println!("Found {} recipes", catalog.len()),
        Err(e) => println!("Warning: could not load recipes yet ({e})"),
    }

    // 2. Voice (optional)
    let enable_voice = Confirm::new()
        .with_prompt("Use microphone and speakers? (no = text mode)")
        .default(existing.voice.enabled.unwrap_or(true))
        .interact()?;

    let mut api_keys = existing.api_keys;
    let voice = if enable_voice {
        let stt_providers = ["whisper", "deepgram"];
        let stt_idx = Select::new()
            .with_prompt("Speech recognition provider")
            .items(&stt_providers)
            .default(position(&stt_providers, existing.voice.stt_provider.as_deref()))
            .interact()?;

        let tts_providers = ["openai", "elevenlabs"];
        let tts_idx = Select::new()
            .with_prompt("Speech synthesis provider")
            .items(&tts_providers)
            .default(position(&tts_providers, existing.voice.tts_provider.as_deref()))
            .interact()?;

        let needs_openai = stt_idx == 0 || tts_idx == 0;
        if needs_openai {
            api_keys.openai = ask_key("OpenAI", "OPENAI_API_KEY", api_keys.openai)?;
        }
        if stt_idx == 1 {
            api_keys.deepgram = ask_key("Deepgram", "DEEPGRAM_API_KEY", api_keys.deepgram)?;
        }
        if tts_idx == 1 {
            api_keys.elevenlabs =
                ask_key("ElevenLabs", "ELEVENLABS_API_KEY", api_keys.elevenlabs)?;
        }

        let tts_voice: String = Input::new()
            .with_prompt("Voice")
            .default(
                existing
                    .voice
                    .tts_voice
                    .clone()
                    .unwrap_or_else(|| "alloy".to_string()),
            )
            .interact_text()?;

        VoiceFileConfig {
            enabled: Some(true),
            stt_provider: Some(stt_providers[stt_idx].to_string()),
            tts_provider: Some(tts_providers[tts_idx].to_string()),
            tts_voice: Some(tts_voice),
            ..existing.voice
        }
    } else {
        VoiceFileConfig {
            enabled: Some(false),
            ..existing.voice
        }
    };

    // 3. Build and write config
    let config_file = KitchenConfigFile {
        recipes: Some(recipes),
        voice,
        pantry: existing.pantry,
        dialogue: existing.dialogue,
        api_keys,
    };

    write_config(&config_path, &config_file)?;
    println!("\nConfig written to {}", config_path.display());
    println!("\nSetup complete! Run `kitchen` to start cooking.");

    Ok(())
}

/// Ask for an API key, keeping the existing one on blank input
fn ask_key(
    provider: &str,
    env_hint: &str,
    existing: Option<String>,
) -> anyhow::Result<Option<String>> {
    let prompt = existing.as_deref().map_or_else(
        || format!("{provider} API key ({env_hint})"),
        |k| format!("{provider} API key (current: {}, leave blank to keep)", mask(k)),
    );

    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    Ok(if input.is_empty() { existing } else { Some(input) })
}

fn mask(key: &str) -> String {
    if key.len() > 8 && key.is_ascii() {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "****".to_string()
    }
}

fn position(items: &[&str], current: Option<&str>) -> usize {
    current
        .and_then(|c| items.iter().position(|i| i.eq_ignore_ascii_case(c)))
        .unwrap_or(0)
}

/// Serialize and write the config file
fn write_config(path: &Path, config: &KitchenConfigFile) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("sk-abcdefghijkl"), "sk-a...ijkl");
        assert_eq!(mask("short"), "****");
    }

    #[test]
    fn test_position_defaults_to_first() {
        assert_eq!(position(&["whisper", "deepgram"], Some("Deepgram")), 1);
        assert_eq!(position(&["whisper", "deepgram"], Some("vosk")), 0);
        assert_eq!(position(&["whisper", "deepgram"], None), 0);
    }

    #[test]
    fn test_write_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = KitchenConfigFile {
            recipes: Some("recipes.json".to_string()),
            ..KitchenConfigFile::default()
        };

        write_config(&path, &config).unwrap();

        let loaded = crate::config::file::load_config_from(&path);
        assert_eq!(loaded.recipes.as_deref(), Some("recipes.json"));
    }
}
