//! Kitchen Assistant - voice-driven recipe lookup and recommendations
//!
//! This library provides the pieces of the `kitchen` assistant:
//! - Recipe catalog loading and matching
//! - Ingredient availability providers
//! - The dialogue engine that runs a spoken session
//! - Voice I/O (capture, STT, TTS, playback) and a text-mode console
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                     VoiceIo                          │
//! │   Microphone + STT  │  TTS + Speakers  │  Console   │
//! └────────────────────┬────────────────────────────────┘
//!                      │ speak / listen
//! ┌────────────────────▼────────────────────────────────┐
//! │                 Dialogue Engine                      │
//! │   ModeSelect │ Specific │ Recommended │ Repeat      │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │          Recipe Catalog  │  Pantry                   │
//! │   find_by_name  │  find_feasible                     │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dialogue;
pub mod error;
pub mod recipe;
pub mod setup;
pub mod voice;

pub use config::Config;
pub use dialogue::{DialogueSettings, Intent, Keywords, Session, SessionEnd};
pub use error::{Error, Result};
pub use recipe::{
    Catalog, FilePantry, IngredientSource, Recipe, StaticPantry, default_kitchen, find_by_name,
    find_feasible, load_catalog,
};
pub use voice::{ConsoleVoice, MicrophoneVoice, VoiceIo};
