//! Voice I/O boundary
//!
//! The dialogue engine only sees [`VoiceIo`]: say something, hear
//! something back. Capture, voice-activity detection, transcription and
//! synthesis live behind it and never surface their errors to the caller.

mod capture;
mod console;
mod detector;
mod microphone;
mod playback;
mod stt;
mod tts;

use async_trait::async_trait;

pub use capture::{AudioCapture, SAMPLE_RATE};
pub use console::ConsoleVoice;
pub use detector::{DetectorState, ListenSettings, UtteranceDetector, calculate_energy};
pub use microphone::MicrophoneVoice;
pub use playback::{AudioPlayback, PLAYBACK_SAMPLE_RATE};
pub use stt::{SpeechToText, SttProvider, samples_to_wav};
pub use tts::{TextToSpeech, TtsProvider};

/// Speak/listen capability used by the dialogue engine
///
/// Implementations must not fail: synthesis problems are logged and
/// skipped, and every recognition problem (timeout, unintelligible audio,
/// service failure) is reported as an empty string.
#[async_trait(?Send)]
pub trait VoiceIo {
    /// Render `text` to the user, returning once it has been delivered
    async fn speak(&mut self, text: &str);

    /// Wait for the next utterance and return it lowercased, or `""` when
    /// nothing was understood
    async fn listen(&mut self) -> String;

    /// Whether more input can arrive; the session ends once it cannot
    fn is_open(&self) -> bool {
        true
    }
}

/// Lowercase and trim recognized text
#[must_use]
pub fn normalize_utterance(text: &str) -> String {
    text.trim().to_lowercase()
}
