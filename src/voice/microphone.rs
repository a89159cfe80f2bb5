//! Microphone and speaker backed voice I/O

use std::time::Duration;

use async_trait::async_trait;

use super::{
    AudioCapture, AudioPlayback, DetectorState, ListenSettings, SAMPLE_RATE, SpeechToText,
    TextToSpeech, UtteranceDetector, VoiceIo, normalize_utterance, samples_to_wav,
};
use crate::Result;

/// How often captured audio is handed to the detector
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Voice I/O over the default microphone and speakers
pub struct MicrophoneVoice {
    capture: AudioCapture,
    playback: AudioPlayback,
    detector: UtteranceDetector,
    stt: SpeechToText,
    tts: TextToSpeech,
    settings: ListenSettings,
}

impl MicrophoneVoice {
    /// Open the default audio devices
    ///
    /// # Errors
    ///
    /// Returns error if an audio device cannot be opened
    pub fn new(stt: SpeechToText, tts: TextToSpeech, settings: ListenSettings) -> Result<Self> {
        Ok(Self {
            capture: AudioCapture::new()?,
            playback: AudioPlayback::new()?,
            detector: UtteranceDetector::new(&settings),
            stt,
            tts,
            settings,
        })
    }

    /// Calibrate, then capture one utterance; `None` on listen timeout
    async fn capture_utterance(&mut self) -> Result<Option<Vec<f32>>> {
        self.capture.start()?;

        tracing::info!("adjusting for ambient noise");
        tokio::time::sleep(self.settings.calibration).await;
        let ambient = self.capture.take_buffer();
        self.detector.reset();
        self.detector.calibrate(&ambient);

        tracing::info!("listening");
        let utterance = loop {
            tokio::time::sleep(POLL_INTERVAL).await;
            let samples = self.capture.take_buffer();

            match self.detector.process(&samples) {
                DetectorState::Waiting | DetectorState::Speaking => {}
                DetectorState::Complete => break Some(self.detector.take_utterance()),
                DetectorState::TimedOut => break None,
            }
        };

        self.capture.stop();
        Ok(utterance)
    }

    async fn recognize(&mut self) -> Result<String> {
        let Some(samples) = self.capture_utterance().await? else {
            return Ok(String::new());
        };

        let wav = samples_to_wav(&samples, SAMPLE_RATE)?;
        let text = self.stt.transcribe(&wav).await?;
        Ok(normalize_utterance(&text))
    }
}

#[async_trait(?Send)]
impl VoiceIo for MicrophoneVoice {
    async fn speak(&mut self, text: &str) {
        tracing::info!(text, "speaking");

        let audio = match self.tts.synthesize(text).await {
            Ok(audio) => audio,
            Err(e) => {
                tracing::warn!(error = %e, "speech synthesis failed");
                return;
            }
        };

        if let Err(e) = self.playback.play_mp3(&audio).await {
            tracing::warn!(error = %e, "playback failed");
        }
    }

    async fn listen(&mut self) -> String {
        match self.recognize().await {
            Ok(text) if text.is_empty() => {
                tracing::info!("sorry, I couldn't understand that");
                text
            }
            Ok(text) => {
                tracing::info!(utterance = %text, "you said");
                text
            }
            Err(e) => {
                self.capture.stop();
                tracing::warn!(error = %e, "speech recognition failed");
                String::new()
            }
        }
    }
}
