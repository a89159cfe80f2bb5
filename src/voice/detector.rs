//! Energy-based utterance detection
//!
//! Splits a live sample stream into a single utterance: wait for speech to
//! start, accumulate until it is followed by silence, give up if nothing is
//! said within the listen timeout. The speech threshold is calibrated from
//! a short window of ambient noise before each listen.
//!
//! Timeouts count delivered samples, with a wall-clock bound of timeout plus
//! phrase limit on top so a stalled input stream still ends the listen.

use std::time::{Duration, Instant};

use super::SAMPLE_RATE;

/// Lowest energy that can count as speech, even in a silent room
const MIN_ENERGY_THRESHOLD: f32 = 0.02;

/// Calibrated threshold is this multiple of the ambient energy
const AMBIENT_MULTIPLIER: f32 = 1.5;

/// Minimum amount of speech for an utterance (0.3 seconds)
const MIN_SPEECH_SAMPLES: usize = 4800;

/// Trailing silence that ends an utterance (0.5 seconds)
const SILENCE_SAMPLES: usize = 8000;

/// Capture windows for a single listen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenSettings {
    /// How long to wait for speech to start
    pub timeout: Duration,
    /// Longest phrase accepted once speech has started
    pub phrase_limit: Duration,
    /// Ambient noise sampled before listening
    pub calibration: Duration,
}

impl Default for ListenSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            phrase_limit: Duration::from_secs(5),
            calibration: Duration::from_secs(1),
        }
    }
}

/// State of the utterance detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// No speech yet
    Waiting,
    /// Speech in progress, accumulating
    Speaking,
    /// An utterance is ready to be taken
    Complete,
    /// Listen timeout passed without speech
    TimedOut,
}

/// Detects the boundaries of one spoken utterance
#[derive(Debug)]
pub struct UtteranceDetector {
    threshold: f32,
    timeout_samples: usize,
    phrase_limit_samples: usize,
    state: DetectorState,
    speech_buffer: Vec<f32>,
    silence_counter: usize,
    waited: usize,
    window: Duration,
    started: Instant,
}

impl UtteranceDetector {
    /// Create a detector for the given capture windows
    #[must_use]
    pub fn new(settings: &ListenSettings) -> Self {
        Self {
            threshold: MIN_ENERGY_THRESHOLD,
            timeout_samples: duration_to_samples(settings.timeout),
            phrase_limit_samples: duration_to_samples(settings.phrase_limit),
            state: DetectorState::Waiting,
            speech_buffer: Vec::new(),
            silence_counter: 0,
            waited: 0,
            window: settings.timeout.saturating_add(settings.phrase_limit),
            started: Instant::now(),
        }
    }

    /// Set the speech threshold from a window of ambient noise
    pub fn calibrate(&mut self, ambient: &[f32]) {
        let ambient_energy = calculate_energy(ambient);
        self.threshold = (ambient_energy * AMBIENT_MULTIPLIER).max(MIN_ENERGY_THRESHOLD);
        tracing::debug!(ambient_energy, threshold = self.threshold, "calibrated for ambient noise");
    }

    /// Feed captured samples and return the resulting state
    pub fn process(&mut self, samples: &[f32]) -> DetectorState {
        if self.window_elapsed() {
            return self.state;
        }

        let energy = calculate_energy(samples);
        let is_speech = energy > self.threshold;

        match self.state {
            DetectorState::Waiting => {
                self.waited += samples.len();
                if is_speech {
                    self.state = DetectorState::Speaking;
                    self.speech_buffer.clear();
                    self.speech_buffer.extend_from_slice(samples);
                    self.silence_counter = 0;
                    tracing::trace!(energy, "speech started");
                } else if self.waited >= self.timeout_samples {
                    self.state = DetectorState::TimedOut;
                    tracing::debug!("no speech before listen timeout");
                }
            }
            DetectorState::Speaking => {
                self.speech_buffer.extend_from_slice(samples);

                if is_speech {
                    self.silence_counter = 0;
                } else {
                    self.silence_counter += samples.len();
                }

                if self.speech_buffer.len() >= self.phrase_limit_samples {
                    self.speech_buffer.truncate(self.phrase_limit_samples);
                    self.state = DetectorState::Complete;
                    tracing::debug!("phrase time limit reached");
                } else if self.silence_counter > SILENCE_SAMPLES
                    && self.speech_buffer.len() > MIN_SPEECH_SAMPLES + self.silence_counter
                {
                    self.state = DetectorState::Complete;
                    tracing::debug!(samples = self.speech_buffer.len(), "utterance complete");
                } else if self.silence_counter > SILENCE_SAMPLES {
                    // Too short to be speech, keep waiting within the timeout
                    self.waited += self.speech_buffer.len();
                    self.speech_buffer.clear();
                    self.silence_counter = 0;
                    self.state = if self.waited >= self.timeout_samples {
                        DetectorState::TimedOut
                    } else {
                        DetectorState::Waiting
                    };
                    tracing::trace!("discarded blip");
                }
            }
            DetectorState::Complete | DetectorState::TimedOut => {}
        }

        self.state
    }

    /// Close the listen once the wall-clock window has passed
    ///
    /// Keeps whatever speech was heard if it is long enough to be an utterance
    fn window_elapsed(&mut self) -> bool {
        let open = matches!(self.state, DetectorState::Waiting | DetectorState::Speaking);
        if !open || self.started.elapsed() < self.window {
            return false;
        }

        self.state = if self.speech_buffer.len() > MIN_SPEECH_SAMPLES {
            DetectorState::Complete
        } else {
            self.speech_buffer.clear();
            DetectorState::TimedOut
        };
        tracing::debug!(state = ?self.state, "capture window elapsed");
        true
    }

    /// Take the completed utterance and reset for the next listen
    pub fn take_utterance(&mut self) -> Vec<f32> {
        let utterance = std::mem::take(&mut self.speech_buffer);
        self.reset();
        utterance
    }

    /// Return to waiting, keeping the calibrated threshold
    pub fn reset(&mut self) {
        self.state = DetectorState::Waiting;
        self.speech_buffer.clear();
        self.silence_counter = 0;
        self.waited = 0;
        self.started = Instant::now();
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> DetectorState {
        self.state
    }

    /// Current speech energy threshold
    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn duration_to_samples(duration: Duration) -> usize {
    (duration.as_secs_f64() * f64::from(SAMPLE_RATE)) as usize
}

/// RMS energy of audio samples
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn calculate_energy(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}
