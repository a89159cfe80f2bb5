//! Voice pipeline integration tests
//!
//! Tests voice components without requiring audio hardware

use std::io::Cursor;
use std::time::Duration;

use kitchen_assistant::voice::{
    DetectorState, ListenSettings, SAMPLE_RATE, UtteranceDetector, normalize_utterance,
    samples_to_wav,
};

/// Generate sine wave audio samples
fn generate_sine_samples(frequency: f32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

/// Generate silence
fn generate_silence(duration_secs: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    vec![0.0; num_samples]
}

fn detector() -> UtteranceDetector {
    UtteranceDetector::new(&ListenSettings::default())
}

#[test]
fn test_silence_keeps_waiting() {
    let mut detector = detector();

    assert_eq!(detector.process(&generate_silence(0.1)), DetectorState::Waiting);
    assert_eq!(detector.state(), DetectorState::Waiting);
}

#[test]
fn test_speech_then_silence_completes_utterance() {
    let mut detector = detector();

    let speech = generate_sine_samples(440.0, 0.5, 0.3);
    assert_eq!(detector.process(&speech), DetectorState::Speaking);

    // Short pause is not the end yet
    let pause = generate_silence(0.2);
    assert_eq!(detector.process(&pause), DetectorState::Speaking);

    let silence = generate_silence(0.6);
    assert_eq!(detector.process(&silence), DetectorState::Complete);

    let utterance = detector.take_utterance();
    assert_eq!(utterance.len(), speech.len() + pause.len() + silence.len());
    assert_eq!(detector.state(), DetectorState::Waiting);
}

#[test]
fn test_short_blip_is_discarded() {
    let mut detector = detector();

    detector.process(&generate_sine_samples(440.0, 0.1, 0.3));
    assert_eq!(detector.state(), DetectorState::Speaking);

    assert_eq!(detector.process(&generate_silence(0.6)), DetectorState::Waiting);
    assert!(detector.take_utterance().is_empty());
}

#[test]
fn test_phrase_limit_truncates() {
    let mut detector = UtteranceDetector::new(&ListenSettings {
        phrase_limit: Duration::from_secs(1),
        ..ListenSettings::default()
    });

    detector.process(&generate_sine_samples(440.0, 0.5, 0.3));
    let state = detector.process(&generate_sine_samples(440.0, 0.6, 0.3));

    assert_eq!(state, DetectorState::Complete);
    assert_eq!(detector.take_utterance().len(), SAMPLE_RATE as usize);
}

#[test]
fn test_listen_timeout() {
    let mut detector = UtteranceDetector::new(&ListenSettings {
        timeout: Duration::from_secs(1),
        ..ListenSettings::default()
    });

    assert_eq!(detector.process(&generate_silence(0.5)), DetectorState::Waiting);
    assert_eq!(detector.process(&generate_silence(0.6)), DetectorState::TimedOut);

    // Stays timed out until reset
    let speech = generate_sine_samples(440.0, 0.5, 0.3);
    assert_eq!(detector.process(&speech), DetectorState::TimedOut);
    detector.reset();
    assert_eq!(detector.process(&speech), DetectorState::Speaking);
}

#[test]
fn test_calibration_ignores_ambient_noise() {
    let mut detector = detector();
    let hum = generate_sine_samples(60.0, 1.0, 0.1);

    detector.calibrate(&hum);
    assert_eq!(detector.process(&hum[..1600]), DetectorState::Waiting);

    let speech = generate_sine_samples(440.0, 0.1, 0.5);
    assert_eq!(detector.process(&speech), DetectorState::Speaking);
}

#[test]
fn test_samples_to_wav() {
    let samples = generate_sine_samples(440.0, 0.1, 0.5);
    let wav_data = samples_to_wav(&samples, SAMPLE_RATE).unwrap();

    assert_eq!(&wav_data[0..4], b"RIFF");
    assert_eq!(&wav_data[8..12], b"WAVE");
    assert!(wav_data.len() > 44);
}

#[test]
fn test_wav_readback() {
    let original_samples: Vec<f32> = vec![0.0, 0.5, -0.5, 1.0, -1.0, 0.25];
    let wav_data = samples_to_wav(&original_samples, SAMPLE_RATE).unwrap();

    let mut reader = hound::WavReader::new(Cursor::new(wav_data)).unwrap();

    let spec = reader.spec();
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.channels, 1);

    let read_samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(read_samples.len(), original_samples.len());
    assert_eq!(read_samples[3], i16::MAX);
}

#[test]
fn test_utterance_normalization() {
    assert_eq!(normalize_utterance("  Tomato SOUP \n"), "tomato soup");
    assert_eq!(normalize_utterance("   "), "");
}
