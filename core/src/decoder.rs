use crate::classifier::{self, BitDetection, DecodedByte};
use crate::config::{ModemConfig, ToneScheme};
use crate::error::{Result, ToneCodecError};
use crate::spectrum;
use crate::PEAKS_PER_WINDOW;
use log::{debug, info};

/// Message accumulated by one decode session. Owned by the session loop and
/// returned to the caller; there is no shared decode state.
#[derive(Debug, Clone, Default)]
pub struct DecodedMessage {
    pub bytes: Vec<DecodedByte>,
}

impl DecodedMessage {
    /// Raw byte values in window order.
    pub fn raw(&self) -> Vec<u8> {
        self.bytes.iter().map(|byte| byte.value).collect()
    }

    /// Human-readable rendering; non-printable bytes become `?`.
    pub fn to_text(&self) -> String {
        self.bytes
            .iter()
            .map(|byte| byte.printable().unwrap_or('?'))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decode-side session driver.
///
/// Runs the Read -> Normalize -> Decode cycle over fixed-length sample
/// windows until the source is exhausted. Each window is demodulated
/// independently; the only state carried across cycles is the accumulating
/// message (plus, in the single-tone scheme, the bits of the byte in
/// progress).
pub struct Decoder {
    config: ModemConfig,
}

impl Decoder {
    pub fn new(config: ModemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Decode interleaved samples into a message.
    ///
    /// Multi-channel input is down-mixed to mono by per-sample averaging
    /// before any analysis. A trailing window below the minimum-sample
    /// threshold is dropped entirely; one at or above it is zero-padded to
    /// the nominal window length and decoded as if the padding were silence.
    pub fn decode(&self, samples: &[f32], channels: usize) -> Result<DecodedMessage> {
        if channels == 0 {
            return Err(ToneCodecError::InvalidInputSize);
        }

        let window_len = self.config.window_samples();
        let peaks = match self.config.scheme {
            ToneScheme::MultiTone => PEAKS_PER_WINDOW,
            ToneScheme::SingleTone => 1,
        };

        let mut message = DecodedMessage::default();
        let mut pending_bits: Vec<BitDetection> = Vec::new();

        for chunk in samples.chunks(window_len * channels) {
            let frames = chunk.len() / channels;
            if frames < self.config.min_window_samples {
                info!(
                    "dropping trailing window with {} of {} samples",
                    frames, window_len
                );
                continue;
            }
            info!("read {} samples", frames);

            let window = downmix(chunk, channels, frames, window_len);
            let frequencies =
                spectrum::dominant_frequencies(&window, self.config.sample_rate, peaks)?;

            match self.config.scheme {
                ToneScheme::MultiTone => {
                    let byte = classifier::classify(
                        &frequencies,
                        &self.config.bit_tones,
                        self.config.tolerance_hz,
                    );
                    match byte.printable() {
                        Some(c) => debug!("decoded byte {:08b} ({})", byte.value, c),
                        None => debug!("decoded byte {:08b} (non-printable)", byte.value),
                    }
                    message.bytes.push(byte);
                }
                ToneScheme::SingleTone => {
                    match classifier::match_tone(
                        &frequencies,
                        &self.config.single_tone,
                        self.config.tolerance_hz,
                    ) {
                        Some((frequency, bit)) => {
                            debug!("dominant frequency {:.1} Hz -> bit {}", frequency, bit as u8);
                            pending_bits.push(BitDetection {
                                frequency: Some(frequency),
                                value: bit,
                            });
                        }
                        None => debug!(
                            "dominant frequency {:?} matches no candidate, window skipped",
                            frequencies.first()
                        ),
                    }
                    if pending_bits.len() == 8 {
                        message.bytes.push(assemble_bits(&pending_bits));
                        pending_bits.clear();
                    }
                }
            }
        }

        if !pending_bits.is_empty() {
            debug!(
                "dropping {} trailing bits that do not form a full byte",
                pending_bits.len()
            );
        }
        Ok(message)
    }
}

/// Average interleaved frames down to one mono window of `window_len`
/// samples, zero-padding past `frames`.
fn downmix(chunk: &[f32], channels: usize, frames: usize, window_len: usize) -> Vec<f32> {
    let mut window = vec![0.0f32; window_len];
    for (frame, slot) in window.iter_mut().enumerate().take(frames) {
        let start = frame * channels;
        let mut sum = 0.0f32;
        for channel in 0..channels {
            sum += chunk[start + channel];
        }
        *slot = sum / channels as f32;
    }
    window
}

fn assemble_bits(bits: &[BitDetection]) -> DecodedByte {
    debug_assert_eq!(bits.len(), 8);
    let mut value = 0u8;
    let mut out = [BitDetection::none(); 8];
    for (position, detection) in bits.iter().enumerate() {
        value |= (detection.value as u8) << (7 - position);
        out[position] = *detection;
    }
    DecodedByte { value, bits: out }
}
