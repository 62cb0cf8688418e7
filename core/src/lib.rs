//! Parallel-tone FSK codec for embedding binary messages in audio
//!
//! Each symbol window carries one byte as eight simultaneous guard-banded
//! tones (or one bit as a single tone in the alternate wire format); decode
//! recovers the message by FFT peak analysis of fixed-length windows.

pub mod classifier;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fft;
pub mod spectrum;
pub mod synth;

pub use classifier::{BitDetection, DecodedByte};
pub use config::{ModemConfig, TonePair, ToneScheme};
pub use decoder::{DecodedMessage, Decoder};
pub use encoder::{parse_binary_message, Encoder};
pub use error::{Result, ToneCodecError};

// Configuration defaults

/// Default sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// Default symbol rate: one symbol window per second
pub const DEFAULT_SYMBOL_RATE: f32 = 1.0;

/// Default synthesizer output level in dBFS
pub const DEFAULT_LEVEL_DBFS: f32 = -3.0;

/// Default frequency match tolerance in Hz (strict less-than comparison)
pub const DEFAULT_TOLERANCE_HZ: f32 = 50.0;

/// Default minimum frames per window for the one-second default window;
/// shorter trailing windows are dropped rather than decoded
pub const DEFAULT_MIN_WINDOW_SAMPLES: usize = 44000;

/// Strongest spectral peaks examined per multi-tone window
pub const PEAKS_PER_WINDOW: usize = 8;

/// Minimum separation between any two candidate tones in Hz
pub const MIN_GUARD_BAND_HZ: f32 = 150.0;
