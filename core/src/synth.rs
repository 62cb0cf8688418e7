use crate::config::{ModemConfig, ToneScheme};
use crate::error::{Result, ToneCodecError};
use std::f64::consts::PI;

/// Convert a dBFS level to linear amplitude.
pub fn db_to_amplitude(level_dbfs: f32) -> f32 {
    10.0f32.powf(level_dbfs / 20.0)
}

/// Render a byte message as mono 16-bit PCM under the configured scheme.
///
/// Phase accumulates in f64: a long message drives `2*pi*f*t` into the
/// millions of radians, where f32 rounding turns into audible phase noise.
pub fn synthesize(message: &[u8], config: &ModemConfig) -> Result<Vec<i16>> {
    if message.is_empty() {
        return Err(ToneCodecError::EmptyMessage);
    }
    match config.scheme {
        ToneScheme::MultiTone => Ok(multi_tone(message, config)),
        ToneScheme::SingleTone => Ok(single_tone(message, config)),
    }
}

/// Eight simultaneous tones per symbol window, one byte per window. Bit
/// `7 - i` of the current byte selects table position `i`'s low or high
/// candidate; the eight sinusoids are averaged and scaled to the output
/// level.
fn multi_tone(message: &[u8], config: &ModemConfig) -> Vec<i16> {
    let sample_rate = config.sample_rate as f64;
    let amplitude = db_to_amplitude(config.level_dbfs) as f64;
    let symbol_duration = 1.0 / config.symbol_rate as f64;
    let total_duration = symbol_duration * message.len() as f64;
    let sample_count = (total_duration * sample_rate).round() as usize;

    let mut samples = Vec::with_capacity(sample_count);
    for n in 0..sample_count {
        let t = n as f64 / sample_rate;
        // Samples pushed past the intended duration by rounding carry the
        // last byte rather than silence.
        let index = ((t / symbol_duration) as usize).min(message.len() - 1);
        let byte = message[index];

        let mut sum = 0.0f64;
        for (position, pair) in config.bit_tones.iter().enumerate() {
            let bit = (byte >> (7 - position)) & 1;
            let frequency = f64::from(if bit == 1 { pair.high } else { pair.low });
            sum += (2.0 * PI * frequency * t).sin();
        }

        let sample = (sum / config.bit_tones.len() as f64) * amplitude * 32767.0;
        samples.push(sample as i16);
    }
    samples
}

/// One tone per symbol window, one bit per window, bits taken MSB-first.
fn single_tone(message: &[u8], config: &ModemConfig) -> Vec<i16> {
    let sample_rate = config.sample_rate as f64;
    let amplitude = db_to_amplitude(config.level_dbfs) as f64;
    let symbol_duration = 1.0 / config.symbol_rate as f64;
    let bit_count = message.len() * 8;
    let total_duration = symbol_duration * bit_count as f64;
    let sample_count = (total_duration * sample_rate).round() as usize;

    let mut samples = Vec::with_capacity(sample_count);
    for n in 0..sample_count {
        let t = n as f64 / sample_rate;
        let index = ((t / symbol_duration) as usize).min(bit_count - 1);
        let bit = (message[index / 8] >> (7 - index % 8)) & 1;
        let frequency = f64::from(if bit == 1 {
            config.single_tone.high
        } else {
            config.single_tone.low
        });

        let sample = (2.0 * PI * frequency * t).sin() * amplitude * 32767.0;
        samples.push(sample as i16);
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ModemConfig {
        ModemConfig::for_rates(8000.0, 1.0)
    }

    #[test]
    fn test_db_to_amplitude() {
        assert!((db_to_amplitude(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_amplitude(-3.0) - 0.70795).abs() < 1e-4);
        assert!((db_to_amplitude(-6.0) - 0.50119).abs() < 1e-4);
    }

    #[test]
    fn test_empty_message_rejected() {
        let result = synthesize(&[], &test_config());
        assert!(matches!(result, Err(ToneCodecError::EmptyMessage)));
    }

    #[test]
    fn test_multi_tone_sample_count() {
        let samples = synthesize(&[0x41, 0x42], &test_config()).unwrap();
        assert_eq!(samples.len(), 16000);
    }

    #[test]
    fn test_single_tone_sample_count() {
        let config = ModemConfig {
            scheme: ToneScheme::SingleTone,
            ..test_config()
        };
        // One byte is eight one-second bit windows.
        let samples = synthesize(&[0x41], &config).unwrap();
        assert_eq!(samples.len(), 64000);
    }

    #[test]
    fn test_output_level_bounds_samples() {
        let samples = synthesize(&[0xFF], &test_config()).unwrap();
        let limit = (db_to_amplitude(-3.0) * 32767.0) as i16 + 1;
        assert!(samples.iter().all(|&s| s.abs() <= limit));
        // The window must carry actual signal, not silence.
        assert!(samples.iter().any(|&s| s.abs() > 1000));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let config = test_config();
        let first = synthesize(&[0xA5, 0x5A], &config).unwrap();
        let second = synthesize(&[0xA5, 0x5A], &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_bytes_produce_distinct_windows() {
        let config = test_config();
        let zero = synthesize(&[0x00], &config).unwrap();
        let ones = synthesize(&[0xFF], &config).unwrap();
        assert_eq!(zero.len(), ones.len());
        assert!(zero.iter().zip(&ones).any(|(a, b)| a != b));
    }
}
