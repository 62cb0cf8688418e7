use crate::error::{Result, ToneCodecError};
use crate::{
    DEFAULT_LEVEL_DBFS, DEFAULT_MIN_WINDOW_SAMPLES, DEFAULT_SAMPLE_RATE, DEFAULT_SYMBOL_RATE,
    DEFAULT_TOLERANCE_HZ, MIN_GUARD_BAND_HZ,
};

/// Candidate tone pair for one bit position: `low` signals bit value 0,
/// `high` signals bit value 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonePair {
    pub low: f32,
    pub high: f32,
}

impl TonePair {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }
}

/// Wire format variant. Both variants share the same window/transform/peak
/// machinery and differ only in how many tones occupy a symbol window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneScheme {
    /// Eight simultaneous guard-banded tones per window, one byte per window.
    MultiTone,
    /// One tone per window, one bit per window.
    SingleTone,
}

/// Per-bit frequency table. Table position `i` signals bit `7 - i` of the
/// byte, so position 0 carries the leftmost digit of the message's binary
/// string.
pub const DEFAULT_BIT_TONES: [TonePair; 8] = [
    TonePair::new(300.0, 500.0),
    TonePair::new(700.0, 900.0),
    TonePair::new(1100.0, 1300.0),
    TonePair::new(1500.0, 1700.0),
    TonePair::new(1900.0, 2100.0),
    TonePair::new(2300.0, 2500.0),
    TonePair::new(2700.0, 2900.0),
    TonePair::new(3100.0, 3300.0),
];

/// Candidate pair for the single-tone scheme.
pub const DEFAULT_SINGLE_TONE: TonePair = TonePair::new(950.0, 1950.0);

/// All tunable protocol parameters in one place, passed into the
/// synthesizer, extractor and classifier so tests can exercise alternate
/// tables and tolerances without touching the algorithms.
#[derive(Debug, Clone)]
pub struct ModemConfig {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Symbol windows per second. One window carries one byte in the
    /// multi-tone scheme and one bit in the single-tone scheme.
    pub symbol_rate: f32,
    /// Synthesizer output level in dBFS.
    pub level_dbfs: f32,
    /// Frequency match tolerance in Hz; comparison is strict less-than.
    pub tolerance_hz: f32,
    /// Windows with fewer samples than this are dropped, not decoded.
    pub min_window_samples: usize,
    pub scheme: ToneScheme,
    pub bit_tones: [TonePair; 8],
    pub single_tone: TonePair,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            symbol_rate: DEFAULT_SYMBOL_RATE,
            level_dbfs: DEFAULT_LEVEL_DBFS,
            tolerance_hz: DEFAULT_TOLERANCE_HZ,
            min_window_samples: DEFAULT_MIN_WINDOW_SAMPLES,
            scheme: ToneScheme::MultiTone,
            bit_tones: DEFAULT_BIT_TONES,
            single_tone: DEFAULT_SINGLE_TONE,
        }
    }
}

impl ModemConfig {
    /// Config for the given rates with the window-drop threshold rescaled
    /// from the one-second default (44000 of 44100 samples).
    pub fn for_rates(sample_rate: f32, symbol_rate: f32) -> Self {
        let mut config = Self {
            sample_rate,
            symbol_rate,
            ..Self::default()
        };
        let window = config.window_samples();
        config.min_window_samples = window.saturating_sub(window / 441);
        config
    }

    /// Nominal frames per symbol window.
    pub fn window_samples(&self) -> usize {
        (self.sample_rate / self.symbol_rate).round() as usize
    }

    /// Duration of one symbol window in seconds.
    pub fn symbol_duration(&self) -> f32 {
        1.0 / self.symbol_rate
    }

    /// Every candidate tone the active scheme can emit.
    fn candidate_tones(&self) -> Vec<f32> {
        match self.scheme {
            ToneScheme::MultiTone => self
                .bit_tones
                .iter()
                .flat_map(|pair| [pair.low, pair.high])
                .collect(),
            ToneScheme::SingleTone => vec![self.single_tone.low, self.single_tone.high],
        }
    }

    /// Check the table and rate invariants. Called by the encoder and
    /// decoder constructors.
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate > 0.0) {
            return Err(ToneCodecError::InvalidConfig(
                "sample rate must be positive".to_string(),
            ));
        }
        if !(self.symbol_rate > 0.0) {
            return Err(ToneCodecError::InvalidConfig(
                "symbol rate must be positive".to_string(),
            ));
        }
        if !(self.tolerance_hz > 0.0) {
            return Err(ToneCodecError::InvalidConfig(
                "tolerance must be positive".to_string(),
            ));
        }
        if self.window_samples() == 0 {
            return Err(ToneCodecError::InvalidConfig(
                "symbol window is empty at this rate".to_string(),
            ));
        }
        if self.min_window_samples > self.window_samples() {
            return Err(ToneCodecError::InvalidConfig(format!(
                "minimum window threshold {} exceeds window length {}",
                self.min_window_samples,
                self.window_samples()
            )));
        }

        let mut tones = self.candidate_tones();
        tones.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let nyquist = self.sample_rate / 2.0;
        if tones.iter().any(|&f| f <= 0.0 || f >= nyquist) {
            return Err(ToneCodecError::InvalidConfig(format!(
                "candidate tones must lie strictly between 0 Hz and the Nyquist rate {nyquist} Hz"
            )));
        }

        for pair in tones.windows(2) {
            let gap = pair[1] - pair[0];
            if gap < MIN_GUARD_BAND_HZ {
                return Err(ToneCodecError::InvalidConfig(format!(
                    "tones {} Hz and {} Hz violate the {} Hz guard band",
                    pair[0], pair[1], MIN_GUARD_BAND_HZ
                )));
            }
            // A detected frequency must never fall within tolerance of two
            // candidates at once.
            if gap <= 2.0 * self.tolerance_hz {
                return Err(ToneCodecError::InvalidConfig(format!(
                    "tolerance {} Hz is ambiguous for tones {} Hz and {} Hz",
                    self.tolerance_hz, pair[0], pair[1]
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ModemConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_samples(), 44100);
    }

    #[test]
    fn test_default_single_tone_config_is_valid() {
        let config = ModemConfig {
            scheme: ToneScheme::SingleTone,
            ..ModemConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_for_rates_scales_threshold() {
        let config = ModemConfig::for_rates(44100.0, 1.0);
        assert_eq!(config.min_window_samples, 44000);

        let config = ModemConfig::for_rates(8192.0, 1.0);
        assert_eq!(config.window_samples(), 8192);
        assert_eq!(config.min_window_samples, 8174);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_guard_band_violation_rejected() {
        let mut config = ModemConfig::default();
        config.bit_tones[1] = TonePair::new(400.0, 900.0);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ToneCodecError::InvalidConfig(_)));
    }

    #[test]
    fn test_ambiguous_tolerance_rejected() {
        let config = ModemConfig {
            // Half the minimum 200 Hz candidate gap: a frequency midway
            // between two tones would match both.
            tolerance_hz: 100.0,
            ..ModemConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tones_above_nyquist_rejected() {
        let config = ModemConfig {
            sample_rate: 6000.0,
            ..ModemConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_above_window_rejected() {
        let config = ModemConfig {
            symbol_rate: 2.0, // 22050-sample window, default threshold 44000
            ..ModemConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
