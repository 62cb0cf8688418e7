use crate::config::TonePair;
use log::debug;

/// Outcome of one bit position: the detected frequency that matched a
/// candidate tone (if any) and the resolved bit value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitDetection {
    pub frequency: Option<f32>,
    pub value: bool,
}

impl BitDetection {
    pub const fn none() -> Self {
        Self {
            frequency: None,
            value: false,
        }
    }
}

/// One decoded byte together with its per-position detections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedByte {
    pub value: u8,
    pub bits: [BitDetection; 8],
}

impl DecodedByte {
    /// ASCII rendering when the byte falls in the printable range.
    pub fn printable(&self) -> Option<char> {
        if (0x20..0x7F).contains(&self.value) {
            Some(self.value as char)
        } else {
            None
        }
    }
}

/// Map a set of detected frequencies to a byte using the per-bit tone table.
///
/// Each position is resolved independently: the detected frequency with the
/// smallest distance to either candidate wins, provided that distance is
/// strictly below the tolerance. Positions with no match default to 0.
/// Table position `i` contributes its bit value at weight `7 - i`.
pub fn classify(frequencies: &[f32], tones: &[TonePair; 8], tolerance_hz: f32) -> DecodedByte {
    let mut value = 0u8;
    let mut bits = [BitDetection::none(); 8];

    for (position, pair) in tones.iter().enumerate() {
        match match_tone(frequencies, pair, tolerance_hz) {
            Some((frequency, bit)) => {
                debug!(
                    "bit {}: matched {:.1} Hz -> {}",
                    position, frequency, bit as u8
                );
                value |= (bit as u8) << (7 - position);
                bits[position] = BitDetection {
                    frequency: Some(frequency),
                    value: bit,
                };
            }
            None => {
                debug!("bit {}: no frequency detected, defaulting to 0", position);
            }
        }
    }

    DecodedByte { value, bits }
}

/// Find the detected frequency closest to either candidate of `pair`.
///
/// Tracks the single smallest difference seen across both candidates,
/// resetting the winning bit value whenever a strictly smaller difference
/// appears; a candidate is only accepted when its difference is strictly
/// less than the tolerance.
pub fn match_tone(
    frequencies: &[f32],
    pair: &TonePair,
    tolerance_hz: f32,
) -> Option<(f32, bool)> {
    let mut best: Option<(f32, f32, bool)> = None;

    for &frequency in frequencies {
        for (candidate, bit) in [(pair.low, false), (pair.high, true)] {
            let diff = (frequency - candidate).abs();
            if diff < tolerance_hz && best.map_or(true, |(best_diff, _, _)| diff < best_diff) {
                best = Some((diff, frequency, bit));
            }
        }
    }

    best.map(|(_, frequency, bit)| (frequency, bit))
}
