use crate::config::{ModemConfig, ToneScheme};
use crate::error::{Result, ToneCodecError};
use crate::synth;
use log::warn;

/// Encode-side driver: validates the configuration once, parses
/// binary-digit message strings, and renders PCM through the synthesizer.
pub struct Encoder {
    config: ModemConfig,
}

impl Encoder {
    pub fn new(config: ModemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Render a byte message as mono 16-bit PCM.
    pub fn encode(&self, message: &[u8]) -> Result<Vec<i16>> {
        synth::synthesize(message, &self.config)
    }

    /// Render a binary-digit string (e.g. `"01000001"`) as mono 16-bit PCM.
    pub fn encode_binary(&self, message: &str) -> Result<Vec<i16>> {
        let bytes = parse_binary_message(message)?;
        self.encode(&bytes)
    }

    /// Seconds of audio a message of `byte_count` bytes will occupy.
    pub fn duration_secs(&self, byte_count: usize) -> f32 {
        let symbols = match self.config.scheme {
            ToneScheme::MultiTone => byte_count,
            ToneScheme::SingleTone => byte_count * 8,
        };
        symbols as f32 / self.config.symbol_rate
    }
}

/// Convert a binary-digit string to bytes, eight digits per byte, first
/// digit at the highest weight.
///
/// Characters other than `0`/`1` are skipped with a warning, and a trailing
/// group shorter than eight digits is dropped with a warning; both are soft
/// failures. A message with no complete byte is an error.
pub fn parse_binary_message(message: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut current = 0u8;
    let mut count = 0usize;

    for c in message.chars() {
        let bit = match c {
            '0' => 0,
            '1' => 1,
            _ => {
                warn!("ignoring invalid message character {:?}", c);
                continue;
            }
        };
        current = (current << 1) | bit;
        count += 1;
        if count % 8 == 0 {
            bytes.push(current);
            current = 0;
        }
    }

    if count % 8 != 0 {
        warn!(
            "dropping {} trailing digits that do not form a full byte",
            count % 8
        );
    }
    if bytes.is_empty() {
        return Err(ToneCodecError::EmptyMessage);
    }
    Ok(bytes)
}
