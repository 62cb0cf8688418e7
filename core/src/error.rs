use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToneCodecError {
    #[error("transform length {0} is not a power of two")]
    NonPowerOfTwoWindow(usize),

    #[error("invalid input size")]
    InvalidInputSize,

    #[error("message contains no decodable bits")]
    EmptyMessage,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ToneCodecError>;
