use thiserror::Error;

#[derive(Error, Debug)]
pub enum BitrunError {
    /// No bit run of any tested length repeats in the input.
    #[error("no repeated bit run found")]
    NoRepeat,

    /// The block transform wrote a different number of bits than the cost
    /// model declared. Never expected in a correct build.
    #[error("internal inconsistency: declared {declared} bits, wrote {written}")]
    InternalInconsistency { declared: usize, written: usize },

    /// Value does not fit the widest VarLen class.
    #[error("value {0} exceeds the VarLen range")]
    EncodingRangeExceeded(u64),

    /// Malformed or truncated container data.
    #[error("container error: {0}")]
    Container(String),

    /// Malformed archive file framing.
    #[error("archive error: {0}")]
    Archive(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive body could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}
