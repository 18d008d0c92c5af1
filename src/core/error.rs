use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("Failed to open input file: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read count of packets: need 4 bytes, have {available}")]
    TruncatedStream { available: usize },

    #[error("Packet {index}: truncated {part} (declared {expected} bytes, have {available})")]
    TruncatedRecord {
        index: u32,
        part: RecordPart,
        expected: usize,
        available: usize,
    },

    #[error("Packet {index}: declared length {declared} exceeds the {capacity}-byte payload capacity")]
    RecordTooLarge {
        index: u32,
        declared: u32,
        capacity: usize,
    },

    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPart {
    LengthPrefix,
    Payload,
}

impl std::fmt::Display for RecordPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordPart::LengthPrefix => write!(f, "length prefix"),
            RecordPart::Payload => write!(f, "payload"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("header too short: need 20 bytes, have {length}")]
    HeaderTooShort { length: usize },
}

/// パケット単位のエラー (ポリシーに従ってスキップまたは中断)
#[derive(Error, Debug)]
pub enum RecordError {
    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("Packet {index}: {source}")]
    Decode {
        index: u32,
        #[source]
        source: DecodeError,
    },
}

impl RecordError {
    pub fn index(&self) -> Option<u32> {
        match self {
            RecordError::Container(ContainerError::TruncatedRecord { index, .. })
            | RecordError::Container(ContainerError::RecordTooLarge { index, .. })
            | RecordError::Decode { index, .. } => Some(*index),
            RecordError::Container(_) => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum DissectError {
    #[error("usage: dissect-packets inputFile ({0})")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to set up logger: {0}")]
    Logger(String),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("Aborted at packet {index} of {packet_count}")]
    Aborted { index: u32, packet_count: u32 },

    #[error("Stream ended early at packet {index} of {packet_count}: {unread} more packets were not read")]
    Incomplete { index: u32, packet_count: u32, unread: u32 },

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

pub type DissectResult<T> = Result<T, DissectError>;
