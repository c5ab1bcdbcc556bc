//! Domain error types.

/// Top-level error type for sigtrader.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("insufficient data for {strategy}: have {bars} bars, need {minimum}")]
    InsufficientData {
        strategy: String,
        bars: usize,
        minimum: usize,
    },

    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error("strategy {strategy} cannot be evaluated here: {reason}")]
    UnsupportedStrategy { strategy: String, reason: String },

    #[error("invalid trade direction '{value}' (expected long or short)")]
    InvalidDirection { value: String },

    #[error("invalid correlation matrix: {reason}")]
    InvalidMatrix { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SignalError> for std::process::ExitCode {
    fn from(err: &SignalError) -> Self {
        let code: u8 = match err {
            SignalError::Io(_) => 1,
            SignalError::ConfigParse { .. }
            | SignalError::ConfigMissing { .. }
            | SignalError::ConfigInvalid { .. } => 2,
            SignalError::Data { .. } => 3,
            SignalError::UnknownStrategy { .. }
            | SignalError::UnsupportedStrategy { .. }
            | SignalError::InvalidDirection { .. } => 4,
            SignalError::InsufficientData { .. } => 5,
            SignalError::InvalidMatrix { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
