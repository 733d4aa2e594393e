//! Domain error types.

/// Top-level error type for capspread.
#[derive(Debug, thiserror::Error)]
pub enum CapspreadError {
    #[error("data unavailable for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },

    #[error("insufficient data: {days} aligned trading days, need at least 2")]
    InsufficientData { days: usize },

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

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CapspreadError {
    pub(crate) fn data(ticker: &str, reason: impl Into<String>) -> Self {
        CapspreadError::DataUnavailable {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&CapspreadError> for std::process::ExitCode {
    fn from(err: &CapspreadError) -> Self {
        let code: u8 = match err {
            CapspreadError::Io(_) => 1,
            CapspreadError::ConfigParse { .. }
            | CapspreadError::ConfigMissing { .. }
            | CapspreadError::ConfigInvalid { .. } => 2,
            CapspreadError::DataUnavailable { .. } | CapspreadError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
