//! Domain error types.

/// Top-level error type for climtrend.
#[derive(Debug, thiserror::Error)]
pub enum ClimtrendError {
    #[error("empty input: {what} has no elements")]
    EmptyInput { what: String },

    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },

    #[error("length mismatch: {xs} x-coordinates but {ys} y-coordinates")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("no panels could be computed")]
    NoPanels,

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

    #[error("{file}:{line}: {reason}")]
    DataParse {
        file: String,
        line: u64,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ClimtrendError {
    pub(crate) fn empty(what: &str) -> Self {
        ClimtrendError::EmptyInput {
            what: what.to_string(),
        }
    }

    pub(crate) fn degenerate(reason: &str) -> Self {
        ClimtrendError::DegenerateInput {
            reason: reason.to_string(),
        }
    }
}

impl From<&ClimtrendError> for std::process::ExitCode {
    fn from(err: &ClimtrendError) -> Self {
        let code: u8 = match err {
            ClimtrendError::Io(_) => 1,
            ClimtrendError::ConfigParse { .. }
            | ClimtrendError::ConfigMissing { .. }
            | ClimtrendError::ConfigInvalid { .. } => 2,
            ClimtrendError::DataParse { .. } => 3,
            ClimtrendError::EmptyInput { .. }
            | ClimtrendError::DegenerateInput { .. }
            | ClimtrendError::LengthMismatch { .. } => 4,
            ClimtrendError::NoPanels => 5,
        };
        std::process::ExitCode::from(code)
    }
}
