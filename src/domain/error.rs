//! Engine and pipeline error types.

/// Top-level error type for quickbt.
#[derive(Debug, thiserror::Error)]
pub enum QuickbtError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("invalid strategy parameters: {reason}")]
    InvalidConfig { reason: String },

    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error("series and signals differ in length: {bars} bars, {signals} signals")]
    MisalignedInput { bars: usize, signals: usize },

    #[error("no signal series supplied")]
    MissingSignals,

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

impl From<&QuickbtError> for std::process::ExitCode {
    fn from(err: &QuickbtError) -> Self {
        let code: u8 = match err {
            QuickbtError::Io(_) => 1,
            QuickbtError::ConfigParse { .. }
            | QuickbtError::ConfigMissing { .. }
            | QuickbtError::ConfigInvalid { .. } => 2,
            QuickbtError::InvalidConfig { .. } | QuickbtError::UnknownStrategy { .. } => 3,
            QuickbtError::Data { .. } | QuickbtError::InvalidInput { .. } => 4,
            QuickbtError::MisalignedInput { .. } | QuickbtError::MissingSignals => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = QuickbtError::UnknownStrategy {
            name: "bollinger".into(),
        };
        assert_eq!(err.to_string(), "unknown strategy: bollinger");

        let err = QuickbtError::MisalignedInput {
            bars: 10,
            signals: 9,
        };
        assert_eq!(
            err.to_string(),
            "series and signals differ in length: 10 bars, 9 signals"
        );

        let err = QuickbtError::ConfigMissing {
            section: "strategy".into(),
            key: "name".into(),
        };
        assert_eq!(err.to_string(), "missing config key [strategy] name");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::other("boom");
        let err = QuickbtError::from(io);
        assert!(matches!(err, QuickbtError::Io(_)));
    }
}
