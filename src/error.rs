use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SeparatorError>;

/// Everything that can stop a run. Short windows are not in here; they are
/// reported as [`crate::windowing::WindowOutcome::Skipped`].
#[derive(Debug, thiserror::Error)]
pub enum SeparatorError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: required column '{column}' not found in header")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}:{line}: expected {expected} fields, found {found}")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}:{line}: cannot parse '{value}' in column '{column}'")]
    ParseValue {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
    },

    #[error("column length mismatch: time={time}, flux={flux}, flux_err={flux_err}")]
    LengthMismatch {
        time: usize,
        flux: usize,
        flux_err: usize,
    },

    #[error("{path}: unsupported input format")]
    UnsupportedFormat { path: PathBuf },

    #[cfg(feature = "fits")]
    #[error("fits error: {0}")]
    Fits(#[from] fitsio::errors::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid ephemeris: {0}")]
    InvalidEphemeris(String),

    #[error("render error: {0}")]
    Render(String),
}

impl SeparatorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SeparatorError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SeparatorError::Write {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised while loading the light curve.
    pub fn is_load_error(&self) -> bool {
        match self {
            SeparatorError::Io { .. }
            | SeparatorError::MissingColumn { .. }
            | SeparatorError::MalformedRow { .. }
            | SeparatorError::ParseValue { .. }
            | SeparatorError::LengthMismatch { .. }
            | SeparatorError::UnsupportedFormat { .. } => true,
            #[cfg(feature = "fits")]
            SeparatorError::Fits(_) => true,
            _ => false,
        }
    }
}
