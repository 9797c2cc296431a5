use std::{
    num::{ParseFloatError, ParseIntError, TryFromIntError},
    path::PathBuf,
    str::Utf8Error,
};
use thiserror::Error;

pub type VarifyResult<T> = std::result::Result<T, VarifyError>;

#[derive(Debug, Error)]
pub enum VarifyError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Htslib(#[from] rust_htslib::errors::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Utf8(#[from] Utf8Error),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),
    #[error(transparent)]
    TryFromInt(#[from] TryFromIntError),
    #[error("Invalid VCF {}: {message}", path.display())]
    Format { path: PathBuf, message: String },
    #[error("Unknown merge convention: {value} (expected 'bcf' or 'survivor')")]
    InvalidConvention { value: String },
}

impl VarifyError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[macro_export]
macro_rules! varify_error {
    ($($arg:tt)*) => {
        $crate::error::VarifyError::message(format!($($arg)*))
    };
}
