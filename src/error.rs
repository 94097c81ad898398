use std::{collections::TryReserveError, io, string::FromUtf8Error};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Absent path or handle, or unusable read options
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Metadata could not be fetched or the source could not be opened
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] io::Error),

    /// Every read attempt failed
    #[error("giving up after {attempts} failed read attempts")]
    ReadExhausted { attempts: usize },

    /// The source resolved to zero bytes
    #[error("source is empty")]
    EmptySource,

    /// On request for a line outside of `1..=total`
    #[error("line {line} is out of range (1..={total})")]
    LineOutOfRange { line: usize, total: usize },

    /// The requested line holds no bytes
    #[error("line {0} is empty")]
    EmptyLine(usize),

    #[error("allocation failed")]
    AllocationFailure,

    #[error("line is not valid UTF-8")]
    Utf8,
}

impl From<FromUtf8Error> for Error {
    fn from(_: FromUtf8Error) -> Self {
        Self::Utf8
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Self::AllocationFailure
    }
}
