// src/error.rs
//
// Error code table reported by platform backends, and the crate error type.
//
// Backends raise `ErrorCode`s when opening, configuring or talking to a port
// fails. This crate only names them; it never produces them itself.

use std::fmt;

use crate::params::ERROR;
use thiserror::Error;

// ============================================================================
// Error Code Table
// ============================================================================

/// Failure kinds a backend can report. Discriminants are indices into the
/// error domain table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    NoError,
    Unknown,
    Open,
    Close,
    Flush,
    Config,
    Read,
    Write,
    Select,
    Timeout,
    Ioctl,
    PortClosed,
}

impl ErrorCode {
    /// Sentinel one past the last valid code.
    pub const MAX: u32 = ERROR.size();

    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::NoError,
        ErrorCode::Unknown,
        ErrorCode::Open,
        ErrorCode::Close,
        ErrorCode::Flush,
        ErrorCode::Config,
        ErrorCode::Read,
        ErrorCode::Write,
        ErrorCode::Select,
        ErrorCode::Timeout,
        ErrorCode::Ioctl,
        ErrorCode::PortClosed,
    ];

    pub const fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        ERROR.table()[self as usize]
    }

    pub const fn is_error(self) -> bool {
        !matches!(self, ErrorCode::NoError)
    }
}

const _: () = assert!(ErrorCode::ALL.len() == ERROR.table().len());

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for ErrorCode {}

/// Render a raw error index. `None` for anything at or past `ErrorCode::MAX`.
pub fn strerror(error: u32) -> Option<&'static str> {
    crate::tlog_trace!("[rs232] strerror error={}", error);
    ERROR.name_of(error)
}

// ============================================================================
// Crate Error
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Text matched no entry of the domain table
    #[error("Unrecognized {domain} value: {input:?}")]
    UnrecognizedValue { domain: &'static str, input: String },

    /// Index at or past the domain sentinel
    #[error("{domain} index {index} is out of range")]
    IndexOutOfRange { domain: &'static str, index: u32 },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    /// Failure reported by a platform backend
    #[error("{0}")]
    Backend(#[from] ErrorCode),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Tests
// ============================================================================
