//! Command-line mapping for domain errors.
//!
//! Domain errors carry a stable [`ErrorCode`]; the CLI turns that into a
//! process exit code and a one-line message.

use std::io;

use thiserror::Error;

use crate::domain::{DomainError, ErrorCode};

/// Failure of a single CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A domain service refused or failed the request.
    #[error("{}", redact_if_internal(.0))]
    Domain(#[from] DomainError),
    /// Input was turned away with a display-only reason.
    #[error("{message}")]
    Rejected { message: String },
    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Domain(error) => exit_code_for(error.code()),
            Self::Rejected { .. } => 2,
            Self::Output(_) => 1,
        }
    }
}

fn exit_code_for(code: ErrorCode) -> u8 {
    match code {
        ErrorCode::InvalidRequest => 2,
        ErrorCode::Unauthorized => 3,
        ErrorCode::Forbidden => 4,
        ErrorCode::NotFound => 5,
        ErrorCode::Conflict => 6,
        ErrorCode::ServiceUnavailable => 7,
        _ => 1,
    }
}

fn redact_if_internal(error: &DomainError) -> &str {
    if error.code() == ErrorCode::InternalError {
        "Internal error"
    } else {
        error.message()
    }
}
