// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::fmt;
use std::process::ExitCode;

/// CLI-specific error type with exit code mapping
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line arguments or unusable input files
    InvalidArgs(String),
    /// No camera could be enumerated
    CameraNotFound(String),
    /// A camera reported no resolutions in strict mode
    NoResolutions(String),
    /// One or more output files could not be written
    Output(String),
    /// General error from the camres library
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidArgs(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::CameraNotFound(msg) => write!(f, "Camera not found: {}", msg),
            CliError::NoResolutions(msg) => write!(f, "No resolutions: {}", msg),
            CliError::Output(msg) => write!(f, "Output failed: {}", msg),
            CliError::General(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    fn code(&self) -> u8 {
        match self {
            CliError::InvalidArgs(_) => 2,
            CliError::CameraNotFound(_) => 3,
            CliError::NoResolutions(_) => 4,
            CliError::Output(_) => 5,
            CliError::General(_) => 1,
        }
    }
}

/// Map camres::Error to CliError with appropriate exit codes
impl From<camres::Error> for CliError {
    fn from(err: camres::Error) -> Self {
        use camres::Error;

        match err {
            Error::Unavailable(msg) => CliError::CameraNotFound(msg),

            Error::Io(io_err) => match io_err.kind() {
                std::io::ErrorKind::NotFound => {
                    CliError::CameraNotFound(format!("Device not found: {}", io_err))
                }
                std::io::ErrorKind::PermissionDenied => {
                    CliError::CameraNotFound(format!("Permission denied: {}", io_err))
                }
                _ => CliError::General(format!("I/O error: {}", io_err)),
            },

            Error::Json(json_err) => {
                CliError::InvalidArgs(format!("Invalid capability dump: {}", json_err))
            }

            Error::InvalidData(msg) => CliError::General(msg),
        }
    }
}

/// Helper function to convert result to exit code
pub fn result_to_exit_code<T>(result: Result<T, CliError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}
