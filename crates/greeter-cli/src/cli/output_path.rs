//! Validation for the `--out` path.

use std::path::PathBuf;

use thiserror::Error;

pub const MAX_PATH_LENGTH: usize = 4096;
pub const MAX_TRAVERSAL_SEGMENTS: usize = 10;

/// Windows device names that cannot be used as a file name on any extension.
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Why an output path was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutputPathError {
    #[error("path must not be blank")]
    Blank,

    #[error("path is {length} characters long (max {max})")]
    TooLong { length: usize, max: usize },

    #[error("path has {count} '..' segments (max {max})")]
    TooManyTraversals { count: usize, max: usize },

    #[error("'{name}' is a reserved device name")]
    ReservedName { name: String },

    #[error("path contains a null byte")]
    NullByte,
}

/// Check a raw `--out` value and turn it into a path.
pub fn validate_output_path(raw: &str) -> Result<PathBuf, OutputPathError> {
    if raw.trim().is_empty() {
        return Err(OutputPathError::Blank);
    }

    if raw.contains('\0') {
        return Err(OutputPathError::NullByte);
    }

    let length = raw.chars().count();
    if length > MAX_PATH_LENGTH {
        return Err(OutputPathError::TooLong {
            length,
            max: MAX_PATH_LENGTH,
        });
    }

    let count = raw.split(['/', '\\']).filter(|seg| *seg == "..").count();
    if count > MAX_TRAVERSAL_SEGMENTS {
        return Err(OutputPathError::TooManyTraversals {
            count,
            max: MAX_TRAVERSAL_SEGMENTS,
        });
    }

    if let Some(name) = reserved_base_name(raw) {
        return Err(OutputPathError::ReservedName { name });
    }

    Ok(PathBuf::from(raw))
}

/// The base name up to its first `.`, if it names a reserved device.
fn reserved_base_name(raw: &str) -> Option<String> {
    let file_name = raw.rsplit(['/', '\\']).next()?;
    let stem = file_name.split('.').next()?.trim_end();
    RESERVED_NAMES
        .iter()
        .any(|reserved| stem.eq_ignore_ascii_case(reserved))
        .then(|| stem.to_owned())
}
