//! The `error` module defines the [`MappingError`] enum that describes the errors that
//! can occur when loading or saving a [`MappingTable`](crate::MappingTable), or when
//! reading and writing the binary files of a [`Session`](crate::Session).
//! It carries two pieces of information:
//! 1. What stage failed, e.g., opening the file, writing it, or interpreting its contents.
//! 2. What exactly was wrong with the contents (via [`ParseErrorKind`]), if applicable.
//!
//! Encoding and decoding never fail, so there is no error type for them.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub enum MappingError {
    /// File does not exist
    FileNotFound(PathBuf),
    /// File exists but could not be read
    FileUnreadable(PathBuf, io::ErrorKind),
    /// File could not be created or written
    FileUnwritable(PathBuf, io::ErrorKind),
    /// Document contents are not a valid mapping
    ParseError(ParseErrorKind),
    /// Key is not exactly two hex digits
    InvalidKey(String),
}

impl MappingError {
    /// Classify an I/O error that happened while reading `path`.
    pub(crate) fn from_read(path: PathBuf, err: &io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound(path)
        } else {
            Self::FileUnreadable(path, err.kind())
        }
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => {
                write!(f, "File not found: {}", path.display())
            }
            Self::FileUnreadable(path, kind) => {
                write!(f, "File {} could not be read: {kind}", path.display())
            }
            Self::FileUnwritable(path, kind) => {
                write!(f, "File {} could not be written: {kind}", path.display())
            }
            Self::ParseError(base_err) => {
                write!(f, "Error encountered during mapping parsing:\n{base_err}")
            }
            Self::InvalidKey(key) => {
                write!(
                    f,
                    "Invalid mapping key '{key}': expected exactly two hex digits"
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Document is not valid JSON
    MalformedJson(String),
    /// Top level of the document is not an object
    NotAnObject,
    /// Value stored under the key is not a string
    ValueNotString(String),
    /// Value does not begin with '0x'
    MissingPrefix(String),
    /// Value has an odd number of hex digits
    OddDigitCount(String),
    /// Value contains non-hexadecimal characters
    InvalidHexDigit(String),
    /// Value has no bytes after '0x'
    EmptyReplacement(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson(msg) => {
                write!(f, "Malformed JSON document: {msg}")
            }
            Self::NotAnObject => {
                write!(f, "Expected a flat JSON object at the top level")
            }
            Self::ValueNotString(key) => {
                write!(f, "Value for key '{key}' is not a string")
            }
            Self::MissingPrefix(value) => {
                write!(f, "Replacement '{value}' does not start with '0x'")
            }
            Self::OddDigitCount(value) => {
                write!(f, "Replacement '{value}' has an odd number of hex digits")
            }
            Self::InvalidHexDigit(value) => {
                write!(f, "Replacement '{value}' contains invalid character(s)")
            }
            Self::EmptyReplacement(value) => {
                write!(f, "Replacement '{value}' contains no bytes")
            }
        }
    }
}

impl Error for MappingError {}
impl Error for ParseErrorKind {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_read_not_found() {
        // Arrange
        let err = io::Error::from(io::ErrorKind::NotFound);

        // Act
        let res = MappingError::from_read(PathBuf::from("missing.json"), &err);

        // Assert
        assert_eq!(res, MappingError::FileNotFound(PathBuf::from("missing.json")));
    }

    #[test]
    fn test_from_read_other_kind() {
        // Arrange
        let err = io::Error::from(io::ErrorKind::PermissionDenied);

        // Act
        let res = MappingError::from_read(PathBuf::from("locked.json"), &err);

        // Assert
        assert_eq!(
            res,
            MappingError::FileUnreadable(PathBuf::from("locked.json"), io::ErrorKind::PermissionDenied)
        );
    }

    #[test]
    fn test_display_nests_parse_kind() {
        let err = MappingError::ParseError(ParseErrorKind::InvalidHexDigit("0xGG".into()));

        let msg = err.to_string();

        assert!(msg.contains("mapping parsing"));
        assert!(msg.contains("'0xGG'"));
    }
}
