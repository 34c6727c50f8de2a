use std::{
    fmt, io,
    num::{ParseFloatError, ParseIntError},
    path::PathBuf,
};

use thiserror::Error;

/// Why a configuration line could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedLine {
    /// A coordinate line did not contain exactly two comma-separated fields.
    #[error("expected `x,y` coordinates but found {fields} field(s)")]
    FieldCount {
        /// Number of comma-separated fields present.
        fields: usize,
    },
    /// A coordinate field was not a number.
    #[error("coordinate `{raw}` is not a number: {source}")]
    Coordinate {
        /// The rejected text.
        raw: String,
        /// Underlying parse failure.
        #[source]
        source: ParseFloatError,
    },
    /// A floating-point parameter was not a number.
    #[error("value of `{key}` is not a number: {source}")]
    Float {
        /// Parameter name.
        key: &'static str,
        /// Underlying parse failure.
        #[source]
        source: ParseFloatError,
    },
    /// An integer parameter was not an unsigned integer.
    #[error("value of `{key}` is not an unsigned integer: {source}")]
    Integer {
        /// Parameter name.
        key: &'static str,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Errors raised while loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading a line failed, including invalid UTF-8.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// One-based line number.
        line: usize,
        /// Underlying read failure.
        #[source]
        source: io::Error,
    },
    /// A line could not be parsed.
    #[error("line {line}: {kind}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        #[source]
        kind: MalformedLine,
    },
    /// The configuration listed no vertex coordinates.
    #[error("configuration does not list any vertex coordinates")]
    NoVertices,
}

/// Stable codes describing [`ConfigError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ConfigErrorCode {
    /// The configuration file could not be opened.
    Io,
    /// Reading a line failed.
    Read,
    /// A line could not be parsed.
    Malformed,
    /// The configuration listed no vertex coordinates.
    NoVertices,
}

impl ConfigErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "EDGEWALK_CONFIG_IO",
            Self::Read => "EDGEWALK_CONFIG_READ",
            Self::Malformed => "EDGEWALK_CONFIG_MALFORMED",
            Self::NoVertices => "EDGEWALK_CONFIG_NO_VERTICES",
        }
    }
}

impl fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Retrieve the stable [`ConfigErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ConfigErrorCode {
        match self {
            Self::Io { .. } => ConfigErrorCode::Io,
            Self::Read { .. } => ConfigErrorCode::Read,
            Self::Malformed { .. } => ConfigErrorCode::Malformed,
            Self::NoVertices => ConfigErrorCode::NoVertices,
        }
    }
}
