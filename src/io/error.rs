//! Error types for grid access, level persistence and preview export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all level editing operations
#[derive(Debug)]
pub enum LevelError {
    /// Direct cell access outside `[0, width) x [0, height)`
    OutOfBounds {
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
        /// Grid width at the time of access
        width: usize,
        /// Grid height at the time of access
        height: usize,
    },

    /// Grid or working copy used before `initialize` / `capture_from`
    UninitializedGrid {
        /// Operation that required an initialized grid
        operation: &'static str,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Persisted level data does not describe a consistent grid
    InvalidLevelData {
        /// Description of what's wrong with the level data
        reason: String,
    },

    /// RON encoding or decoding failed
    Serialization {
        /// File involved, if any
        path: Option<PathBuf>,
        /// Underlying serializer message
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to save a preview image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Cell ({x}, {y}) is out of bounds for a {width}x{height} grid"
                )
            }
            Self::UninitializedGrid { operation } => {
                write!(f, "Grid used before initialization during {operation}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidLevelData { reason } => {
                write!(f, "Invalid level data: {reason}")
            }
            Self::Serialization { path, reason } => match path {
                Some(path) => write!(
                    f,
                    "Serialization error in '{}': {reason}",
                    path.display()
                ),
                None => write!(f, "Serialization error: {reason}"),
            },
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export preview to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for level editing results
pub type Result<T> = std::result::Result<T, LevelError>;

impl From<ron::error::SpannedError> for LevelError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::Serialization {
            path: None,
            reason: err.to_string(),
        }
    }
}

impl From<ron::Error> for LevelError {
    fn from(err: ron::Error) -> Self {
        Self::Serialization {
            path: None,
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for LevelError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> LevelError {
    LevelError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an out of bounds error for a grid of the given dimensions
pub const fn out_of_bounds(x: i32, y: i32, width: usize, height: usize) -> LevelError {
    LevelError::OutOfBounds {
        x,
        y,
        width,
        height,
    }
}

/// Attach a path to a serialization error raised without one
pub fn with_path(error: LevelError, path: impl Into<PathBuf>) -> LevelError {
    match error {
        LevelError::Serialization { path: None, reason } => LevelError::Serialization {
            path: Some(path.into()),
            reason,
        },
        other => other,
    }
}
