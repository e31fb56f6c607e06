//! Error types for the nansat tools.

use thiserror::Error;

/// Result type alias using NansatError.
pub type NansatResult<T> = Result<T, NansatError>;

/// Primary error type for nansat operations.
#[derive(Debug, Error)]
pub enum NansatError {
    // === Input Errors ===
    #[error("Invalid format: {0}")]
    Format(String),

    #[error("Usage: {0}")]
    Usage(String),

    #[error("Invalid option: {0}")]
    Option(String),

    // === Dataset Errors ===
    #[error("Incorrect metadata: {0}")]
    Metadata(String),

    #[error("Cannot read dataset: {0}")]
    Read(String),

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Wrong geolocation: {0}")]
    Geolocation(String),

    #[error("Mapper does not fit the data: {0}")]
    WrongMapper(String),

    #[error("Raster backend error: {0}")]
    Gdal(String),

    // === Rendering Errors ===
    #[error("Colormap registration failed: {0}")]
    Registration(String),

    #[error("No candidate can satisfy the constraint: {0}")]
    Exhausted(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NansatError {
    /// Process exit code a command-line tool should use for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            NansatError::Usage(_) | NansatError::Option(_) | NansatError::Format(_) => 2,
            NansatError::Io(_) | NansatError::Read(_) => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.tif");
        let err: NansatError = io.into();
        assert!(matches!(err, NansatError::Io(_)));
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("missing.tif"));
    }

    #[test]
    fn test_usage_exit_code() {
        assert_eq!(NansatError::Usage("band".into()).exit_code(), 2);
        assert_eq!(NansatError::Registration("obpg".into()).exit_code(), 1);
    }
}
