use std::fmt;

/// Custom error types for dashcam GPS parsing
#[derive(Debug)]
pub enum DashcamError {
    /// I/O errors
    Io(std::io::Error),
    /// UTF-8 parsing errors
    Utf8(std::str::Utf8Error),
    /// The container layout violates an invariant the camera firmware could
    /// never produce (missing markers, bad index table, unknown obfuscation
    /// class). Fatal: the run aborts.
    Format(String),
    /// A single decoded sentence does not match the expected grammar or has
    /// malformed numeric/timestamp fields. Recovered locally: the tick
    /// becomes unresolved and is filled by reconstruction.
    Parse(String),
    /// No resolved sample exists anywhere in the merged sequence. Fatal at
    /// the job level: the caller must skip overlay generation.
    NoTelemetry,
    /// End of region reached unexpectedly
    UnexpectedEof,
    /// Export format error
    Export(String),
}

impl fmt::Display for DashcamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashcamError::Io(err) => write!(f, "I/O error: {}", err),
            DashcamError::Utf8(err) => write!(f, "UTF-8 error: {}", err),
            DashcamError::Format(msg) => write!(f, "Format error: {}", msg),
            DashcamError::Parse(msg) => write!(f, "Parse error: {}", msg),
            DashcamError::NoTelemetry => write!(f, "No GPS data found in any source file"),
            DashcamError::UnexpectedEof => write!(f, "Unexpected end of metadata region"),
            DashcamError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for DashcamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashcamError::Io(err) => Some(err),
            DashcamError::Utf8(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DashcamError {
    fn from(err: std::io::Error) -> Self {
        DashcamError::Io(err)
    }
}

impl From<std::str::Utf8Error> for DashcamError {
    fn from(err: std::str::Utf8Error) -> Self {
        DashcamError::Utf8(err)
    }
}

pub type Result<T> = std::result::Result<T, DashcamError>;
