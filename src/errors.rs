use std::fmt;
use thiserror::Error;

/// Error type for IES profile reading, rescaling and writing
///
/// Every failure of the parser, the TILT resolver, the rescale engine and the
/// serializer is reported through this enum. Each variant carries enough
/// context to point at the offending field or line, and maps to a numeric
/// code and an [`ErrorCategory`] for programmatic handling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IesError {
    // ========== INPUT ERRORS (1000-1099) ==========
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        io_kind: Option<std::io::ErrorKind>,
    },

    /// Error reading file contents
    #[error("Failed to read file {path}: {reason}")]
    FileReadError { path: String, reason: String },

    /// Permission denied when accessing file
    #[error("Permission denied accessing file: {path}")]
    PermissionDenied { path: String },

    /// Zero-length buffer or file
    #[error("Empty input: {source_name}")]
    EmptyInput { source_name: String },

    // ========== HEADER ERRORS (2000-2099) ==========
    /// Label section ran to end of input without a TILT= line
    #[error("Missing TILT directive after {labels_read} label line(s)")]
    MissingTiltDirective { labels_read: usize },

    /// A fixed-field line is missing or short
    #[error("Malformed {field} at line {line}: {reason}")]
    MalformedHeader {
        field: String,
        line: usize,
        reason: String,
    },

    /// A token could not be parsed as the expected number
    #[error("Invalid number '{token}' for {field} at line {line}")]
    InvalidNumber {
        field: String,
        token: String,
        line: usize,
    },

    /// An enumerated integer field holds an unknown value
    #[error("Invalid value {value} for {field}")]
    InvalidEnumValue { field: String, value: i64 },

    // ========== ARRAY ERRORS (3000-3099) ==========
    /// Input ended before an array was filled
    #[error("Truncated {field}: expected {expected} values, input ended after {actual}")]
    TruncatedArray {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// An array length disagrees with its declared count
    #[error("Dimension mismatch for {field}: declared {declared}, found {actual}")]
    DimensionMismatch {
        field: String,
        declared: usize,
        actual: usize,
    },

    // ========== TILT ERRORS (4000-4099) ==========
    /// External TILT file unreadable or unparsable
    #[error("Invalid TILT reference '{path}': {reason}")]
    InvalidTiltReference { path: String, reason: String },

    // ========== RESCALE ERRORS (5000-5099) ==========
    /// Cone angle outside [0, 180] degrees
    #[error("Invalid rescale cone angle {angle}: must be within [0, 180] degrees")]
    InvalidRescaleAngle { angle: f32 },

    // ========== RESOURCE ERRORS (6000-6099) ==========
    /// Data size exceeds configured limits
    #[error("Data size exceeds limit for {field}: {size} (limit: {limit})")]
    DataSizeExceedsLimit {
        field: String,
        size: usize,
        limit: usize,
    },

    // ========== VALIDATION ERRORS (7000-7099) ==========
    /// Semantic validation failure on a parsed profile
    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    // ========== OUTPUT ERRORS (8000-8099) ==========
    /// Failure writing a buffer to a file
    #[error("Failed to write file '{path}': {reason}")]
    FileWriteError { path: String, reason: String },
}

impl IesError {
    /// Get the error code for machine-readable processing
    pub fn code(&self) -> u16 {
        match self {
            Self::FileNotFound { .. } => 1001,
            Self::FileReadError { .. } => 1002,
            Self::PermissionDenied { .. } => 1003,
            Self::EmptyInput { .. } => 1004,

            Self::MissingTiltDirective { .. } => 2001,
            Self::MalformedHeader { .. } => 2002,
            Self::InvalidNumber { .. } => 2003,
            Self::InvalidEnumValue { .. } => 2004,

            Self::TruncatedArray { .. } => 3001,
            Self::DimensionMismatch { .. } => 3002,

            Self::InvalidTiltReference { .. } => 4001,

            Self::InvalidRescaleAngle { .. } => 5001,

            Self::DataSizeExceedsLimit { .. } => 6001,

            Self::ValidationFailed { .. } => 7001,

            Self::FileWriteError { .. } => 8001,
        }
    }

    /// Get the error category for grouping related errors
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            1000..=1099 => ErrorCategory::Input,
            2000..=2099 => ErrorCategory::Header,
            3000..=3099 => ErrorCategory::Array,
            4000..=4099 => ErrorCategory::Tilt,
            5000..=5099 => ErrorCategory::Rescale,
            6000..=6099 => ErrorCategory::Resource,
            7000..=7099 => ErrorCategory::Validation,
            8000..=8099 => ErrorCategory::Output,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Get suggested action for handling this error
    pub fn suggested_action(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "Check file path and ensure file exists",
            Self::PermissionDenied { .. } => "Check file permissions and user access rights",
            Self::EmptyInput { .. } => "Provide a non-empty IES profile",
            Self::MissingTiltDirective { .. } => {
                "Verify this is a valid IES file: a TILT= line must follow the labels"
            },
            Self::TruncatedArray { .. } => "File appears to be truncated",
            Self::InvalidTiltReference { .. } => {
                "Check that the TILT file exists next to the profile or set a TILT directory"
            },
            Self::InvalidRescaleAngle { .. } => "Use a cone angle between 0 and 180 degrees",
            Self::DataSizeExceedsLimit { .. } => "Use a permissive parser configuration",
            _ => "Check file integrity and LM-63 format compliance",
        }
    }
}

/// Error categories for grouping related error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Input,
    Header,
    Array,
    Tilt,
    Rescale,
    Resource,
    Validation,
    Output,
    Unknown,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Header => write!(f, "Header"),
            Self::Array => write!(f, "Array"),
            Self::Tilt => write!(f, "TILT"),
            Self::Rescale => write!(f, "Rescale"),
            Self::Resource => write!(f, "Resource"),
            Self::Validation => write!(f, "Validation"),
            Self::Output => write!(f, "Output"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result type alias for IES operations
pub type IesResult<T> = Result<T, IesError>;

impl IesError {
    /// Map an io error to the matching input variant for `path`
    pub fn from_io(err: &std::io::Error, path: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => IesError::FileNotFound {
                path: path.to_string(),
                io_kind: Some(err.kind()),
            },
            std::io::ErrorKind::PermissionDenied => IesError::PermissionDenied {
                path: path.to_string(),
            },
            _ => IesError::FileReadError {
                path: path.to_string(),
                reason: err.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for IesError {
    fn from(err: std::io::Error) -> Self {
        IesError::from_io(&err, "unknown")
    }
}
