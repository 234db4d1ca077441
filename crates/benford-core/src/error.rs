use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Benford checker.
#[derive(Error, Debug)]
pub enum BenfordError {
    /// Validation finished with data errors and the caller asked to raise.
    ///
    /// `errors` holds every recorded error string, in the order the checks
    /// produced them.
    #[error(
        "Data could not be analyzed. Following critical errors found: {}",
        .errors.join(" ")
    )]
    InvalidDataFormat { errors: Vec<String> },

    /// An accessor was used in the wrong lifecycle state.
    #[error("Usage error: {0}")]
    Usage(String),

    /// The upload exceeds the configured size cap.
    #[error("File is too large: {size} bytes exceeds the limit of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    /// The upload's extension is not on the allow-list.
    #[error("Invalid file extension: {0:?}")]
    UnsupportedExtension(String),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BenfordError {
    /// The error strings carried by an [`BenfordError::InvalidDataFormat`].
    ///
    /// Returns an empty slice for every other variant.
    pub fn data_errors(&self) -> &[String] {
        match self {
            BenfordError::InvalidDataFormat { errors } => errors,
            _ => &[],
        }
    }

    /// `true` for lifecycle misuse rather than bad input data.
    pub fn is_usage(&self) -> bool {
        matches!(self, BenfordError::Usage(_))
    }
}

/// Convenience alias used throughout the Benford crates.
pub type Result<T> = std::result::Result<T, BenfordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_data_format_joins_errors() {
        let err = BenfordError::InvalidDataFormat {
            errors: vec![
                "Main column header: 7_2009 not found".to_string(),
                "No data to analyze".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Data could not be analyzed. Following critical errors found: \
             Main column header: 7_2009 not found No data to analyze"
        );
    }

    #[test]
    fn test_data_errors_exposes_list() {
        let err = BenfordError::InvalidDataFormat {
            errors: vec!["No data to analyze".to_string()],
        };
        assert_eq!(err.data_errors(), ["No data to analyze".to_string()]);
        assert!(BenfordError::Config("x".into()).data_errors().is_empty());
    }

    #[test]
    fn test_usage_error_is_distinct_from_data_error() {
        let usage = BenfordError::Usage("call is_valid first".to_string());
        assert!(usage.is_usage());
        assert!(usage.data_errors().is_empty());

        let data = BenfordError::InvalidDataFormat { errors: vec![] };
        assert!(!data.is_usage());
    }

    #[test]
    fn test_error_display_file_too_large() {
        let err = BenfordError::FileTooLarge {
            size: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "File is too large: 2048 bytes exceeds the limit of 1024 bytes"
        );
    }

    #[test]
    fn test_error_display_unsupported_extension() {
        let err = BenfordError::UnsupportedExtension(".xlsx".to_string());
        assert_eq!(err.to_string(), "Invalid file extension: \".xlsx\"");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = BenfordError::FileRead {
            path: PathBuf::from("/some/upload.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/upload.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BenfordError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: BenfordError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
