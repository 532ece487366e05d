//! Error types for rainmap-io.

use std::path::PathBuf;

use rainmap_pipeline::PipelineError;

/// Error type for all fallible operations in the rainmap-io crate.
///
/// Covers file access, CSV structure and parsing problems, data validation
/// failures, and PNG encoding errors.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file cannot be created or written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Wraps an error originating from the csv library.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Description of the underlying csv failure.
        reason: String,
    },

    /// Returned when a required column is absent from a CSV header.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a field cannot be parsed as the expected type.
    #[error("{}:{line}: cannot parse {column} '{value}': {reason}", path.display())]
    Parse {
        /// File being read.
        path: PathBuf,
        /// 1-based line number of the record.
        line: u64,
        /// Column holding the bad field.
        column: String,
        /// The raw field.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when there is nothing to process.
    #[error("empty input: {reason}")]
    EmptyInput {
        /// What was missing.
        reason: String,
    },

    /// Wraps a non-I/O error from the PNG encoder.
    #[error("render error: {reason}")]
    Render {
        /// Description of the underlying encoder failure.
        reason: String,
    },

    /// Pipeline type construction error.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Attaches `path` to a csv library error.
pub(crate) fn csv_error(path: &std::path::Path, e: csv::Error) -> IoError {
    IoError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn display_missing_column() {
        let err = IoError::MissingColumn {
            name: "Easting_UTM".to_string(),
            path: PathBuf::from("/data/sites.csv"),
        };
        assert_eq!(
            err.to_string(),
            "column 'Easting_UTM' not found in /data/sites.csv"
        );
    }

    #[test]
    fn display_parse() {
        let err = IoError::Parse {
            path: PathBuf::from("ppt.csv"),
            line: 4,
            column: "date".to_string(),
            value: "2021-13-01".to_string(),
            reason: "input is out of range".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ppt.csv:4: cannot parse date '2021-13-01': input is out of range"
        );
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "negative value at line 3: -1; negative value at line 9: -0.2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): negative value at line 3: -1; negative value at line 9: -0.2"
        );
    }

    #[test]
    fn display_empty_input() {
        let err = IoError::EmptyInput {
            reason: "no measurements".to_string(),
        };
        assert_eq!(err.to_string(), "empty input: no measurements");
    }

    #[test]
    fn display_render() {
        let err = IoError::Render {
            reason: "zero-sized image".to_string(),
        };
        assert_eq!(err.to_string(), "render error: zero-sized image");
    }

    #[test]
    fn write_keeps_source() {
        use std::error::Error;
        let err = IoError::Write {
            path: PathBuf::from("/out/map.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "cannot write /out/map.png: denied");
        assert!(err.source().is_some());
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
