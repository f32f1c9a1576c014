/// Error types for dictcrack.
///
/// The scanners never retry: hashing is pure and deterministic, so every
/// failure here is either a precondition violation the caller must fix or a
/// fatal resource problem for the scan in progress.
///
/// ```rust,ignore
/// match parallel_scan(&target, &corpus, &algorithm, 0) {
///     Ok(outcome) => // Report outcome,
///     Err(CrackError::InvalidWorkerCount(w)) => // Reject the sweep entry,
///     Err(e) => // Fail the run loudly
/// }
/// ```
use std::path::PathBuf;
use thiserror::Error;

/// Result type for corpus, scan and benchmark operations
pub type CrackResult<T> = Result<T, CrackError>;

/// Errors that can occur while loading a wordlist or running a scan
#[derive(Error, Debug)]
pub enum CrackError {
    #[error("Wordlist not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Wordlist contains no candidates")]
    EmptyCorpus,
    #[error("Invalid worker count: {0} (must be at least 1)")]
    InvalidWorkerCount(usize),
    #[error("Failed to start workers: {0}")]
    WorkerSpawn(String),
    #[error("Worker panicked: {0}")]
    WorkerPanicked(String),
    #[error("Unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("Secret not present in wordlist: {0}")]
    SecretNotInCorpus(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CrackError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn unknown_algorithm(name: impl Into<String>) -> Self {
        Self::UnknownAlgorithm(name.into())
    }

    pub fn secret_not_in_corpus(secret: impl Into<String>) -> Self {
        Self::SecretNotInCorpus(secret.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Maps an I/O failure on `path` to the most specific variant
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }
}

impl From<config::ConfigError> for CrackError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let path = Path::new("rockyou.txt");
        let err = CrackError::file_not_found(path);
        assert!(matches!(err, CrackError::FileNotFound(_)));

        let err = CrackError::permission_denied(path);
        assert!(matches!(err, CrackError::PermissionDenied(_)));

        let err = CrackError::unknown_algorithm("crc32");
        assert!(matches!(err, CrackError::UnknownAlgorithm(_)));

        let err = CrackError::secret_not_in_corpus("hunter2");
        assert!(matches!(err, CrackError::SecretNotInCorpus(_)));
    }

    #[test]
    fn test_from_io_kinds() {
        let err = CrackError::from_io("a.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, CrackError::FileNotFound(_)));

        let err = CrackError::from_io("a.txt", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, CrackError::PermissionDenied(_)));

        let err = CrackError::from_io("a.txt", io::Error::from(io::ErrorKind::InvalidData));
        assert!(matches!(err, CrackError::IoError(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CrackError::InvalidWorkerCount(0).to_string(),
            "Invalid worker count: 0 (must be at least 1)"
        );
        assert_eq!(
            CrackError::EmptyCorpus.to_string(),
            "Wordlist contains no candidates"
        );
        assert_eq!(
            CrackError::file_not_found("words.txt").to_string(),
            "Wordlist not found: words.txt"
        );
        assert_eq!(
            CrackError::config_error("no algorithms").to_string(),
            "Configuration error: no algorithms"
        );
    }
}
