use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("Failed to read document {path}: {reason}")]
    DocumentRead { path: String, reason: String },
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl CoreError {
    /// Acquisition failures degrade to an empty profile instead of failing the batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::UnsupportedFileType(_) | CoreError::DocumentRead { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("empty date fragment")]
    Empty,
    #[error("unknown month name: {0}")]
    UnknownMonth(String),
    #[error("no date layout matches '{0}'")]
    NoLayout(String),
    #[error("computed age {0} is outside 0..=100")]
    AgeOutOfRange(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquisition_errors_are_recoverable() {
        assert!(CoreError::UnsupportedFileType("cv.odt".to_string()).is_recoverable());
        assert!(CoreError::DocumentRead {
            path: "cv.pdf".to_string(),
            reason: "truncated".to_string(),
        }
        .is_recoverable());
        assert!(!CoreError::InvalidSettings("previewLimit".to_string()).is_recoverable());
    }

    #[test]
    fn date_errors_render_their_fragment() {
        assert_eq!(
            DateError::NoLayout("31/31/31/31".to_string()).to_string(),
            "no date layout matches '31/31/31/31'"
        );
    }
}
