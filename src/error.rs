use thiserror::Error;

use crate::options::TestEntityOptionBuilderError;

// VerifyError {{{1
/// Failures at the edges: reading and parsing unit and option files.
///
/// Construction problems are never errors; they are reported as findings.
///
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid options: {0}")]
    Options(#[from] TestEntityOptionBuilderError),
}

pub type Result<T> = std::result::Result<T, VerifyError>;

// Testing {{{1
#[cfg(test)]
mod verify_error {
    use super::*;
    use crate::TestEntityOptionBuilder;

    #[test]
    fn bad_options_are_reported() {
        let err = TestEntityOptionBuilder::default()
            .max_underweight(-0.5)
            .build()
            .map_err(VerifyError::from)
            .unwrap_err();

        assert!(matches!(err, VerifyError::Options(_)));
        assert!(err.to_string().starts_with("Invalid options: max_underweight"));
    }
}
