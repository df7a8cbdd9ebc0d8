use thiserror::Error;

pub type Result<T, E = SpellerError> = std::result::Result<T, E>;

/// Everything that ends a command early.
///
/// "Nothing flagged" and "no suggestions" are not errors; they are ordinary
/// outcomes (see [`crate::session::CheckOutcome`]).
#[derive(Debug, Error)]
pub enum SpellerError {
    #[error("No active editor found.")]
    NoActiveDocument,

    #[error("No text to check.")]
    EmptyInput,

    #[error("Position the cursor on a word.")]
    NoWordAtCursor,

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid edit: {0}")]
    InvalidEdit(String),
}

impl SpellerError {
    pub fn transport(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        SpellerError::Transport {
            url: url.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(SpellerError::EmptyInput.to_string(), "No text to check.");

        let err = SpellerError::transport(
            "https://example.test/",
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        );
        assert_eq!(
            err.to_string(),
            "request to https://example.test/ failed: refused"
        );
    }
}
