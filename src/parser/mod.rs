pub mod latex;

use crate::error::{Result, SpellerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a document's text is cleaned before it is sent for checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupProfile {
    #[default]
    Plain,
    Latex,
}

impl MarkupProfile {
    /// Detect the profile from a file extension listed in `latex_extensions`
    pub fn from_path(path: &Path, latex_extensions: &[String]) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if latex_extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            MarkupProfile::Latex
        } else {
            MarkupProfile::Plain
        }
    }

    /// Detect the profile from an editor language identifier
    pub fn from_language_id(language_id: &str) -> Self {
        match language_id.to_lowercase().as_str() {
            "latex" | "tex" | "bibtex" => MarkupProfile::Latex,
            _ => MarkupProfile::Plain,
        }
    }
}

/// Text taken from a document, not yet cleaned.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub text: String,
    pub profile: MarkupProfile,
}

impl CheckRequest {
    pub fn new(text: impl Into<String>, profile: MarkupProfile) -> Self {
        Self {
            text: text.into(),
            profile,
        }
    }

    /// Strip markup and refuse to go on with nothing left to check
    pub fn prepare(self) -> Result<String> {
        let cleaned = match self.profile {
            MarkupProfile::Plain => self.text,
            MarkupProfile::Latex => latex::strip(&self.text),
        };

        if cleaned.trim().is_empty() {
            return Err(SpellerError::EmptyInput);
        }

        Ok(cleaned)
    }
}
