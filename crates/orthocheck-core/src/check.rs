use std::fmt;

use serde::{Deserialize, Serialize};

/// Diagnostic attached to a word the dictionary does not know.
pub const NOT_IN_DICTIONARY: &str = "word not found in dictionary";

/// Outcome of classifying a single word against the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    /// The dictionary recognizes the word.
    Correct,
    /// The dictionary does not recognize the word.
    Error,
    /// The lookup itself failed (transport error, timeout).
    #[serde(rename = "Lookup failed")]
    LookupFailed,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Correct => "Correct",
            CheckStatus::Error => "Error",
            CheckStatus::LookupFailed => "Lookup failed",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified word, in input order, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCheck {
    pub word: String,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl WordCheck {
    /// The dictionary recognized the word.
    pub fn correct(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            status: CheckStatus::Correct,
            error: None,
        }
    }

    /// The dictionary did not recognize the word.
    pub fn misspelled(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            status: CheckStatus::Error,
            error: Some(NOT_IN_DICTIONARY.to_string()),
        }
    }

    /// The lookup could not classify the word at all.
    pub fn lookup_failed(word: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            status: CheckStatus::LookupFailed,
            error: Some(error.into()),
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self.status, CheckStatus::Correct)
    }
}

/// Per-text verdict produced by the bulk check endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextVerdict {
    pub text: String,
    pub correct: bool,
    pub results: Vec<WordCheck>,
}

impl TextVerdict {
    /// Verdict for a processed text: correct when every word classified
    /// as recognized.
    pub fn from_results(text: impl Into<String>, results: Vec<WordCheck>) -> Self {
        let correct = !results.is_empty() && results.iter().all(WordCheck::is_correct);
        Self {
            text: text.into(),
            correct,
            results,
        }
    }

    /// Verdict for a text rejected before classification (empty input).
    pub fn rejected(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: false,
            results: Vec::new(),
        }
    }
}
