use std::fmt;

use crate::error::LookupError;

/// How a definition block introduced its senses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SenseCategory {
    /// No divider or label on the block
    Plain,
    /// Block led by a verb divider (`vd`)
    Verb,
    /// Block led by a subject/status label (`sls`)
    Sls,
}

impl SenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenseCategory::Plain => "plain",
            SenseCategory::Verb => "verb",
            SenseCategory::Sls => "sls",
        }
    }
}

impl fmt::Display for SenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single definition unit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sense {
    /// Sense number such as `"1"` or `"2 a"`
    pub label: Option<String>,
    /// Definition text, still carrying the API's `{...}` markers
    pub text: String,
    pub category: SenseCategory,
}

/// One headword's group of senses, in API order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    pub senses: Vec<Sense>,
}

/// Decoded definitions for a lookup
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Definitions {
    pub entries: Vec<Entry>,
}

impl Definitions {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of senses across all entries
    pub fn sense_count(&self) -> usize {
        self.entries.iter().map(|e| e.senses.len()).sum()
    }
}

/// Candidate spellings returned when the term has no direct match
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Suggestions(pub Vec<String>);

impl Suggestions {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Terminal result of one lookup, delivered exactly once
#[derive(Debug, Clone)]
pub enum Outcome {
    Definitions(Definitions),
    Suggestions(Suggestions),
    Failed(LookupError),
}

impl Outcome {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Definitions(_) => "definitions",
            Outcome::Suggestions(_) => "suggestions",
            Outcome::Failed(_) => "failed",
        }
    }
}
