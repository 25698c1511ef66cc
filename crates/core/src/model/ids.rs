use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for a tutorial chapter.
///
/// Chapters are numbered from 1; the persisted progress blob keys records
/// by the decimal string form of this id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChapterId(u32);

impl ChapterId {
    /// Creates a new `ChapterId`.
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The first chapter, always navigable.
    #[must_use]
    pub fn first() -> Self {
        Self(1)
    }

    /// The chapter immediately after this one.
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Identifier for a quiz question, unique within a chapter's question set.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier for an answer option, unique within its question.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionId(String);

impl OptionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChapterId({})", self.0)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Debug for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ──────────────────────────────────────────────────

/// Error type for parsing a `ChapterId` from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChapterIdError;

impl fmt::Display for ParseChapterIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse ChapterId from string")
    }
}

impl std::error::Error for ParseChapterIdError {}

impl FromStr for ChapterId {
    type Err = ParseChapterIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(ChapterId::new)
            .map_err(|_| ParseChapterIdError)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_id_display() {
        let id = ChapterId::new(3);
        assert_eq!(id.to_string(), "3");
    }

    #[test]
    fn test_chapter_id_from_str() {
        let id: ChapterId = "5".parse().unwrap();
        assert_eq!(id, ChapterId::new(5));
    }

    #[test]
    fn test_chapter_id_from_str_invalid() {
        let result = "chapter-one".parse::<ChapterId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_chapter_id_next() {
        assert_eq!(ChapterId::new(1).next(), ChapterId::new(2));
    }

    #[test]
    fn test_chapter_id_roundtrip() {
        let original = ChapterId::new(4);
        let serialized = original.to_string();
        let deserialized: ChapterId = serialized.parse().unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_option_id_ordering() {
        let a = OptionId::new("a");
        let b = OptionId::new("b");
        assert!(a < b);
    }
}
