use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised while validating quiz content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question has no options")]
    NoOptions,

    #[error("question has no correct option")]
    NoCorrectOption,

    #[error("duplicate option id within question: {0}")]
    DuplicateOptionId(OptionId),
}

//
// ─── QUIZ CONTENT ──────────────────────────────────────────────────────────────
//

/// One selectable answer to a quiz question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub id: OptionId,
    pub text: String,
    pub is_correct: bool,
}

impl QuizOption {
    #[must_use]
    pub fn new(id: impl Into<OptionId>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
        }
    }
}

/// A quiz question with its ordered option list.
///
/// Options are presented in the supplied order; there is no randomization.
/// A question with exactly one correct option is single-choice, otherwise
/// multi-choice. The scoring rule is identical either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    id: QuestionId,
    prompt: String,
    options: Vec<QuizOption>,
}

impl QuizQuestion {
    /// Validates and builds a question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the prompt is blank, the option list is empty,
    /// no option is marked correct, or option ids repeat.
    pub fn new(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        options: Vec<QuizOption>,
    ) -> Result<Self, QuizError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuizError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuizError::NoOptions);
        }
        if !options.iter().any(|opt| opt.is_correct) {
            return Err(QuizError::NoCorrectOption);
        }

        let mut seen = BTreeSet::new();
        for opt in &options {
            if !seen.insert(opt.id.clone()) {
                return Err(QuizError::DuplicateOptionId(opt.id.clone()));
            }
        }

        Ok(Self {
            id: id.into(),
            prompt,
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

    /// True if the option id belongs to this question.
    #[must_use]
    pub fn has_option(&self, option: &OptionId) -> bool {
        self.options.iter().any(|opt| &opt.id == option)
    }

    /// The set of option ids marked correct.
    #[must_use]
    pub fn correct_ids(&self) -> BTreeSet<OptionId> {
        self.options
            .iter()
            .filter(|opt| opt.is_correct)
            .map(|opt| opt.id.clone())
            .collect()
    }

    /// True when more than one option is correct.
    #[must_use]
    pub fn is_multi_choice(&self) -> bool {
        self.options.iter().filter(|opt| opt.is_correct).count() > 1
    }

    /// Scores a selection: correct iff it equals the correct-id set exactly,
    /// same size and same members. No partial credit.
    #[must_use]
    pub fn is_correct_selection(&self, selected: &BTreeSet<OptionId>) -> bool {
        *selected == self.correct_ids()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
