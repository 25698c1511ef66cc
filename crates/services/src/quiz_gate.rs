use std::collections::{BTreeSet, HashMap};

use crate::error::QuizGateError;
use crate::progress_service::ProgressService;
use tutorial_core::model::{ChapterId, OptionId, QuestionId, QuizQuestion};

//
// ─── GATE STEP ─────────────────────────────────────────────────────────────────
//

/// Outcome of advancing the gate by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStep {
    /// Moved to the next question.
    Advanced,
    /// Final question submitted; the whole session was scored at once.
    Submitted { passed: bool },
}

/// Aggregated view of gate progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateProgress {
    pub total: usize,
    pub answered: usize,
    pub index: usize,
    pub is_submitted: bool,
}

//
// ─── QUIZ GATE ─────────────────────────────────────────────────────────────────
//

/// Per-chapter quiz session: an ordered question walk with a single
/// atomic pass/fail decision at the end.
///
/// Selections are kept per question id, so navigating back retains earlier
/// answers. The only externally observable side effect of a session is one
/// `mark_complete` call on the progress store when every question scores
/// correct; a failed submit persists nothing and may be retried. The
/// session is ephemeral — dropping it discards all state.
#[derive(Debug)]
pub struct QuizGate {
    chapter: ChapterId,
    questions: Vec<QuizQuestion>,
    index: usize,
    selections: HashMap<QuestionId, BTreeSet<OptionId>>,
    outcome: Option<bool>,
}

impl QuizGate {
    /// Open a gate over the chapter's question list, in the supplied order.
    ///
    /// # Errors
    ///
    /// Returns `QuizGateError::NoQuestions` for an empty list.
    pub fn new(chapter: ChapterId, questions: Vec<QuizQuestion>) -> Result<Self, QuizGateError> {
        if questions.is_empty() {
            return Err(QuizGateError::NoQuestions);
        }
        Ok(Self {
            chapter,
            questions,
            index: 0,
            selections: HashMap::new(),
            outcome: None,
        })
    }

    #[must_use]
    pub fn chapter(&self) -> ChapterId {
        self.chapter
    }

    /// The question currently on screen; `None` once submitted.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.outcome.is_some() {
            return None;
        }
        self.questions.get(self.index)
    }

    /// Selected option ids for the current question, empty if none yet.
    #[must_use]
    pub fn current_selection(&self) -> BTreeSet<OptionId> {
        self.current_question()
            .and_then(|q| self.selections.get(q.id()))
            .cloned()
            .unwrap_or_default()
    }

    /// True once the current question has at least one option selected;
    /// gates the "next" control.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.current_question()
            .and_then(|q| self.selections.get(q.id()))
            .is_some_and(|set| !set.is_empty())
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.outcome.is_some()
    }

    /// `Some(true)` after a passing submit, `Some(false)` after a failing
    /// one, `None` while in progress.
    #[must_use]
    pub fn passed(&self) -> Option<bool> {
        self.outcome
    }

    /// Returns a summary of the current gate progress.
    #[must_use]
    pub fn progress(&self) -> GateProgress {
        let answered = self
            .questions
            .iter()
            .filter(|q| {
                self.selections
                    .get(q.id())
                    .is_some_and(|set| !set.is_empty())
            })
            .count();
        GateProgress {
            total: self.questions.len(),
            answered,
            index: self.index,
            is_submitted: self.outcome.is_some(),
        }
    }

    /// Select or deselect an option on the current question.
    ///
    /// Single-choice questions replace the selection outright; multi-choice
    /// questions toggle membership.
    ///
    /// # Errors
    ///
    /// Returns `QuizGateError::AlreadySubmitted` after submit, or
    /// `QuizGateError::UnknownOption` for an id the current question does
    /// not carry.
    pub fn toggle_option(&mut self, option: OptionId) -> Result<(), QuizGateError> {
        let Some(question) = self.current_question() else {
            return Err(QuizGateError::AlreadySubmitted);
        };
        if !question.has_option(&option) {
            return Err(QuizGateError::UnknownOption(option));
        }

        let question_id = question.id().clone();
        let multi = question.is_multi_choice();
        let selected = self.selections.entry(question_id).or_default();

        if multi {
            if !selected.remove(&option) {
                selected.insert(option);
            }
        } else {
            selected.clear();
            selected.insert(option);
        }
        Ok(())
    }

    /// Step back to the previous question, keeping its stored selection.
    /// No-op on the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizGateError::AlreadySubmitted` after submit.
    pub fn back(&mut self) -> Result<(), QuizGateError> {
        if self.outcome.is_some() {
            return Err(QuizGateError::AlreadySubmitted);
        }
        self.index = self.index.saturating_sub(1);
        Ok(())
    }

    /// Advance past the current question, or — on the final question —
    /// submit the whole session.
    ///
    /// Submission scores every question's stored selection against its
    /// correct-option set; the session passes iff all are correct. On pass
    /// the chapter is marked complete on `progress` exactly once.
    ///
    /// # Errors
    ///
    /// Returns `QuizGateError::NoSelection` if the current question has no
    /// selection, or `QuizGateError::AlreadySubmitted` after submit.
    pub fn advance(&mut self, progress: &mut ProgressService) -> Result<GateStep, QuizGateError> {
        if self.outcome.is_some() {
            return Err(QuizGateError::AlreadySubmitted);
        }
        if !self.has_selection() {
            return Err(QuizGateError::NoSelection);
        }

        if self.index + 1 < self.questions.len() {
            self.index += 1;
            return Ok(GateStep::Advanced);
        }

        let passed = self.questions.iter().all(|question| {
            let selected = self
                .selections
                .get(question.id())
                .cloned()
                .unwrap_or_default();
            question.is_correct_selection(&selected)
        });

        self.outcome = Some(passed);
        if passed {
            progress.mark_complete(self.chapter);
        }
        Ok(GateStep::Submitted { passed })
    }

    /// Re-enter the gate after a failed submit: selections cleared, index
    /// back to the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizGateError::AlreadyPassed` after a passing submit and
    /// `QuizGateError::NotSubmitted` while still in progress.
    pub fn retry(&mut self) -> Result<(), QuizGateError> {
        match self.outcome {
            Some(false) => {
                self.selections.clear();
                self.index = 0;
                self.outcome = None;
                Ok(())
            }
            Some(true) => Err(QuizGateError::AlreadyPassed),
            None => Err(QuizGateError::NotSubmitted),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storage::MemoryBlobStore;
    use tutorial_core::model::QuizOption;
    use tutorial_core::time::fixed_clock;

    fn questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion::new(
                "q1",
                "Where does uploaded data live?",
                vec![
                    QuizOption::new("a", "On the storage network", true),
                    QuizOption::new("b", "In the browser only", false),
                ],
            )
            .unwrap(),
            QuizQuestion::new(
                "q2",
                "Select both prerequisites for an upload.",
                vec![
                    QuizOption::new("a", "A funded account", true),
                    QuizOption::new("b", "A closed tab", false),
                    QuizOption::new("c", "Signed transaction data", true),
                ],
            )
            .unwrap(),
        ]
    }

    fn fresh_progress() -> ProgressService {
        ProgressService::load(Arc::new(MemoryBlobStore::new()), fixed_clock())
    }

    fn gate() -> QuizGate {
        QuizGate::new(ChapterId::new(2), questions()).unwrap()
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let err = QuizGate::new(ChapterId::new(1), Vec::new()).unwrap_err();
        assert_eq!(err, QuizGateError::NoQuestions);
    }

    #[test]
    fn advance_requires_a_selection() {
        let mut gate = gate();
        let mut progress = fresh_progress();
        assert_eq!(
            gate.advance(&mut progress).unwrap_err(),
            QuizGateError::NoSelection
        );
    }

    #[test]
    fn single_choice_selection_replaces() {
        let mut gate = gate();
        gate.toggle_option(OptionId::new("b")).unwrap();
        gate.toggle_option(OptionId::new("a")).unwrap();

        let selected = gate.current_selection();
        assert_eq!(selected.len(), 1);
        assert!(selected.contains(&OptionId::new("a")));
    }

    #[test]
    fn multi_choice_selection_toggles() {
        let mut gate = gate();
        let mut progress = fresh_progress();
        gate.toggle_option(OptionId::new("a")).unwrap();
        gate.advance(&mut progress).unwrap();

        gate.toggle_option(OptionId::new("a")).unwrap();
        gate.toggle_option(OptionId::new("c")).unwrap();
        gate.toggle_option(OptionId::new("a")).unwrap();

        let selected = gate.current_selection();
        assert_eq!(selected.len(), 1);
        assert!(selected.contains(&OptionId::new("c")));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut gate = gate();
        let err = gate.toggle_option(OptionId::new("zz")).unwrap_err();
        assert_eq!(err, QuizGateError::UnknownOption(OptionId::new("zz")));
    }

    #[test]
    fn back_retains_previous_selection() {
        let mut gate = gate();
        let mut progress = fresh_progress();

        gate.toggle_option(OptionId::new("a")).unwrap();
        gate.advance(&mut progress).unwrap();
        gate.back().unwrap();

        assert!(gate.has_selection());
        assert!(gate.current_selection().contains(&OptionId::new("a")));

        // Back on the first question stays put.
        gate.back().unwrap();
        assert_eq!(gate.progress().index, 0);
    }

    #[test]
    fn all_correct_marks_chapter_complete_once() {
        let mut gate = gate();
        let mut progress = fresh_progress();

        gate.toggle_option(OptionId::new("a")).unwrap();
        assert_eq!(gate.advance(&mut progress).unwrap(), GateStep::Advanced);

        gate.toggle_option(OptionId::new("a")).unwrap();
        gate.toggle_option(OptionId::new("c")).unwrap();
        assert_eq!(
            gate.advance(&mut progress).unwrap(),
            GateStep::Submitted { passed: true }
        );

        assert!(progress.is_complete(ChapterId::new(2)));
        assert_eq!(gate.passed(), Some(true));

        // Terminal: no further mutation is possible.
        assert_eq!(
            gate.advance(&mut progress).unwrap_err(),
            QuizGateError::AlreadySubmitted
        );
        assert_eq!(gate.retry().unwrap_err(), QuizGateError::AlreadyPassed);
    }

    #[test]
    fn failed_submit_persists_nothing_and_allows_retry() {
        let mut gate = gate();
        let mut progress = fresh_progress();

        gate.toggle_option(OptionId::new("a")).unwrap();
        gate.advance(&mut progress).unwrap();
        // Partial answer on the multi-choice question.
        gate.toggle_option(OptionId::new("a")).unwrap();
        assert_eq!(
            gate.advance(&mut progress).unwrap(),
            GateStep::Submitted { passed: false }
        );

        assert!(!progress.is_complete(ChapterId::new(2)));
        assert!(progress.table().is_empty());

        gate.retry().unwrap();
        assert_eq!(gate.progress().index, 0);
        assert_eq!(gate.progress().answered, 0);
        assert!(!gate.is_submitted());
    }

    #[test]
    fn retry_before_submit_is_rejected() {
        let mut gate = gate();
        assert_eq!(gate.retry().unwrap_err(), QuizGateError::NotSubmitted);
    }
}
