//! Shared error types for the services crate.

use thiserror::Error;

use crate::contract::GatewayError;
use tutorial_core::model::{ChapterId, OptionId};

/// Errors emitted by `ChapterFlow`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChapterFlowError {
    #[error("chapter count must be > 0")]
    InvalidChapterCount,

    #[error("chapter {chapter} is outside 1..={count}")]
    OutOfRange { chapter: ChapterId, count: u32 },
}

/// Errors emitted by `QuizGate`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizGateError {
    #[error("quiz has no questions")]
    NoQuestions,

    #[error("current question has no selection")]
    NoSelection,

    #[error("option is not part of the current question: {0}")]
    UnknownOption(OptionId),

    #[error("quiz already submitted")]
    AlreadySubmitted,

    #[error("quiz already passed")]
    AlreadyPassed,

    #[error("quiz has not been submitted yet")]
    NotSubmitted,
}

/// Errors emitted by `MintService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MintError {
    #[error("no wallet connected")]
    NotConnected,

    #[error("wrong network: expected chain {expected}, wallet is on {actual:?}")]
    WrongNetwork { expected: u64, actual: Option<u64> },

    #[error("address has reached its mint limit")]
    MintLimitReached,

    #[error("all tokens have been minted")]
    SoldOut,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
