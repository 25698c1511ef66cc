use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ids::ChapterId;

//
// ─── CHAPTER RECORD ────────────────────────────────────────────────────────────
//

/// Per-chapter completion state.
///
/// `completed` and `progress == 100` are redundant by construction; every
/// mutator on [`ProgressTable`] keeps them in sync. A hand-edited blob may
/// diverge, so completion queries accept either signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRecord {
    pub completed: bool,
    pub progress: u8,
    pub last_visited: DateTime<Utc>,
}

impl ChapterRecord {
    /// A fully completed record stamped at `now`.
    #[must_use]
    pub fn completed_at(now: DateTime<Utc>) -> Self {
        Self {
            completed: true,
            progress: 100,
            last_visited: now,
        }
    }

    /// A record at the given percentage, stamped at `now`.
    #[must_use]
    pub fn at_progress(progress: u8, now: DateTime<Utc>) -> Self {
        Self {
            completed: progress >= 100,
            progress: progress.min(100),
            last_visited: now,
        }
    }

    /// True if this record counts as complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed || self.progress == 100
    }
}

//
// ─── PROGRESS TABLE ────────────────────────────────────────────────────────────
//

/// In-memory table of chapter records.
///
/// Serializes transparently to the persisted blob layout: a JSON object
/// mapping chapter-id strings to records. All mutators are pure in-memory
/// updates; flushing the table to storage is the service layer's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressTable {
    chapters: BTreeMap<ChapterId, ChapterRecord>,
}

impl ProgressTable {
    /// Creates an empty table: no chapter visited, only chapter 1 unlocked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the chapter complete (progress 100) at `now`.
    ///
    /// Idempotent in effect: re-marking a completed chapter only refreshes
    /// its `last_visited` stamp.
    pub fn mark_complete(&mut self, chapter: ChapterId, now: DateTime<Utc>) {
        self.chapters
            .insert(chapter, ChapterRecord::completed_at(now));
    }

    /// Records a progress percentage for the chapter at `now`.
    ///
    /// `value` is clamped to `[0, 100]`; a clamped value of 100 marks the
    /// chapter complete, anything lower marks it incomplete.
    pub fn set_progress(&mut self, chapter: ChapterId, value: i32, now: DateTime<Utc>) {
        let clamped = value.clamp(0, 100) as u8;
        self.chapters
            .insert(chapter, ChapterRecord::at_progress(clamped, now));
    }

    /// Stored progress for the chapter, or 0 when it was never visited.
    #[must_use]
    pub fn progress_of(&self, chapter: ChapterId) -> u8 {
        self.chapters.get(&chapter).map_or(0, |r| r.progress)
    }

    /// True once the chapter's record counts as complete.
    #[must_use]
    pub fn is_complete(&self, chapter: ChapterId) -> bool {
        self.chapters.get(&chapter).is_some_and(ChapterRecord::is_complete)
    }

    /// The unlock ceiling: the highest chapter the user may navigate to.
    ///
    /// An empty table unlocks chapter 1. Otherwise the ceiling is the
    /// maximum completed chapter id plus one. The maximum governs even when
    /// completion has gaps: completed `{1, 2, 4}` unlocks chapter 5, not 3.
    #[must_use]
    pub fn highest_unlocked(&self) -> ChapterId {
        if self.chapters.is_empty() {
            return ChapterId::first();
        }

        self.chapters
            .iter()
            .filter(|(_, record)| record.is_complete())
            .map(|(id, _)| *id)
            .max()
            .map_or(ChapterId::first(), |id| id.next())
    }

    /// True if the chapter is at or below the unlock ceiling.
    #[must_use]
    pub fn is_unlocked(&self, chapter: ChapterId) -> bool {
        chapter <= self.highest_unlocked()
    }

    /// The record for a chapter, if any.
    #[must_use]
    pub fn record(&self, chapter: ChapterId) -> Option<&ChapterRecord> {
        self.chapters.get(&chapter)
    }

    /// Iterates records in ascending chapter order.
    pub fn iter(&self) -> impl Iterator<Item = (ChapterId, &ChapterRecord)> {
        self.chapters.iter().map(|(id, record)| (*id, record))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Drops every record, returning the table to its initial state.
    pub fn clear(&mut self) {
        self.chapters.clear();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
