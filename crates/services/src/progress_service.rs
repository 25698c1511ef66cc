use std::sync::Arc;

use storage::{ProgressBlobStore, decode_table, encode_table};
use tutorial_core::Clock;
use tutorial_core::model::{ChapterId, ChapterRecord, ProgressTable};

/// The durable chapter-progress store.
///
/// Owns the in-memory [`ProgressTable`] and a blob store; every mutation
/// updates memory first and then flushes the whole table synchronously.
/// This is the injectable object the view layer holds by reference, not an
/// ambient global.
///
/// Persistence never surfaces errors: a missing, unreadable, or corrupt
/// blob loads as an empty table, and a failed flush is dropped (the next
/// launch simply starts from whatever last made it to disk). Two instances
/// over the same blob are an accepted hazard — last writer wins.
pub struct ProgressService {
    clock: Clock,
    store: Arc<dyn ProgressBlobStore>,
    table: ProgressTable,
}

impl ProgressService {
    /// Load persisted progress, degrading to an empty table on any failure.
    #[must_use]
    pub fn load(store: Arc<dyn ProgressBlobStore>, clock: Clock) -> Self {
        let table = match store.read() {
            Ok(Some(blob)) => decode_table(&blob),
            Ok(None) | Err(_) => ProgressTable::new(),
        };
        Self {
            clock,
            store,
            table,
        }
    }

    /// Mark the chapter complete and persist. Idempotent in effect.
    pub fn mark_complete(&mut self, chapter: ChapterId) {
        self.table.mark_complete(chapter, self.clock.now());
        self.flush();
    }

    /// Record a clamped progress percentage for the chapter and persist.
    pub fn set_progress(&mut self, chapter: ChapterId, value: i32) {
        self.table.set_progress(chapter, value, self.clock.now());
        self.flush();
    }

    /// Stored progress, or 0 for a never-visited chapter.
    #[must_use]
    pub fn progress(&self, chapter: ChapterId) -> u8 {
        self.table.progress_of(chapter)
    }

    #[must_use]
    pub fn is_complete(&self, chapter: ChapterId) -> bool {
        self.table.is_complete(chapter)
    }

    /// The highest chapter the navigation UI may offer.
    #[must_use]
    pub fn highest_unlocked(&self) -> ChapterId {
        self.table.highest_unlocked()
    }

    #[must_use]
    pub fn is_unlocked(&self, chapter: ChapterId) -> bool {
        self.table.is_unlocked(chapter)
    }

    #[must_use]
    pub fn record(&self, chapter: ChapterId) -> Option<&ChapterRecord> {
        self.table.record(chapter)
    }

    /// Read access to the whole table, for the navigation view.
    #[must_use]
    pub fn table(&self) -> &ProgressTable {
        &self.table
    }

    /// Clear all progress, in memory and in the blob store.
    pub fn reset(&mut self) {
        self.table.clear();
        let _ = self.store.remove();
    }

    fn flush(&self) {
        if let Ok(blob) = encode_table(&self.table) {
            let _ = self.store.write(&blob);
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
