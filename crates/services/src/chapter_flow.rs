use crate::error::ChapterFlowError;
use crate::progress_service::ProgressService;
use tutorial_core::model::ChapterId;

/// Number of chapters in the shipped tutorial.
pub const DEFAULT_CHAPTER_COUNT: u32 = 5;

/// Drives the state transitions a chapter view performs when it becomes
/// active.
///
/// Visiting a chapter records that chapter's fixed milestone percentage and
/// retroactively completes every earlier chapter, whether or not their
/// quizzes were ever passed. Navigation itself is the authoritative
/// completion signal for prior chapters; the quiz gate only governs the
/// "next" action within the current chapter. Load-bearing behavior — the
/// unlock ceiling depends on it.
#[derive(Debug, Clone, Copy)]
pub struct ChapterFlow {
    chapter_count: u32,
}

impl ChapterFlow {
    /// A flow over the given number of chapters.
    ///
    /// # Errors
    ///
    /// Returns `ChapterFlowError::InvalidChapterCount` for zero chapters.
    pub fn new(chapter_count: u32) -> Result<Self, ChapterFlowError> {
        if chapter_count == 0 {
            return Err(ChapterFlowError::InvalidChapterCount);
        }
        Ok(Self { chapter_count })
    }

    /// The shipped five-chapter configuration.
    #[must_use]
    pub fn default_tutorial() -> Self {
        Self {
            chapter_count: DEFAULT_CHAPTER_COUNT,
        }
    }

    #[must_use]
    pub fn chapter_count(&self) -> u32 {
        self.chapter_count
    }

    /// The fixed progress percentage shown for a chapter visit:
    /// `ceil(chapter * 100 / chapter_count)`, so 1..=5 maps to 20..=100.
    #[must_use]
    pub fn milestone(&self, chapter: ChapterId) -> u8 {
        let scaled = u64::from(chapter.value()) * 100;
        let count = u64::from(self.chapter_count);
        let ceiled = scaled.div_ceil(count);
        u8::try_from(ceiled.min(100)).unwrap_or(100)
    }

    /// Apply the visit transitions for the chapter, in order:
    /// milestone progress for the chapter itself, then retroactive
    /// completion of every chapter before it.
    ///
    /// # Errors
    ///
    /// Returns `ChapterFlowError::OutOfRange` for chapter 0 or a chapter
    /// beyond the configured count.
    pub fn visit(
        &self,
        progress: &mut ProgressService,
        chapter: ChapterId,
    ) -> Result<(), ChapterFlowError> {
        if chapter.value() == 0 || chapter.value() > self.chapter_count {
            return Err(ChapterFlowError::OutOfRange {
                chapter,
                count: self.chapter_count,
            });
        }

        progress.set_progress(chapter, i32::from(self.milestone(chapter)));
        for earlier in 1..chapter.value() {
            progress.mark_complete(ChapterId::new(earlier));
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
