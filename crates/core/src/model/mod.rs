mod ids;
mod network;
mod progress;
mod quiz;

pub use ids::{ChapterId, OptionId, ParseChapterIdError, QuestionId};
pub use network::{
    MintStatus, NetworkConfig, NetworkConfigDraft, NetworkConfigError, WalletStatus,
};
pub use progress::{ChapterRecord, ProgressTable};
pub use quiz::{QuizError, QuizOption, QuizQuestion};
