use thiserror::Error;

use crate::model::{NetworkConfigError, QuizError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    NetworkConfig(#[from] NetworkConfigError),
}
