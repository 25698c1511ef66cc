#![forbid(unsafe_code)]

pub mod chapter_flow;
pub mod contract;
pub mod error;
pub mod mint_service;
pub mod progress_service;
pub mod quiz_gate;
pub mod typewriter;

pub use tutorial_core::Clock;

pub use chapter_flow::{ChapterFlow, DEFAULT_CHAPTER_COUNT};
pub use contract::{ContractGateway, GatewayError, MintReceipt, ScriptedGateway};
pub use error::{ChapterFlowError, MintError, QuizGateError};
pub use mint_service::MintService;
pub use progress_service::ProgressService;
pub use quiz_gate::{GateProgress, GateStep, QuizGate};
pub use typewriter::Typewriter;
