//! Question, scoring and progress engine for the Khipu, Yupana and Chacana
//! counting games, plus the Yew shell that drives it.

pub mod achievements;
pub mod catalog;
pub mod components;
pub mod error;
pub mod messages;
pub mod model;
pub mod progress;
pub mod question;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod timer;
pub mod util;

pub use catalog::LevelCatalog;
pub use error::{EngineError, StorageError};
pub use model::{Achievement, Difficulty, GameKind, LevelRecord, LevelSpec, Question};
pub use progress::ProgressStore;
pub use scoring::ScorePolicy;
pub use session::{GameSession, Phase, SessionAction};
