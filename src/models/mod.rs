pub mod config;
pub mod difficulty;
pub mod problem;

// config is accessed as crate::models::config::{load_config, save_config, ...}
pub use difficulty::Difficulty;
pub use problem::{ProblemDetail, ProblemSummary, SolvedStatus, parse_timestamp};
