pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod sink;
pub mod transcript;

pub use error::{ArchiveError, Result};
