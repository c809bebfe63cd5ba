pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod generator;
pub mod reports;
pub mod session;
pub mod stats;
pub mod types;

pub use api::ResultsClient;
pub use database::{MemoryLog, SetLog, SqliteStore};
pub use error::{Error, Result};
pub use generator::{RandSource, RandomSource, generate_set};
pub use session::Session;
pub use stats::{FrequencyRanking, rank_frequency};
pub use types::{Draw, GeneratedSet, Number, Ticket};
