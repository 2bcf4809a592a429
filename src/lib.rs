pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod criteria;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod services;
pub mod validation;

pub use adapters::{DocumentStore, MemoryStore, PostgresStore};
pub use config::AppConfig;
pub use error::{FeedError, Result, StoreError};
pub use services::FeedService;
