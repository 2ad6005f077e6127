mod account;
mod client;
mod config;
mod databases;
mod error;
mod query;
mod storage;

pub use account::{Account, EmailToken, Session};
pub use client::AppwriteClient;
pub use config::AppwriteConfig;
pub use databases::DocumentList;
pub use error::AppwriteError;
pub use query::Query;
pub use storage::BucketFile;

/// Sentinel id that asks the backend to mint a unique id server-side.
pub const UNIQUE_ID: &str = "unique()";
