pub mod client;
pub mod error;
pub mod types;

pub use client::{PracticumClient, StatusFetcher};
pub use error::ApiError;
pub use types::{StatusCode, Validated, WorkItemStatus};
