pub mod client;
pub mod types;

pub use client::SchedulerClient;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Invalid date format: {0}")]
    Format(String),
    #[error("API request failed: {status} {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
