// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostureError {
    #[error("Expected {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("Invalid landmark {index}: {reason}")]
    InvalidLandmark { index: usize, reason: String },

    #[error("Unknown posture mode: {0}")]
    UnknownMode(String),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PostureError>;
