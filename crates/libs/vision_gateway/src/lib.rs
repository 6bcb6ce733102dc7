#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

mod annotations;
mod auth;
mod client;
mod gateway;

pub use annotations::*;
pub use auth::ServiceAccountKey;
pub use client::*;
pub use gateway::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid service account key: {0}")]
    Credentials(#[from] serde_json::Error),
    #[error("signing token assertion failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("token endpoint returned status {status}: {body}")]
    TokenExchange {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("API error (status {status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("annotation failed (code {code}): {message}")]
    Annotation { code: i32, message: String },
    #[error("annotate response contained no entries")]
    EmptyResponse,
}

pub type VisionResult<T> = Result<T, VisionError>;
