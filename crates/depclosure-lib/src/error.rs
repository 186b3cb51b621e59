//! Library error type.
//!
//! Covers setup work such as loading configuration, fixtures and parsing identifiers.
//! Failures of the resolve itself are reported through [`ResolveError`](crate::ResolveError).

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("validation error: {0}")]
	Validation(String),
	#[error("already exists: {0}")]
	AlreadyExists(String),
}
