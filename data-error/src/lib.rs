use std::{str::Utf8Error, time::SystemTimeError};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrError>;

#[derive(Error, Debug)]
pub enum CrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error")]
    Parse,
    #[error("Storage error: {0} {1}")]
    Storage(String, String),
    #[error("Invalid player tag, offending characters: {0:?}")]
    InvalidTag(Vec<char>),
    #[error("No cached record for #{0}")]
    NoCachedRecord(String),
    #[error("Chest type {0} does not appear in the chest cycle")]
    ChestTypeNotFound(String),
    #[error("Malformed tier table: {0}")]
    MalformedTierTable(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<Utf8Error> for CrError {
    fn from(_: Utf8Error) -> Self {
        Self::Parse
    }
}

impl From<serde_json::Error> for CrError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}

impl From<reqwest::Error> for CrError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<SystemTimeError> for CrError {
    fn from(value: SystemTimeError) -> Self {
        Self::Other(anyhow::anyhow!(value.to_string()))
    }
}
