use data_error::CrError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't retrieve home directory!")]
    HomeDirNotFound,

    #[error("{0}")]
    InvalidTag(String),

    #[error("{0} has not set a player tag yet.")]
    MemberNotFound(String),

    #[error("Unable to load from API and no cached data exists for #{0}.")]
    ProfileUnavailable(String),

    #[error("No arena reference data at {0}")]
    ArenasNotFound(String),

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    CrError(#[from] CrError),
}
