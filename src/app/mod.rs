pub mod detail;
pub mod favourites;
pub mod listing;
pub mod render;
pub mod runner;
pub mod session;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Country service error: {0}")]
    CountryError(#[from] crate::services::CountryError),
    #[error("Account service error: {0}")]
    AccountError(#[from] crate::services::AccountError),
    #[error("Session store error: {0}")]
    SessionStoreError(#[from] crate::services::SessionStoreError),
    #[error("{0}")]
    SessionError(#[from] session::SessionError),
    #[error("{0}")]
    FavouriteError(#[from] crate::catalogue::FavouriteError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Transient, non-fatal message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }
}

pub use detail::{load_detail, DetailView};
pub use favourites::{load_favourites_view, FavouritesView};
pub use listing::{ListingFetch, ListingView};
pub use runner::{AppRunner, Output};
pub use session::{Session, SessionError, SessionState};
