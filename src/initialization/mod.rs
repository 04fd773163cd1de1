pub mod directories_init;
pub mod init;
pub mod validation_init;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitializationError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
    #[error("Country service error: {0}")]
    CountryError(#[from] crate::services::CountryError),
    #[error("Account service error: {0}")]
    AccountError(#[from] crate::services::AccountError),
    #[error("Session store error: {0}")]
    SessionStoreError(#[from] crate::services::SessionStoreError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid URL for {name}: {url}")]
    InvalidUrl { name: &'static str, url: String },
}

pub type InitializationResult<T> = Result<T, InitializationError>;

pub use directories_init::ensure_directories;
pub use init::{
    initialize_account_service, initialize_country_service, initialize_session,
    print_startup_info,
};
pub use validation_init::validate_config;
