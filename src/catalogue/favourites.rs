use crate::services::{AccountApi, AccountError};
use crate::types::Country;
use thiserror::Error;
use tracing::{info, warn};

pub const LOAD_FAVOURITES_FAILED: &str = "Failed to load favourites";

#[derive(Error, Debug)]
pub enum FavouriteError {
    #[error("Failed to load favourites")]
    LoadFailed(#[source] AccountError),
    #[error("Failed to update favourites")]
    UpdateFailed(#[source] AccountError),
    #[error("Sign in to manage favourites")]
    SignInRequired,
}

/// Favourite country codes of the signed-in user, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouriteSet {
    codes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Add,
    Remove,
}

/// A toggle that has been decided but not yet acknowledged by the account service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    pub code: String,
    pub action: ToggleAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added(String),
    Removed(String),
}

impl ToggleOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ToggleOutcome::Added(_) => "Added to favourites",
            ToggleOutcome::Removed(_) => "Removed from favourites",
        }
    }
}

impl FavouriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for code in codes {
            set.insert(code.into());
        }
        set
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    fn insert(&mut self, code: String) {
        if !self.contains(&code) {
            self.codes.push(code);
        }
    }

    fn remove(&mut self, code: &str) {
        self.codes.retain(|c| c != code);
    }

    /// Decide what toggling `code` means right now. Local state is untouched.
    pub fn begin_toggle(&self, code: &str) -> PendingToggle {
        let action = if self.contains(code) {
            ToggleAction::Remove
        } else {
            ToggleAction::Add
        };
        PendingToggle {
            code: code.to_string(),
            action,
        }
    }

    /// Apply a toggle the account service has acknowledged
    pub fn confirm(&mut self, pending: PendingToggle) -> ToggleOutcome {
        match pending.action {
            ToggleAction::Add => {
                self.insert(pending.code.clone());
                ToggleOutcome::Added(pending.code)
            }
            ToggleAction::Remove => {
                self.remove(&pending.code);
                ToggleOutcome::Removed(pending.code)
            }
        }
    }
}

pub async fn load_favourites(account: &dyn AccountApi) -> Result<FavouriteSet, FavouriteError> {
    let codes = account
        .favourites()
        .await
        .map_err(FavouriteError::LoadFailed)?;
    Ok(FavouriteSet::from_codes(codes))
}

/// Toggle `code` on the account service, then locally once the service has
/// acknowledged it. On failure `set` is left as it was.
pub async fn toggle_favourite(
    account: &dyn AccountApi,
    set: &mut FavouriteSet,
    code: &str,
) -> Result<ToggleOutcome, FavouriteError> {
    let pending = set.begin_toggle(code);

    let result = match pending.action {
        ToggleAction::Add => account.add_favourite(&pending.code).await,
        ToggleAction::Remove => account.remove_favourite(&pending.code).await,
    };

    match result {
        Ok(()) => {
            let outcome = set.confirm(pending);
            info!("{}: {}", outcome.message(), code);
            Ok(outcome)
        }
        Err(e) => {
            warn!("Favourite update for {} failed: {}", code, e);
            Err(FavouriteError::UpdateFailed(e))
        }
    }
}

/// Catalogue entries whose code is a favourite, in catalogue order.
/// Favourites missing from the catalogue are dropped.
pub fn favourite_countries(catalogue: Vec<Country>, favourites: &FavouriteSet) -> Vec<Country> {
    catalogue
        .into_iter()
        .filter(|country| favourites.contains(country.code()))
        .collect()
}
