use crate::app::{Notice, Session};
use crate::catalogue::favourites::LOAD_FAVOURITES_FAILED;
use crate::catalogue::{favourite_countries, FavouriteSet};
use crate::services::{AccountApi, CountryApi};
use crate::types::Country;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum FavouritesView {
    SignInRequired,
    Loaded {
        countries: Vec<Country>,
        notice: Option<Notice>,
    },
}

impl FavouritesView {
    pub fn countries(&self) -> &[Country] {
        match self {
            FavouritesView::Loaded { countries, .. } => countries,
            FavouritesView::SignInRequired => &[],
        }
    }
}

/// Fetch the full catalogue and the favourite codes side by side, then show
/// the catalogue entries that are favourites.
pub async fn load_favourites_view(
    countries: &dyn CountryApi,
    account: &dyn AccountApi,
    session: &Session,
) -> FavouritesView {
    if !session.is_authenticated().await {
        return FavouritesView::SignInRequired;
    }

    let (catalogue, codes) = futures::join!(countries.all(), account.favourites());

    match (catalogue, codes) {
        (Ok(catalogue), Ok(codes)) => {
            let favourites = FavouriteSet::from_codes(codes);
            let shown = favourite_countries(catalogue, &favourites);
            if shown.len() < favourites.len() {
                info!(
                    "{} favourite(s) not found in the catalogue",
                    favourites.len() - shown.len()
                );
            }
            FavouritesView::Loaded {
                countries: shown,
                notice: None,
            }
        }
        (catalogue, codes) => {
            if let Err(e) = catalogue {
                warn!("Failed to fetch catalogue: {}", e);
            }
            if let Err(e) = codes {
                warn!("Failed to fetch favourites: {}", e);
            }
            FavouritesView::Loaded {
                countries: Vec::new(),
                notice: Some(Notice::error(LOAD_FAVOURITES_FAILED)),
            }
        }
    }
}
