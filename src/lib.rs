pub mod app;
pub mod catalogue;
pub mod cli;
pub mod config;
pub mod initialization;
pub mod services;
pub mod types;
pub mod utils;

pub use app::{
    load_detail, load_favourites_view, AppRunner, ApplicationError, ApplicationResult,
    DetailView, FavouritesView, ListingView, Notice, Output, Session, SessionError, SessionState,
};
pub use catalogue::{FacetOptions, FavouriteError, FavouriteSet, FilterState, PageSlice};
pub use cli::{Cli, Command};
pub use config::{Config, ConfigError};
pub use services::{AccountApi, AccountClient, CountryApi, RestCountriesClient, SessionStore};
pub use types::{Country, User};
