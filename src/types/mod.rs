pub mod country;
pub mod user;

pub use country::{Country, CountryName, Currency, Flags, Maps};
pub use user::{
    AddFavouriteRequest, CheckAuthResponse, ErrorBody, FavouritesResponse, LoginRequest, User,
};
