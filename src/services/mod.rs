pub mod account;
pub mod country;
pub mod http;
pub mod session_store;

pub use account::{AccountApi, AccountClient, AccountError};
pub use country::{CountryApi, CountryError, RestCountriesClient};
pub use session_store::{SessionStore, SessionStoreError};

#[cfg(test)]
pub use account::MockAccountApi;
#[cfg(test)]
pub use country::MockCountryApi;
