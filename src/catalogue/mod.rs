pub mod favourites;
pub mod filter;
pub mod paginate;
pub mod requests;

pub use favourites::{
    favourite_countries, load_favourites, toggle_favourite, FavouriteError, FavouriteSet,
    PendingToggle, ToggleAction, ToggleOutcome,
};
pub use filter::{filter_by_language, FacetOptions, FetchMode, FilterState};
pub use paginate::{
    clamp_page, derive_page, next_page, page_strip, prev_page, total_pages, PageMarker, PageSlice,
};
pub use requests::{RequestId, RequestTracker};
