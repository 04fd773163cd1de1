use crate::app::{Notice, Session};
use crate::catalogue::{
    clamp_page, derive_page, filter_by_language, load_favourites, next_page, prev_page,
    toggle_favourite, FacetOptions, FavouriteError, FavouriteSet, FetchMode, FilterState,
    PageSlice, RequestId, RequestTracker, ToggleOutcome,
};
use crate::services::{AccountApi, CountryApi, CountryError};
use crate::types::Country;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const LOAD_COUNTRIES_FAILED: &str = "Failed to load countries.";

/// A listing fetch that has been issued but not yet applied
#[derive(Debug, Clone)]
pub struct ListingFetch {
    id: RequestId,
    mode: FetchMode,
    language: Option<String>,
}

impl ListingFetch {
    /// Run the fetch against the provider. Takes no view state, so several
    /// fetches can be in flight at once.
    pub async fn execute(&self, countries: &dyn CountryApi) -> Result<Vec<Country>, CountryError> {
        match &self.mode {
            FetchMode::All => countries.all().await,
            FetchMode::ByName(term) => countries.by_name(term).await,
            FetchMode::ByRegion(region) => countries.by_region(region).await,
        }
    }
}

/// State behind the country listing: facets, the loaded result set, the
/// visible page and the favourite markers.
pub struct ListingView {
    countries: Arc<dyn CountryApi>,
    account: Arc<dyn AccountApi>,
    session: Arc<Session>,
    page_size: NonZeroUsize,
    filters: FilterState,
    results: Vec<Country>,
    favourites: FavouriteSet,
    requests: RequestTracker,
    notices: Vec<Notice>,
}

impl ListingView {
    pub fn new(
        countries: Arc<dyn CountryApi>,
        account: Arc<dyn AccountApi>,
        session: Arc<Session>,
        page_size: NonZeroUsize,
    ) -> Self {
        Self {
            countries,
            account,
            session,
            page_size,
            filters: FilterState::new(),
            results: Vec::new(),
            favourites: FavouriteSet::new(),
            requests: RequestTracker::new(),
            notices: Vec::new(),
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn results(&self) -> &[Country] {
        &self.results
    }

    pub fn favourites(&self) -> &FavouriteSet {
        &self.favourites
    }

    pub fn set_search(&mut self, term: &str) -> bool {
        self.filters.set_search(term)
    }

    pub fn set_region(&mut self, region: Option<&str>) -> bool {
        self.filters.set_region(region)
    }

    pub fn set_language(&mut self, language: Option<&str>) -> bool {
        self.filters.set_language(language)
    }

    /// Issue a fetch for the current facets. Any fetch issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> ListingFetch {
        ListingFetch {
            id: self.requests.issue(),
            mode: self.filters.fetch_mode(),
            language: self.filters.language().map(str::to_string),
        }
    }

    /// Apply a fetch result. Returns false when a newer fetch has been issued
    /// since, in which case the result is dropped.
    pub fn complete_fetch(
        &mut self,
        fetch: ListingFetch,
        result: Result<Vec<Country>, CountryError>,
    ) -> bool {
        if !self.requests.is_latest(&fetch.id) {
            debug!("Discarding stale listing response for {:?}", fetch.mode);
            return false;
        }

        match result {
            Ok(countries) => {
                self.results = filter_by_language(countries, fetch.language.as_deref());
                debug!("Listing holds {} countries", self.results.len());
            }
            Err(e) => {
                warn!("Error fetching countries: {}", e);
                self.results.clear();
                self.notices.push(Notice::error(LOAD_COUNTRIES_FAILED));
            }
        }
        true
    }

    pub async fn refresh(&mut self) {
        let fetch = self.begin_fetch();
        let countries = Arc::clone(&self.countries);
        let result = fetch.execute(countries.as_ref()).await;
        self.complete_fetch(fetch, result);
    }

    /// Load the favourite set when someone is signed in
    pub async fn load_favourites(&mut self) {
        if !self.session.is_authenticated().await {
            self.favourites = FavouriteSet::new();
            return;
        }

        match load_favourites(self.account.as_ref()).await {
            Ok(favourites) => {
                info!("Loaded {} favourites", favourites.len());
                self.favourites = favourites;
            }
            Err(e) => {
                warn!("{}", e);
                self.favourites = FavouriteSet::new();
                self.notices.push(Notice::error(e.to_string()));
            }
        }
    }

    pub fn page(&self) -> PageSlice<'_, Country> {
        derive_page(&self.results, self.filters.page(), self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        self.page().total_pages
    }

    pub fn facet_options(&self) -> FacetOptions {
        FacetOptions::from_results(&self.results)
    }

    pub fn next_page(&mut self) -> bool {
        match next_page(self.filters.page(), self.total_pages()) {
            Some(page) => {
                self.filters.set_page(page);
                true
            }
            None => false,
        }
    }

    pub fn prev_page(&mut self) -> bool {
        match prev_page(self.filters.page()) {
            Some(page) => {
                self.filters.set_page(page);
                true
            }
            None => false,
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        let page = clamp_page(page, self.total_pages());
        self.filters.set_page(page);
    }

    pub fn is_favourite(&self, code: &str) -> bool {
        self.favourites.contains(code)
    }

    pub async fn toggle_favourite(&mut self, code: &str) -> Result<ToggleOutcome, FavouriteError> {
        if !self.session.is_authenticated().await {
            return Err(FavouriteError::SignInRequired);
        }

        let result = toggle_favourite(self.account.as_ref(), &mut self.favourites, code).await;
        match &result {
            Ok(outcome) => self.notices.push(Notice::success(outcome.message())),
            Err(e) => self.notices.push(Notice::error(e.to_string())),
        }
        result
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::testing::country;
    use crate::services::{AccountError, MockAccountApi, MockCountryApi};
    use crate::types::User;

    fn catalogue(n: usize) -> Vec<Country> {
        (0..n)
            .map(|i| {
                let region = if i % 2 == 0 { "Europe" } else { "Asia" };
                country(&format!("C{:02}", i), &format!("Country {}", i), Some(region), &["English"])
            })
            .collect()
    }

    async fn view(countries: MockCountryApi, account: MockAccountApi) -> ListingView {
        let account: Arc<dyn AccountApi> = Arc::new(account);
        let session = Arc::new(Session::new(Arc::clone(&account)));
        session.bootstrap().await;
        ListingView::new(
            Arc::new(countries),
            account,
            session,
            NonZeroUsize::new(12).unwrap(),
        )
    }

    fn anonymous() -> MockAccountApi {
        let mut account = MockAccountApi::new();
        account
            .expect_check_auth()
            .returning(|| Err(AccountError::NoSession));
        account
    }

    #[tokio::test]
    async fn test_refresh_loads_first_page() {
        let mut countries = MockCountryApi::new();
        countries.expect_all().times(1).returning(|| Ok(catalogue(30)));

        let mut view = view(countries, anonymous()).await;
        view.refresh().await;

        let page = view.page();
        assert_eq!(page.items.len(), 12);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_region_change_resets_page_and_refetches_by_region() {
        let mut countries = MockCountryApi::new();
        countries.expect_all().returning(|| Ok(catalogue(40)));
        countries
            .expect_by_region()
            .withf(|region| region == "Europe")
            .times(1)
            .returning(|_| Ok(catalogue(20)));

        let mut view = view(countries, anonymous()).await;
        view.refresh().await;
        assert!(view.next_page());
        assert!(view.next_page());
        assert_eq!(view.filters().page(), 3);

        assert!(view.set_region(Some("Europe")));
        assert_eq!(view.filters().page(), 1);
        view.refresh().await;
        assert_eq!(view.results().len(), 20);
    }

    #[tokio::test]
    async fn test_language_filters_client_side() {
        let mut countries = MockCountryApi::new();
        countries.expect_all().returning(|| {
            Ok(vec![
                country("FRA", "France", Some("Europe"), &["French"]),
                country("DEU", "Germany", Some("Europe"), &["German"]),
            ])
        });

        let mut view = view(countries, anonymous()).await;
        view.set_language(Some("German"));
        view.refresh().await;

        assert_eq!(view.results().len(), 1);
        assert_eq!(view.results()[0].code(), "DEU");
        assert_eq!(view.facet_options().languages, vec!["German"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_clears_results_with_notice() {
        let mut countries = MockCountryApi::new();
        countries.expect_all().times(1).returning(|| Ok(catalogue(5)));
        countries
            .expect_by_name()
            .returning(|_| Err(CountryError::Status(404, "name/zzz".to_string())));

        let mut view = view(countries, anonymous()).await;
        view.refresh().await;
        view.set_search("zzz");
        view.refresh().await;

        assert!(view.results().is_empty());
        assert_eq!(view.take_notices(), vec![Notice::error(LOAD_COUNTRIES_FAILED)]);
        assert!(view.take_notices().is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let mut view = view(MockCountryApi::new(), anonymous()).await;

        view.set_search("fra");
        let stale = view.begin_fetch();
        view.set_search("ger");
        let fresh = view.begin_fetch();

        assert!(view.complete_fetch(fresh, Ok(catalogue(2))));
        assert!(!view.complete_fetch(stale, Ok(catalogue(9))));
        assert_eq!(view.results().len(), 2);
    }

    #[tokio::test]
    async fn test_navigation_stays_in_bounds() {
        let mut countries = MockCountryApi::new();
        countries.expect_all().returning(|| Ok(catalogue(13)));

        let mut view = view(countries, anonymous()).await;
        view.refresh().await;

        assert!(!view.prev_page());
        assert!(view.next_page());
        assert!(!view.next_page());
        view.go_to_page(99);
        assert_eq!(view.filters().page(), 2);
        assert_eq!(view.page().items.len(), 1);
    }

    #[tokio::test]
    async fn test_favourites_require_sign_in() {
        let mut view = view(MockCountryApi::new(), anonymous()).await;
        view.load_favourites().await;
        assert!(view.favourites().is_empty());

        let result = view.toggle_favourite("USA").await;
        assert!(matches!(result, Err(FavouriteError::SignInRequired)));
    }

    #[tokio::test]
    async fn test_toggle_favourite_when_signed_in() {
        let mut account = MockAccountApi::new();
        account
            .expect_check_auth()
            .returning(|| Ok(User::with_email("test@example.com")));
        account
            .expect_favourites()
            .returning(|| Ok(vec!["USA".to_string()]));
        account.expect_remove_favourite().returning(|_| Ok(()));
        account.expect_add_favourite().returning(|_| {
            Err(AccountError::Rejected {
                status: 500,
                message: None,
            })
        });

        let mut view = view(MockCountryApi::new(), account).await;
        view.load_favourites().await;
        assert!(view.is_favourite("USA"));

        view.toggle_favourite("USA").await.unwrap();
        assert!(!view.is_favourite("USA"));

        assert!(view.toggle_favourite("FRA").await.is_err());
        assert!(!view.is_favourite("FRA"));

        assert_eq!(
            view.take_notices(),
            vec![
                Notice::success("Removed from favourites"),
                Notice::error("Failed to update favourites"),
            ]
        );
    }

    #[tokio::test]
    async fn test_favourites_load_failure_gives_empty_set() {
        let mut account = MockAccountApi::new();
        account
            .expect_check_auth()
            .returning(|| Ok(User::with_email("test@example.com")));
        account
            .expect_favourites()
            .returning(|| Err(AccountError::NoSession));

        let mut view = view(MockCountryApi::new(), account).await;
        view.load_favourites().await;

        assert!(view.favourites().is_empty());
        assert_eq!(view.take_notices(), vec![Notice::error("Failed to load favourites")]);
    }
}
