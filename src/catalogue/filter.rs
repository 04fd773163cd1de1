use crate::types::Country;
use std::collections::HashSet;

/// The three listing facets plus the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    region: Option<String>,
    language: Option<String>,
    page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            region: None,
            language: None,
            page: 1,
        }
    }
}

/// Which provider endpoint a listing fetch goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchMode {
    All,
    ByName(String),
    ByRegion(String),
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns true when the value changed, in which case the page is back at 1
    pub fn set_search(&mut self, term: &str) -> bool {
        if self.search == term {
            return false;
        }
        self.search = term.to_string();
        self.page = 1;
        true
    }

    /// An empty choice clears the facet
    pub fn set_region(&mut self, region: Option<&str>) -> bool {
        let region = normalize_choice(region);
        if self.region == region {
            return false;
        }
        self.region = region;
        self.page = 1;
        true
    }

    pub fn set_language(&mut self, language: Option<&str>) -> bool {
        let language = normalize_choice(language);
        if self.language == language {
            return false;
        }
        self.language = language;
        self.page = 1;
        true
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Name search wins over region; the two never combine at the fetch layer.
    /// Language is applied client-side after the fetch.
    pub fn fetch_mode(&self) -> FetchMode {
        let term = self.search.trim();
        if !term.is_empty() {
            FetchMode::ByName(term.to_string())
        } else if let Some(region) = &self.region {
            FetchMode::ByRegion(region.clone())
        } else {
            FetchMode::All
        }
    }
}

fn normalize_choice(choice: Option<&str>) -> Option<String> {
    choice
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Keep only the countries where `language` is one of the spoken language names
pub fn filter_by_language(countries: Vec<Country>, language: Option<&str>) -> Vec<Country> {
    match language {
        Some(language) => countries
            .into_iter()
            .filter(|country| country.speaks(language))
            .collect(),
        None => countries,
    }
}

/// Facet values offered for the currently loaded result set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetOptions {
    /// Distinct regions, in first-seen order
    pub regions: Vec<String>,
    /// Distinct language names, sorted
    pub languages: Vec<String>,
}

impl FacetOptions {
    pub fn from_results(results: &[Country]) -> Self {
        let mut seen = HashSet::new();
        let regions = results
            .iter()
            .filter_map(Country::region)
            .filter(|region| seen.insert(*region))
            .map(str::to_string)
            .collect();

        let mut languages: Vec<String> = results
            .iter()
            .flat_map(Country::language_names)
            .collect::<HashSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        languages.sort();

        Self { regions, languages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::testing::country;

    #[test]
    fn test_facet_change_resets_page() {
        let mut filters = FilterState::new();
        filters.set_page(4);

        assert!(filters.set_region(Some("Europe")));
        assert_eq!(filters.page(), 1);

        filters.set_page(3);
        assert!(filters.set_language(Some("French")));
        assert_eq!(filters.page(), 1);

        filters.set_page(2);
        assert!(filters.set_search("fra"));
        assert_eq!(filters.page(), 1);
    }

    #[test]
    fn test_unchanged_facet_keeps_page() {
        let mut filters = FilterState::new();
        filters.set_region(Some("Asia"));
        filters.set_page(3);

        assert!(!filters.set_region(Some("Asia")));
        assert_eq!(filters.page(), 3);
    }

    #[test]
    fn test_empty_choice_clears_facet() {
        let mut filters = FilterState::new();
        filters.set_region(Some("Asia"));
        assert!(filters.set_region(Some("  ")));
        assert_eq!(filters.region(), None);
    }

    #[test]
    fn test_fetch_mode_precedence() {
        let mut filters = FilterState::new();
        assert_eq!(filters.fetch_mode(), FetchMode::All);

        filters.set_region(Some("Europe"));
        assert_eq!(filters.fetch_mode(), FetchMode::ByRegion("Europe".to_string()));

        filters.set_search("ger");
        assert_eq!(filters.fetch_mode(), FetchMode::ByName("ger".to_string()));

        filters.set_language(Some("German"));
        assert_eq!(filters.fetch_mode(), FetchMode::ByName("ger".to_string()));
    }

    #[test]
    fn test_filter_by_language() {
        let countries = vec![
            country("CHE", "Switzerland", Some("Europe"), &["French", "German", "Italian"]),
            country("FRA", "France", Some("Europe"), &["French"]),
            country("DEU", "Germany", Some("Europe"), &["German"]),
        ];

        let french: Vec<_> = filter_by_language(countries.clone(), Some("French"))
            .into_iter()
            .map(|c| c.cca3)
            .collect();
        assert_eq!(french, vec!["CHE", "FRA"]);

        assert_eq!(filter_by_language(countries, None).len(), 3);
    }

    #[test]
    fn test_facet_options() {
        let countries = vec![
            country("FRA", "France", Some("Europe"), &["French"]),
            country("JPN", "Japan", Some("Asia"), &["Japanese"]),
            country("ATA", "Antarctica", Some(""), &[]),
            country("BEL", "Belgium", Some("Europe"), &["German", "French", "Dutch"]),
            country("XXX", "Nowhere", None, &[]),
        ];

        let options = FacetOptions::from_results(&countries);
        assert_eq!(options.regions, vec!["Europe", "Asia"]);
        assert_eq!(options.languages, vec!["Dutch", "French", "German", "Japanese"]);
    }

    #[test]
    fn test_facet_options_empty() {
        assert_eq!(FacetOptions::from_results(&[]), FacetOptions::default());
    }
}
