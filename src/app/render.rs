use crate::app::{DetailView, FavouritesView, ListingView, Notice, SessionState};
use crate::catalogue::{page_strip, PageMarker};
use crate::types::Country;
use crate::utils::{
    format_count, format_currencies, format_decimal, format_list, or_not_available,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write;
use std::future::Future;
use std::time::Duration;

pub const NO_FAVOURITES: &str = "No favourites added yet.";
pub const SIGN_IN_FOR_FAVOURITES: &str = "You must be logged in to view favourites.";
pub const COUNTRY_NOT_FOUND: &str = "Country Not Found";

pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Show a spinner while `future` runs
pub async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let pb = create_spinner(message);
    let output = future.await;
    pb.finish_and_clear();
    output
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Success(message) => format!("✔ {}", message),
        Notice::Error(message) => format!("✖ {}", message),
    }
}

pub fn render_session(state: &SessionState) -> String {
    match state {
        SessionState::Checking => "Checking session...".to_string(),
        SessionState::Authenticated(user) => format!("Signed in as {}", user.display_name()),
        SessionState::Anonymous => "Not signed in".to_string(),
    }
}

/// `‹ 1 … 4 [5] 6 … 10 ›`
pub fn render_page_strip(current: usize, total_pages: usize) -> String {
    let mut parts = vec![if current > 1 { "‹" } else { " " }.to_string()];
    for marker in page_strip(current, total_pages) {
        parts.push(match marker {
            PageMarker::Page(page) if page == current => format!("[{}]", page),
            PageMarker::Page(page) => page.to_string(),
            PageMarker::Gap => "…".to_string(),
        });
    }
    parts.push(if current < total_pages { "›" } else { " " }.to_string());
    parts.join(" ").trim().to_string()
}

fn render_card(out: &mut String, country: &Country, favourite: Option<bool>) {
    let marker = match favourite {
        Some(true) => " ★",
        Some(false) => " ☆",
        None => "",
    };
    let _ = writeln!(out, "{}{} ({})", country.common_name(), marker, country.code());
    let _ = writeln!(out, "  Capital:    {}", or_not_available(country.primary_capital()));
    let _ = writeln!(out, "  Region:     {}", or_not_available(country.region()));
    let _ = writeln!(out, "  Population: {}", format_count(country.population));
    let _ = writeln!(out, "  Languages:  {}", format_list(country.language_names()));
}

pub fn render_listing(view: &ListingView, signed_in: bool) -> String {
    let mut out = String::new();
    let page = view.page();
    let total = view.results().len();

    let _ = writeln!(out, "Explore Countries");
    let _ = writeln!(out);

    if total == 0 {
        let _ = writeln!(out, "No countries found");
        let _ = writeln!(out, "Try adjusting your search or filter criteria.");
    } else {
        let _ = writeln!(
            out,
            "Showing {} to {} of {} countries",
            page.first_index + 1,
            page.last_index,
            total
        );
    }

    if signed_in {
        let _ = writeln!(
            out,
            "{} countries in your favourites",
            view.favourites().len()
        );
    }

    for country in page.items {
        let _ = writeln!(out);
        let favourite = signed_in.then(|| view.is_favourite(country.code()));
        render_card(&mut out, country, favourite);
    }

    if page.total_pages > 1 {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            render_page_strip(view.filters().page(), page.total_pages)
        );
    }

    let options = view.facet_options();
    let _ = writeln!(out);
    let _ = writeln!(out, "Regions:   {}", format_list(options.regions.iter().map(String::as_str)));
    let _ = writeln!(out, "Languages: {}", format_list(options.languages.iter().map(String::as_str)));

    out
}

pub fn render_detail(view: &DetailView) -> String {
    let mut out = String::new();

    let country = match view {
        DetailView::Found(country) => country,
        DetailView::NotFound => {
            let _ = writeln!(out, "{}", COUNTRY_NOT_FOUND);
            let _ = writeln!(out, "We couldn't find details for the requested country.");
            let _ = writeln!(out, "Return to Country List: globe-explorer list");
            return out;
        }
    };

    let _ = writeln!(out, "{}", country.common_name());
    if !country.name.official.is_empty() {
        let _ = writeln!(out, "{}", country.name.official);
    }
    if let Some(flag) = country.flag_url() {
        let _ = writeln!(out, "Flag: {}", flag);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Population: {}", format_count(country.population));
    let _ = writeln!(out, "Area:       {} km²", format_decimal(country.area));
    let _ = writeln!(out, "Region:     {}", or_not_available(country.region()));
    let _ = writeln!(out, "Capital:    {}", or_not_available(country.primary_capital()));

    let _ = writeln!(out);
    let _ = writeln!(out, "Location");
    let _ = writeln!(out, "  Subregion:  {}", or_not_available(country.subregion.as_deref()));
    if !country.borders.is_empty() {
        let _ = writeln!(out, "  Borders:    {}", country.borders.join(" "));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Languages & Currency");
    let _ = writeln!(out, "  Languages:  {}", format_list(country.language_names()));
    let _ = writeln!(out, "  Currencies: {}", format_currencies(&country.currencies));

    let _ = writeln!(out);
    let _ = writeln!(out, "Time");
    for zone in &country.timezones {
        let _ = writeln!(out, "  {}", zone);
    }

    if let Some(maps) = &country.maps {
        let _ = writeln!(out);
        let _ = writeln!(out, "Maps");
        if let Some(url) = &maps.google_maps {
            let _ = writeln!(out, "  Google Maps:   {}", url);
        }
        if let Some(url) = &maps.open_street_maps {
            let _ = writeln!(out, "  OpenStreetMap: {}", url);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Data provided by REST Countries API");
    out
}

pub fn render_favourites(view: &FavouritesView) -> String {
    let mut out = String::new();

    let countries = match view {
        FavouritesView::SignInRequired => {
            let _ = writeln!(out, "{}", SIGN_IN_FOR_FAVOURITES);
            return out;
        }
        FavouritesView::Loaded { countries, .. } => countries,
    };

    let _ = writeln!(out, "Your Favourite Countries");
    if countries.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", NO_FAVOURITES);
    }
    for country in countries {
        let _ = writeln!(out);
        render_card(&mut out, country, None);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::testing::country;
    use crate::types::User;

    #[test]
    fn test_page_strip() {
        assert_eq!(render_page_strip(5, 10), "‹ 1 … 4 [5] 6 … 10 ›");
        assert_eq!(render_page_strip(1, 3), "[1] 2 3 ›");
        assert_eq!(render_page_strip(3, 3), "‹ 1 2 [3]");
    }

    #[test]
    fn test_session_line() {
        assert_eq!(render_session(&SessionState::Anonymous), "Not signed in");
        assert_eq!(
            render_session(&SessionState::Authenticated(User::with_email("a@b.c"))),
            "Signed in as a@b.c"
        );
    }

    #[test]
    fn test_favourites_view() {
        let view = FavouritesView::Loaded {
            countries: vec![country("USA", "United States", Some("Americas"), &["English"])],
            notice: None,
        };
        let text = render_favourites(&view);
        assert!(text.contains("Your Favourite Countries"));
        assert!(text.contains("United States"));
        assert!(!text.contains("France"));
        assert!(!text.contains(NO_FAVOURITES));
    }

    #[test]
    fn test_empty_favourites_view() {
        let view = FavouritesView::Loaded {
            countries: Vec::new(),
            notice: Some(Notice::error("Failed to load favourites")),
        };
        assert!(render_favourites(&view).contains("No favourites added yet."));
        assert_eq!(
            render_favourites(&FavouritesView::SignInRequired).trim(),
            SIGN_IN_FOR_FAVOURITES
        );
    }

    #[test]
    fn test_not_found_detail() {
        let text = render_detail(&DetailView::NotFound);
        assert!(text.starts_with("Country Not Found"));
    }

    #[test]
    fn test_detail_fallbacks() {
        let text = render_detail(&DetailView::Found(Box::new(country(
            "ATA",
            "Antarctica",
            None,
            &[],
        ))));
        assert!(text.contains("Capital:    N/A"));
        assert!(text.contains("Languages:  N/A"));
        assert!(text.contains("Currencies: N/A"));
        assert!(!text.contains("Borders"));
    }

    #[test]
    fn test_notice() {
        assert_eq!(render_notice(&Notice::error("Failed to load countries.")), "✖ Failed to load countries.");
    }
}
