use crate::services::CountryApi;
use crate::types::Country;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Found(Box<Country>),
    NotFound,
}

/// Load one country by its code. Unknown codes and provider failures both
/// end up as `NotFound`.
pub async fn load_detail(countries: &dyn CountryApi, code: &str) -> DetailView {
    let code = code.trim();
    if code.is_empty() {
        return DetailView::NotFound;
    }

    match countries.by_code(code).await {
        Ok(Some(country)) => DetailView::Found(Box::new(country)),
        Ok(None) => {
            debug!("No country with code {}", code);
            DetailView::NotFound
        }
        Err(e) => {
            warn!("Failed to fetch country details for {}: {}", code, e);
            DetailView::NotFound
        }
    }
}
