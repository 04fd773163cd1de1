use crate::config::Config;
use crate::services::http::parse_base_url;
use tracing::info;

use super::{InitializationError, InitializationResult};

pub fn validate_config(config: &Config) -> InitializationResult<()> {
    info!("Validating configuration");

    for (name, url) in [
        ("COUNTRY_API_URL", &config.country_api_url),
        ("ACCOUNT_API_URL", &config.account_api_url),
    ] {
        if parse_base_url(url).is_none() {
            return Err(InitializationError::InvalidUrl {
                name,
                url: url.clone(),
            });
        }
    }

    info!("Configuration validated successfully");
    Ok(())
}
