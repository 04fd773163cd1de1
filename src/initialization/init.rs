use crate::app::Session;
use crate::config::Config;
use crate::services::{AccountApi, AccountClient, RestCountriesClient, SessionStore};
use std::sync::Arc;
use tracing::{info, warn};

pub fn initialize_country_service(
    config: &Config,
) -> super::InitializationResult<Arc<RestCountriesClient>> {
    info!("Initializing country service");

    let client = RestCountriesClient::new(
        &config.country_api_url,
        config.country_api_fields.clone(),
        config.request_timeout,
    )?;

    info!("Country service initialized successfully");
    Ok(Arc::new(client))
}

/// Build the account client, replaying the session cookie saved by an earlier run
pub async fn initialize_account_service(
    config: &Config,
    store: &SessionStore,
) -> super::InitializationResult<Arc<AccountClient>> {
    info!("Initializing account service");

    let cookie = match store.load().await {
        Ok(cookie) => cookie,
        Err(e) => {
            warn!("Ignoring unreadable session file {:?}: {}", store.path(), e);
            None
        }
    };
    if cookie.is_some() {
        info!("Restored saved session from {:?}", store.path());
    }

    let client = AccountClient::new(&config.account_api_url, cookie, config.request_timeout)?;

    info!("Account service initialized successfully");
    Ok(Arc::new(client))
}

pub fn initialize_session(account: Arc<dyn AccountApi>) -> Arc<Session> {
    Arc::new(Session::new(account))
}

pub fn print_startup_info(config: &Config, cli: &crate::cli::Cli) {
    info!("=== GlobeExplorer Starting ===");
    info!("Country API: {}", config.country_api_url);
    info!("Account API: {}", config.account_api_url);
    info!("Page Size: {}", config.page_size);
    if !config.country_api_fields.is_empty() {
        info!("Country Fields: {}", config.country_api_fields.join(","));
    }
    info!("Session File: {:?}", config.session_file);
    if let Some(timeout) = config.request_timeout {
        info!("Request Timeout: {}s", timeout.as_secs());
    }
    info!("Log Level: {}", cli.get_log_level());
    info!("==============================");
}
