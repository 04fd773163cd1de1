use crate::services::http::{build_client, endpoint, parse_base_url};
use crate::types::Country;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CountryError {
    #[error("Invalid country API URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("HTTP {0} from {1}")]
    Status(u16, String),
}

/// Read access to the country data provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryApi: Send + Sync {
    /// `GET /all`
    async fn all(&self) -> Result<Vec<Country>, CountryError>;

    /// `GET /name/{term}`, substring match on country names
    async fn by_name(&self, term: &str) -> Result<Vec<Country>, CountryError>;

    /// `GET /region/{region}`
    async fn by_region(&self, region: &str) -> Result<Vec<Country>, CountryError>;

    /// `GET /alpha/{code}`. A code the provider does not know yields `Ok(None)`.
    async fn by_code(&self, code: &str) -> Result<Option<Country>, CountryError>;
}

pub struct RestCountriesClient {
    client: reqwest::Client,
    base_url: Url,
    fields: Vec<String>,
}

impl RestCountriesClient {
    pub fn new(
        base_url: &str,
        fields: Vec<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, CountryError> {
        let base_url =
            parse_base_url(base_url).ok_or_else(|| CountryError::InvalidBaseUrl(base_url.to_string()))?;
        let client = build_client(timeout, None)?;

        Ok(Self {
            client,
            base_url,
            fields,
        })
    }

    fn list_url(&self, segments: &[&str]) -> Url {
        let mut url = endpoint(&self.base_url, segments);
        if !self.fields.is_empty() {
            url.query_pairs_mut()
                .append_pair("fields", &self.fields.join(","));
        }
        url
    }

    async fn get_countries(&self, url: Url) -> Result<Vec<Country>, CountryError> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CountryError::Status(status.as_u16(), url.to_string()));
        }

        let countries = response.json::<Vec<Country>>().await?;
        debug!("Received {} countries from {}", countries.len(), url);
        Ok(countries)
    }
}

#[async_trait]
impl CountryApi for RestCountriesClient {
    async fn all(&self) -> Result<Vec<Country>, CountryError> {
        self.get_countries(self.list_url(&["all"])).await
    }

    async fn by_name(&self, term: &str) -> Result<Vec<Country>, CountryError> {
        self.get_countries(self.list_url(&["name", term])).await
    }

    async fn by_region(&self, region: &str) -> Result<Vec<Country>, CountryError> {
        self.get_countries(self.list_url(&["region", region])).await
    }

    async fn by_code(&self, code: &str) -> Result<Option<Country>, CountryError> {
        // the provider answers a single object instead of a list when `fields` is set
        let url = endpoint(&self.base_url, &["alpha", code]);
        match self.get_countries(url).await {
            Ok(countries) => Ok(countries.into_iter().next()),
            Err(CountryError::Status(status, _)) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
