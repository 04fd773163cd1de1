use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Country record as served by the REST Countries v3.1 API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub cca3: String,
    pub name: CountryName,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub languages: IndexMap<String, String>,
    #[serde(default)]
    pub currencies: IndexMap<String, Currency>,
    #[serde(default)]
    pub borders: Vec<String>,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default)]
    pub maps: Option<Maps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub svg: Option<String>,
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maps {
    #[serde(default)]
    pub google_maps: Option<String>,
    #[serde(default)]
    pub open_street_maps: Option<String>,
}

impl Country {
    pub fn code(&self) -> &str {
        &self.cca3
    }

    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// First listed capital, if any
    pub fn primary_capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    /// Region, treating an empty string the same as a missing one
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }

    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.languages.values().map(String::as_str)
    }

    pub fn speaks(&self, language: &str) -> bool {
        self.language_names().any(|name| name == language)
    }

    pub fn flag_url(&self) -> Option<&str> {
        self.flags.svg.as_deref().or(self.flags.png.as_deref())
    }
}
