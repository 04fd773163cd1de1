#![allow(dead_code)]

use async_trait::async_trait;
use globe_explorer::services::{AccountError, CountryError};
use globe_explorer::{AccountApi, Country, CountryApi, User};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn country(code: &str, common: &str, region: &str, languages: &[(&str, &str)]) -> Country {
    let languages: serde_json::Map<String, serde_json::Value> = languages
        .iter()
        .map(|(key, name)| (key.to_string(), json!(name)))
        .collect();

    serde_json::from_value(json!({
        "cca3": code,
        "name": { "common": common, "official": common },
        "region": region,
        "languages": languages,
    }))
    .unwrap()
}

pub fn sample_catalogue() -> Vec<Country> {
    vec![
        country("USA", "United States", "Americas", &[("eng", "English")]),
        country("FRA", "France", "Europe", &[("fra", "French")]),
        country("DEU", "Germany", "Europe", &[("deu", "German")]),
        country("BRA", "Brazil", "Americas", &[("por", "Portuguese")]),
        country("PRT", "Portugal", "Europe", &[("por", "Portuguese")]),
        country("JPN", "Japan", "Asia", &[("jpn", "Japanese")]),
    ]
}

/// Country provider backed by a fixed catalogue. Name searches with no match
/// answer 404 the way the real provider does.
pub struct FakeCountries {
    catalogue: Vec<Country>,
    calls: AtomicUsize,
}

impl FakeCountries {
    pub fn new(catalogue: Vec<Country>) -> Self {
        Self {
            catalogue,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn matching(&self, keep: impl Fn(&Country) -> bool) -> Vec<Country> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.catalogue.iter().filter(|c| keep(c)).cloned().collect()
    }
}

#[async_trait]
impl CountryApi for FakeCountries {
    async fn all(&self) -> Result<Vec<Country>, CountryError> {
        Ok(self.matching(|_| true))
    }

    async fn by_name(&self, term: &str) -> Result<Vec<Country>, CountryError> {
        let term = term.to_lowercase();
        let found = self.matching(|c| c.common_name().to_lowercase().contains(&term));
        if found.is_empty() {
            return Err(CountryError::Status(404, format!("name/{}", term)));
        }
        Ok(found)
    }

    async fn by_region(&self, region: &str) -> Result<Vec<Country>, CountryError> {
        Ok(self.matching(|c| c.region().is_some_and(|r| r.eq_ignore_ascii_case(region))))
    }

    async fn by_code(&self, code: &str) -> Result<Option<Country>, CountryError> {
        Ok(self.matching(|c| c.code() == code).into_iter().next())
    }
}

#[derive(Default)]
struct AccountState {
    signed_in: bool,
    favourites: Vec<String>,
    fail_updates: bool,
    unavailable: bool,
}

pub const FAKE_COOKIE: &str = "connect.sid=fake";

/// Account service with a single known user
pub struct FakeAccount {
    email: String,
    password: String,
    state: Mutex<AccountState>,
    favourite_fetches: AtomicUsize,
}

impl FakeAccount {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            state: Mutex::new(AccountState::default()),
            favourite_fetches: AtomicUsize::new(0),
        }
    }

    pub fn signed_in(self, favourites: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.signed_in = true;
            state.favourites = favourites.iter().map(|c| c.to_string()).collect();
        }
        self
    }

    pub fn fail_updates(&self) {
        self.state.lock().unwrap().fail_updates = true;
    }

    /// Answer every request with 503
    pub fn unavailable(self) -> Self {
        self.state.lock().unwrap().unavailable = true;
        self
    }

    pub fn favourite_fetches(&self) -> usize {
        self.favourite_fetches.load(Ordering::SeqCst)
    }

    pub fn stored_favourites(&self) -> Vec<String> {
        self.state.lock().unwrap().favourites.clone()
    }

    fn reachable(&self) -> Result<std::sync::MutexGuard<'_, AccountState>, AccountError> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(AccountError::Rejected {
                status: 503,
                message: None,
            });
        }
        Ok(state)
    }

    fn require_session(&self) -> Result<std::sync::MutexGuard<'_, AccountState>, AccountError> {
        let state = self.reachable()?;
        if state.signed_in {
            Ok(state)
        } else {
            Err(AccountError::Rejected {
                status: 401,
                message: Some("Unauthorized".to_string()),
            })
        }
    }

    fn update(&self, apply: impl FnOnce(&mut Vec<String>)) -> Result<(), AccountError> {
        let mut state = self.require_session()?;
        if state.fail_updates {
            return Err(AccountError::Rejected {
                status: 500,
                message: None,
            });
        }
        apply(&mut state.favourites);
        Ok(())
    }
}

#[async_trait]
impl AccountApi for FakeAccount {
    async fn check_auth(&self) -> Result<User, AccountError> {
        self.require_session()?;
        Ok(User::with_email(&self.email))
    }

    async fn login(&self, email: &str, password: &str) -> Result<(), AccountError> {
        let mut state = self.reachable()?;
        if email != self.email || password != self.password {
            return Err(AccountError::Rejected {
                status: 401,
                message: Some("Invalid email or password".to_string()),
            });
        }
        state.signed_in = true;
        Ok(())
    }

    async fn logout(&self) -> Result<(), AccountError> {
        self.reachable()?.signed_in = false;
        Ok(())
    }

    async fn favourites(&self) -> Result<Vec<String>, AccountError> {
        self.favourite_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.require_session()?.favourites.clone())
    }

    async fn add_favourite(&self, code: &str) -> Result<(), AccountError> {
        self.update(|favourites| favourites.push(code.to_string()))
    }

    async fn remove_favourite(&self, code: &str) -> Result<(), AccountError> {
        self.update(|favourites| favourites.retain(|c| c != code))
    }

    fn session_cookie(&self) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.signed_in.then(|| FAKE_COOKIE.to_string())
    }
}
