use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity returned by the account service. Only a few fields are
/// recognised; the rest of the payload is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl User {
    pub fn with_email(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            name: None,
            username: None,
            extra: HashMap::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("signed-in user")
    }
}

/// Body of `GET /check-auth`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckAuthResponse {
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of `GET /getFav`
#[derive(Debug, Clone, Deserialize)]
pub struct FavouritesResponse {
    #[serde(default)]
    pub favourites: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavouriteRequest<'a> {
    pub country_code: &'a str,
}

/// Error body the account service sends with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message).filter(|m| !m.is_empty())
    }
}
