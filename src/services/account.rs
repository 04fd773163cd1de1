use crate::services::http::{build_client, endpoint, parse_base_url, SessionJar};
use crate::types::{
    AddFavouriteRequest, CheckAuthResponse, ErrorBody, FavouritesResponse, LoginRequest, User,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Invalid account API URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Account service rejected the request (HTTP {status})")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("No active session")]
    NoSession,
}

impl AccountError {
    /// Message supplied by the account service, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AccountError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The service looked at the session and turned it down, as opposed to
    /// being unreachable or failing
    pub fn is_session_rejected(&self) -> bool {
        match self {
            AccountError::NoSession => true,
            AccountError::Rejected { status, .. } => {
                *status == StatusCode::UNAUTHORIZED.as_u16()
                    || *status == StatusCode::FORBIDDEN.as_u16()
            }
            _ => false,
        }
    }
}

/// Session-based account service: authentication and the favourites store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// `GET /check-auth`. A response without a user is `AccountError::NoSession`.
    async fn check_auth(&self) -> Result<User, AccountError>;

    /// `POST /login`
    async fn login(&self, email: &str, password: &str) -> Result<(), AccountError>;

    /// `POST /logout`
    async fn logout(&self) -> Result<(), AccountError>;

    /// `GET /getFav`
    async fn favourites(&self) -> Result<Vec<String>, AccountError>;

    /// `POST /addFav`
    async fn add_favourite(&self, code: &str) -> Result<(), AccountError>;

    /// `DELETE /removeFav/{code}`
    async fn remove_favourite(&self, code: &str) -> Result<(), AccountError>;

    /// Cookie header value identifying the current session, for persisting
    fn session_cookie(&self) -> Option<String> {
        None
    }
}

/// HTTP client for the account service. Cookies handed out by the service
/// live in a jar and are replayed on every request.
pub struct AccountClient {
    client: reqwest::Client,
    base_url: Url,
    cookies: Arc<SessionJar>,
}

impl AccountClient {
    pub fn new(
        base_url: &str,
        cookie: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, AccountError> {
        let base_url =
            parse_base_url(base_url).ok_or_else(|| AccountError::InvalidBaseUrl(base_url.to_string()))?;
        let cookies = Arc::new(SessionJar::new());
        if let Some(cookie) = cookie.as_deref() {
            cookies.restore(cookie, &base_url);
        }
        let client = build_client(timeout, Some(Arc::clone(&cookies)))?;

        Ok(Self {
            client,
            base_url,
            cookies,
        })
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = endpoint(&self.base_url, segments);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Send a request and turn non-2xx answers into `Rejected`
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AccountError> {
        let response = builder.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message);

        Err(AccountError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AccountApi for AccountClient {
    async fn check_auth(&self) -> Result<User, AccountError> {
        let request = self.request(Method::GET, &["check-auth"]);
        let body = self.send(request).await?.json::<CheckAuthResponse>().await?;
        body.user.ok_or(AccountError::NoSession)
    }

    async fn login(&self, email: &str, password: &str) -> Result<(), AccountError> {
        let request = self
            .request(Method::POST, &["login"])
            .json(&LoginRequest { email, password });
        self.send(request).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), AccountError> {
        let request = self.request(Method::POST, &["logout"]);
        let result = self.send(request).await.map(|_| ());
        self.cookies.clear();
        result
    }

    async fn favourites(&self) -> Result<Vec<String>, AccountError> {
        let request = self.request(Method::GET, &["getFav"]);
        let body = self.send(request).await?.json::<FavouritesResponse>().await?;
        Ok(body.favourites)
    }

    async fn add_favourite(&self, code: &str) -> Result<(), AccountError> {
        let request = self
            .request(Method::POST, &["addFav"])
            .json(&AddFavouriteRequest { country_code: code });
        self.send(request).await?;
        Ok(())
    }

    async fn remove_favourite(&self, code: &str) -> Result<(), AccountError> {
        let request = self.request(Method::DELETE, &["removeFav", code]);
        self.send(request).await?;
        Ok(())
    }

    fn session_cookie(&self) -> Option<String> {
        self.cookies.header_value(&self.base_url)
    }
}
