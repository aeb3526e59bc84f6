//! HTTP client for the internal user/auth API

use crate::error::{ClientError, ClientResult};
use dashboard_core::config::ApiConfig;
use dashboard_core::{
    BearerToken, Credentials, Decision, LoginResponse, RegisterResponse, Registration, User,
    UserProfile,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Build a reqwest client with the dashboard's timeout and user agent
pub(crate) fn build_http_client(timeout: Duration, user_agent: &str) -> ClientResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| ClientError::Build {
            message: e.to_string(),
        })
}

/// Turn a response into `T`, mapping failure statuses to typed errors
pub(crate) async fn read_json<T: DeserializeOwned>(url: &str, response: Response) -> ClientResult<T> {
    let response = check_status(url, response).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::from_reqwest(url, &e))?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

pub(crate) async fn check_status(url: &str, response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Best effort: the body is only used to surface the server's message
    let message = response
        .bytes()
        .await
        .ok()
        .and_then(|bytes| serde_json::from_slice::<ErrorBody>(&bytes).ok())
        .and_then(|body| body.message);

    let url = url.to_string();
    let status = status.as_u16();
    if status == 401 || status == 403 {
        Err(ClientError::Unauthorized {
            url,
            status,
            message,
        })
    } else {
        Err(ClientError::Status {
            url,
            status,
            message,
        })
    }
}

/// API client for the internal user/auth service
///
/// Every authenticated call takes the bearer token as an argument; the client
/// itself holds no session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with default timeout and user agent
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::from_config(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        let client = build_http_client(config.request_timeout(), &config.user_agent)?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, url: &str, token: Option<&BearerToken>) -> RequestBuilder {
        let request = self.client.request(method, url);
        match token {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> ClientResult<Response> {
        request
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(url, &e))
    }

    /// `GET auth/me`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    #[instrument(skip_all)]
    pub async fn current_user(&self, token: &BearerToken) -> ClientResult<UserProfile> {
        let url = self.url("auth/me");
        let response = self
            .send(self.request(Method::GET, &url, Some(token)), &url)
            .await?;
        read_json(&url, response).await
    }

    /// `POST auth/login`
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are blank, the request fails or
    /// the server rejects them.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        credentials.validate()?;
        let url = self.url("auth/login");
        let request = self.request(Method::POST, &url, None).json(credentials);
        let response = self.send(request, &url).await?;
        read_json(&url, response).await
    }

    /// `POST auth/register`
    ///
    /// # Errors
    ///
    /// Returns an error if the form is invalid, the request fails or the
    /// server refuses the registration.
    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> ClientResult<RegisterResponse> {
        registration.validate()?;
        let url = self.url("auth/register");
        let request = self.request(Method::POST, &url, None).json(registration);
        let response = self.send(request, &url).await?;
        read_json(&url, response).await
    }

    /// `GET users`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a user list.
    #[instrument(skip_all)]
    pub async fn list_users(&self, token: Option<&BearerToken>) -> ClientResult<Vec<User>> {
        let url = self.url("users");
        let response = self
            .send(self.request(Method::GET, &url, token), &url)
            .await?;
        let users: Vec<User> = read_json(&url, response).await?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// `POST users/{approve|reject}/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses it.
    #[instrument(skip(self, token))]
    pub async fn decide(
        &self,
        token: Option<&BearerToken>,
        id: &str,
        decision: Decision,
    ) -> ClientResult<()> {
        if id.trim().is_empty() {
            return Err(ClientError::InvalidRequest {
                message: "user id must not be empty".to_string(),
            });
        }
        let url = self.url(&format!(
            "users/{}/{}",
            decision.as_str(),
            urlencoding::encode(id)
        ));
        let response = self
            .send(self.request(Method::POST, &url, token), &url)
            .await?;
        check_status(&url, response).await?;
        Ok(())
    }

    /// `POST users/approve/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses it.
    pub async fn approve_user(&self, token: Option<&BearerToken>, id: &str) -> ClientResult<()> {
        self.decide(token, id, Decision::Approve).await
    }

    /// `POST users/reject/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses it.
    pub async fn reject_user(&self, token: Option<&BearerToken>, id: &str) -> ClientResult<()> {
        self.decide(token, id, Decision::Reject).await
    }
}
