//! Session store: who is logged in, and with which token
//!
//! A [`Session`] is an explicit value. It is built from the token cookie at
//! the start of a request and handed to whatever needs it; nothing here is
//! global.

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use dashboard_core::{
    BearerToken, Credentials, LoginResponse, RegisterResponse, Registration, UserProfile,
};
use tracing::{info, warn};

/// Identity endpoints the session store depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Resolve a token to its profile
    async fn current_user(&self, token: &BearerToken) -> ClientResult<UserProfile>;

    /// Exchange credentials for a token
    async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse>;

    /// Create an account
    async fn register(&self, registration: &Registration) -> ClientResult<RegisterResponse>;
}

#[async_trait]
impl IdentityApi for ApiClient {
    async fn current_user(&self, token: &BearerToken) -> ClientResult<UserProfile> {
        Self::current_user(self, token).await
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        Self::login(self, credentials).await
    }

    async fn register(&self, registration: &Registration) -> ClientResult<RegisterResponse> {
        Self::register(self, registration).await
    }
}

/// Authentication state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No usable token
    Unauthenticated,
    /// A token is being checked against `auth/me`
    Checking,
    /// Token accepted
    Authenticated(UserProfile),
}

/// Token plus the state derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<BearerToken>,
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Session {
    /// Session without a token
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            token: None,
            state: SessionState::Unauthenticated,
        }
    }

    /// Session about to check `token`
    #[must_use]
    pub const fn checking(token: BearerToken) -> Self {
        Self {
            token: Some(token),
            state: SessionState::Checking,
        }
    }

    /// Settle a check. A failure drops the token and ends unauthenticated;
    /// the error is only logged.
    pub fn resolve(&mut self, result: ClientResult<UserProfile>) {
        match result {
            Ok(profile) => {
                self.state = SessionState::Authenticated(profile);
            }
            Err(e) => {
                warn!(error = %e, "Session check failed, continuing unauthenticated");
                self.token = None;
                self.state = SessionState::Unauthenticated;
            }
        }
    }

    /// Rebuild the session from a stored token. With no token no request is
    /// made; a rejected token falls back to unauthenticated without error.
    pub async fn restore<A>(api: &A, token: Option<BearerToken>) -> Self
    where
        A: IdentityApi + ?Sized,
    {
        let Some(token) = token else {
            return Self::anonymous();
        };
        let mut session = Self::checking(token.clone());
        session.resolve(api.current_user(&token).await);
        session
    }

    /// Log in: post credentials, then load the profile. The token is kept
    /// only if both steps succeed.
    ///
    /// # Errors
    ///
    /// Returns the failure of either step; the session is then
    /// unauthenticated with no token.
    pub async fn login<A>(&mut self, api: &A, credentials: &Credentials) -> ClientResult<()>
    where
        A: IdentityApi + ?Sized,
    {
        self.token = None;
        self.state = SessionState::Checking;

        let outcome = Self::authenticate(api, credentials).await;
        match outcome {
            Ok((token, profile)) => {
                info!(username = %credentials.username, "Login succeeded");
                self.token = Some(token);
                self.state = SessionState::Authenticated(profile);
                Ok(())
            }
            Err(e) => {
                warn!(username = %credentials.username, error = %e, "Login failed");
                self.state = SessionState::Unauthenticated;
                Err(e)
            }
        }
    }

    async fn authenticate<A>(
        api: &A,
        credentials: &Credentials,
    ) -> ClientResult<(BearerToken, UserProfile)>
    where
        A: IdentityApi + ?Sized,
    {
        let response = api.login(credentials).await?;
        let token = BearerToken::new(response.token).ok_or_else(|| ClientError::Decode {
            url: "auth/login".to_string(),
            message: "empty token in login response".to_string(),
        })?;
        let profile = api.current_user(&token).await?;
        Ok((token, profile))
    }

    /// Register an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns the registration failure.
    pub async fn register<A>(api: &A, registration: &Registration) -> ClientResult<RegisterResponse>
    where
        A: IdentityApi + ?Sized,
    {
        let response = api.register(registration).await?;
        info!(email = %registration.email, "Registration submitted");
        Ok(response)
    }

    /// Forget token and user, returning the dropped token
    pub fn logout(&mut self) -> Option<BearerToken> {
        self.state = SessionState::Unauthenticated;
        self.token.take()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Token, if any
    #[must_use]
    pub const fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    /// Profile, if authenticated
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        match &self.state {
            SessionState::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }

    /// Whether a profile is loaded
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use mockall::predicate::always;
    use pretty_assertions::assert_eq;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u-1".to_string(),
            email: "admin@example.com".to_string(),
            username: "admin".to_string(),
            role: "admin".to_string(),
            status: "approved".to_string(),
        }
    }

    fn unauthorized(path: &str) -> ClientError {
        ClientError::Unauthorized {
            url: path.to_string(),
            status: 401,
            message: Some("Invalid credentials".to_string()),
        }
    }

    fn token(value: &str) -> BearerToken {
        BearerToken::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_restore_without_token_makes_no_call() {
        let mut api = MockIdentityApi::new();
        api.expect_current_user().never();

        let session = Session::restore(&api, None).await;
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let mut api = MockIdentityApi::new();
        api.expect_current_user()
            .withf(|t| t.as_str() == "abc")
            .times(1)
            .returning(|_| Ok(profile()));

        let session = Session::restore(&api, Some(token("abc"))).await;
        assert!(session.is_authenticated());
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("admin"));
        assert_eq!(session.token().map(BearerToken::as_str), Some("abc"));
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_falls_back_silently() {
        let mut api = MockIdentityApi::new();
        api.expect_current_user()
            .times(1)
            .returning(|_| Err(unauthorized("auth/me")));

        let session = Session::restore(&api, Some(token("stale"))).await;
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_checking_then_resolve() {
        let mut session = Session::checking(token("abc"));
        assert_eq!(session.state(), &SessionState::Checking);
        assert!(!session.is_authenticated());

        session.resolve(Ok(profile()));
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_success_stores_token_and_profile() {
        let mut api = MockIdentityApi::new();
        api.expect_login()
            .withf(|c| c.username == "admin" && c.password == "pw")
            .times(1)
            .returning(|_| {
                Ok(LoginResponse {
                    token: "fresh".to_string(),
                })
            });
        api.expect_current_user()
            .withf(|t| t.as_str() == "fresh")
            .times(1)
            .returning(|_| Ok(profile()));

        let mut session = Session::anonymous();
        session
            .login(&api, &Credentials::new("admin", "pw"))
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.token().map(BearerToken::as_str), Some("fresh"));
    }

    #[tokio::test]
    async fn test_login_failure_leaves_no_token() {
        let mut api = MockIdentityApi::new();
        api.expect_login()
            .with(always())
            .times(1)
            .returning(|_| Err(unauthorized("auth/login")));
        api.expect_current_user().never();

        let mut session = Session::anonymous();
        let err = session
            .login(&api, &Credentials::new("admin", "wrong"))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_login_with_failing_profile_discards_token() {
        let mut api = MockIdentityApi::new();
        api.expect_login().returning(|_| {
            Ok(LoginResponse {
                token: "fresh".to_string(),
            })
        });
        api.expect_current_user().returning(|_| {
            Err(ClientError::Status {
                url: "auth/me".to_string(),
                status: 500,
                message: None,
            })
        });

        let mut session = Session::anonymous();
        assert!(
            session
                .login(&api, &Credentials::new("admin", "pw"))
                .await
                .is_err()
        );
        assert!(session.token().is_none());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_with_empty_token_is_an_error() {
        let mut api = MockIdentityApi::new();
        api.expect_login().returning(|_| {
            Ok(LoginResponse {
                token: String::new(),
            })
        });
        api.expect_current_user().never();

        let mut session = Session::anonymous();
        let err = session
            .login(&api, &Credentials::new("admin", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_failed_relogin_drops_previous_session() {
        let mut api = MockIdentityApi::new();
        api.expect_login()
            .returning(|_| Err(unauthorized("auth/login")));

        let mut session = Session::checking(token("old"));
        session.resolve(Ok(profile()));
        assert!(session.is_authenticated());

        assert!(
            session
                .login(&api, &Credentials::new("other", "pw"))
                .await
                .is_err()
        );
        assert!(session.token().is_none());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_does_not_log_in() {
        let mut api = MockIdentityApi::new();
        api.expect_register().times(1).returning(|_| {
            Ok(RegisterResponse {
                message: "Registration successful, awaiting approval".to_string(),
            })
        });
        api.expect_login().never();
        api.expect_current_user().never();

        let response = Session::register(&api, &Registration::new("new@example.com", "pw"))
            .await
            .unwrap();
        assert_eq!(response.message, "Registration successful, awaiting approval");
    }

    #[test]
    fn test_logout_returns_token_and_clears_state() {
        let mut session = Session::checking(token("abc"));
        session.resolve(Ok(profile()));

        let dropped = session.logout();
        assert_eq!(dropped.as_ref().map(BearerToken::as_str), Some("abc"));
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert!(session.token().is_none());
        assert!(session.logout().is_none());
    }
}
