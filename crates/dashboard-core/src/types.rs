//! Domain types shared by the client and the web layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Approval status of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Waiting for an admin decision
    Pending,
    /// Approved by an admin
    Approved,
    /// Rejected by an admin
    Rejected,
}

impl UserStatus {
    /// All statuses in display order
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(crate::Error::validation(
                "status",
                format!("unknown user status '{other}'"),
            )),
        }
    }
}

/// A user record as listed by the internal API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier
    pub id: String,
    /// Account email
    pub email: String,
    /// Approval status
    pub status: UserStatus,
    /// Creation timestamp
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Role attached to a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Administrator
    Admin,
    /// Owner of the installation
    Owner,
    /// Regular user
    User,
    /// Anything the API returns that we do not know about
    Other,
}

impl Role {
    /// Classify a free-text role
    #[must_use]
    pub fn parse(role: &str) -> Self {
        match role.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "owner" => Self::Owner,
            "user" => Self::User,
            _ => Self::Other,
        }
    }
}

/// The authenticated account as returned by `auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque identifier
    pub id: String,
    /// Account email
    pub email: String,
    /// Login name
    pub username: String,
    /// Free-text role (`admin`, `owner`, `user`)
    pub role: String,
    /// Free-text account status
    pub status: String,
}

impl UserProfile {
    /// Role of this profile
    #[must_use]
    pub fn role_kind(&self) -> Role {
        Role::parse(&self.role)
    }
}

/// Login form payload
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Login name
    pub username: String,
    /// Password, never logged
    pub password: String,
}

impl Credentials {
    /// Build credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reject blank fields before hitting the network
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first blank field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.username.trim().is_empty() {
            return Err(crate::Error::validation("username", "Username is required"));
        }
        if self.password.is_empty() {
            return Err(crate::Error::validation("password", "Password is required"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Registration form payload
#[derive(Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Account email
    pub email: String,
    /// Password, never logged
    pub password: String,
}

impl Registration {
    /// Build a registration
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Reject blank fields and obviously malformed emails
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> crate::Result<()> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(crate::Error::validation("email", "Email is required"));
        }
        if !email.contains('@') {
            return Err(crate::Error::validation("email", "Email address is invalid"));
        }
        if self.password.is_empty() {
            return Err(crate::Error::validation("password", "Password is required"));
        }
        Ok(())
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Response of `auth/login`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Issued bearer token
    pub token: String,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"***")
            .finish()
    }
}

/// Response of `auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Message to show the user
    pub message: String,
}

/// Opaque credential sent as `Authorization: Bearer <token>`
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token; blank input yields `None`
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Raw token value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// One row of the public market list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAsset {
    /// Market API identifier
    pub id: String,
    /// Ticker symbol
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Logo URL
    #[serde(default)]
    pub image: String,
    /// Price in the quote currency
    #[serde(default)]
    pub current_price: Option<f64>,
    /// Market capitalisation
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Rank by market capitalisation
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    /// Price change over 24 hours, in percent
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    /// Traded volume over 24 hours
    #[serde(default)]
    pub total_volume: Option<f64>,
    /// 24 hour high
    #[serde(default)]
    pub high_24h: Option<f64>,
    /// 24 hour low
    #[serde(default)]
    pub low_24h: Option<f64>,
    /// Circulating supply
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    /// Total supply
    #[serde(default)]
    pub total_supply: Option<f64>,
    /// Maximum supply
    #[serde(default)]
    pub max_supply: Option<f64>,
    /// All-time high
    #[serde(default)]
    pub ath: Option<f64>,
    /// All-time low
    #[serde(default)]
    pub atl: Option<f64>,
    /// Last update reported by the market API
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}
