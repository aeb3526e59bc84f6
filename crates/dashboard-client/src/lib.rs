//! HTTP clients and session store for the admin dashboard
//!
//! [`ApiClient`] talks to the internal user/auth service, [`MarketClient`] to
//! the public market API. [`Session`] layers the login state machine on top
//! of the identity endpoints.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api;
pub mod error;
pub mod market;
pub mod session;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use market::MarketClient;
pub use session::{IdentityApi, Session, SessionState};
