//! Pages, each rendered to a complete HTML document

pub mod account;
pub mod auth;
pub mod chat;
pub mod landing;
pub mod market;
pub mod not_found;
pub mod users;
