//! Request handlers

pub mod api;
pub mod auth;
pub mod market;
pub mod pages;
pub mod users;
