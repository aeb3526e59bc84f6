//! Reusable view components

pub mod loading;
pub mod pagination;
pub mod table;
