//! Data models.

pub mod config;
pub mod order;
