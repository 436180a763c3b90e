//! Data models

pub mod namespace;
pub mod request;
