//! Cluster scheduler API

pub mod api;
pub mod client;
