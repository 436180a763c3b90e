//! Local storage

pub mod file;
