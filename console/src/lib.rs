//! GraphFlow Workload Console Library
//!
//! Core modules for turning an operator-entered deployment request into a
//! submittable workload-definition document for the cluster scheduler.

pub mod compile;
pub mod config;
pub mod draft;
pub mod errors;
pub mod flow;
pub mod handoff;
pub mod logs;
pub mod models;
pub mod scheduler;
pub mod storage;
pub mod utils;
