//! Passiv Rebalance Library
//!
//! Core components for driving the Passiv portfolio rebalancing API:
//! configuration, the HTTP client, and the sequential rebalancing workflow.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
