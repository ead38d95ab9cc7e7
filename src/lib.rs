//! Reelsearch - multi-provider movie and TV search
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod metadata;
pub mod queue;
pub mod server;
