//! # Songbook Common Library
//!
//! Shared code for the songbook services:
//! - Error taxonomy
//! - Configuration file loading and tiered value resolution
//! - Database initialization and versioned schema migrations

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
