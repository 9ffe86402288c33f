//! Record store: exact-match row operations on groups and songs
//!
//! No business logic lives here; callers decide what a zero-row result means.

pub mod groups;
pub mod songs;
