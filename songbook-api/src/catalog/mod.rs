//! Catalog business logic
//!
//! - `query`: filtered, ordered, paginated listing
//! - `authors`: group lookup-or-create and rename
//! - `mutator`: partial song updates
//! - `service`: the five catalog operations composed from the above

pub mod authors;
mod error;
pub mod mutator;
pub mod query;
pub mod release_date;
pub mod service;
pub mod verses;

pub use error::{CatalogError, CatalogResult};
pub use mutator::MutationOutcome;
pub use service::{CatalogService, UpdateOutcome};
