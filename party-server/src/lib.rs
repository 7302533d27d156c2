//! Web front end for the party star map.
//!
//! Guests open `/starmap`, pick the date, time and place of an evening, and
//! get back a PNG chart of the bright stars that were overhead. Every request
//! is rendered from scratch against immutable shared state.

pub mod config;
pub mod embedded_assets;
pub mod error;
pub mod query;
pub mod routes;

pub use config::ServerArgs;
pub use error::{Result, ServerError};
pub use query::{PageDefaults, StarmapParams, StarmapQuery};
pub use routes::{build_router, AppState};
