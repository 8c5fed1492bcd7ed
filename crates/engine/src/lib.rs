//! traitmint Engine library.
//!
//! ## Structure
//!
//! - `use_cases/` - minting and catalog operations
//! - `infrastructure/` - ports plus their adapters (catalog file, stores, clock)
//! - `app` - application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::{App, AppError};
