//! Thin in memory backend speaking the admin console's envelope API
//!
//! Everything is lost on restart. Only meant for development of the console
//! and for end to end tests of the client core

#![warn(unused_crate_dependencies)]

use tokio as _; // Only used by the binary


pub mod authentication;
mod configuration;
mod errors;
mod routes;
pub mod startup;
pub mod store;

pub use configuration::{get_configuration, ApplicationSettings, Configuration, SeedSettings};
pub use errors::ApiError;
