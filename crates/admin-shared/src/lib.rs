//! Code shared between the console client core and the backend stub

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod envelope;
pub mod errors;
pub mod id;
mod macros;
pub mod random;
pub mod req_args;
pub mod session;
pub mod system;
pub mod telemetry;
pub mod token;
pub mod uac;

pub use random::random_alphanumeric;
