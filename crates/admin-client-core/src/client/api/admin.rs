//! Typed wrappers for the system management endpoints

mod dict;
mod log;
mod menu;
mod role;
mod user;
