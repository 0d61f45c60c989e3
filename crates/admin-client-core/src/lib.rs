//! Client side core of the admin console: the session store, permission
//! checks against it and the authenticated request client
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]


mod client;
mod errors;
mod notify;
mod session;

pub use client::{Client, RequestOptions, RequestState, NO_ARGS};
pub use errors::RequestError;
pub use notify::{
    Notification, NotificationLevel, NotificationSink, RecordingNotifier, TracingNotifier,
};
pub use session::{FileSessionStorage, MemorySessionStorage, SessionStorage, SessionStore};
