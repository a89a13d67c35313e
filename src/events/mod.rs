//! Event system for authentication actions.
//!
//! Events are fired from all auth actions and from the session
//! authenticator's renewal/expiry paths. If no listeners are registered,
//! dispatch is a no-op.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use aula_auth::register_event_listeners;
//! use aula_auth::events::listeners::LoggingListener;
//!
//! fn main() {
//!     // register listeners at startup
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AuthEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners};
