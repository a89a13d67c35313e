//! Repository traits and data types.
//!
//! This module defines the storage abstractions consumed by the session
//! authenticator and the auth actions. Implement these traits to use your
//! own database.
//!
//! # Traits
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`UserRepository`] | User rows: create, lookup, password update, delete |
//! | [`SessionRepository`] | Session rows keyed by token digest |
//!
//! # Implementations
//!
//! [`InMemoryRepository`] implements both traits and backs the test suite.

mod memory;
mod session;
mod user;

pub use memory::InMemoryRepository;
pub use session::SessionRepository;
pub use user::AuthUser;
pub use user::UserRepository;
