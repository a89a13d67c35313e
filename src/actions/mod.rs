//! Flow orchestration: one action per user-facing auth operation.
//!
//! Actions compose the repositories, the password hasher, and the
//! [`SessionAuthenticator`](crate::SessionAuthenticator). Each action is a
//! small struct with a single `execute` method, generic over its storage so
//! it works with any backend.

pub mod change_password;
pub mod delete_account;
pub mod prune_sessions;
pub mod signin;
pub mod signout;
pub mod signup;

pub use change_password::ChangePasswordAction;
pub use delete_account::DeleteAccountAction;
pub use prune_sessions::PruneSessionsAction;
pub use signin::SigninAction;
pub use signout::SignoutAction;
pub use signup::SignupAction;
