use async_trait::async_trait;

use super::AuthEvent;

/// Trait for handling authentication events asynchronously.
///
/// Implement this trait to create custom event listeners: logging, metrics,
/// notifications.
///
/// # Example
///
/// ```rust,ignore
/// use aula_auth::events::{AuthEvent, Listener};
/// use async_trait::async_trait;
///
/// struct FailedSigninAlert;
///
/// #[async_trait]
/// impl Listener for FailedSigninAlert {
///     async fn handle(&self, event: &AuthEvent) {
///         if let AuthEvent::SigninFailed { username, .. } = event {
///             // send an alert
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Handle an authentication event.
    ///
    /// This method is called for every event dispatched. Filter by matching
    /// on the event variant to handle specific events.
    async fn handle(&self, event: &AuthEvent);
}
