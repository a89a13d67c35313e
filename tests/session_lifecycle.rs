//! End-to-end session lifecycle tests against the in-memory store.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use aula_auth::crypto::{generate_token_default, token_digest};
use aula_auth::repository::{InMemoryRepository, SessionRepository, UserRepository};
use aula_auth::{
    AuthConfig, AuthError, AuthUser, SecretString, Session, SessionAuthenticator,
    SessionValidation,
};

async fn setup() -> (InMemoryRepository, SessionAuthenticator<InMemoryRepository>, i64) {
    let repo = InMemoryRepository::new();
    let user = repo.create_user("alice", "hash").await.unwrap();
    let auth = SessionAuthenticator::new(repo.clone());
    (repo, auth, user.id)
}

#[tokio::test]
async fn create_then_validate_returns_same_user_within_ttl() {
    let (_repo, auth, user_id) = setup().await;

    let issued = auth.start_session(user_id).await.unwrap();
    let outcome = auth.validate_token(&issued.token).await.unwrap();

    let SessionValidation::Valid { session, user, .. } = outcome else {
        panic!("expected valid session");
    };
    assert_eq!(user.id, user_id);
    assert_eq!(session.id, issued.session.id);

    let ttl = auth.config().session_ttl;
    assert!(session.expires_at <= Utc::now() + ttl);
    assert!(session.expires_at > Utc::now() + ttl - Duration::minutes(5));
}

#[tokio::test]
async fn never_created_token_is_invalid() {
    let (_repo, auth, _user_id) = setup().await;

    let stranger = generate_token_default();
    let outcome = auth.validate_token(&stranger).await.unwrap();
    assert!(!outcome.is_valid());
}

#[tokio::test]
async fn expired_session_is_invalid_and_purged() {
    let (repo, auth, user_id) = setup().await;

    let issued = auth.start_session(user_id).await.unwrap();
    repo.update_expiry(&issued.session.id, Utc::now() - Duration::seconds(1))
        .await
        .unwrap();

    let outcome = auth.validate_token(&issued.token).await.unwrap();
    assert!(!outcome.is_valid());

    // A direct lookup by id finds nothing; the row was removed.
    assert!(repo
        .find_session(&issued.session.id)
        .await
        .unwrap()
        .is_none());
}

/// Store whose single-row delete always fails; everything else delegates.
#[derive(Clone)]
struct FailingDeleteStore {
    inner: InMemoryRepository,
}

#[async_trait]
impl SessionRepository for FailingDeleteStore {
    async fn find_session(
        &self,
        session_id: &str,
    ) -> Result<Option<(Session, AuthUser)>, AuthError> {
        self.inner.find_session(session_id).await
    }

    async fn create_session(&self, session: &Session) -> Result<(), AuthError> {
        self.inner.create_session(session).await
    }

    async fn update_expiry(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        self.inner.update_expiry(session_id, expires_at).await
    }

    async fn delete_session(&self, _session_id: &str) -> Result<(), AuthError> {
        Err(AuthError::StoreError("delete refused".to_owned()))
    }

    async fn delete_user_sessions(&self, user_id: i64) -> Result<(), AuthError> {
        self.inner.delete_user_sessions(user_id).await
    }

    async fn prune_expired(&self) -> Result<u64, AuthError> {
        self.inner.prune_expired().await
    }
}

#[tokio::test]
async fn purge_failure_still_reports_expired_session_as_invalid() {
    let repo = InMemoryRepository::new();
    let user = repo.create_user("alice", "hash").await.unwrap();
    let auth = SessionAuthenticator::new(FailingDeleteStore { inner: repo.clone() });

    let issued = auth.start_session(user.id).await.unwrap();
    repo.update_expiry(&issued.session.id, Utc::now() - Duration::seconds(1))
        .await
        .unwrap();

    // The expiry check already settled the answer; the failed purge must not
    // surface as an error.
    let outcome = auth.validate_token(&issued.token).await.unwrap();
    assert!(!outcome.is_valid());

    // The stale row survived the failed delete and keeps reading as invalid.
    assert!(repo
        .find_session(&issued.session.id)
        .await
        .unwrap()
        .is_some());
    assert!(!auth.validate_token(&issued.token).await.unwrap().is_valid());
}

#[tokio::test]
async fn renewal_extends_once_not_cumulatively() {
    let (repo, auth, user_id) = setup().await;

    let issued = auth.start_session(user_id).await.unwrap();
    // Push the session deep into its renewal window.
    repo.update_expiry(&issued.session.id, Utc::now() + Duration::days(2))
        .await
        .unwrap();

    let first = auth.validate_token(&issued.token).await.unwrap();
    let SessionValidation::Valid {
        session: first_session,
        renewed: true,
        ..
    } = first
    else {
        panic!("expected a renewed session");
    };
    let ttl = auth.config().session_ttl;
    assert!(first_session.expires_at > Utc::now() + ttl - Duration::minutes(5));

    // Validating again within milliseconds must not push further.
    let second = auth.validate_token(&issued.token).await.unwrap();
    let SessionValidation::Valid {
        session: second_session,
        renewed,
        ..
    } = second
    else {
        panic!("expected valid session");
    };
    assert!(!renewed);
    assert_eq!(second_session.expires_at, first_session.expires_at);
    assert!(second_session.expires_at <= Utc::now() + ttl);
}

#[tokio::test]
async fn invalidate_session_is_idempotent() {
    let (_repo, auth, user_id) = setup().await;

    let issued = auth.start_session(user_id).await.unwrap();
    auth.invalidate_session(&issued.session.id).await.unwrap();
    assert!(!auth.validate_token(&issued.token).await.unwrap().is_valid());

    // Absent id: still success.
    auth.invalidate_session(&issued.session.id).await.unwrap();
}

#[tokio::test]
async fn invalidate_all_sessions_spares_other_users() {
    let (repo, auth, alice) = setup().await;
    let bob = repo.create_user("bob", "hash").await.unwrap().id;

    auth.start_session(alice).await.unwrap();
    auth.start_session(alice).await.unwrap();
    let bob_issued = auth.start_session(bob).await.unwrap();

    auth.invalidate_all_sessions(alice).await.unwrap();

    assert_eq!(repo.session_count(), 1);
    assert!(auth
        .validate_token(&bob_issued.token)
        .await
        .unwrap()
        .is_valid());

    // Bulk invalidation with zero matching rows is success.
    auth.invalidate_all_sessions(alice).await.unwrap();
}

#[tokio::test]
async fn two_signins_give_independent_sessions() {
    let (_repo, auth, user_id) = setup().await;

    let first = auth.start_session(user_id).await.unwrap();
    let second = auth.start_session(user_id).await.unwrap();

    assert_ne!(first.session.id, second.session.id);

    auth.invalidate_session(&first.session.id).await.unwrap();

    assert!(!auth.validate_token(&first.token).await.unwrap().is_valid());
    assert!(auth.validate_token(&second.token).await.unwrap().is_valid());
}

#[tokio::test]
async fn custom_ttl_and_window_are_honored() {
    let repo = InMemoryRepository::new();
    let user = repo.create_user("alice", "hash").await.unwrap();
    let config = AuthConfig {
        session_ttl: Duration::days(7),
        renewal_window: Duration::days(3),
        ..Default::default()
    };
    config.validate().unwrap();
    let auth = SessionAuthenticator::with_config(repo.clone(), config);

    let issued = auth.start_session(user.id).await.unwrap();
    assert!(issued.session.expires_at <= Utc::now() + Duration::days(7));

    // 4 days remaining is outside the 3-day window: no renewal.
    repo.update_expiry(&issued.session.id, Utc::now() + Duration::days(4))
        .await
        .unwrap();
    let outcome = auth.validate_token(&issued.token).await.unwrap();
    let SessionValidation::Valid { renewed, .. } = outcome else {
        panic!("expected valid session");
    };
    assert!(!renewed);

    // 2 days remaining is inside: renewal to a 7-day expiry.
    repo.update_expiry(&issued.session.id, Utc::now() + Duration::days(2))
        .await
        .unwrap();
    let outcome = auth.validate_token(&issued.token).await.unwrap();
    let SessionValidation::Valid {
        session, renewed, ..
    } = outcome
    else {
        panic!("expected valid session");
    };
    assert!(renewed);
    assert!(session.expires_at > Utc::now() + Duration::days(6));
}

#[test]
fn random_tokens_never_collide() {
    let mut digests = HashSet::new();
    for _ in 0..1000 {
        let token = generate_token_default();
        assert!(digests.insert(token_digest(token.expose_secret())));
    }
}

#[test]
fn digest_never_equals_token() {
    let token = generate_token_default();
    let digest = token_digest(token.expose_secret());
    assert_ne!(digest, token.expose_secret());
    assert_eq!(digest.len(), 64);
}

#[tokio::test]
async fn validation_never_leaks_the_token() {
    let (repo, auth, user_id) = setup().await;

    let issued = auth.start_session(user_id).await.unwrap();

    // The store key is the digest; the raw token appears nowhere in storage.
    assert!(repo
        .find_session(issued.token.expose_secret())
        .await
        .unwrap()
        .is_none());
    assert!(repo
        .find_session(&token_digest(issued.token.expose_secret()))
        .await
        .unwrap()
        .is_some());

    // And the wrapper redacts it from debug output.
    assert_eq!(
        format!("{:?}", SecretString::new("x")),
        "SecretString([REDACTED])"
    );
}
