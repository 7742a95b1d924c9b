//! Integration-style tests for the accounts crate
//!
//! Exercises the sign-in state machine and the CRUD use cases against an
//! in-memory repository, so time-sensitive behavior is driven by seeded
//! timestamps instead of sleeps.

mod support {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::{DateTime, Utc};
    use kernel::id::UserId;
    use platform::client::ClientContext;
    use platform::password::ClearTextPassword;

    use crate::domain::entity::{ban::BanRecord, login_attempt::LoginAttempt, user::User};
    use crate::domain::repository::{BanRepository, LoginAttemptRepository, UserRepository};
    use crate::domain::value_object::{email::Email, user_name::UserName};
    use crate::error::{AccountsError, AccountsResult};

    /// In-memory repository backing all three traits
    ///
    /// Write failures can be injected per store to exercise the best-effort
    /// paths of the sign-in use case.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        pub users: Arc<Mutex<Vec<User>>>,
        pub attempts: Arc<Mutex<Vec<LoginAttempt>>>,
        pub bans: Arc<Mutex<Vec<BanRecord>>>,
        pub fail_attempt_writes: Arc<AtomicBool>,
        pub fail_ban_writes: Arc<AtomicBool>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn attempt_count(&self) -> usize {
            self.attempts.lock().unwrap().len()
        }

        pub fn ban_count(&self) -> usize {
            self.bans.lock().unwrap().len()
        }

        pub fn seed_user(&self, user: User) {
            self.users.lock().unwrap().push(user);
        }

        pub fn seed_ban(&self, ban: BanRecord) {
            self.bans.lock().unwrap().push(ban);
        }

        pub fn seed_attempt(&self, attempt: LoginAttempt) {
            self.attempts.lock().unwrap().push(attempt);
        }
    }

    impl UserRepository for MemoryStore {
        async fn create(&self, user: &User) -> AccountsResult<()> {
            self.users.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn find_by_id(&self, user_id: &UserId) -> AccountsResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| &u.user_id == user_id)
                .cloned())
        }

        async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email.as_str() == email.as_str())
                .cloned())
        }

        async fn find_by_identity(&self, identity: &str) -> AccountsResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.user_name.as_str() == identity || u.email.as_str() == identity)
                .cloned())
        }

        async fn exists_by_user_name(&self, user_name: &UserName) -> AccountsResult<bool> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .any(|u| u.user_name.as_str() == user_name.as_str()))
        }

        async fn exists_by_email(&self, email: &Email) -> AccountsResult<bool> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .any(|u| u.email.as_str() == email.as_str()))
        }

        async fn list(&self, limit: i64, offset: i64) -> AccountsResult<Vec<User>> {
            let mut users = self.users.lock().unwrap().clone();
            users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(users
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }

        async fn count(&self) -> AccountsResult<i64> {
            Ok(self.users.lock().unwrap().len() as i64)
        }

        async fn update(&self, user: &User) -> AccountsResult<()> {
            let mut users = self.users.lock().unwrap();
            if let Some(slot) = users.iter_mut().find(|u| u.user_id == user.user_id) {
                *slot = user.clone();
            }
            Ok(())
        }

        async fn delete(&self, user_id: &UserId) -> AccountsResult<u64> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| &u.user_id != user_id);
            Ok((before - users.len()) as u64)
        }
    }

    impl LoginAttemptRepository for MemoryStore {
        async fn record(&self, attempt: &LoginAttempt) -> AccountsResult<()> {
            if self.fail_attempt_writes.load(Ordering::SeqCst) {
                return Err(AccountsError::Internal("ledger unavailable".to_string()));
            }
            self.attempts.lock().unwrap().push(attempt.clone());
            Ok(())
        }

        async fn failed_since(
            &self,
            identity: &str,
            origin: &str,
            since: DateTime<Utc>,
        ) -> AccountsResult<Vec<LoginAttempt>> {
            Ok(self
                .attempts
                .lock()
                .unwrap()
                .iter()
                .filter(|a| {
                    (a.identity == identity || a.origin == origin)
                        && !a.succeeded
                        && a.attempted_at > since
                })
                .cloned()
                .collect())
        }
    }

    impl BanRepository for MemoryStore {
        async fn create(&self, ban: &BanRecord) -> AccountsResult<()> {
            if self.fail_ban_writes.load(Ordering::SeqCst) {
                return Err(AccountsError::Internal("registry unavailable".to_string()));
            }
            self.bans.lock().unwrap().push(ban.clone());
            Ok(())
        }

        async fn find_active(
            &self,
            identity: &str,
            origin: &str,
            now: DateTime<Utc>,
        ) -> AccountsResult<Option<BanRecord>> {
            Ok(self
                .bans
                .lock()
                .unwrap()
                .iter()
                .filter(|b| (b.identity == identity || b.origin == origin) && b.is_active(now))
                .max_by_key(|b| b.expires_at)
                .cloned())
        }

        async fn delete_expired(&self, now: DateTime<Utc>) -> AccountsResult<u64> {
            let mut bans = self.bans.lock().unwrap();
            let before = bans.len();
            bans.retain(|b| b.expires_at > now);
            Ok((before - bans.len()) as u64)
        }
    }

    pub fn test_user(user_name: &str, email: &str, password: &str) -> User {
        let hash = ClearTextPassword::new(password.to_string())
            .unwrap()
            .hash(None)
            .unwrap();

        User::new(
            UserName::new(user_name).unwrap(),
            Email::new(email).unwrap(),
            hash,
            "Test".to_string(),
            "User".to_string(),
            30,
        )
    }

    pub fn client_from(ip: &str) -> ClientContext {
        ClientContext::new(Some(ip.parse().unwrap()), Some("test-agent".to_string()))
    }
}

// ============================================================================
// Sign In
// ============================================================================

mod sign_in_tests {
    use std::sync::Arc;

    use crate::application::{AccountsConfig, SignInInput, SignInUseCase};
    use crate::error::AccountsError;

    use super::support::{MemoryStore, client_from, test_user};

    fn use_case(store: &MemoryStore) -> SignInUseCase<MemoryStore, MemoryStore, MemoryStore> {
        let repo = Arc::new(store.clone());
        SignInUseCase::new(
            repo.clone(),
            repo.clone(),
            repo,
            Arc::new(AccountsConfig::default()),
        )
    }

    #[tokio::test]
    async fn successful_login_issues_opaque_token() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        let output = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "correct horse".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap();

        assert_eq!(output.token.len(), 32);
        assert!(output.token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(output.user.user_name.as_str(), "alice");

        // Success is recorded in the ledger
        assert_eq!(store.attempt_count(), 1);
        assert!(store.attempts.lock().unwrap()[0].succeeded);
    }

    #[tokio::test]
    async fn login_by_email_resolves_same_user() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        let output = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice@example.com".to_string(),
                    password: "correct horse".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap();

        assert_eq!(output.user.user_name.as_str(), "alice");
    }

    #[tokio::test]
    async fn wrong_password_records_failed_attempt() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        let err = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "wrong".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AccountsError::InvalidCredentials));
        assert_eq!(store.attempt_count(), 1);
        assert!(!store.attempts.lock().unwrap()[0].succeeded);
        // One failure stays below the ban threshold
        assert_eq!(store.ban_count(), 0);
    }

    #[tokio::test]
    async fn unknown_identity_reports_invalid_credentials() {
        let store = MemoryStore::new();

        let err = use_case(&store)
            .execute(
                SignInInput {
                    identity: "ghost".to_string(),
                    password: "anything".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap_err();

        // Indistinguishable from a wrong password, but still in the ledger
        assert!(matches!(err, AccountsError::InvalidCredentials));
        assert_eq!(store.attempt_count(), 1);
    }

    #[tokio::test]
    async fn deactivated_account_short_circuits() {
        let store = MemoryStore::new();
        let mut user = test_user("alice", "alice@example.com", "correct horse");
        user.set_active(false);
        store.seed_user(user);

        // Correct password
        let err = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "correct horse".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::AccountDeactivated));

        // Wrong password gives the same answer before verification runs
        let err = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "wrong".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::AccountDeactivated));

        // Neither request touches the ledger or the registry
        assert_eq!(store.attempt_count(), 0);
        assert_eq!(store.ban_count(), 0);
    }

    #[tokio::test]
    async fn empty_password_counts_as_mismatch() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        let err = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: String::new(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AccountsError::InvalidCredentials));
        assert_eq!(store.attempt_count(), 1);
    }
}

// ============================================================================
// Ban Policy Flow
// ============================================================================

mod ban_flow_tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use crate::application::{AccountsConfig, SignInInput, SignInUseCase};
    use crate::domain::entity::{ban::BanRecord, login_attempt::LoginAttempt};
    use crate::domain::ban_policy::BAN_REASON;
    use crate::error::AccountsError;

    use super::support::{MemoryStore, client_from, test_user};

    fn use_case(store: &MemoryStore) -> SignInUseCase<MemoryStore, MemoryStore, MemoryStore> {
        let repo = Arc::new(store.clone());
        SignInUseCase::new(
            repo.clone(),
            repo.clone(),
            repo,
            Arc::new(AccountsConfig::default()),
        )
    }

    async fn fail_once(store: &MemoryStore, identity: &str, ip: &str) {
        let err = use_case(store)
            .execute(
                SignInInput {
                    identity: identity.to_string(),
                    password: "wrong".to_string(),
                },
                &client_from(ip),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::InvalidCredentials));
    }

    #[tokio::test]
    async fn third_failure_creates_ban() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        fail_once(&store, "alice", "10.0.0.1").await;
        fail_once(&store, "alice", "10.0.0.1").await;
        assert_eq!(store.ban_count(), 0);

        fail_once(&store, "alice", "10.0.0.1").await;
        assert_eq!(store.ban_count(), 1);

        let ban = store.bans.lock().unwrap()[0].clone();
        assert_eq!(ban.identity, "alice");
        assert_eq!(ban.origin, "10.0.0.1");
        assert_eq!(ban.reason, BAN_REASON);
        assert_eq!(ban.expires_at - ban.banned_at, Duration::minutes(2));
    }

    #[tokio::test]
    async fn ban_takes_effect_on_next_request() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        for _ in 0..3 {
            fail_once(&store, "alice", "10.0.0.1").await;
        }

        // Correct password now, but the ban from the third failure applies
        let err = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "correct horse".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::Banned));

        // The banned request records nothing
        assert_eq!(store.attempt_count(), 3);
    }

    #[tokio::test]
    async fn expired_ban_no_longer_blocks() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));
        store.seed_ban(BanRecord::new(
            "alice",
            "10.0.0.1",
            Utc::now() - Duration::minutes(10),
            Duration::minutes(2),
            BAN_REASON,
        ));

        let output = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "correct horse".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap();

        assert_eq!(output.token.len(), 32);
    }

    #[tokio::test]
    async fn success_does_not_reset_failure_window() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        fail_once(&store, "alice", "10.0.0.1").await;
        fail_once(&store, "alice", "10.0.0.1").await;

        // A successful login between failures
        use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "correct horse".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap();
        assert_eq!(store.ban_count(), 0);

        // The third failure still trips the threshold
        fail_once(&store, "alice", "10.0.0.1").await;
        assert_eq!(store.ban_count(), 1);
    }

    #[tokio::test]
    async fn stale_failures_fall_out_of_window() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        let stale = Utc::now() - chrono::Duration::minutes(5);
        store.seed_attempt(LoginAttempt::failure("alice", "10.0.0.1", None, stale));
        store.seed_attempt(LoginAttempt::failure("alice", "10.0.0.1", None, stale));

        // One fresh failure plus two stale ones stays below the threshold
        fail_once(&store, "alice", "10.0.0.1").await;
        assert_eq!(store.ban_count(), 0);
    }

    #[tokio::test]
    async fn unknown_identity_failures_ban_the_origin() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        // Three probes against nonexistent identities from one origin
        fail_once(&store, "ghost1", "10.0.0.9").await;
        fail_once(&store, "ghost2", "10.0.0.9").await;
        fail_once(&store, "ghost3", "10.0.0.9").await;
        assert_eq!(store.ban_count(), 1);

        // That origin is now blocked even for a real user with the right password
        let err = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "correct horse".to_string(),
                },
                &client_from("10.0.0.9"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::Banned));

        // A different origin is unaffected
        let output = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "correct horse".to_string(),
                },
                &client_from("192.168.1.1"),
            )
            .await
            .unwrap();
        assert_eq!(output.user.user_name.as_str(), "alice");
    }

    #[tokio::test]
    async fn one_identity_from_many_origins_accumulates() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        fail_once(&store, "alice", "10.0.0.1").await;
        fail_once(&store, "alice", "10.0.0.2").await;
        fail_once(&store, "alice", "10.0.0.3").await;

        // Identity matching gathers all three despite distinct origins
        assert_eq!(store.ban_count(), 1);
        assert_eq!(store.bans.lock().unwrap()[0].identity, "alice");
    }

    #[tokio::test]
    async fn concurrent_failures_never_corrupt_the_ledger() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));

        let mut handles = Vec::new();
        for _ in 0..6 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let repo = Arc::new(store);
                let use_case = SignInUseCase::new(
                    repo.clone(),
                    repo.clone(),
                    repo,
                    Arc::new(AccountsConfig::default()),
                );
                use_case
                    .execute(
                        SignInInput {
                            identity: "alice".to_string(),
                            password: "wrong".to_string(),
                        },
                        &client_from("10.0.0.1"),
                    )
                    .await
            }));
        }

        for handle in handles {
            let result = handle.await.unwrap();
            assert!(matches!(
                result.unwrap_err(),
                AccountsError::InvalidCredentials | AccountsError::Banned
            ));
        }

        // Every non-banned attempt landed exactly once; duplicate bans are
        // tolerated but at least one must exist
        assert!(store.attempt_count() <= 6);
        assert!(store.attempt_count() >= 3);
        assert!(store.ban_count() >= 1);
    }
}

// ============================================================================
// Best-effort persistence
// ============================================================================

mod resilience_tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use crate::application::{AccountsConfig, SignInInput, SignInUseCase};
    use crate::error::AccountsError;

    use super::support::{MemoryStore, client_from, test_user};

    fn use_case(store: &MemoryStore) -> SignInUseCase<MemoryStore, MemoryStore, MemoryStore> {
        let repo = Arc::new(store.clone());
        SignInUseCase::new(
            repo.clone(),
            repo.clone(),
            repo,
            Arc::new(AccountsConfig::default()),
        )
    }

    #[tokio::test]
    async fn ledger_outage_does_not_change_the_outcome() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));
        store.fail_attempt_writes.store(true, Ordering::SeqCst);

        // Failed login still reports invalid credentials, not a server error
        let err = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "wrong".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::InvalidCredentials));

        // Successful login still succeeds
        let output = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "correct horse".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap();
        assert_eq!(output.token.len(), 32);
    }

    #[tokio::test]
    async fn registry_outage_degrades_to_no_ban() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "correct horse"));
        store.fail_ban_writes.store(true, Ordering::SeqCst);

        for _ in 0..3 {
            let err = use_case(&store)
                .execute(
                    SignInInput {
                        identity: "alice".to_string(),
                        password: "wrong".to_string(),
                    },
                    &client_from("10.0.0.1"),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, AccountsError::InvalidCredentials));
        }

        // No ban could be written, so the correct password still works
        assert_eq!(store.ban_count(), 0);
        let output = use_case(&store)
            .execute(
                SignInInput {
                    identity: "alice".to_string(),
                    password: "correct horse".to_string(),
                },
                &client_from("10.0.0.1"),
            )
            .await
            .unwrap();
        assert_eq!(output.user.user_name.as_str(), "alice");
    }
}

// ============================================================================
// Ban sweep
// ============================================================================

mod sweep_tests {
    use chrono::{Duration, Utc};

    use crate::domain::ban_policy::BAN_REASON;
    use crate::domain::entity::ban::BanRecord;
    use crate::domain::repository::BanRepository;

    use super::support::MemoryStore;

    #[tokio::test]
    async fn delete_expired_removes_only_expired_bans() {
        let store = MemoryStore::new();
        let now = Utc::now();

        store.seed_ban(BanRecord::new(
            "old1",
            "10.0.0.1",
            now - Duration::minutes(10),
            Duration::minutes(2),
            BAN_REASON,
        ));
        store.seed_ban(BanRecord::new(
            "old2",
            "10.0.0.2",
            now - Duration::minutes(4),
            Duration::minutes(2),
            BAN_REASON,
        ));
        store.seed_ban(BanRecord::new(
            "fresh",
            "10.0.0.3",
            now,
            Duration::minutes(2),
            BAN_REASON,
        ));

        let deleted = store.delete_expired(now).await.unwrap();
        assert_eq!(deleted, 2);

        let active = store
            .find_active("fresh", "10.0.0.3", now)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.identity, "fresh");
    }

    #[tokio::test]
    async fn ban_expiring_exactly_now_is_swept() {
        let store = MemoryStore::new();
        let now = Utc::now();

        store.seed_ban(BanRecord::new(
            "edge",
            "10.0.0.1",
            now - Duration::minutes(2),
            Duration::minutes(2),
            BAN_REASON,
        ));

        assert!(store.find_active("edge", "10.0.0.1", now).await.unwrap().is_none());
        assert_eq!(store.delete_expired(now).await.unwrap(), 1);
    }
}

// ============================================================================
// User CRUD
// ============================================================================

mod crud_tests {
    use std::sync::Arc;

    use kernel::id::UserId;

    use crate::application::{
        AccountsConfig, CreateUserInput, CreateUserUseCase, DeleteUserUseCase, QueryUsersUseCase,
        UpdateUserInput, UpdateUserUseCase,
    };
    use crate::error::AccountsError;

    use super::support::{MemoryStore, test_user};

    fn create_input(user_name: &str, email: &str) -> CreateUserInput {
        CreateUserInput {
            user_name: user_name.to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            age: 30,
        }
    }

    #[tokio::test]
    async fn create_user_persists_and_normalizes() {
        let store = MemoryStore::new();
        let use_case = CreateUserUseCase::new(
            Arc::new(store.clone()),
            Arc::new(AccountsConfig::default()),
        );

        let user = use_case
            .execute(create_input("Alice", "Alice@Example.COM"))
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "alice@example.com");
        assert!(user.is_active);
        assert_eq!(store.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "pw-irrelevant"));

        let use_case = CreateUserUseCase::new(
            Arc::new(store.clone()),
            Arc::new(AccountsConfig::default()),
        );

        let err = use_case
            .execute(create_input("bob", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::EmailTaken));
    }

    #[tokio::test]
    async fn duplicate_user_name_is_a_conflict() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "pw-irrelevant"));

        let use_case = CreateUserUseCase::new(
            Arc::new(store.clone()),
            Arc::new(AccountsConfig::default()),
        );

        let err = use_case
            .execute(create_input("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::UserNameTaken));
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_before_any_write() {
        let store = MemoryStore::new();
        let use_case = CreateUserUseCase::new(
            Arc::new(store.clone()),
            Arc::new(AccountsConfig::default()),
        );

        let err = use_case
            .execute(create_input("alice", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::Validation(_)));
        assert!(store.users.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let store = MemoryStore::new();
        let user = test_user("alice", "alice@example.com", "pw-irrelevant");
        let user_id = user.user_id;
        store.seed_user(user);

        let use_case = UpdateUserUseCase::new(Arc::new(store.clone()));

        let updated = use_case
            .execute(
                &user_id,
                UpdateUserInput {
                    first_name: Some("Alicia".to_string()),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Alicia");
        assert!(!updated.is_active);
        assert_eq!(updated.user_name.as_str(), "alice");
        assert_eq!(updated.email.as_str(), "alice@example.com");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let store = MemoryStore::new();
        let use_case = UpdateUserUseCase::new(Arc::new(store));

        let err = use_case
            .execute(&UserId::new(), UpdateUserInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::UserNotFound));
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let store = MemoryStore::new();
        let use_case = DeleteUserUseCase::new(Arc::new(store));

        let err = use_case.execute(&UserId::new()).await.unwrap_err();
        assert!(matches!(err, AccountsError::UserNotFound));
    }

    #[tokio::test]
    async fn delete_removes_the_user() {
        let store = MemoryStore::new();
        let user = test_user("alice", "alice@example.com", "pw-irrelevant");
        let user_id = user.user_id;
        store.seed_user(user);

        DeleteUserUseCase::new(Arc::new(store.clone()))
            .execute(&user_id)
            .await
            .unwrap();
        assert!(store.users.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_paginates_and_clamps() {
        let store = MemoryStore::new();
        for i in 0..3 {
            store.seed_user(test_user(
                &format!("user{i}"),
                &format!("user{i}@example.com"),
                "pw-irrelevant",
            ));
        }

        let use_case = QueryUsersUseCase::new(
            Arc::new(store.clone()),
            Arc::new(AccountsConfig::default()),
        );

        let page = use_case.list(1, 2).await.unwrap();
        assert_eq!(page.users.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 2);

        let page = use_case.list(2, 2).await.unwrap();
        assert_eq!(page.users.len(), 1);

        // Out-of-range parameters clamp instead of failing
        let page = use_case.list(0, -5).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.users.len(), 3);
    }

    #[tokio::test]
    async fn get_by_email_validates_the_address() {
        let store = MemoryStore::new();
        store.seed_user(test_user("alice", "alice@example.com", "pw-irrelevant"));

        let use_case = QueryUsersUseCase::new(
            Arc::new(store.clone()),
            Arc::new(AccountsConfig::default()),
        );

        let user = use_case.get_by_email("alice@example.com").await.unwrap();
        assert_eq!(user.user_name.as_str(), "alice");

        let err = use_case.get_by_email("nope").await.unwrap_err();
        assert!(matches!(err, AccountsError::Validation(_)));

        let err = use_case.get_by_email("missing@example.com").await.unwrap_err();
        assert!(matches!(err, AccountsError::UserNotFound));
    }
}
