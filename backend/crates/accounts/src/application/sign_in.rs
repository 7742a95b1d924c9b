//! Sign In Use Case
//!
//! Composes the ban registry, the user store, the credential verifier and
//! the attempt ledger into the login state machine:
//!
//! check ban -> resolve user -> check active -> verify password
//!   -> record attempt -> maybe ban -> token
//!
//! The ban pre-check runs before any credential work, so a banned caller
//! learns nothing about whether the identity exists. A ban issued during a
//! failed request only takes effect on the *next* login; the current
//! request still reports invalid credentials.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::crypto::random_token;
use platform::password::ClearTextPassword;

use crate::application::config::AccountsConfig;
use crate::domain::entity::{login_attempt::LoginAttempt, user::User};
use crate::domain::repository::{BanRepository, LoginAttemptRepository, UserRepository};
use crate::error::{AccountsError, AccountsResult};

/// Re-export ClientContext from platform
pub use platform::client::ClientContext;

/// Sign in input
pub struct SignInInput {
    /// User name or email
    pub identity: String,
    /// Password
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// The authenticated user's profile
    pub user: User,
    /// Opaque session token
    pub token: String,
}

/// Sign in use case
pub struct SignInUseCase<U, L, B>
where
    U: UserRepository,
    L: LoginAttemptRepository,
    B: BanRepository,
{
    user_repo: Arc<U>,
    attempt_repo: Arc<L>,
    ban_repo: Arc<B>,
    config: Arc<AccountsConfig>,
}

impl<U, L, B> SignInUseCase<U, L, B>
where
    U: UserRepository,
    L: LoginAttemptRepository,
    B: BanRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        attempt_repo: Arc<L>,
        ban_repo: Arc<B>,
        config: Arc<AccountsConfig>,
    ) -> Self {
        Self {
            user_repo,
            attempt_repo,
            ban_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        client: &ClientContext,
    ) -> AccountsResult<SignInOutput> {
        let now = Utc::now();
        let origin = client.origin_string();

        // Ban check precedes any credential work
        if let Some(ban) = self
            .ban_repo
            .find_active(&input.identity, &origin, now)
            .await?
        {
            tracing::warn!(
                identity = %input.identity,
                origin = %origin,
                expires_at = %ban.expires_at,
                "Login rejected by active ban"
            );
            return Err(AccountsError::Banned);
        }

        // Resolve the identity to a user; unknown identities still feed
        // the ban window so enumeration attempts accumulate
        let user = match self.user_repo.find_by_identity(&input.identity).await? {
            Some(user) => user,
            None => {
                self.register_failure(&input.identity, &origin, client.agent.clone(), now)
                    .await;
                return Err(AccountsError::InvalidCredentials);
            }
        };

        // Deactivated accounts short-circuit without touching the ledger
        // or the ban logic, and without checking the password
        if !user.can_login() {
            return Err(AccountsError::AccountDeactivated);
        }

        // Verify password; an unusable submission counts as a mismatch
        let verified = match ClearTextPassword::new(input.password) {
            Ok(password) => user.password_hash.verify(&password, self.config.pepper()),
            Err(_) => false,
        };

        if !verified {
            self.register_failure(&input.identity, &origin, client.agent.clone(), now)
                .await;
            return Err(AccountsError::InvalidCredentials);
        }

        // Success does not clear prior failures; only the window sliding
        // past them does
        let attempt = LoginAttempt::success(&input.identity, &origin, client.agent.clone(), now);
        if let Err(e) = self.attempt_repo.record(&attempt).await {
            tracing::warn!(error = %e, "Failed to record successful login attempt");
        }

        let token = random_token(self.config.token_length);

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            origin = %origin,
            "User signed in"
        );

        Ok(SignInOutput { user, token })
    }

    /// Record a failed attempt and evaluate the ban policy over the window
    ///
    /// Both writes are best-effort: a ledger or registry failure degrades
    /// protection for this instant but never changes the caller-visible
    /// outcome of the login.
    async fn register_failure(
        &self,
        identity: &str,
        origin: &str,
        client_agent: Option<String>,
        now: DateTime<Utc>,
    ) {
        let attempt = LoginAttempt::failure(identity, origin, client_agent, now);
        if let Err(e) = self.attempt_repo.record(&attempt).await {
            tracing::warn!(error = %e, identity, origin, "Failed to record login attempt");
        }

        let since = self.config.ban_policy.window_start(now);
        let failures = match self.attempt_repo.failed_since(identity, origin, since).await {
            Ok(failures) => failures,
            Err(e) => {
                tracing::warn!(error = %e, identity, origin, "Failed to query attempt window");
                return;
            }
        };

        if let Some(ban) = self
            .config
            .ban_policy
            .evaluate(identity, origin, &failures, now)
        {
            match self.ban_repo.create(&ban).await {
                Ok(()) => {
                    tracing::warn!(
                        identity,
                        origin,
                        failures = failures.len(),
                        expires_at = %ban.expires_at,
                        "Temporary ban issued after repeated login failures"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, identity, origin, "Failed to persist ban");
                }
            }
        }
    }
}
