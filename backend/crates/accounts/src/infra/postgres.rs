//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{ban::BanRecord, login_attempt::LoginAttempt, user::User};
use crate::domain::repository::{BanRepository, LoginAttemptRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AccountsError, AccountsResult};

/// PostgreSQL-backed accounts repository
#[derive(Clone)]
pub struct PgAccountsRepository {
    pool: PgPool,
}

impl PgAccountsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove expired bans
    ///
    /// Used by the startup cleanup and the periodic sweep task.
    pub async fn sweep_expired_bans(&self) -> AccountsResult<u64> {
        let deleted = BanRepository::delete_expired(self, Utc::now()).await?;

        tracing::info!(bans_deleted = deleted, "Swept expired login bans");

        Ok(deleted)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountsRepository {
    async fn create(&self, user: &User) -> AccountsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                email,
                password_hash,
                first_name,
                last_name,
                age,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.age)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountsResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                password_hash,
                first_name,
                last_name,
                age,
                is_active,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                password_hash,
                first_name,
                last_name,
                age,
                is_active,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_identity(&self, identity: &str) -> AccountsResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                password_hash,
                first_name,
                last_name,
                age,
                is_active,
                created_at,
                updated_at
            FROM users
            WHERE user_name = $1 OR email = $1
            "#,
        )
        .bind(identity)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountsResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name = $1)",
        )
        .bind(user_name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> AccountsResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list(&self, limit: i64, offset: i64) -> AccountsResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                password_hash,
                first_name,
                last_name,
                age,
                is_active,
                created_at,
                updated_at
            FROM users
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn count(&self) -> AccountsResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn update(&self, user: &User) -> AccountsResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                user_name = $2,
                email = $3,
                password_hash = $4,
                first_name = $5,
                last_name = $6,
                age = $7,
                is_active = $8,
                updated_at = $9
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.age)
        .bind(user.is_active)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AccountsResult<u64> {
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Login Attempt Repository Implementation
// ============================================================================

impl LoginAttemptRepository for PgAccountsRepository {
    async fn record(&self, attempt: &LoginAttempt) -> AccountsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO login_attempts (
                identity,
                origin,
                succeeded,
                attempted_at,
                client_agent
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&attempt.identity)
        .bind(&attempt.origin)
        .bind(attempt.succeeded)
        .bind(attempt.attempted_at)
        .bind(&attempt.client_agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn failed_since(
        &self,
        identity: &str,
        origin: &str,
        since: DateTime<Utc>,
    ) -> AccountsResult<Vec<LoginAttempt>> {
        let rows = sqlx::query_as::<_, LoginAttemptRow>(
            r#"
            SELECT
                identity,
                origin,
                succeeded,
                attempted_at,
                client_agent
            FROM login_attempts
            WHERE (identity = $1 OR origin = $2)
              AND succeeded = FALSE
              AND attempted_at > $3
            "#,
        )
        .bind(identity)
        .bind(origin)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_attempt()).collect())
    }
}

// ============================================================================
// Ban Repository Implementation
// ============================================================================

impl BanRepository for PgAccountsRepository {
    async fn create(&self, ban: &BanRecord) -> AccountsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO login_bans (
                identity,
                origin,
                banned_at,
                expires_at,
                reason
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&ban.identity)
        .bind(&ban.origin)
        .bind(ban.banned_at)
        .bind(ban.expires_at)
        .bind(&ban.reason)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_active(
        &self,
        identity: &str,
        origin: &str,
        now: DateTime<Utc>,
    ) -> AccountsResult<Option<BanRecord>> {
        let row = sqlx::query_as::<_, BanRow>(
            r#"
            SELECT
                identity,
                origin,
                banned_at,
                expires_at,
                reason
            FROM login_bans
            WHERE (identity = $1 OR origin = $2)
              AND expires_at > $3
            ORDER BY expires_at DESC
            LIMIT 1
            "#,
        )
        .bind(identity)
        .bind(origin)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_ban()))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AccountsResult<u64> {
        let deleted = sqlx::query("DELETE FROM login_bans WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    age: i16,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountsResult<User> {
        let user_name = UserName::from_db(&self.user_name)
            .map_err(|e| AccountsError::Internal(format!("Invalid user_name: {}", e)))?;

        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AccountsError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name,
            email: Email::from_db(self.email),
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LoginAttemptRow {
    identity: String,
    origin: String,
    succeeded: bool,
    attempted_at: DateTime<Utc>,
    client_agent: Option<String>,
}

impl LoginAttemptRow {
    fn into_attempt(self) -> LoginAttempt {
        LoginAttempt {
            identity: self.identity,
            origin: self.origin,
            succeeded: self.succeeded,
            attempted_at: self.attempted_at,
            client_agent: self.client_agent,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BanRow {
    identity: String,
    origin: String,
    banned_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    reason: String,
}

impl BanRow {
    fn into_ban(self) -> BanRecord {
        BanRecord {
            identity: self.identity,
            origin: self.origin,
            banned_at: self.banned_at,
            expires_at: self.expires_at,
            reason: self.reason,
        }
    }
}
