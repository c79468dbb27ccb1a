//! Opaque bearer tokens for authenticated API sessions.
//!
//! Tokens are 32 random bytes rendered as hex. Only the SHA-256 hash is
//! persisted, together with an absolute expiry.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use stockroom_core::{AppError, AppResult};
use stockroom_domain::UserId;
use tracing::debug;

mod token_crypto;


/// Default token lifetime in minutes.
pub const DEFAULT_SESSION_TOKEN_TTL_MINUTES: i64 = 480;

/// Longest accepted token lifetime in minutes (one year).
pub const MAX_SESSION_TOKEN_TTL_MINUTES: i64 = 525_600;

/// Persisted session token row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokenRecord {
    /// Owner of the token.
    pub user_id: UserId,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

/// Repository port for session token persistence.
#[async_trait]
pub trait SessionTokenRepository: Send + Sync {
    /// Stores a token hash.
    async fn insert_token(
        &self,
        token_hash: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Finds a token by hash, expired or not.
    async fn find_token(&self, token_hash: &str) -> AppResult<Option<SessionTokenRecord>>;

    /// Deletes one token. Returns `false` when it did not exist.
    async fn delete_token(&self, token_hash: &str) -> AppResult<bool>;

    /// Deletes every token of a user and returns how many were removed.
    async fn delete_tokens_for_user(&self, user_id: UserId) -> AppResult<u64>;
}

/// Freshly issued token. The raw value is only ever returned here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSessionToken {
    /// Raw bearer token handed to the client.
    pub token: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

/// Application service issuing and resolving bearer tokens.
#[derive(Clone)]
pub struct SessionTokenService {
    repository: Arc<dyn SessionTokenRepository>,
    ttl: Duration,
}

impl SessionTokenService {
    /// Creates a token service with the given lifetime in minutes.
    ///
    /// Lifetimes outside `1..=MAX_SESSION_TOKEN_TTL_MINUTES` fall back to the
    /// default.
    #[must_use]
    pub fn new(repository: Arc<dyn SessionTokenRepository>, ttl_minutes: i64) -> Self {
        let ttl = (1..=MAX_SESSION_TOKEN_TTL_MINUTES)
            .contains(&ttl_minutes)
            .then(|| Duration::try_minutes(ttl_minutes))
            .flatten()
            .or_else(|| Duration::try_minutes(DEFAULT_SESSION_TOKEN_TTL_MINUTES))
            .unwrap_or_default();

        Self { repository, ttl }
    }

    /// Issues a new token for a user.
    pub async fn issue(&self, user_id: UserId) -> AppResult<IssuedSessionToken> {
        let (token, token_hash) = token_crypto::generate_token()?;
        let expires_at = Utc::now().checked_add_signed(self.ttl).ok_or_else(|| {
            AppError::Internal("session token expiry is out of range".to_owned())
        })?;

        self.repository
            .insert_token(&token_hash, user_id, expires_at)
            .await?;

        Ok(IssuedSessionToken { token, expires_at })
    }

    /// Resolves a raw token to its owner.
    ///
    /// Unknown and expired tokens are both reported as `Unauthorized`.
    /// Expired rows are removed on sight.
    pub async fn resolve(&self, raw_token: &str) -> AppResult<UserId> {
        let raw_token = raw_token.trim();
        if raw_token.is_empty() {
            return Err(invalid_token());
        }

        let token_hash = token_crypto::hash_token(raw_token);
        let Some(record) = self.repository.find_token(&token_hash).await? else {
            return Err(invalid_token());
        };

        if record.expires_at <= Utc::now() {
            debug!(user_id = %record.user_id, "session token expired");
            self.repository.delete_token(&token_hash).await?;
            return Err(invalid_token());
        }

        Ok(record.user_id)
    }

    /// Revokes one token. Revoking an unknown token is not an error.
    pub async fn revoke(&self, raw_token: &str) -> AppResult<()> {
        let token_hash = token_crypto::hash_token(raw_token.trim());
        self.repository.delete_token(&token_hash).await?;
        Ok(())
    }

    /// Revokes every token of a user.
    pub async fn revoke_all_for_user(&self, user_id: UserId) -> AppResult<u64> {
        let revoked = self.repository.delete_tokens_for_user(user_id).await?;
        debug!(%user_id, revoked, "revoked session tokens");
        Ok(revoked)
    }
}

fn invalid_token() -> AppError {
    AppError::Unauthorized("invalid or expired session token".to_owned())
}
