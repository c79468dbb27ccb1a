use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stockroom_application::SessionTokenRepository;

use super::*;

#[async_trait]
impl SessionTokenRepository for InMemoryAccessStore {
    async fn insert_token(
        &self,
        token_hash: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.tokens.write().await.insert(
            token_hash.to_owned(),
            SessionTokenRecord {
                user_id,
                expires_at,
            },
        );
        Ok(())
    }

    async fn find_token(&self, token_hash: &str) -> AppResult<Option<SessionTokenRecord>> {
        Ok(self.tokens.read().await.get(token_hash).cloned())
    }

    async fn delete_token(&self, token_hash: &str) -> AppResult<bool> {
        Ok(self.tokens.write().await.remove(token_hash).is_some())
    }

    async fn delete_tokens_for_user(&self, user_id: UserId) -> AppResult<u64> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, record| record.user_id != user_id);
        Ok((before - tokens.len()) as u64)
    }
}
