//! Token store trait.
//!
//! Defines the interface for the one durable client-side entry: the bearer
//! token and the cached user profile.

use async_trait::async_trait;

use super::model::PersistedSession;
use crate::error::Result;

/// Durable storage for the persisted session.
///
/// Only the Auth Session Store may call the mutating methods; no other
/// component writes the token.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Replace the entry atomically on `save`
/// - Treat `clear` on an empty store as success
/// - Never log the token
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Loads the persisted session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(PersistedSession))`: A token was stored
    /// - `Ok(None)`: Nothing stored
    /// - `Err(_)`: The entry exists but could not be read
    async fn load(&self) -> Result<Option<PersistedSession>>;

    /// Replaces the persisted session.
    async fn save(&self, session: &PersistedSession) -> Result<()>;

    /// Removes the persisted session. Idempotent.
    async fn clear(&self) -> Result<()>;
}
