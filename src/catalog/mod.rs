pub mod static_catalog;

use async_trait::async_trait;
use crate::core::Player;
use crate::error::Result;

pub use static_catalog::StaticCatalog;

/// Trait for player catalog backends (static file, database, remote API)
#[async_trait]
pub trait PlayerCatalog: Send + Sync {
    /// Look up a player by catalog id
    async fn get_by_id(&self, id: &str) -> Result<Player>;

    /// Draw a random player, optionally restricted to a minimum overall
    /// rating
    async fn random(&self, min_rating: Option<u8>) -> Result<Player>;

    /// Number of players the catalog holds
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get catalog name for logging
    fn name(&self) -> &str;
}
