use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::catalog::PlayerCatalog;
use crate::core::Player;
use crate::error::{GameEngineError, Result};

/// In-memory catalog over a fixed list of players
///
/// The catalog is reference data: loaded once, never mutated. Lookups are a
/// linear scan, which is fine at catalog scale (hundreds of players).
pub struct StaticCatalog {
    players: Vec<Player>,
}

impl StaticCatalog {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Load a catalog from a JSON array of player records
    pub fn from_json(json: &str) -> Result<Self> {
        let players: Vec<Player> = serde_json::from_str(json)?;
        Ok(Self::new(players))
    }
}

#[async_trait]
impl PlayerCatalog for StaticCatalog {
    async fn get_by_id(&self, id: &str) -> Result<Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| GameEngineError::PlayerNotFound(id.to_string()))
    }

    async fn random(&self, min_rating: Option<u8>) -> Result<Player> {
        let eligible: Vec<&Player> = match min_rating {
            Some(min) => self.players.iter().filter(|p| p.overall >= min).collect(),
            None => self.players.iter().collect(),
        };

        eligible
            .choose(&mut rand::thread_rng())
            .map(|p| (*p).clone())
            .ok_or(GameEngineError::EmptyCatalog)
    }

    fn len(&self) -> usize {
        self.players.len()
    }

    fn name(&self) -> &str {
        "static"
    }
}
