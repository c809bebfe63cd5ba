use tracing::{error, info};

use crate::api::ResultsClient;
use crate::database::{SetLog, SqliteStore, recent};
use crate::error::Result;
use crate::generator::{RandomSource, generate_set};
use crate::stats::{FrequencyRanking, rank_frequency};
use crate::types::{Draw, GeneratedSet};

/// Owns everything one user session works with: the known draws, their
/// ranking, the persisted log and the random source.
pub struct Session {
    store: SqliteStore,
    client: ResultsClient,
    rng: Box<dyn RandomSource>,
    draws: Vec<Draw>,
    ranking: FrequencyRanking,
}

impl Session {
    /// Starts from whatever draws the store has cached.
    pub fn new(store: SqliteStore, client: ResultsClient, rng: Box<dyn RandomSource>) -> Result<Self> {
        let draws = store.load_draws()?;
        let ranking = rank_frequency(&draws);
        info!("session ready with {} cached draws", draws.len());
        Ok(Self {
            store,
            client,
            rng,
            draws,
            ranking,
        })
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn ranking(&self) -> &FrequencyRanking {
        &self.ranking
    }

    /// Replaces the known draws with a fresh download. On failure the
    /// previous draws, ranking and cache are left as they were.
    pub async fn fetch_results(&mut self) -> Result<usize> {
        let draws = match self.client.fetch_draws().await {
            Ok(draws) => draws,
            Err(e) => {
                error!("could not fetch results from {}: {}", self.client.url(), e);
                return Err(e);
            }
        };

        self.store.save_draws(&draws)?;
        self.ranking = rank_frequency(&draws);
        self.draws = draws;
        Ok(self.draws.len())
    }

    pub fn generate(&mut self, seed_text: &str) -> Result<GeneratedSet> {
        generate_set(
            seed_text,
            &self.ranking,
            &self.draws,
            self.rng.as_mut(),
            &mut self.store,
        )
    }

    /// The latest `n` generated sets, most recent first.
    pub fn recent_sets(&self, n: usize) -> Result<Vec<GeneratedSet>> {
        recent(&self.store, n)
    }

    pub fn clear_sets(&mut self) -> Result<()> {
        self.store.clear()
    }
}
