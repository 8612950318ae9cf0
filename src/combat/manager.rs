use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::combat::messages::{BattleCommand, BattleUpdate};
use crate::combat::rng::{self, RandomSource};
use crate::combat::session::BattleSession;
use crate::combat::state::{BattleMode, BattleState};
use crate::combat::type_chart::TypeChart;
use crate::config::BattleConfig;
use crate::errors::{BattleError, BattleResult};
use crate::monsters::{CatalogProvider, Language};

/// Manages active battle instances
pub struct BattleManager {
    // Maps battle ID to its session; each command holds the session lock for its whole run
    active_battles: DashMap<Uuid, Arc<Mutex<BattleSession>>>,
    catalog: Arc<dyn CatalogProvider>,
    type_chart: Arc<TypeChart>,
    config: BattleConfig,
}

impl BattleManager {
    /// Create a new BattleManager
    pub fn new(catalog: Arc<dyn CatalogProvider>, type_chart: Arc<TypeChart>, config: BattleConfig) -> Self {
        BattleManager {
            active_battles: DashMap::new(),
            catalog,
            type_chart,
            config,
        }
    }

    /// Open a battle with the configured mode, language and random source
    pub fn create_battle(&self) -> Uuid {
        self.create_battle_with(
            self.config.mode,
            self.config.language,
            rng::from_seed(self.config.rng_seed),
        )
    }

    pub fn create_battle_with(&self, mode: BattleMode, language: Language, rng: Box<dyn RandomSource>) -> Uuid {
        let battle_id = Uuid::new_v4();
        let session = BattleSession::new(
            battle_id,
            mode,
            language,
            self.catalog.clone(),
            self.type_chart.clone(),
            rng,
        );
        self.active_battles.insert(battle_id, Arc::new(Mutex::new(session)));
        info!("Created battle {} ({})", battle_id, mode);
        battle_id
    }

    fn session(&self, battle_id: Uuid) -> BattleResult<Arc<Mutex<BattleSession>>> {
        // Clone out of the map so no shard lock is held across an await
        self.active_battles
            .get(&battle_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                warn!("Command for unknown battle {}", battle_id);
                BattleError::BattleNotFound(battle_id)
            })
    }

    /// Run one command against a battle
    pub async fn dispatch(&self, battle_id: Uuid, command: BattleCommand) -> BattleResult<BattleUpdate> {
        let session = self.session(battle_id)?;
        let mut session = session.lock().await;
        session.handle(command)
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self, battle_id: Uuid) -> BattleResult<BattleState> {
        let session = self.session(battle_id)?;
        let session = session.lock().await;
        Ok(session.state().clone())
    }

    /// Drop a battle. Returns its final state if it existed.
    pub async fn end_battle(&self, battle_id: Uuid) -> Option<BattleState> {
        let (_, session) = self.active_battles.remove(&battle_id)?;
        let session = session.lock().await;
        info!("Ended battle {}", battle_id);
        Some(session.state().clone())
    }

    pub fn active_battle_count(&self) -> usize {
        self.active_battles.len()
    }
}
