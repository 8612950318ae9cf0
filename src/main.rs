use std::sync::Arc;

use anyhow::Context;
use battle_sim::combat::logic::mega_evolution;
use battle_sim::combat::{BattleCommand, BattleManager, BattlePhase, Side, TeamMemberRequest, TypeChart};
use battle_sim::monsters::{CatalogProvider, SpeciesRepository};
use battle_sim::Config;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let catalog = SpeciesRepository::load(&config.catalog.catalog_path)
        .with_context(|| format!("loading catalog from {}", config.catalog.catalog_path))?;
    let type_chart = Arc::new(TypeChart::load_or_standard(config.catalog.type_chart_path.as_deref()));

    let manager = BattleManager::new(catalog.clone(), type_chart, config.battle.clone());
    let battle_id = manager.create_battle();

    // Demo teams: the first two catalog entries, one per side
    let roster = catalog.all_species();
    anyhow::ensure!(roster.len() >= 2, "demo needs at least two species in the catalog");
    for (side, species) in Side::BOTH.into_iter().zip(roster) {
        let moves: Vec<&str> = species.moves.iter().take(4).map(|m| m.name.as_str()).collect();
        let mut member = TeamMemberRequest::new(species.id, 50, &moves);
        if let Some(record) = mega_evolution::records_for_species(species.id).first() {
            member = member.with_held_item(record.item);
        }
        manager
            .dispatch(battle_id, BattleCommand::AddCombatant { side, member })
            .await?;
    }
    manager.dispatch(battle_id, BattleCommand::Start).await?;

    // Side 1 mega evolves on turn one when it can
    if let Ok(update) = manager
        .dispatch(battle_id, BattleCommand::Transform { side: Side::One, index: 0 })
        .await
    {
        for line in update.log_lines() {
            info!("{}", line);
        }
    }

    for turn in 0..config.battle.demo_max_turns {
        // Cycle through each side's moves
        for side in Side::BOTH {
            let state = manager.snapshot(battle_id).await?;
            let move_count = state.active(side).map_or(1, |c| c.moves.len()).max(1);
            let move_index = turn as usize % move_count;
            manager
                .dispatch(battle_id, BattleCommand::SelectMove { side, move_index })
                .await?;
        }

        let update = manager.dispatch(battle_id, BattleCommand::ExecuteTurn).await?;
        for line in update.log_lines() {
            info!("{}", line);
        }
        if update.phase == BattlePhase::Concluded {
            break;
        }
    }

    let final_state = manager
        .end_battle(battle_id)
        .await
        .context("battle disappeared before it ended")?;
    match final_state.winner {
        Some(side) => info!("Battle over after {} turns, {} won", final_state.turn_number, side),
        None => info!("No winner after {} turns", config.battle.demo_max_turns),
    }
    Ok(())
}
