use std::sync::Arc;

use battle_sim::combat::logic::mega_evolution;
use battle_sim::combat::{
    BattleMode, BattlePhase, BattleSession, ScriptedRandom, Side, TeamMemberRequest, TypeChart,
};
use battle_sim::config::BattleConfig;
use battle_sim::monsters::{CatalogProvider, Language, PokemonType, SpeciesRepository};
use battle_sim::stats::StatName;
use battle_sim::{BattleCommand, BattleError, BattleManager};
use pretty_assertions::assert_eq;
use uuid::Uuid;

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/catalog.json");

fn catalog() -> Arc<SpeciesRepository> {
    SpeciesRepository::load(CATALOG).expect("sample catalog loads")
}

fn session(language: Language, draws: Vec<f64>) -> BattleSession {
    BattleSession::new(
        Uuid::new_v4(),
        BattleMode::Single,
        language,
        catalog(),
        Arc::new(TypeChart::standard()),
        Box::new(ScriptedRandom::new(draws)),
    )
}

fn setup(session: &mut BattleSession, first: TeamMemberRequest, second: TeamMemberRequest) {
    session
        .handle(BattleCommand::AddCombatant { side: Side::One, member: first })
        .unwrap();
    session
        .handle(BattleCommand::AddCombatant { side: Side::Two, member: second })
        .unwrap();
    session.handle(BattleCommand::Start).unwrap();
}

fn play_turn(session: &mut BattleSession, move1: usize, move2: usize) -> Vec<String> {
    session
        .handle(BattleCommand::SelectMove { side: Side::One, move_index: move1 })
        .unwrap();
    session
        .handle(BattleCommand::SelectMove { side: Side::Two, move_index: move2 })
        .unwrap();
    session.handle(BattleCommand::ExecuteTurn).unwrap().log_lines()
}

#[test]
fn sample_catalog_is_sorted_by_id() {
    let catalog = catalog();
    let ids: Vec<u32> = catalog.all_species().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![6, 9, 76, 94]);
    assert_eq!(catalog.species_by_name("GENGAR").map(|s| s.id), Some(94));
}

#[test]
fn full_battle_runs_to_a_winner() {
    // Never critical, roll of 0.925
    let mut session = session(Language::En, vec![0.5]);
    setup(
        &mut session,
        TeamMemberRequest::new(6, 50, &["flamethrower"]),
        TeamMemberRequest::new(94, 50, &["shadow-ball"]),
    );

    let first = play_turn(&mut session, 0, 0);
    assert_eq!(
        first,
        vec![
            "Gengar used shadow ball!",
            "Charizard took 72 damage!",
            "Charizard used flamethrower!",
            "Gengar took 77 damage!",
        ]
    );

    let second = play_turn(&mut session, 0, 0);
    assert_eq!(
        second,
        vec![
            "Gengar used shadow ball!",
            "Charizard took 72 damage!",
            "Charizard used flamethrower!",
            "Gengar took 77 damage!",
            "Gengar fainted!",
            "Team 1 wins!",
        ]
    );

    let state = session.state();
    assert_eq!(state.phase, BattlePhase::Concluded);
    assert_eq!(state.winner, Some(Side::One));
    assert_eq!(state.turn_number, 2);
    assert_eq!(state.active(Side::One).unwrap().current_hp, 9);
    assert_eq!(state.active(Side::Two).unwrap().current_hp, 0);
    assert_eq!(state.battle_log.first().map(String::as_str), Some("Battle started!"));
    assert_eq!(state.battle_log.last().map(String::as_str), Some("Team 1 wins!"));
}

#[test]
fn quadruple_weakness_knocks_out_in_one_hit() {
    let mut session = session(Language::En, vec![0.5, 0.0]);
    setup(
        &mut session,
        TeamMemberRequest::new(9, 50, &["surf"]),
        TeamMemberRequest::new(76, 50, &["earthquake"]),
    );

    let lines = play_turn(&mut session, 0, 0);
    assert_eq!(
        lines,
        vec![
            "Blastoise used surf!",
            "It's super effective!",
            "Golem took 305 damage!",
            "Golem fainted!",
            "Team 1 wins!",
        ]
    );
    // Golem never got to move
    assert_eq!(session.state().active(Side::One).unwrap().current_hp, 154);
}

#[test]
fn resisted_and_immune_moves_are_reported() {
    let mut session = session(Language::En, vec![0.5, 0.0]);
    setup(
        &mut session,
        TeamMemberRequest::new(94, 50, &["shadow-ball", "sludge-bomb"]),
        TeamMemberRequest::new(76, 50, &["earthquake", "tackle"]),
    );

    let lines = play_turn(&mut session, 1, 1);
    assert_eq!(
        lines,
        vec![
            "Gengar used sludge bomb!",
            "It's not very effective...",
            "Golem took 26 damage!",
            "Golem used tackle!",
            "It has no effect...",
        ]
    );
    assert_eq!(session.state().active(Side::One).unwrap().current_hp, 135);
}

#[test]
fn names_follow_the_battle_language() {
    let mut french = session(Language::Fr, vec![0.5]);
    setup(
        &mut french,
        TeamMemberRequest::new(6, 50, &["swords-dance"]),
        TeamMemberRequest::new(9, 50, &["tackle"]),
    );
    let lines = play_turn(&mut french, 0, 0);
    assert_eq!(lines[0], "Dracaufeu used swords dance!");
    assert_eq!(lines[1], "Tortank used tackle!");

    // No Arabic names in the sample catalog, so the canonical name is used
    let mut arabic = session(Language::Ar, vec![0.5]);
    setup(
        &mut arabic,
        TeamMemberRequest::new(6, 50, &["swords-dance"]),
        TeamMemberRequest::new(9, 50, &["tackle"]),
    );
    let lines = play_turn(&mut arabic, 0, 0);
    assert_eq!(lines[0], "Charizard used swords dance!");
}

#[test]
fn transformation_changes_and_restores_the_combatant() {
    let mut session = session(Language::En, vec![0.5]);
    setup(
        &mut session,
        TeamMemberRequest::new(6, 50, &["dragon-claw"]).with_held_item("charizardite x"),
        TeamMemberRequest::new(76, 50, &["tackle"]),
    );
    let before = session.state().active(Side::One).unwrap().clone();
    assert_eq!(before.calculated_stats.attack, 104);

    let update = session
        .handle(BattleCommand::Transform { side: Side::One, index: 0 })
        .unwrap();
    assert_eq!(update.log_lines(), vec!["Charizard Mega Evolved into Mega Charizard!"]);

    let transformed = session.state().active(Side::One).unwrap().clone();
    assert!(transformed.is_transformed);
    assert_eq!(transformed.pokemon_types, vec![PokemonType::Fire, PokemonType::Dragon]);
    assert_eq!(transformed.calculated_stats.attack, 168);
    assert_eq!(transformed.current_hp, before.current_hp);

    let summary = mega_evolution::stat_changes(&transformed).unwrap();
    assert!(summary.types_changed);
    let attack = summary.changes.iter().find(|c| c.stat == StatName::Attack).unwrap();
    assert_eq!((attack.change, attack.percent), (64, 62));

    assert_eq!(mega_evolution::revert(&transformed), before);
}

#[test]
fn transformation_guards_surface_their_messages() {
    let mut session = session(Language::En, vec![0.5]);
    setup(
        &mut session,
        TeamMemberRequest::new(76, 50, &["tackle"]).with_held_item("Gengarite"),
        TeamMemberRequest::new(9, 50, &["tackle"]),
    );

    let err = session
        .handle(BattleCommand::Transform { side: Side::One, index: 0 })
        .unwrap_err();
    assert_eq!(err.to_string(), "This item cannot trigger Mega Evolution!");

    let err = session
        .handle(BattleCommand::Transform { side: Side::Two, index: 0 })
        .unwrap_err();
    assert_eq!(err.to_string(), "This Pokémon is not holding a Mega Stone!");
}

#[tokio::test]
async fn manager_runs_a_battle_end_to_end() {
    let config = BattleConfig {
        mode: BattleMode::Single,
        language: Language::En,
        rng_seed: None,
        demo_max_turns: 10,
    };
    let manager = BattleManager::new(catalog(), Arc::new(TypeChart::standard()), config);
    let battle_id = manager.create_battle_with(
        BattleMode::Single,
        Language::En,
        Box::new(ScriptedRandom::new(vec![0.5, 0.0])),
    );

    for (side, member) in [
        (Side::One, TeamMemberRequest::new(9, 50, &["surf"])),
        (Side::Two, TeamMemberRequest::new(76, 50, &["earthquake"])),
    ] {
        manager
            .dispatch(battle_id, BattleCommand::AddCombatant { side, member })
            .await
            .unwrap();
    }
    manager.dispatch(battle_id, BattleCommand::Start).await.unwrap();
    for side in Side::BOTH {
        manager
            .dispatch(battle_id, BattleCommand::SelectMove { side, move_index: 0 })
            .await
            .unwrap();
    }

    let update = manager.dispatch(battle_id, BattleCommand::ExecuteTurn).await.unwrap();
    assert_eq!(update.phase, BattlePhase::Concluded);
    assert_eq!(update.winner, Some(Side::One));

    let err = manager
        .dispatch(battle_id, BattleCommand::ExecuteTurn)
        .await
        .unwrap_err();
    assert!(matches!(err, BattleError::WrongPhase { .. }));

    let finished = manager.end_battle(battle_id).await.unwrap();
    assert_eq!(finished.winner, Some(Side::One));
    assert_eq!(manager.active_battle_count(), 0);
}
