//! War lifecycle integration tests

use statecraft::core::calendar::GameDate;
use statecraft::core::types::{CountryCode, WarId};
use statecraft::core::{ConflictConfig, ConflictError, CountryProfile, CountryRegistry};
use statecraft::events::{ConflictEvent, EventLog};
use statecraft::war::peace;
use statecraft::war::*;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn code(s: &str) -> CountryCode {
    CountryCode::from(s)
}

fn countries() -> CountryRegistry {
    vec![
        CountryProfile::new("USA", "United States", 25.0e12, 9_800_000.0).with_military(1_400_000),
        CountryProfile::new("CHN", "China", 18.0e12, 9_600_000.0).with_military(2_035_000),
        CountryProfile::new("MEX", "Mexico", 1.4e12, 1_960_000.0).with_military(220_000),
        CountryProfile::new("GBR", "United Kingdom", 3.1e12, 243_000.0).with_military(150_000),
        CountryProfile::new("FRA", "France", 2.9e12, 551_000.0).with_military(200_000),
    ]
    .into_iter()
    .collect()
}

fn declare(
    engine: &mut WarEngine,
    log: &mut EventLog,
    defender: &str,
    strength: u64,
) -> Result<WarId, ConflictError> {
    engine.declare_war(
        &code("USA"),
        &code(defender),
        WarType::Offensive,
        WarJustification::TerritorialDispute,
        1_400_000,
        strength,
        GameDate(0),
        log,
    )
}

#[test]
fn test_four_month_balanced_war() {
    let config = ConflictConfig::default();
    let mut engine = WarEngine::new(&config);
    let mut log = EventLog::new();

    let war = declare(&mut engine, &mut log, "CHN", 2_035_000).unwrap();
    engine.tick(GameDate(120), &mut log);

    let state = engine.war(war).unwrap();
    let expected = 1.0 - (-0.004f64 * 120.0).exp();
    assert!((state.exhaustion - expected).abs() < 1e-9);
    assert_eq!(state.exhaustion_tier(&config.exhaustion), ExhaustionTier::Moderate);
    assert!(state.attacker_attrition > 0.0);
    assert!(state.defender_attrition > 0.0);
    assert!(!state.is_concluded());
    assert!(state.cost_of(&code("USA")) > 0.0);

    // Crossing into the moderate tier was logged once
    let crossings = log
        .events_for_war(war)
        .filter(|e| matches!(e.event_type, ConflictEvent::ExhaustionThresholdCrossed { .. }))
        .count();
    assert_eq!(crossings, 1);
}

#[test]
fn test_war_cap() {
    let mut engine = WarEngine::new(&ConflictConfig::default());
    let mut log = EventLog::new();

    declare(&mut engine, &mut log, "CHN", 2_035_000).unwrap();
    declare(&mut engine, &mut log, "MEX", 220_000).unwrap();
    declare(&mut engine, &mut log, "GBR", 150_000).unwrap();

    let fourth = declare(&mut engine, &mut log, "FRA", 200_000);
    assert!(matches!(
        fourth,
        Err(ConflictError::TooManyActiveWars { active: 3, limit: 3, .. })
    ));
    assert_eq!(engine.active_wars().len(), 3);
    assert_eq!(log.len(), 3);
}

#[test]
fn test_declaration_preconditions() {
    let mut engine = WarEngine::new(&ConflictConfig::default());
    let mut log = EventLog::new();

    let same = engine.declare_war(
        &code("USA"),
        &code("USA"),
        WarType::Offensive,
        WarJustification::SelfDefense,
        1_400_000,
        1_400_000,
        GameDate(0),
        &mut log,
    );
    assert!(matches!(same, Err(ConflictError::SameCountry(_))));

    let weak = engine.declare_war(
        &code("MEX"),
        &code("USA"),
        WarType::Offensive,
        WarJustification::SelfDefense,
        50_000,
        1_400_000,
        GameDate(0),
        &mut log,
    );
    assert!(matches!(weak, Err(ConflictError::InsufficientStrength { .. })));
    assert!(log.is_empty());
}

#[test]
fn test_repeated_tick_is_noop() {
    let mut engine = WarEngine::new(&ConflictConfig::default());
    let mut log = EventLog::new();
    let war = declare(&mut engine, &mut log, "CHN", 2_035_000).unwrap();

    engine.tick(GameDate(40), &mut log);
    let exhaustion = engine.war(war).unwrap().exhaustion;
    let casualties = engine.war(war).unwrap().casualties_of(&code("USA"));
    let events = log.len();

    let report = engine.tick(GameDate(40), &mut log);
    assert!(report.impacts.is_empty());
    assert_eq!(engine.war(war).unwrap().exhaustion, exhaustion);
    assert_eq!(engine.war(war).unwrap().casualties_of(&code("USA")), casualties);
    assert_eq!(log.len(), events);
}

#[test]
fn test_strategy_phases_in_over_a_week() {
    let mut engine = WarEngine::new(&ConflictConfig::default());
    let mut log = EventLog::new();
    let war = declare(&mut engine, &mut log, "CHN", 2_035_000).unwrap();

    engine.tick(GameDate(10), &mut log);
    engine
        .change_strategy(war, WarStrategy::Aggressive, GameDate(10), &mut log)
        .unwrap();

    engine.tick(GameDate(16), &mut log);
    assert!(engine.war(war).unwrap().strategy.is_transitioning());

    engine.tick(GameDate(17), &mut log);
    let strategy = &engine.war(war).unwrap().strategy;
    assert!(!strategy.is_transitioning());
    assert_eq!(strategy.current, WarStrategy::Aggressive);
    let completed = ConflictEvent::StrategyTransitionCompleted {
        war,
        strategy: WarStrategy::Aggressive,
    };
    assert!(log
        .events
        .iter()
        .any(|e| e.date == GameDate(17) && e.event_type == completed));
}

#[test]
fn test_aggressive_exhausts_faster() {
    let run = |strategy: WarStrategy| {
        let mut engine = WarEngine::new(&ConflictConfig::default());
        let mut log = EventLog::new();
        let war = declare(&mut engine, &mut log, "CHN", 2_035_000).unwrap();
        if strategy != WarStrategy::Balanced {
            engine.change_strategy(war, strategy, GameDate(0), &mut log).unwrap();
        }
        engine.tick(GameDate(90), &mut log);
        engine.war(war).unwrap().exhaustion
    };

    let aggressive = run(WarStrategy::Aggressive);
    let balanced = run(WarStrategy::Balanced);
    let defensive = run(WarStrategy::Defensive);
    assert!(aggressive > balanced);
    assert!(balanced > defensive);
}

#[test]
fn test_negotiated_peace_ends_war() {
    let registry = countries();
    let mut engine = WarEngine::new(&ConflictConfig::default());
    let mut log = EventLog::new();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let war = declare(&mut engine, &mut log, "MEX", 220_000).unwrap();
    engine.tick(GameDate(60), &mut log);

    let mut settled = None;
    for _ in 0..100 {
        let result = peace::propose(
            &mut engine,
            war,
            PeaceTerm::StatusQuo,
            &code("USA"),
            &registry,
            GameDate(60),
            &mut rng,
            &mut log,
        )
        .unwrap();
        if let Some(settlement) = result.settlement {
            settled = Some(settlement);
            break;
        }
    }
    let settlement = settled.expect("status quo accepted within 100 offers");
    assert_eq!(settlement.territory_fraction, 0.0);
    assert_eq!(settlement.reparation_amount, 0.0);

    // Further offers are refused outright
    let again = peace::propose(
        &mut engine,
        war,
        PeaceTerm::StatusQuo,
        &code("USA"),
        &registry,
        GameDate(60),
        &mut rng,
        &mut log,
    );
    assert!(matches!(again, Err(ConflictError::AlreadyConcluded(_))));

    let ended = engine.end_war(war).unwrap();
    assert_eq!(ended.peace_term, Some(PeaceTerm::StatusQuo));
    assert!(engine.war(war).is_none());
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn test_surrender_imposes_terms() {
    let registry = countries();
    let mut engine = WarEngine::new(&ConflictConfig::default());
    let mut log = EventLog::new();
    let war = declare(&mut engine, &mut log, "CHN", 2_035_000).unwrap();
    engine.tick(GameDate(30), &mut log);

    let result =
        peace::surrender(&mut engine, war, &code("USA"), &registry, GameDate(30), &mut log)
            .unwrap();
    assert_eq!(result.response, PeaceResponse::Accepted);
    assert_eq!(result.likelihood, 1.0);
    assert_eq!(result.term, PeaceTerm::Reparations);
    assert_eq!(result.impact, peace::SURRENDER_PENALTY);

    let settlement = result.settlement.unwrap();
    assert_eq!(settlement.victor, code("CHN"));
    assert_eq!(settlement.loser, code("USA"));
    assert!((settlement.reparation_amount - 0.10 * 25.0e12).abs() < 1.0);

    let state = engine.war(war).unwrap();
    assert_eq!(state.outcome, Some(WarOutcome::Surrender { loser: code("USA") }));
}

#[test]
fn test_lopsided_war_ends_decisively() {
    let mut config = ConflictConfig::default();
    config.war.base_conquest_rate = 0.05;
    let mut engine = WarEngine::new(&config);
    let mut log = EventLog::new();
    let war = declare(&mut engine, &mut log, "MEX", 220_000).unwrap();

    let report = engine.tick(GameDate(60), &mut log);
    assert_eq!(report.concluded, vec![war]);

    let state = engine.war(war).unwrap();
    assert_eq!(state.outcome, Some(WarOutcome::DecisiveVictory { victor: code("USA") }));
    assert_eq!(state.territory_conquered, Some(1.0));
    // Nothing moves once the war is over
    let end = state.end_date;
    engine.tick(GameDate(90), &mut log);
    assert_eq!(engine.war(war).unwrap().end_date, end);

    let settlement = engine.settlement_for(war, &countries()).unwrap();
    assert_eq!(settlement.term, None);
    assert_eq!(settlement.territory_transferred, 1_960_000.0);
}

#[test]
fn test_peace_cedes_occupied_land() {
    let mut config = ConflictConfig::default();
    config.war.base_conquest_rate = 0.01;
    let registry = countries();

    let occupied_war = |engine: &mut WarEngine, log: &mut EventLog| {
        let war = declare(engine, log, "MEX", 220_000).unwrap();
        engine.tick(GameDate(60), log);
        let state = engine.war(war).unwrap();
        assert!(!state.is_concluded());
        assert!(state.occupied_fraction > 0.5);
        assert_eq!(state.territory_conquered, Some(state.occupied_fraction));
        war
    };

    // The occupier keeps what it holds rather than the nominal quarter
    let mut engine = WarEngine::new(&config);
    let mut log = EventLog::new();
    let war = occupied_war(&mut engine, &mut log);
    let occupied = engine.war(war).unwrap().occupied_fraction;
    let settlement = engine
        .apply_peace_terms(
            war,
            PeaceTerm::PartialTerritory,
            &code("USA"),
            SettlementKind::Negotiated,
            &registry,
            GameDate(60),
            &mut log,
        )
        .unwrap();
    assert_eq!(settlement.territory_fraction, occupied);
    assert!((settlement.territory_transferred - 1_960_000.0 * occupied).abs() < 1e-6);
    assert_eq!(engine.war(war).unwrap().territory_conquered, Some(occupied));

    // Occupied land is returned when the other side dictates terms
    let mut engine = WarEngine::new(&config);
    let mut log = EventLog::new();
    let war = occupied_war(&mut engine, &mut log);
    let settlement = engine
        .apply_peace_terms(
            war,
            PeaceTerm::PartialTerritory,
            &code("MEX"),
            SettlementKind::Negotiated,
            &registry,
            GameDate(60),
            &mut log,
        )
        .unwrap();
    assert_eq!(settlement.loser, code("USA"));
    assert_eq!(settlement.territory_fraction, 0.25);
}
