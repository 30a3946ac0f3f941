//! Search integration tests on stacked decks.

mod common;

use common::{four_pieces, stacked, stacked_at};
use ftk_search::cards::{Card, CardToken};
use ftk_search::core::{decode, encode, StateBuilder};
use ftk_search::rules::{is_won, ComboRules, RulesEngine};
use ftk_search::error::SolverError;
use ftk_search::search::{search, search_with, SearchConfig, SearchOutcome, Solver, Width};
use ftk_search::zones::Zone;

// =============================================================================
// Best-First Search
// =============================================================================

#[test]
fn test_win_in_one() {
    let start = stacked(&four_pieces(&[Card::PotOfGreed]), &[], &[Card::RightLeg]);
    let encoding = encode(&start);

    let outcome = search(&encoding, &SearchConfig::default()).unwrap();
    let solution = outcome.solution().expect("win in one");

    assert_eq!(solution.visited, 1);
    assert_eq!(solution.path.len(), 2);
    assert_eq!(solution.path[0], encoding);
    assert!(is_won(&decode(&solution.path[1]).unwrap()));
    assert!(solution.trace.iter().any(|line| line.contains("Pot of Greed")));
}

#[test]
fn test_win_in_two() {
    let start = stacked(
        &four_pieces(&[Card::Upstart, Card::Upstart]),
        &[],
        &[Card::Wall, Card::RightLeg],
    );
    let outcome = search(&encode(&start), &SearchConfig::default()).unwrap();
    let solution = outcome.solution().expect("win in two");

    assert_eq!(solution.visited, 2);
    assert_eq!(solution.path.len(), 3);
    assert!(is_won(&decode(solution.path.last().unwrap()).unwrap()));
}

#[test]
fn test_cutoff_exhausts() {
    let start = stacked(
        &four_pieces(&[Card::Upstart, Card::Upstart]),
        &[],
        &[Card::Wall, Card::RightLeg],
    );
    let config = SearchConfig::default().with_cutoff(1);
    let outcome = search(&encode(&start), &config).unwrap();

    assert_eq!(outcome, SearchOutcome::Exhausted { visited: 2 });
    assert!(outcome.is_exhausted());
}

#[test]
fn test_nothing_to_do_is_unreachable() {
    let start = stacked(&four_pieces(&[]), &[], &[]);
    let outcome = search(&encode(&start), &SearchConfig::default()).unwrap();
    assert_eq!(outcome, SearchOutcome::Unreachable { visited: 1 });
}

#[test]
fn test_trace_can_be_disabled() {
    let start = stacked(&four_pieces(&[Card::PotOfGreed]), &[], &[Card::RightLeg]);
    let config = SearchConfig::default().with_trace(false);
    let outcome = search(&encode(&start), &config).unwrap();
    assert!(outcome.solution().unwrap().trace.is_empty());
}

// =============================================================================
// Terminal Lookahead
// =============================================================================

#[test]
fn test_lookahead_wins_at_root() {
    let start = stacked(
        &four_pieces(&[Card::Recall, Card::TrapHole]),
        &[Card::RightLeg],
        &[],
    );
    let encoding = encode(&start);
    let outcome = search(&encoding, &SearchConfig::default()).unwrap();
    let solution = outcome.solution().expect("lookahead win");

    assert_eq!(solution.visited, 1);
    assert_eq!(solution.path[0], encoding);
    let end = decode(solution.path.last().unwrap()).unwrap();
    assert!(is_won(&end));
    assert!(end.has(Zone::Discard, Card::TrapHole));
    assert!(solution.trace.iter().any(|line| line.contains("Grave Recall")));
}

#[test]
fn test_without_lookahead_recall_is_searched() {
    let start = stacked(
        &four_pieces(&[Card::Recall, Card::TrapHole]),
        &[Card::RightLeg],
        &[],
    );
    let rules = ComboRules::new().with_lookahead(false);
    let outcome = search_with(rules, &encode(&start), &SearchConfig::default()).unwrap();
    let solution = outcome.solution().expect("win through Recall");

    assert_eq!(solution.path.len(), 2);
    assert!(is_won(&decode(&solution.path[1]).unwrap()));
}

// =============================================================================
// BULB Search
// =============================================================================

#[test]
fn test_bulb_width_one_finds_win() {
    let start = stacked(
        &four_pieces(&[Card::Upstart, Card::Upstart]),
        &[],
        &[Card::Wall, Card::RightLeg],
    );
    let config = SearchConfig::default().with_width(Some(Width::Count(1)));
    let outcome = search(&encode(&start), &config).unwrap();
    let solution = outcome.solution().expect("greedy beam finds it");
    assert_eq!(solution.path.len(), 3);
}

#[test]
fn test_bulb_proves_unreachable() {
    // Only a Wall to summon: the tree is two states deep and has no win.
    let start = stacked(&four_pieces(&[Card::Wall]), &[], &[]);
    let config = SearchConfig::default().with_width(Some(Width::Fraction(0.5)));
    let outcome = search(&encode(&start), &config).unwrap();
    assert_eq!(outcome, SearchOutcome::Unreachable { visited: 2 });
}

#[test]
fn test_bulb_stats_count_rounds() {
    let start = stacked(
        &four_pieces(&[Card::Upstart, Card::Upstart]),
        &[],
        &[Card::Wall, Card::RightLeg],
    );
    let mut solver = Solver::new(
        ComboRules::new(),
        SearchConfig::default().with_width(Some(Width::Count(1))),
    )
    .unwrap();
    let outcome = solver.solve(start).unwrap();

    assert!(outcome.is_found());
    assert_eq!(solver.stats().rounds, 1);
    assert_eq!(solver.stats().expanded, 2);
    assert_eq!(solver.visited().len(), 2);
}

#[test]
fn test_bulb_spends_discrepancy_to_win() {
    // Tithe of Blood ranks first but costs the last 1000 LP. Width 1 only
    // reaches Upstart Goblin, and the win behind it, once a discrepancy is
    // spent at the root.
    let start = stacked_at(
        1000,
        &four_pieces(&[Card::Tithe, Card::Upstart, Card::Upstart]),
        &[],
        &[Card::Library, Card::RightLeg],
    );
    let rules = ComboRules::new();
    let first = rules.successors(&start, true).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].state.life(), 0);

    let mut solver = Solver::new(
        ComboRules::new(),
        SearchConfig::default().with_width(Some(Width::Count(1))),
    )
    .unwrap();
    let outcome = solver.solve(start).unwrap();
    let solution = outcome.solution().expect("found in a later round");

    assert_eq!(solver.stats().rounds, 2);
    assert_eq!(solution.visited, 3);
    assert_eq!(solution.path.len(), 3);
    assert_eq!(decode(&solution.path[1]).unwrap().life(), 1000);
}

#[test]
fn test_bulb_unreachable_over_several_rounds() {
    let start = stacked_at(
        1000,
        &four_pieces(&[Card::Tithe, Card::Upstart]),
        &[],
        &[Card::Library, Card::Wall],
    );
    let mut solver = Solver::new(
        ComboRules::new(),
        SearchConfig::default().with_width(Some(Width::Count(1))),
    )
    .unwrap();
    let outcome = solver.solve(start.clone()).unwrap();

    assert_eq!(outcome, SearchOutcome::Unreachable { visited: 6 });
    assert_eq!(solver.stats().rounds, 3);

    let exhaustive = search(&encode(&start), &SearchConfig::default()).unwrap();
    assert_eq!(exhaustive, SearchOutcome::Unreachable { visited: 6 });
}

#[test]
fn test_bulb_agrees_with_best_first_on_transpositions() {
    // Summoning and drawing commute, so the tree folds back on itself.
    let start = stacked(
        &four_pieces(&[Card::Wall, Card::Upstart, Card::Upstart]),
        &[],
        &[Card::Wall, Card::Wall],
    );
    let encoding = encode(&start);
    let exhaustive = search(&encoding, &SearchConfig::default()).unwrap();
    assert!(matches!(exhaustive, SearchOutcome::Unreachable { .. }));

    for width in [Width::Count(1), Width::Count(2), Width::Fraction(0.5)] {
        let config = SearchConfig::default().with_width(Some(width));
        let outcome = search(&encoding, &config).unwrap();
        assert_eq!(outcome, exhaustive, "width {width:?}");
    }
}

// =============================================================================
// Prescience
// =============================================================================

#[test]
fn test_cache_prescient_picks_hidden_piece() {
    let start = stacked(
        &four_pieces(&[Card::Cache]),
        &[],
        &[Card::Wall, Card::Library, Card::RightLeg],
    );
    let outcome = search(&encode(&start), &SearchConfig::default()).unwrap();
    let solution = outcome.solution().expect("prescient pick wins");
    assert_eq!(solution.path.len(), 2);
    assert!(solution.trace.iter().any(|line| line.contains("keep Right Leg")));
}

#[test]
fn test_cache_blind_cannot_pick() {
    // Blind, the three face-down cards are interchangeable: the only choice
    // keeps the top one, a Wall.
    let start = stacked(
        &four_pieces(&[Card::Cache]),
        &[],
        &[Card::Wall, Card::Library, Card::RightLeg],
    );
    let config = SearchConfig::default().with_prescient(false);
    let outcome = search(&encode(&start), &config).unwrap();
    assert_eq!(outcome, SearchOutcome::Unreachable { visited: 3 });
}

// =============================================================================
// Solver Properties
// =============================================================================

#[test]
fn test_cutoff_monotonicity() {
    let start = stacked(
        &four_pieces(&[Card::Upstart, Card::Upstart]),
        &[],
        &[Card::Wall, Card::RightLeg],
    );
    let encoding = encode(&start);
    let outcomes: Vec<SearchOutcome> = [1, 2, 10, 1000]
        .into_iter()
        .map(|cutoff| search(&encoding, &SearchConfig::default().with_cutoff(cutoff)).unwrap())
        .collect();

    assert!(outcomes[0].is_exhausted());
    let paths: Vec<_> = outcomes[1..]
        .iter()
        .map(|o| o.solution().unwrap().path.clone())
        .collect();
    assert!(paths.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_search_is_deterministic() {
    let encoding = encode(&ftk_search::core::GameState::deal(11));
    let config = SearchConfig::default().with_cutoff(300);
    assert_eq!(search(&encoding, &config).unwrap(), search(&encoding, &config).unwrap());
}

#[test]
fn test_random_deal_paths_are_legal() {
    let rules = ComboRules::new();
    for seed in 0..4 {
        let encoding = encode(&ftk_search::core::GameState::deal(seed));
        let config = SearchConfig::default().with_cutoff(500).with_trace(false);
        let outcome = search(&encoding, &config).unwrap();
        assert!(outcome.visited() <= 501);

        let Some(solution) = outcome.solution() else {
            continue;
        };
        assert_eq!(solution.path[0], encoding);
        for pair in solution.path.windows(2) {
            let parent = decode(&pair[0]).unwrap();
            let children = rules.successors(&parent, true).unwrap();
            assert!(children.iter().any(|c| c.key.as_str() == pair[1]));
        }
        let mut last = decode(solution.path.last().unwrap()).unwrap();
        assert!(rules.evaluate(&mut last).unwrap().is_win());
    }
}

#[test]
fn test_verifying_rules_check_the_start() {
    let start = stacked(&four_pieces(&[Card::PotOfGreed]), &[], &[Card::RightLeg]);
    let encoding = encode(&start);
    let rules = || ComboRules::new().with_verify(true);

    let outcome = search_with(rules(), &encoding, &SearchConfig::default()).unwrap();
    assert!(outcome.is_found());

    let broken = encoding.replacen("|8000|", "|-5|", 1);
    let err = search_with(rules(), &broken, &SearchConfig::default()).unwrap_err();
    assert!(matches!(err, SolverError::Invariant { .. }));
    assert!(search(&broken, &SearchConfig::default()).is_ok());
}

#[test]
fn test_malformed_encoding_is_error() {
    assert!(search("not a state", &SearchConfig::default()).is_err());
}

#[test]
fn test_lost_state_has_no_successors() {
    let mut b = StateBuilder::new(0);
    for card in [Card::Wall, Card::Wall, Card::Wall, Card::Library, Card::Library] {
        b.push(Zone::Main, CardToken::new(card)).unwrap();
    }
    b.push(Zone::DrawPile, CardToken::hidden(Card::PotOfGreed)).unwrap();
    b.set_life(0);
    let state = b.build();

    assert!(state.is_lost());
    assert!(ComboRules::new().successors(&state, true).unwrap().is_empty());
}

// =============================================================================
// Reporting
// =============================================================================

#[test]
fn test_outcome_json() {
    let start = stacked(&four_pieces(&[Card::PotOfGreed]), &[], &[Card::RightLeg]);
    let encoding = encode(&start);
    let outcome = search(&encoding, &SearchConfig::default()).unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["visited"], 1);
    assert_eq!(json["path"][0], encoding.as_str());
    assert!(json.get("exhausted").is_none());

    let back: SearchOutcome = serde_json::from_value(json).unwrap();
    assert_eq!(back, outcome);

    let unreachable = SearchOutcome::Unreachable { visited: 3 };
    assert_eq!(serde_json::to_string(&unreachable).unwrap(), r#"{"visited":3}"#);
}
