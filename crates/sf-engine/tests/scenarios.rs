//! Round Scenario Test Suite
//!
//! Plays fixed grids against the 3×3 reference configuration and checks
//! rewards, applied combinations and bonus selection end to end. Also
//! covers seeded generation through the public API.

use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sf_engine::{
    CellLookup, ConfigParser, GameConfig, Grid, MatrixGenerator, PlayResult, ScratchGame,
    WeightedPool, bonus_candidates, play, settle,
};

// ═══════════════════════════════════════════════════════════════════════════════
// TEST FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

const CONFIG_3X3: &str = include_str!("fixtures/config_3x3.json");

fn config() -> GameConfig {
    ConfigParser::new()
        .parse_json(CONFIG_3X3)
        .expect("reference config is valid")
}

fn grid(rows: [[&str; 3]; 3]) -> Grid {
    Grid::from_rows(rows).expect("3x3 grid")
}

fn settle_seeded(rows: [[&str; 3]; 3], bet: u64) -> PlayResult {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    settle(&config(), grid(rows), bet, &mut rng)
}

// ═══════════════════════════════════════════════════════════════════════════════
// FIXED GRIDS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_lost_game() {
    let result = settle_seeded([["A", "B", "C"], ["E", "B", "10x"], ["F", "D", "C"]], 100);

    assert_eq!(result.reward, 0.0);
    assert!(result.applied_winning_combinations.is_empty());
    assert_eq!(result.applied_bonus_symbol, None);
}

#[test]
fn test_same_symbols_with_multiply_bonus() {
    let result = settle_seeded([["A", "B", "C"], ["E", "B", "10x"], ["F", "D", "B"]], 100);

    // 100 (bet) × 3 (B) × 1 (same_symbol_3_times) = 300, then × 10
    assert_eq!(result.reward, 3000.0);
    assert_eq!(
        result.applied_winning_combinations["B"],
        vec!["same_symbol_3_times".to_string()]
    );
    assert_eq!(result.applied_winning_combinations.len(), 1);
    assert_eq!(result.applied_bonus_symbol.as_deref(), Some("10x"));
}

#[test]
fn test_extra_bonus_after_compounding() {
    let result = settle_seeded([["A", "A", "A"], ["A", "+1000", "A"], ["A", "A", "A"]], 100);

    // same_symbol_8_times      100 × 5 × 10  = 5000
    // two horizontal lines     5000 × 2 × 2  = 20000
    // two vertical lines       20000 × 2 × 2 = 80000
    // extra bonus              80000 + 1000  = 81000
    assert_eq!(result.reward, 81000.0);
    assert_eq!(
        result.applied_winning_combinations["A"],
        vec![
            "same_symbol_8_times",
            "same_symbols_horizontally",
            "same_symbols_horizontally",
            "same_symbols_vertically",
            "same_symbols_vertically",
        ]
    );
    assert_eq!(result.applied_bonus_symbol.as_deref(), Some("+1000"));
}

#[test]
fn test_miss_bonus_is_not_selected() {
    let result = settle_seeded([["A", "A", "A"], ["A", "MISS", "A"], ["A", "A", "A"]], 100);

    assert_eq!(result.reward, 80000.0);
    assert_eq!(result.applied_bonus_symbol, None);
}

#[test]
fn test_horizontal_lines_for_three_symbols() {
    let result = settle_seeded([["A", "A", "A"], ["B", "B", "B"], ["C", "C", "C"]], 100);

    // A: 100 × 5 × 1 × 2, B: 100 × 3 × 1 × 2, C: 100 × 2.5 × 1 × 2
    assert_relative_eq!(result.reward, 2100.0);
    for symbol in ["A", "B", "C"] {
        assert_eq!(
            result.applied_winning_combinations[symbol],
            vec!["same_symbol_3_times", "same_symbols_horizontally"]
        );
    }
    let order: Vec<_> = result.applied_winning_combinations.keys().collect();
    assert_eq!(order, vec!["A", "B", "C"]);
}

#[test]
fn test_diagonal_and_fractional_multiplier() {
    let result = settle_seeded([["E", "A", "B"], ["C", "E", "D"], ["F", "B", "E"]], 10);

    // E: same_symbol_3_times 10 × 1 × 1.2 = 12, diagonal × 5 = 60
    assert_relative_eq!(result.reward, 60.0, epsilon = 1e-9);
    assert_eq!(
        result.applied_winning_combinations["E"],
        vec!["same_symbol_3_times", "same_symbols_diagonally_left_to_right"]
    );
}

#[test]
fn test_bonus_pick_weights_by_occurrence() {
    let config = config();
    let rows = [["B", "B", "B"], ["5x", "A", "5x"], ["5x", "+500", "MISS"]];

    let mut five_x = 0;
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = settle(&config, grid(rows), 1, &mut rng);
        match result.applied_bonus_symbol.as_deref() {
            Some("5x") => {
                five_x += 1;
                assert_eq!(result.reward, 3.0 * 2.0 * 5.0);
            }
            Some("+500") => assert_eq!(result.reward, 3.0 * 2.0 + 500.0),
            other => panic!("unexpected bonus {other:?}"),
        }
    }
    // 3 of 4 candidates are 5x
    assert!(five_x > 120, "5x picked {five_x} times out of 200");
}

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATED ROUNDS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_generated_grid_dimensions() {
    let config = config();
    for lookup in [CellLookup::Coordinates, CellLookup::RowMajor, CellLookup::Product] {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = MatrixGenerator::new(lookup).generate(&config, &mut rng).unwrap();
        assert_eq!((grid.rows(), grid.columns()), (config.rows, config.columns));
    }
}

#[test]
fn test_same_seed_same_round() {
    let config = config();
    let first = play(&config, 100, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
    let second = play(&config, 100, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_random_source_consumption_order() {
    let config = config();

    for seed in 0..64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = play(&config, 100, &mut rng).unwrap();

        // One draw per cell in row-major order
        let mut expected = ChaCha8Rng::seed_from_u64(seed);
        for row in 0..config.rows {
            for column in 0..config.columns {
                let cell = config
                    .probability_cell(row, column, CellLookup::Coordinates)
                    .unwrap();
                let pool = WeightedPool::merged(&cell.symbols, &config.bonus_probabilities);
                let ticket = expected.random_range(0..pool.total());
                assert_eq!(result.matrix.get(row, column), pool.symbol_at(ticket));
            }
        }

        // Then a single bonus draw, only for a win with candidates
        let candidates = bonus_candidates(&result.matrix);
        if result.is_win() && !candidates.is_empty() {
            let pick = expected.random_range(0..candidates.len());
            assert_eq!(result.applied_bonus_symbol.as_deref(), Some(candidates[pick]));
        }
        assert_eq!(rng, expected, "draw count mismatch for seed {seed}");
    }
}

#[test]
fn test_round_invariants_hold_across_seeds() {
    let mut game = ScratchGame::with_seed(config(), 12345);

    for _ in 0..500 {
        let result = game.play(100).unwrap();
        assert!(result.reward >= 0.0);
        if result.applied_winning_combinations.is_empty() {
            assert_eq!(result.reward, 0.0);
            assert_eq!(result.applied_bonus_symbol, None);
        } else {
            assert!(result.reward > 0.0);
        }
        if let Some(bonus) = &result.applied_bonus_symbol {
            assert_ne!(bonus, "MISS");
            assert!(result.matrix.iter().any(|t| t == bonus.as_str()));
        }
    }
    assert_eq!(game.rounds(), 500);
}

#[test]
fn test_reference_config_loads_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config_3x3.json");
    let config = ConfigParser::new().load(path).unwrap();
    assert_eq!(config.win_combinations.len(), 11);
    assert_eq!(config.standard_probabilities.len(), 9);
    assert_eq!(config.win_combinations[0].name, "same_symbol_3_times");
}
