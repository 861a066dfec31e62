//! Scratch Engine - Round orchestration
//!
//! A round runs generate → evaluate → bonus in a single pass. The bonus
//! stage is skipped entirely (no random draw) when nothing won.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::bonus::apply_bonus;
use crate::config::{CellLookup, GameConfig};
use crate::error::PlayError;
use crate::evaluator::evaluate;
use crate::generator::MatrixGenerator;
use crate::grid::Grid;
use crate::result::PlayResult;

/// Play one round with the default cell lookup
pub fn play<R: Rng>(config: &GameConfig, bet_amount: u64, rng: &mut R) -> Result<PlayResult, PlayError> {
    play_with(MatrixGenerator::default(), config, bet_amount, rng)
}

/// Play one round with an explicit generator
pub fn play_with<R: Rng>(
    generator: MatrixGenerator,
    config: &GameConfig,
    bet_amount: u64,
    rng: &mut R,
) -> Result<PlayResult, PlayError> {
    let grid = generator.generate(config, rng)?;
    log::debug!("Generated {}x{} grid", grid.rows(), grid.columns());
    Ok(settle(config, grid, bet_amount, rng))
}

/// Evaluate an existing grid and apply the bonus stage
pub fn settle<R: Rng>(config: &GameConfig, grid: Grid, bet_amount: u64, rng: &mut R) -> PlayResult {
    let evaluation = evaluate(config, &grid, bet_amount);
    log::debug!(
        "Evaluated: reward {} from {} winning symbol(s)",
        evaluation.total_reward,
        evaluation.applied_combinations.len()
    );

    let (reward, applied_bonus_symbol) = if evaluation.is_win() {
        let bonus = apply_bonus(config, &grid, evaluation.total_reward, rng);
        log::debug!(
            "Bonus applied: {:?}, reward {} → {}",
            bonus.selected_symbol,
            evaluation.total_reward,
            bonus.reward
        );
        (bonus.reward, bonus.selected_symbol)
    } else {
        log::debug!("Bonus skipped: no winning combination");
        (0.0, None)
    };

    PlayResult {
        matrix: grid,
        applied_bonus_symbol,
        applied_winning_combinations: evaluation.applied_combinations,
        reward,
    }
}

/// Scratch game session
///
/// Owns the configuration and a seedable random source so consecutive
/// rounds draw from one stream.
pub struct ScratchGame {
    /// Configuration
    config: Arc<GameConfig>,
    /// Grid generator
    generator: MatrixGenerator,
    /// Random number generator
    rng: ChaCha8Rng,
    /// Rounds played so far
    rounds: u64,
}

impl ScratchGame {
    /// Create a game seeded from OS entropy
    pub fn new(config: impl Into<Arc<GameConfig>>) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_os_rng())
    }

    /// Create a game with a fixed seed for reproducible rounds
    pub fn with_seed(config: impl Into<Arc<GameConfig>>, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: impl Into<Arc<GameConfig>>, rng: ChaCha8Rng) -> Self {
        Self {
            config: config.into(),
            generator: MatrixGenerator::default(),
            rng,
            rounds: 0,
        }
    }

    /// Use a different probability-cell lookup strategy
    pub fn with_lookup(mut self, lookup: CellLookup) -> Self {
        self.generator = MatrixGenerator::new(lookup);
        self
    }

    /// Reseed RNG
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Get current config
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Rounds played so far
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Play one round
    pub fn play(&mut self, bet_amount: u64) -> Result<PlayResult, PlayError> {
        self.rounds += 1;
        let result = play_with(self.generator, &self.config, bet_amount, &mut self.rng)?;
        log::info!(
            "Round {}: bet {}, reward {}, bonus {:?}",
            self.rounds,
            bet_amount,
            result.reward,
            result.applied_bonus_symbol
        );
        Ok(result)
    }
}
