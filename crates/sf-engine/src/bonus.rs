//! Bonus symbol selection
//!
//! A winning round picks one bonus cell uniformly from the grid and applies
//! its effect to the whole reward. Every eligible cell is a separate
//! candidate, so a bonus symbol showing up twice is twice as likely.

use rand::Rng;

use crate::config::GameConfig;
use crate::grid::Grid;
use crate::symbols::{BonusImpact, is_bonus_candidate};

/// Reward after the bonus stage
#[derive(Debug, Clone, PartialEq)]
pub struct BonusOutcome {
    pub reward: f64,
    /// Bonus symbol that was drawn, if any cell was eligible
    pub selected_symbol: Option<String>,
}

/// Eligible bonus cells in row-major order, one entry per occurrence
pub fn bonus_candidates(grid: &Grid) -> Vec<&str> {
    grid.iter().filter(|token| is_bonus_candidate(token)).collect()
}

/// Apply a bonus effect to a reward
pub fn apply_impact(impact: BonusImpact, reward: f64) -> f64 {
    match impact {
        BonusImpact::MultiplyReward { reward_multiplier } => reward * reward_multiplier,
        BonusImpact::ExtraBonus { extra } => reward + extra as f64,
        BonusImpact::Miss => reward,
    }
}

/// Pick one bonus cell and apply it.
///
/// Meant for rewards above zero only. Consumes one draw from `rng` when at
/// least one candidate exists, none otherwise.
pub fn apply_bonus<R: Rng>(
    config: &GameConfig,
    grid: &Grid,
    reward: f64,
    rng: &mut R,
) -> BonusOutcome {
    let candidates = bonus_candidates(grid);
    if candidates.is_empty() {
        return BonusOutcome {
            reward,
            selected_symbol: None,
        };
    }

    let selected = candidates[rng.random_range(0..candidates.len())];
    let reward = match config.symbol(selected).and_then(|s| s.impact()) {
        Some(impact) => apply_impact(impact, reward),
        None => {
            log::warn!("Selected bonus cell {selected} is not a bonus symbol");
            reward
        }
    };

    BonusOutcome {
        reward,
        selected_symbol: Some(selected.to_string()),
    }
}
