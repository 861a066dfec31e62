//! Win combination evaluation
//!
//! Rules are applied in declaration order and rewards compound per symbol:
//! the first rule a symbol matches pays `bet × rule × symbol`, every later
//! match multiplies what that symbol has already accumulated by the rule
//! multiplier alone.

use indexmap::IndexMap;

use crate::config::{CombinationRule, Coordinate, GameConfig, WinCondition};
use crate::grid::Grid;
use crate::symbols::is_single_char_token;

/// Outcome of evaluating one grid, before any bonus
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Symbol → names of the combinations it matched, in match order
    pub applied_combinations: IndexMap<String, Vec<String>>,
    /// Symbol → accumulated reward
    pub symbol_rewards: IndexMap<String, f64>,
    /// Sum of all symbol rewards
    pub total_reward: f64,
}

impl Evaluation {
    /// Check if any combination matched
    pub fn is_win(&self) -> bool {
        self.total_reward > 0.0
    }

    /// Combinations applied to a symbol
    pub fn combinations_for(&self, symbol: &str) -> &[String] {
        self.applied_combinations
            .get(symbol)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Per-evaluation accumulator, finalized into an [`Evaluation`]
struct EvaluationBuilder<'a> {
    config: &'a GameConfig,
    bet: f64,
    rewards: IndexMap<String, f64>,
    combinations: IndexMap<String, Vec<String>>,
}

impl<'a> EvaluationBuilder<'a> {
    fn new(config: &'a GameConfig, bet: f64) -> Self {
        Self {
            config,
            bet,
            rewards: IndexMap::new(),
            combinations: IndexMap::new(),
        }
    }

    fn record(&mut self, symbol: &str, rule: &CombinationRule) {
        let reward = match self.rewards.get(symbol) {
            Some(previous) => previous * rule.reward_multiplier,
            None => {
                let symbol_multiplier = self
                    .config
                    .symbol(symbol)
                    .and_then(|s| s.reward_multiplier())
                    .unwrap_or(1.0);
                self.bet * rule.reward_multiplier * symbol_multiplier
            }
        };

        log::trace!("{} matched {} → {}", symbol, rule.name, reward);
        self.rewards.insert(symbol.to_string(), reward);
        self.combinations
            .entry(symbol.to_string())
            .or_default()
            .push(rule.name.clone());
    }

    fn finish(self) -> Evaluation {
        let total_reward = self.rewards.values().sum();
        Evaluation {
            applied_combinations: self.combinations,
            symbol_rewards: self.rewards,
            total_reward,
        }
    }
}

/// Evaluate every win combination against a grid
pub fn evaluate(config: &GameConfig, grid: &Grid, bet_amount: u64) -> Evaluation {
    let mut builder = EvaluationBuilder::new(config, bet_amount as f64);

    for rule in &config.win_combinations {
        match &rule.condition {
            WinCondition::SameSymbols { count } => {
                for symbol in symbols_occurring(grid, *count) {
                    builder.record(symbol, rule);
                }
            }
            WinCondition::LinearSymbols { covered_areas } => {
                for area in covered_areas {
                    if let Some(symbol) = uniform_symbol(grid, area) {
                        builder.record(symbol, rule);
                    }
                }
            }
        }
    }

    builder.finish()
}

/// Single-character symbols occurring exactly `count` times, in order of first appearance
fn symbols_occurring(grid: &Grid, count: usize) -> Vec<&str> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for token in grid.iter().filter(|t| is_single_char_token(t)) {
        *counts.entry(token).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|&(_, n)| n == count)
        .map(|(symbol, _)| symbol)
        .collect()
}

/// Symbol filling every coordinate of an area, if there is one
fn uniform_symbol<'g>(grid: &'g Grid, area: &[Coordinate]) -> Option<&'g str> {
    let (first, rest) = area.split_first()?;
    let symbol = grid.at(*first)?;
    rest.iter()
        .all(|&coordinate| grid.at(coordinate) == Some(symbol))
        .then_some(symbol)
}
