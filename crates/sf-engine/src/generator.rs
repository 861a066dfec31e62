//! Grid generation from weighted per-cell probabilities

use rand::Rng;

use crate::config::{CellLookup, GameConfig, WeightTable};
use crate::error::PlayError;
use crate::grid::Grid;

/// Cumulative weight table for a single draw.
///
/// Equivalent to drawing uniformly from a pool where each symbol appears
/// `weight` times, without materializing the pool.
#[derive(Debug, Clone)]
pub struct WeightedPool<'a> {
    symbols: Vec<&'a str>,
    cumulative: Vec<u64>,
}

impl<'a> WeightedPool<'a> {
    /// Merge a cell table with the shared bonus table.
    ///
    /// Bonus weights are applied second, so a symbol present in both keeps
    /// the bonus weight (and its position from the cell table).
    pub fn merged(cell: &'a WeightTable, bonus: &'a WeightTable) -> Self {
        let mut merged: indexmap::IndexMap<&'a str, u32> = indexmap::IndexMap::new();
        for (symbol, &weight) in cell.iter().chain(bonus.iter()) {
            merged.insert(symbol.as_str(), weight);
        }

        let mut total = 0u64;
        let mut symbols = Vec::with_capacity(merged.len());
        let mut cumulative = Vec::with_capacity(merged.len());
        for (symbol, weight) in merged {
            if weight == 0 {
                continue;
            }
            total += u64::from(weight);
            symbols.push(symbol);
            cumulative.push(total);
        }

        Self {
            symbols,
            cumulative,
        }
    }

    /// Sum of all weights (pool size)
    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Symbol owning a pool slot, `ticket` in `0..total()`
    pub fn symbol_at(&self, ticket: u64) -> Option<&'a str> {
        let index = self.cumulative.partition_point(|&bound| bound <= ticket);
        self.symbols.get(index).copied()
    }

    /// Draw one symbol, consuming exactly one value from `rng`
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<&'a str> {
        if self.is_empty() {
            return None;
        }
        self.symbol_at(rng.random_range(0..self.total()))
    }
}

/// Builds grids cell by cell in row-major order
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixGenerator {
    lookup: CellLookup,
}

impl MatrixGenerator {
    pub fn new(lookup: CellLookup) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> CellLookup {
        self.lookup
    }

    /// Generate a `rows × columns` grid, one random draw per cell
    pub fn generate<R: Rng>(&self, config: &GameConfig, rng: &mut R) -> Result<Grid, PlayError> {
        let mut cells = Vec::with_capacity(config.rows);

        for row in 0..config.rows {
            let mut line = Vec::with_capacity(config.columns);
            for column in 0..config.columns {
                let cell = config
                    .probability_cell(row, column, self.lookup)
                    .ok_or(PlayError::NoProbabilityCells)?;

                let pool = WeightedPool::merged(&cell.symbols, &config.bonus_probabilities);
                let symbol = pool
                    .draw(rng)
                    .ok_or(PlayError::EmptyWeightPool { row, column })?;
                line.push(symbol.to_string());
            }
            cells.push(line);
        }

        Ok(Grid::from_cells(cells))
    }
}

/// Generate a grid with the default coordinate lookup
pub fn generate<R: Rng>(config: &GameConfig, rng: &mut R) -> Result<Grid, PlayError> {
    MatrixGenerator::default().generate(config, rng)
}
