//! Game configuration model
//!
//! The types here are only ever built from a validated document (see
//! [`crate::parser`]) and are read-only afterwards. Evaluation code relies
//! on the invariants checked at load time and never re-validates.

use std::fmt;

use indexmap::IndexMap;

use crate::symbols::SymbolDefinition;

/// Symbol → weight table. Declaration order is kept so seeded draws are stable.
pub type WeightTable = IndexMap<String, u32>;

/// A grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub column: usize,
}

impl Coordinate {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Parse the `"row:column"` form used by `covered_areas`
    pub fn parse(text: &str) -> Option<Self> {
        let (row, column) = text.split_once(':')?;
        Some(Self {
            row: row.trim().parse().ok()?,
            column: column.trim().parse().ok()?,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Weighted draw table for one grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityCell {
    pub row: usize,
    pub column: usize,
    pub symbols: WeightTable,
}

/// When a win combination matches
#[derive(Debug, Clone, PartialEq)]
pub enum WinCondition {
    /// A single-character symbol occurs exactly `count` times anywhere on the grid
    SameSymbols { count: usize },
    /// Every coordinate of a covered area holds the same symbol
    LinearSymbols { covered_areas: Vec<Vec<Coordinate>> },
}

impl WinCondition {
    /// Config keyword for this condition
    pub fn keyword(&self) -> &'static str {
        match self {
            WinCondition::SameSymbols { .. } => "same_symbols",
            WinCondition::LinearSymbols { .. } => "linear_symbols",
        }
    }
}

/// A named win combination
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationRule {
    pub name: String,
    pub reward_multiplier: f64,
    pub condition: WinCondition,
}

/// How a grid cell finds its probability table.
///
/// Every strategy falls back to the first table entry when it finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellLookup {
    /// Entry whose `row`/`column` fields equal the cell position
    #[default]
    Coordinates,
    /// Entry at index `row * columns + column`
    RowMajor,
    /// Entry at index `row * column`. Every cell in row 0 or column 0 shares
    /// the first entry.
    Product,
}

impl CellLookup {
    pub fn name(&self) -> &'static str {
        match self {
            CellLookup::Coordinates => "coordinates",
            CellLookup::RowMajor => "row-major",
            CellLookup::Product => "product",
        }
    }
}

/// Validated game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub columns: usize,
    /// Symbol definitions keyed by identifier
    pub symbols: IndexMap<String, SymbolDefinition>,
    /// Per-cell standard symbol weights, in declaration order
    pub standard_probabilities: Vec<ProbabilityCell>,
    /// Bonus symbol weights shared by every cell
    pub bonus_probabilities: WeightTable,
    /// Win combinations in declaration order
    pub win_combinations: Vec<CombinationRule>,
}

impl GameConfig {
    /// Look up a symbol definition
    pub fn symbol(&self, id: &str) -> Option<&SymbolDefinition> {
        self.symbols.get(id)
    }

    /// Total grid positions
    pub fn total_cells(&self) -> usize {
        self.rows * self.columns
    }

    /// Probability table for a cell. `None` only when no table is configured.
    pub fn probability_cell(
        &self,
        row: usize,
        column: usize,
        lookup: CellLookup,
    ) -> Option<&ProbabilityCell> {
        let found = match lookup {
            CellLookup::Coordinates => self
                .standard_probabilities
                .iter()
                .find(|cell| cell.row == row && cell.column == column),
            CellLookup::RowMajor => self.standard_probabilities.get(row * self.columns + column),
            CellLookup::Product => self.standard_probabilities.get(row * column),
        };

        found.or_else(|| {
            log::debug!(
                "No probability entry for {}:{} ({}), using first entry",
                row,
                column,
                lookup.name()
            );
            self.standard_probabilities.first()
        })
    }
}
