//! Raw document validation
//!
//! Walks the whole document and records every violation instead of failing
//! on the first one. Messages name the offending key, index or coordinate.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use super::{ConfigLimits, RawCombination, RawDocument, RawProbabilities, RawSymbol};
use crate::config::{
    CombinationRule, Coordinate, GameConfig, ProbabilityCell, WeightTable, WinCondition,
};
use crate::symbols::{BonusImpact, SymbolDefinition};

const SAME_SYMBOLS: &str = "same_symbols";
const LINEAR_SYMBOLS: &str = "linear_symbols";

/// Validate a raw document, building the typed config when it is clean
pub(super) fn validate(doc: &RawDocument, limits: &ConfigLimits) -> Result<GameConfig, Vec<String>> {
    let mut v = Validator::default();

    let rows = v.dimension("rows", doc.rows.as_ref(), limits.max_rows);
    let columns = v.dimension("columns", doc.columns.as_ref(), limits.max_columns);
    let bounds = Bounds { rows, columns };

    let symbols = v.symbols(doc.symbols.as_ref());
    let (standard_probabilities, bonus_probabilities) =
        v.probabilities(doc.probabilities.as_ref(), doc.symbols.as_ref(), &symbols, bounds);
    let win_combinations = v.win_combinations(doc.win_combinations.as_ref(), bounds);

    match (rows, columns) {
        (Some(rows), Some(columns)) if v.errors.is_empty() => Ok(GameConfig {
            rows,
            columns,
            symbols,
            standard_probabilities,
            bonus_probabilities,
            win_combinations,
        }),
        _ => Err(v.errors),
    }
}

/// Grid dimensions that passed validation, used for range checks
#[derive(Clone, Copy)]
struct Bounds {
    rows: Option<usize>,
    columns: Option<usize>,
}

#[derive(Default)]
struct Validator {
    errors: Vec<String>,
}

impl Validator {
    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn integer(&mut self, label: &str, value: &Value) -> Option<i64> {
        let integer = value.as_i64();
        if integer.is_none() {
            self.error(format!("{label} must be an integer"));
        }
        integer
    }

    fn number(&mut self, label: &str, value: &Value) -> Option<f64> {
        let number = value.as_f64();
        if number.is_none() {
            self.error(format!("{label} must be a number"));
        }
        number
    }

    fn text<'v>(&mut self, label: &str, value: &'v Value) -> Option<&'v str> {
        let text = value.as_str();
        if text.is_none() {
            self.error(format!("{label} must be a string"));
        }
        text
    }

    fn dimension(&mut self, key: &str, value: Option<&Value>, max: Option<usize>) -> Option<usize> {
        let Some(value) = value else {
            self.error(format!("Missing key: {key}"));
            return None;
        };
        let value = self.integer(key, value)?;
        if value <= 0 {
            self.error(format!("{key} must be positive"));
            return None;
        }
        let value = value as usize;
        if let Some(max) = max.filter(|&max| value > max) {
            self.error(format!("{key} exceeds limit of {max}"));
            return None;
        }
        Some(value)
    }

    fn symbols(
        &mut self,
        raw: Option<&IndexMap<String, RawSymbol>>,
    ) -> IndexMap<String, SymbolDefinition> {
        let mut symbols = IndexMap::new();
        let Some(raw) = raw else {
            self.error("Missing key: symbols");
            return symbols;
        };
        if raw.is_empty() {
            self.error("symbols cannot be empty");
        }

        for (id, symbol) in raw {
            if id.is_empty() {
                self.error("Symbol identifiers cannot be empty");
                continue;
            }
            if let Some(definition) = self.symbol(id, symbol) {
                symbols.insert(id.clone(), definition);
            }
        }
        symbols
    }

    fn symbol(&mut self, id: &str, raw: &RawSymbol) -> Option<SymbolDefinition> {
        let owner = format!("Symbol {id}");
        let Some(kind) = raw.kind.as_ref() else {
            self.error(format!("{owner} is missing the 'type' field"));
            return None;
        };

        match self.text(&format!("{owner} type"), kind)? {
            "standard" => {
                let multiplier = self.positive_multiplier(&owner, raw.reward_multiplier.as_ref())?;
                Some(SymbolDefinition::standard(id, multiplier))
            }
            "bonus" => {
                let Some(impact) = raw.impact.as_ref() else {
                    self.error(format!("{owner} is missing the 'impact' field"));
                    return None;
                };
                let impact = match self.text(&format!("{owner} impact"), impact)? {
                    "multiply_reward" => BonusImpact::MultiplyReward {
                        reward_multiplier: self
                            .positive_multiplier(&owner, raw.reward_multiplier.as_ref())?,
                    },
                    "extra_bonus" => {
                        let Some(extra) = raw.extra.as_ref() else {
                            self.error(format!("{owner} is missing the 'extra' field"));
                            return None;
                        };
                        let extra = self.integer(&format!("{owner} extra"), extra)?;
                        if extra < 0 {
                            self.error(format!("{owner} extra cannot be negative"));
                            return None;
                        }
                        BonusImpact::ExtraBonus { extra }
                    }
                    "miss" => BonusImpact::Miss,
                    other => {
                        self.error(format!("Invalid bonus impact: {other} for symbol {id}"));
                        return None;
                    }
                };
                Some(SymbolDefinition::bonus(id, impact))
            }
            other => {
                self.error(format!("Invalid symbol type: {other} for symbol {id}"));
                None
            }
        }
    }

    fn positive_multiplier(&mut self, owner: &str, value: Option<&Value>) -> Option<f64> {
        let Some(value) = value else {
            self.error(format!("{owner} is missing the 'reward_multiplier' field"));
            return None;
        };
        match self.number(&format!("{owner} reward_multiplier"), value)? {
            m if !m.is_finite() || m <= 0.0 => {
                self.error(format!("{owner} reward_multiplier must be positive"));
                None
            }
            m => Some(m),
        }
    }

    fn probabilities(
        &mut self,
        raw: Option<&RawProbabilities>,
        declared: Option<&IndexMap<String, RawSymbol>>,
        symbols: &IndexMap<String, SymbolDefinition>,
        bounds: Bounds,
    ) -> (Vec<ProbabilityCell>, WeightTable) {
        let Some(raw) = raw else {
            self.error("Missing key: probabilities");
            return (Vec::new(), WeightTable::new());
        };

        let mut cells = Vec::new();
        let mut seen = HashSet::new();
        match raw.standard_symbols.as_deref() {
            None | Some([]) => self.error("probabilities.standard_symbols cannot be empty"),
            Some(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    let owner = format!("Probability at index {index}");
                    let row = self.cell_index(&owner, "row", entry.row.as_ref(), bounds.rows);
                    let column =
                        self.cell_index(&owner, "column", entry.column.as_ref(), bounds.columns);
                    let weights = match entry.symbols.as_ref() {
                        None => {
                            self.error(format!("{owner} is missing the 'symbols' field"));
                            None
                        }
                        Some(table) => self.weights(&owner, table, declared),
                    };

                    if let (Some(row), Some(column), Some(symbols)) = (row, column, weights) {
                        if !seen.insert((row, column)) {
                            log::warn!(
                                "Duplicate probabilities for cell {row}:{column} at index {index}; \
                                 the first entry wins for coordinate lookup"
                            );
                        }
                        cells.push(ProbabilityCell {
                            row,
                            column,
                            symbols,
                        });
                    }
                }
            }
        }

        let mut bonus = WeightTable::new();
        match raw.bonus_symbols.as_ref().and_then(|b| b.symbols.as_ref()) {
            None => log::debug!("No bonus symbol probabilities configured"),
            Some(table) => {
                let owner = "probabilities.bonus_symbols";
                for id in table.keys() {
                    if symbols.get(id).is_some_and(|s| !s.is_bonus()) {
                        self.error(format!("{owner} symbol {id} is not a bonus symbol"));
                    }
                }
                if let Some(weights) = self.weights(owner, table, declared) {
                    bonus = weights;
                }
            }
        }

        (cells, bonus)
    }

    fn cell_index(
        &mut self,
        owner: &str,
        key: &str,
        value: Option<&Value>,
        limit: Option<usize>,
    ) -> Option<usize> {
        let Some(value) = value else {
            self.error(format!("{owner} is missing the '{key}' field"));
            return None;
        };
        let value = self.integer(&format!("{owner} {key}"), value)?;
        if value < 0 {
            self.error(format!("{owner} {key} cannot be negative"));
            return None;
        }
        let value = value as usize;
        if limit.is_some_and(|limit| value >= limit) {
            self.error(format!("{owner} {key} {value} is out of bounds"));
            return None;
        }
        Some(value)
    }

    fn weights(
        &mut self,
        owner: &str,
        table: &IndexMap<String, Value>,
        declared: Option<&IndexMap<String, RawSymbol>>,
    ) -> Option<WeightTable> {
        if table.is_empty() {
            self.error(format!("{owner} symbols cannot be empty"));
            return None;
        }

        let before = self.errors.len();
        let mut weights = WeightTable::new();
        for (id, weight) in table {
            if declared.is_some_and(|d| !d.contains_key(id)) {
                self.error(format!("Symbol {id} in {owner} not found in symbols list"));
            }
            match weight.as_i64().and_then(|w| u32::try_from(w).ok()) {
                Some(w) if w > 0 => {
                    weights.insert(id.clone(), w);
                }
                _ => self.error(format!("Symbol {id} weight in {owner} must be a positive integer")),
            }
        }
        (self.errors.len() == before).then_some(weights)
    }

    fn win_combinations(
        &mut self,
        raw: Option<&IndexMap<String, RawCombination>>,
        bounds: Bounds,
    ) -> Vec<CombinationRule> {
        let Some(raw) = raw else {
            self.error("Missing key: win_combinations");
            return Vec::new();
        };
        if raw.is_empty() {
            self.error("win_combinations cannot be empty");
        }

        raw.iter()
            .filter_map(|(name, combination)| self.combination(name, combination, bounds))
            .collect()
    }

    fn combination(
        &mut self,
        name: &str,
        raw: &RawCombination,
        bounds: Bounds,
    ) -> Option<CombinationRule> {
        let owner = format!("Combination {name}");
        let reward_multiplier = self.positive_multiplier(&owner, raw.reward_multiplier.as_ref());

        let when = match raw.when.as_ref() {
            None => {
                self.error(format!("{owner} is missing the 'when' field"));
                None
            }
            Some(when) => self.text(&format!("{owner} when"), when),
        };
        let condition = match when {
            None => None,
            Some(SAME_SYMBOLS) => self.count(&owner, raw.count.as_ref()),
            Some(LINEAR_SYMBOLS) => self.covered_areas(&owner, raw.covered_areas.as_deref(), bounds),
            Some(other) => {
                self.error(format!("Invalid 'when' value: {other} for combination {name}"));
                None
            }
        };

        Some(CombinationRule {
            name: name.to_string(),
            reward_multiplier: reward_multiplier?,
            condition: condition?,
        })
    }

    fn count(&mut self, owner: &str, raw: Option<&Value>) -> Option<WinCondition> {
        let Some(count) = raw else {
            self.error(format!("{owner} is missing the 'count' field"));
            return None;
        };
        let count = self.integer(&format!("{owner} count"), count)?;
        if count <= 0 {
            self.error(format!("{owner} count must be positive"));
            return None;
        }
        Some(WinCondition::SameSymbols {
            count: count as usize,
        })
    }

    fn covered_areas(
        &mut self,
        owner: &str,
        raw: Option<&[Vec<Value>]>,
        bounds: Bounds,
    ) -> Option<WinCondition> {
        let areas = match raw {
            None => {
                self.error(format!("{owner} is missing the 'covered_areas' field"));
                return None;
            }
            Some([]) => {
                self.error(format!("{owner} covered_areas cannot be empty"));
                return None;
            }
            Some(areas) => areas,
        };

        let before = self.errors.len();
        let mut covered_areas = Vec::with_capacity(areas.len());
        for (index, area) in areas.iter().enumerate() {
            if area.is_empty() {
                self.error(format!("{owner} covered area {index} cannot be empty"));
                continue;
            }
            let mut coordinates = Vec::with_capacity(area.len());
            for position in area {
                let Some(coordinate) = position.as_str().and_then(Coordinate::parse) else {
                    let shown = position.as_str().map_or_else(|| position.to_string(), str::to_string);
                    self.error(format!(
                        "{owner} position '{shown}' must be in the format 'row:column'"
                    ));
                    continue;
                };
                if bounds.rows.is_some_and(|rows| coordinate.row >= rows)
                    || bounds.columns.is_some_and(|columns| coordinate.column >= columns)
                {
                    self.error(format!("{owner} position {coordinate} is out of bounds"));
                    continue;
                }
                coordinates.push(coordinate);
            }
            covered_areas.push(coordinates);
        }

        (self.errors.len() == before).then_some(WinCondition::LinearSymbols { covered_areas })
    }
}
