//! Play result and output formatting

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// Outcome of one played round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    /// Generated grid
    pub matrix: Grid,
    /// Bonus symbol applied to the reward (`null` when none)
    pub applied_bonus_symbol: Option<String>,
    /// Symbol → combination names, in match order
    pub applied_winning_combinations: IndexMap<String, Vec<String>>,
    /// Final reward after the bonus
    pub reward: f64,
}

impl PlayResult {
    /// Check if this is a winning round
    pub fn is_win(&self) -> bool {
        self.reward > 0.0
    }

    /// Pretty-printed JSON document
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Single-line JSON document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_shape() {
        let result = PlayResult {
            matrix: Grid::from_rows([["B", "10x"], ["B", "B"]]).unwrap(),
            applied_bonus_symbol: Some("10x".into()),
            applied_winning_combinations: IndexMap::from([(
                "B".to_string(),
                vec!["same_symbol_3_times".to_string()],
            )]),
            reward: 3000.0,
        };

        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "matrix": [["B", "10x"], ["B", "B"]],
                "applied_bonus_symbol": "10x",
                "applied_winning_combinations": { "B": ["same_symbol_3_times"] },
                "reward": 3000.0
            })
        );
    }

    #[test]
    fn test_missing_bonus_serializes_as_null() {
        let result = PlayResult {
            matrix: Grid::from_rows([["A"]]).unwrap(),
            applied_bonus_symbol: None,
            applied_winning_combinations: IndexMap::new(),
            reward: 0.0,
        };
        let text = result.to_json_pretty().unwrap();
        assert!(text.contains(r#""applied_bonus_symbol": null"#));
        assert!(!result.is_win());

        let back: PlayResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_ragged_matrix_is_rejected() {
        let text = json!({
            "matrix": [["A", "B"], ["A"]],
            "applied_bonus_symbol": null,
            "applied_winning_combinations": {},
            "reward": 0.0
        })
        .to_string();
        assert!(serde_json::from_str::<PlayResult>(&text).is_err());
    }
}
