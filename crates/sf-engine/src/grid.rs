//! Symbol grid

use serde::{Deserialize, Serialize};

use crate::config::Coordinate;

/// Rows × columns matrix of symbol identifiers.
///
/// Dimensions are fixed at construction. Serializes as a plain array of
/// rows; deserializing rejects ragged rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct Grid {
    cells: Vec<Vec<String>>,
}

impl Grid {
    /// Build from rows. Returns `None` for ragged input.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Option<Self>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let width = cells.first().map_or(0, Vec::len);
        if cells.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self { cells })
    }

    pub(crate) fn from_cells(cells: Vec<Vec<String>>) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Symbol at a position
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.cells.get(row)?.get(column).map(String::as_str)
    }

    /// Symbol at a coordinate
    pub fn at(&self, coordinate: Coordinate) -> Option<&str> {
        self.get(coordinate.row, coordinate.column)
    }

    /// All tokens in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().flatten().map(String::as_str)
    }

    pub fn as_rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Render as aligned text, one grid row per line
    pub fn render(&self) -> String {
        let width = self.iter().map(|t| t.chars().count()).max().unwrap_or(0).max(6);
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|token| format!("{token:<width$}"))
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TryFrom<Vec<Vec<String>>> for Grid {
    type Error = &'static str;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows).ok_or("grid rows must all have the same length")
    }
}

impl From<Grid> for Vec<Vec<String>> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Grid::from_rows([vec!["A", "B"], vec!["C"]]).is_none());
        let grid = Grid::from_rows([["A", "B"], ["C", "10x"]]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.get(1, 1), Some("10x"));
        assert_eq!(grid.at(Coordinate::new(0, 1)), Some("B"));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = Grid::from_rows([["A", "B"], ["C", "D"]]).unwrap();
        assert_eq!(grid.iter().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_serializes_as_nested_array() {
        let grid = Grid::from_rows([["A", "+500"]]).unwrap();
        assert_eq!(serde_json::to_string(&grid).unwrap(), r#"[["A","+500"]]"#);
    }

    #[test]
    fn test_deserialize_rejects_ragged_rows() {
        let grid: Grid = serde_json::from_str(r#"[["A","B"],["C","10x"]]"#).unwrap();
        assert_eq!(grid, Grid::from_rows([["A", "B"], ["C", "10x"]]).unwrap());

        let err = serde_json::from_str::<Grid>(r#"[["A","B"],["C"]]"#).unwrap_err();
        assert!(err.to_string().contains("same length"), "{err}");
    }

    #[test]
    fn test_render() {
        let grid = Grid::from_rows([["A", "10x"], ["MISS", "B"]]).unwrap();
        assert_eq!(grid.render(), "A      10x\nMISS   B");
    }
}
