//! Host boundary: turning worksheet cells into samples.
//!
//! The host reads a rectangle of cells and hands it over row by row.
//! These helpers pick columns out of it, drop anything that is not a
//! number, and dispatch to the right calculator for the selection shape.

use crate::bivariate::{compare, BivariateStats};
use crate::stats::{describe, DescriptiveStats};

/// One worksheet cell as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Number(f64),
    Text(String),
    Boolean(bool),
    Empty,
}

impl Cell {
    /// The numeric value of the cell, if it holds one.
    ///
    /// Text counts when it parses as a finite number after trimming.
    /// Booleans, blanks and whitespace-only text do not count; a loose
    /// `isNaN`-style check would read them as 1/0, and 0 respectively.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            Cell::Text(s) => {
                let t = s.trim();
                if t.is_empty() {
                    return None;
                }
                t.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            Cell::Number(_) | Cell::Boolean(_) | Cell::Empty => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

/// Keeps the numeric cells of a column, in order.
///
/// # Examples
/// ```
/// use datagen_stats::cells::{clean_column, Cell};
/// let col = [Cell::Number(1.5), Cell::Empty, Cell::from("x"), Cell::from(" 2 ")];
/// assert_eq!(clean_column(&col), vec![1.5, 2.0]);
/// ```
pub fn clean_column(cells: &[Cell]) -> Vec<f64> {
    cells.iter().filter_map(Cell::as_number).collect()
}

/// Cleaned values of column `index` across `rows`. Short rows count as
/// blank in that column.
pub fn column(rows: &[Vec<Cell>], index: usize) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| row.get(index).and_then(Cell::as_number))
        .collect()
}

/// Width of a selection: the longest row.
pub fn column_count(rows: &[Vec<Cell>]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}

/// Describes every column of `rows` independently.
pub fn describe_columns(rows: &[Vec<Cell>]) -> Vec<DescriptiveStats> {
    (0..column_count(rows))
        .map(|c| describe(&column(rows, c)))
        .collect()
}

/// Display label for column `index`: the header cell's text or number,
/// else `Variable N` (1-based).
pub fn column_label(header: Option<&[Cell]>, index: usize) -> String {
    match header.and_then(|h| h.get(index)) {
        Some(Cell::Text(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Cell::Number(v)) if v.is_finite() && *v != 0.0 => v.to_string(),
        _ => format!("Variable {}", index + 1),
    }
}

/// Describes every column of `rows`, labelled from an optional header
/// row. The panel width is the wider of the header and the data.
///
/// # Examples
/// ```
/// use datagen_stats::cells::{describe_labelled_columns, Cell};
/// let header = [Cell::from("Height")];
/// let rows = vec![
///     vec![Cell::Number(170.0), Cell::Number(60.0)],
///     vec![Cell::Number(180.0), Cell::Number(80.0)],
/// ];
/// let panel = describe_labelled_columns(Some(&header[..]), &rows);
/// assert_eq!(panel[0].0, "Height");
/// assert_eq!(panel[1].0, "Variable 2");
/// assert_eq!(panel[1].1.n, 2);
/// ```
pub fn describe_labelled_columns(
    header: Option<&[Cell]>,
    rows: &[Vec<Cell>],
) -> Vec<(String, DescriptiveStats)> {
    let width = column_count(rows).max(header.map_or(0, <[Cell]>::len));
    (0..width)
        .map(|c| (column_label(header, c), describe(&column(rows, c))))
        .collect()
}

/// What a selection supports, decided by its width.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Analysis {
    /// A single column: descriptive statistics.
    OneVariable(DescriptiveStats),
    /// Two columns: bivariate statistics, or `None` when either cleaned
    /// column is empty. `paired` is true when both cleaned columns have
    /// the same length.
    TwoVariable {
        stats: Option<BivariateStats>,
        paired: bool,
    },
    /// Any other width (including an empty selection).
    Unsupported(usize),
}

/// Dispatches a selection to the matching calculator.
///
/// # Examples
/// ```
/// use datagen_stats::cells::{analyze_selection, Analysis, Cell};
/// let rows = vec![
///     vec![Cell::Number(1.0), Cell::Number(2.0)],
///     vec![Cell::Number(2.0), Cell::Number(4.0)],
///     vec![Cell::Number(3.0), Cell::Number(6.0)],
/// ];
/// match analyze_selection(&rows) {
///     Analysis::TwoVariable { stats: Some(b), paired } => {
///         assert!(paired);
///         assert_eq!(b.slope.value(), Some(2.0));
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn analyze_selection(rows: &[Vec<Cell>]) -> Analysis {
    match column_count(rows) {
        1 => Analysis::OneVariable(describe(&column(rows, 0))),
        2 => {
            let x = column(rows, 0);
            let y = column(rows, 1);
            let paired = x.len() == y.len();
            let stats = (!x.is_empty() && !y.is_empty()).then(|| compare(&x, &y));
            Analysis::TwoVariable { stats, paired }
        }
        cols => Analysis::Unsupported(cols),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Mode, Stat};

    fn num(v: f64) -> Cell {
        Cell::Number(v)
    }

    #[test]
    fn test_as_number() {
        assert_eq!(num(2.5).as_number(), Some(2.5));
        assert_eq!(num(f64::NAN).as_number(), None);
        assert_eq!(Cell::from("  -3.5 ").as_number(), Some(-3.5));
        assert_eq!(Cell::from("1e3").as_number(), Some(1000.0));
        assert_eq!(Cell::from("abc").as_number(), None);
        assert_eq!(Cell::from("   ").as_number(), None);
        assert_eq!(Cell::from("inf").as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }

    #[test]
    fn test_booleans_and_blank_text_are_not_numbers() {
        assert_eq!(Cell::Boolean(true).as_number(), None);
        assert_eq!(Cell::Boolean(false).as_number(), None);
        assert_eq!(Cell::Text(" \t ".into()).as_number(), None);
        let col = vec![Cell::Boolean(true), Cell::Text("  ".into()), num(4.0)];
        assert_eq!(clean_column(&col), vec![4.0]);
    }

    #[test]
    fn test_empty_str_is_empty_cell() {
        assert_eq!(Cell::from(""), Cell::Empty);
    }

    #[test]
    fn test_clean_column_preserves_order() {
        let col = vec![num(3.0), Cell::Empty, num(1.0), Cell::from("n/a"), num(2.0)];
        assert_eq!(clean_column(&col), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_column_with_ragged_rows() {
        let rows = vec![vec![num(1.0), num(10.0)], vec![num(2.0)], vec![num(3.0), num(30.0)]];
        assert_eq!(column(&rows, 0), vec![1.0, 2.0, 3.0]);
        assert_eq!(column(&rows, 1), vec![10.0, 30.0]);
        assert_eq!(column_count(&rows), 2);
    }

    #[test]
    fn test_describe_columns() {
        let rows = vec![
            vec![num(1.0), num(5.0), Cell::Empty],
            vec![num(1.0), num(6.0), Cell::Empty],
            vec![num(4.0), Cell::from("x"), Cell::Empty],
        ];
        let all = describe_columns(&rows);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].n, 3);
        assert_eq!(all[0].mean, Stat::Value(2.0));
        assert_eq!(all[0].mode, Mode::Values(vec![1.0]));
        assert_eq!(all[1].n, 2);
        assert_eq!(all[1].median, Stat::Value(5.5));
        assert_eq!(all[2], DescriptiveStats::empty());
    }

    #[test]
    fn test_column_label_fallbacks() {
        let header = [
            Cell::from(" Score "),
            Cell::Empty,
            Cell::Number(2024.0),
            Cell::Number(0.0),
            Cell::Boolean(true),
        ];
        assert_eq!(column_label(Some(&header[..]), 0), "Score");
        assert_eq!(column_label(Some(&header[..]), 1), "Variable 2");
        assert_eq!(column_label(Some(&header[..]), 2), "2024");
        assert_eq!(column_label(Some(&header[..]), 3), "Variable 4");
        assert_eq!(column_label(Some(&header[..]), 4), "Variable 5");
        assert_eq!(column_label(Some(&header[..]), 9), "Variable 10");
        assert_eq!(column_label(None, 0), "Variable 1");
    }

    #[test]
    fn test_describe_labelled_columns_uses_header_width() {
        let header = vec![Cell::from("A"), Cell::from("B"), Cell::from("C")];
        let rows = vec![vec![num(1.0)], vec![num(3.0)]];
        let panel = describe_labelled_columns(Some(&header[..]), &rows);
        assert_eq!(panel.len(), 3);
        assert_eq!(panel[0].0, "A");
        assert_eq!(panel[0].1.mean, Stat::Value(2.0));
        assert_eq!(panel[2], ("C".to_string(), DescriptiveStats::empty()));
    }

    #[test]
    fn test_describe_labelled_columns_without_header() {
        let rows = vec![vec![num(1.0), num(2.0)]];
        let labels: Vec<String> = describe_labelled_columns(None, &rows)
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, vec!["Variable 1", "Variable 2"]);
    }

    #[test]
    fn test_analyze_one_column() {
        let rows = vec![vec![num(1.0)], vec![Cell::Empty], vec![num(3.0)]];
        match analyze_selection(&rows) {
            Analysis::OneVariable(s) => {
                assert_eq!(s.n, 2);
                assert_eq!(s.mean, Stat::Value(2.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_analyze_two_columns_unequal() {
        let rows = vec![
            vec![num(1.0), num(4.0)],
            vec![num(2.0), Cell::Empty],
            vec![num(3.0), num(6.0)],
        ];
        match analyze_selection(&rows) {
            Analysis::TwoVariable {
                stats: Some(b),
                paired,
            } => {
                assert!(!paired);
                assert_eq!(b.n, 2);
                assert_eq!(b.t_paired, Stat::NotApplicable);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_analyze_two_columns_one_empty() {
        let rows = vec![vec![num(1.0), Cell::Empty], vec![num(2.0), Cell::from("x")]];
        assert_eq!(
            analyze_selection(&rows),
            Analysis::TwoVariable {
                stats: None,
                paired: false
            }
        );
    }

    #[test]
    fn test_analyze_unsupported_widths() {
        assert_eq!(analyze_selection(&[]), Analysis::Unsupported(0));
        let rows = vec![vec![num(1.0), num(2.0), num(3.0)]];
        assert_eq!(analyze_selection(&rows), Analysis::Unsupported(3));
    }
}
