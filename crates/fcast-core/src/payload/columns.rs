//! Column-oriented table decoding.

use serde_json::{Map, Value};

use super::ordered_values;

/// A column-oriented payload: one object per field, each holding the column's
/// cells either as an array or as a mapping keyed by row index.
///
/// ```text
/// {"metrics_name": {"0": "cpu", "1": "mem"}, "status": ["running", "failed"]}
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ColumnTable<'a> {
    columns: &'a Map<String, Value>,
    len: usize,
}

impl<'a> ColumnTable<'a> {
    /// Detect a column-oriented table.
    ///
    /// `value` must be an object (never an array) in which every `required`
    /// column is present as an array or mapping. The row count is the number
    /// of cells in the first required column.
    pub fn detect(value: &'a Value, required: &[&str]) -> Option<Self> {
        let columns = value.as_object()?;
        let mut len = None;

        for name in required {
            let cells = cell_count(columns.get(*name)?)?;
            len.get_or_insert(cells);
        }

        Some(Self {
            columns,
            len: len.unwrap_or(0),
        })
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The cell at `index` of `column`, if present.
    pub fn cell(&self, column: &str, index: usize) -> Option<&'a Value> {
        match self.columns.get(column)? {
            Value::Array(cells) => cells.get(index),
            Value::Object(cells) => cells
                .get(&index.to_string())
                .or_else(|| ordered_values(cells).get(index).copied()),
            _ => None,
        }
    }

    /// Transpose into row objects, one per index `0..len`.
    ///
    /// Every column of the table contributes its cell to each row; missing
    /// cells are left out of that row.
    pub fn rows(&self) -> Vec<Map<String, Value>> {
        (0..self.len)
            .map(|index| {
                self.columns
                    .keys()
                    .filter_map(|column| {
                        self.cell(column, index)
                            .map(|cell| (column.clone(), cell.clone()))
                    })
                    .collect()
            })
            .collect()
    }
}

fn cell_count(column: &Value) -> Option<usize> {
    match column {
        Value::Array(cells) => Some(cells.len()),
        Value::Object(cells) => Some(cells.len()),
        _ => None,
    }
}

/// Cells of a column that may be an array or an index-keyed mapping, in row order.
pub fn column_values(column: &Value) -> Vec<&Value> {
    match column {
        Value::Array(cells) => cells.iter().collect(),
        Value::Object(cells) => ordered_values(cells),
        _ => Vec::new(),
    }
}
