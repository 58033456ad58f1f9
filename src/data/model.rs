use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of an external data table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Type a raw text cell: empty → null, then integer, float, bool
    /// (lower, title or upper case literals), string.
    pub fn guess(s: &str) -> CellValue {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        match s {
            "true" | "True" | "TRUE" => CellValue::Bool(true),
            "false" | "False" | "FALSE" => CellValue::Bool(false),
            _ => CellValue::String(s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – named columns over rows, in file order
// ---------------------------------------------------------------------------

/// A loaded table: ordered column names and rows of equal width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with nulls, long rows truncated.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Remove a column and return its values, or `None` if it is absent.
    pub fn remove_column(&mut self, name: &str) -> Option<Vec<CellValue>> {
        let idx = self.column_index(name)?;
        self.columns.remove(idx);
        Some(self.rows.iter_mut().map(|row| row.remove(idx)).collect())
    }

    pub fn rename_columns(&mut self, mut f: impl FnMut(&str) -> String) {
        for col in &mut self.columns {
            *col = f(col);
        }
    }

    /// Iterate rows as `(column name, value)` pairs.
    pub fn rows(
        &self,
    ) -> impl Iterator<Item = impl Iterator<Item = (&str, &CellValue)> + '_> + '_ {
        self.rows
            .iter()
            .map(|row| self.columns.iter().map(String::as_str).zip(row.iter()))
    }
}
