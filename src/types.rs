/// Типы данных для конвейера предобработки

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// Значения одной колонки. `None` - маркер пропуска.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Float(Vec<Option<f64>>),
    /// Целые значения без пропусков (после импутации)
    Int(Vec<i64>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Float(values) => values.len(),
            ColumnData::Int(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn missing_count(&self) -> usize {
        match self {
            ColumnData::Float(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Int(_) => 0,
            ColumnData::Text(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnData::Float(_) => "float",
            ColumnData::Int(_) => "int",
            ColumnData::Text(_) => "text",
        }
    }

    /// Текстовое представление ячейки для записи в CSV (пропуск -> пустая строка)
    pub fn cell_to_string(&self, row: usize) -> String {
        match self {
            ColumnData::Float(values) => values
                .get(row)
                .copied()
                .flatten()
                .map(format_float)
                .unwrap_or_default(),
            ColumnData::Int(values) => values.get(row).map(|v| v.to_string()).unwrap_or_default(),
            ColumnData::Text(values) => values.get(row).cloned().flatten().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Размер таблицы: (строки, колонки)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.columns)
    }
}

/// Упорядоченный набор именованных колонок одинаковой длины
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.data.len()).unwrap_or(0)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.n_rows(),
            columns: self.n_columns(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| PrepError::MissingColumn(name.to_string()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Переименование колонки. Возвращает `false`, если колонки `from` нет.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<bool> {
        let Some(idx) = self.position(from) else {
            return Ok(false);
        };

        if from != to && self.has_column(to) {
            return Err(PrepError::Computation(format!(
                "cannot rename `{}`: column `{}` already exists",
                from, to
            )));
        }

        self.columns[idx].name = to.to_string();
        Ok(true)
    }

    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.has_column(&column.name) {
            return Err(PrepError::Computation(format!(
                "column `{}` already exists",
                column.name
            )));
        }
        if !self.columns.is_empty() && column.data.len() != self.n_rows() {
            return Err(PrepError::Computation(format!(
                "column `{}` has {} rows, table has {}",
                column.name,
                column.data.len(),
                self.n_rows()
            )));
        }

        self.columns.push(column);
        Ok(())
    }

    /// Замена данных колонки на месте (позиция колонки сохраняется)
    pub fn replace_data(&mut self, name: &str, data: ColumnData) -> Result<()> {
        let n_rows = self.n_rows();
        let idx = self
            .position(name)
            .ok_or_else(|| PrepError::MissingColumn(name.to_string()))?;

        if data.len() != n_rows {
            return Err(PrepError::Computation(format!(
                "column `{}` has {} rows, table has {}",
                name,
                data.len(),
                n_rows
            )));
        }

        self.columns[idx].data = data;
        Ok(())
    }

    pub fn float_values(&self, name: &str) -> Result<&[Option<f64>]> {
        match &self.require(name)?.data {
            ColumnData::Float(values) => Ok(values),
            other => Err(type_mismatch(name, "float", other)),
        }
    }

    pub fn int_values(&self, name: &str) -> Result<&[i64]> {
        match &self.require(name)?.data {
            ColumnData::Int(values) => Ok(values),
            other => Err(type_mismatch(name, "int", other)),
        }
    }

    pub fn text_values(&self, name: &str) -> Result<&[Option<String>]> {
        match &self.require(name)?.data {
            ColumnData::Text(values) => Ok(values),
            other => Err(type_mismatch(name, "text", other)),
        }
    }
}

fn type_mismatch(name: &str, expected: &str, got: &ColumnData) -> PrepError {
    PrepError::Computation(format!(
        "column `{}` expected {}, got {}",
        name,
        expected,
        got.type_name()
    ))
}

/// Целые числа пишутся с одним знаком после точки (`700.0`),
/// остальные - кратчайшим представлением
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if value.is_infinite() {
        if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        }
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns(vec![
            Column::new("a", ColumnData::Float(vec![Some(1.0), None])),
            Column::new("b", ColumnData::Text(vec![Some("x".into()), None])),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape_and_missing() {
        let table = sample();
        assert_eq!(table.shape(), Shape { rows: 2, columns: 2 });
        assert_eq!(table.shape().to_string(), "(2, 2)");
        assert_eq!(table.require("a").unwrap().data.missing_count(), 1);
    }

    #[test]
    fn test_add_column_length_mismatch() {
        let mut table = sample();
        let err = table
            .add_column(Column::new("c", ColumnData::Int(vec![1])))
            .unwrap_err();
        assert!(matches!(err, PrepError::Computation(_)));
    }

    #[test]
    fn test_rename_column() {
        let mut table = sample();
        assert!(table.rename_column("a", "z").unwrap());
        assert!(!table.rename_column("a", "y").unwrap());
        assert_eq!(table.column_names(), vec!["z", "b"]);
        assert!(table.rename_column("z", "b").is_err());
    }

    #[test]
    fn test_rename_absent_source_onto_existing_target() {
        let mut table = sample();
        assert!(!table.rename_column("outcome", "b").unwrap());
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_typed_access() {
        let table = sample();
        assert!(table.float_values("a").is_ok());
        assert!(matches!(
            table.int_values("a"),
            Err(PrepError::Computation(_))
        ));
        assert!(matches!(
            table.text_values("missing"),
            Err(PrepError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(700.0), "700.0");
        assert_eq!(format_float(0.25), "0.25");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NAN), "");
        assert_eq!(ColumnData::Float(vec![None]).cell_to_string(0), "");
    }
}
