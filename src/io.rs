//! Чтение и запись таблиц в CSV

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use csv::{ReaderBuilder, Writer};

use crate::error::{PrepError, Result};
use crate::types::{Column, ColumnData, Table};

/// Значения ячеек, которые читаются как пропуск
pub const NA_VALUES: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>",
    "#N/A", "#N/A N/A", "#NA", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

pub fn is_missing_marker(cell: &str) -> bool {
    NA_VALUES.contains(&cell)
}

/// Загрузка CSV с заголовком. Все колонки читаются как текст.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PrepError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => PrepError::DataLoad(format!("cannot open {}: {}", path.display(), e)),
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(PrepError::DataLoad(format!(
            "no columns to parse from {}",
            path.display()
        )));
    }

    let mut seen = HashSet::new();
    for name in headers.iter() {
        if !seen.insert(name) {
            return Err(PrepError::DataLoad(format!("duplicate column name `{}`", name)));
        }
    }

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (column, cell) in values.iter_mut().zip(record.iter()) {
            column.push(if is_missing_marker(cell) {
                None
            } else {
                Some(cell.to_string())
            });
        }
    }

    let columns = headers
        .iter()
        .zip(values)
        .map(|(name, data)| Column::new(name, ColumnData::Text(data)))
        .collect();

    Table::from_columns(columns)
}

/// Запись таблицы: заголовок + по строке на запись, без индекса
pub fn write_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| write_error(path, e))?;
    let mut writer = Writer::from_writer(file);

    writer
        .write_record(table.column_names())
        .map_err(|e| write_error(path, e))?;

    for row in 0..table.n_rows() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.data.cell_to_string(row))
            .collect();
        writer.write_record(&record).map_err(|e| write_error(path, e))?;
    }

    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(())
}

fn write_error(path: &Path, err: impl fmt::Display) -> PrepError {
    PrepError::Computation(format!("failed to write {}: {}", path.display(), err))
}
