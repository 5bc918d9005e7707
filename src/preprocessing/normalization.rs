//! Загрузка и нормализация данных

use std::path::Path;

use crate::error::{PrepError, Result};
use crate::events::{EventSink, PipelineEvent};
use crate::io;
use crate::types::{ColumnData, Table};

use super::{ANNUAL_MILEAGE, CREDIT_SCORE, TARGET_COLUMN, TARGET_SOURCE_COLUMN};

pub struct DataNormalizer;

impl DataNormalizer {
    /// Чтение CSV + нормализация
    pub fn load<P: AsRef<Path>>(path: P, sink: &mut dyn EventSink) -> Result<Table> {
        let path = path.as_ref();
        let table = io::read_csv(path)?;

        sink.emit(PipelineEvent::Loaded {
            path: path.display().to_string(),
            shape: table.shape(),
        });

        Self::normalize(table, sink)
    }

    /// Переименование целевой колонки и приведение числовых колонок к `f64`
    pub fn normalize(mut table: Table, sink: &mut dyn EventSink) -> Result<Table> {
        if table.has_column(TARGET_SOURCE_COLUMN) && table.has_column(TARGET_COLUMN) {
            return Err(PrepError::DataLoad(format!(
                "both `{}` and `{}` present",
                TARGET_SOURCE_COLUMN, TARGET_COLUMN
            )));
        }
        table.rename_column(TARGET_SOURCE_COLUMN, TARGET_COLUMN)?;

        for name in [CREDIT_SCORE, ANNUAL_MILEAGE] {
            let data = &table.require(name)?.data;
            let missing_before = data.missing_count();
            let coerced = coerce_numeric(data);
            let newly_missing = coerced.missing_count() - missing_before;

            table.replace_data(name, coerced)?;

            if newly_missing > 0 {
                sink.emit(PipelineEvent::ValuesCoerced {
                    column: name.to_string(),
                    missing: newly_missing,
                });
            }
        }

        Ok(table)
    }
}

/// Ячейка, которая не парсится как число, становится пропуском
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

pub fn coerce_numeric(data: &ColumnData) -> ColumnData {
    let values = match data {
        ColumnData::Float(values) => values
            .iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect(),
        ColumnData::Int(values) => values.iter().map(|&v| Some(v as f64)).collect(),
        ColumnData::Text(values) => values
            .iter()
            .map(|v| v.as_deref().and_then(parse_number))
            .collect(),
    };
    ColumnData::Float(values)
}
