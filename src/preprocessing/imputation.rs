//! Заполнение пропусков статистиками колонок

use crate::error::{PrepError, Result};
use crate::events::{EventSink, PipelineEvent, Statistic};
use crate::statistics;
use crate::types::{ColumnData, Table};

use super::{ANNUAL_MILEAGE, CATEGORICAL_COLUMNS, CREDIT_SCORE};

pub const UNKNOWN_SENTINEL: &str = "Unknown";

pub struct MissingValueImputer;

impl MissingValueImputer {
    /// `credit_score` - медианой, `annual_mileage` - средним с приведением к целому,
    /// категориальные колонки - значением `"Unknown"`
    pub fn impute(mut table: Table, sink: &mut dyn EventSink) -> Result<Table> {
        sink.emit(PipelineEvent::ImputationStarted);

        // 1. credit_score: медиана
        let (filled, median) = fill_numeric(&table, CREDIT_SCORE, Statistic::Median)?;
        table.replace_data(CREDIT_SCORE, ColumnData::Float(filled.values))?;
        sink.emit(PipelineEvent::NumericImputed {
            column: CREDIT_SCORE.to_string(),
            statistic: Statistic::Median,
            value: median,
            filled: filled.count,
        });

        // 2. annual_mileage: среднее, затем целые
        let (filled, mean) = fill_numeric(&table, ANNUAL_MILEAGE, Statistic::Mean)?;
        let mileage = truncate_to_int(ANNUAL_MILEAGE, &filled.values)?;
        table.replace_data(ANNUAL_MILEAGE, ColumnData::Int(mileage))?;
        sink.emit(PipelineEvent::NumericImputed {
            column: ANNUAL_MILEAGE.to_string(),
            statistic: Statistic::Mean,
            value: mean,
            filled: filled.count,
        });

        // 3. Категориальные колонки, только если есть пропуски
        for column in CATEGORICAL_COLUMNS {
            let values = table.text_values(column)?;
            let missing = values.iter().filter(|v| v.is_none()).count();
            if missing == 0 {
                continue;
            }

            let filled: Vec<Option<String>> = values
                .iter()
                .map(|v| Some(v.clone().unwrap_or_else(|| UNKNOWN_SENTINEL.to_string())))
                .collect();
            table.replace_data(column, ColumnData::Text(filled))?;

            sink.emit(PipelineEvent::CategoricalImputed {
                column: column.to_string(),
                sentinel: UNKNOWN_SENTINEL.to_string(),
                filled: missing,
            });
        }

        Ok(table)
    }
}

struct Filled {
    values: Vec<Option<f64>>,
    count: usize,
}

fn fill_numeric(table: &Table, column: &str, statistic: Statistic) -> Result<(Filled, f64)> {
    let values = table.float_values(column)?;
    let fill_value = match statistic {
        Statistic::Median => statistics::median(values),
        Statistic::Mean => statistics::mean(values),
    }
    .ok_or_else(|| {
        PrepError::Computation(format!(
            "cannot compute {:?} of `{}`: column has no values",
            statistic, column
        ))
    })?;

    // inf и -inf дают NaN; заполнять им нельзя
    if !fill_value.is_finite() {
        return Err(PrepError::Computation(format!(
            "{:?} of `{}` is not a finite number: {}",
            statistic, column, fill_value
        )));
    }

    let mut count = 0;
    let values = values
        .iter()
        .map(|v| match v.filter(|x| !x.is_nan()) {
            Some(x) => Some(x),
            None => {
                count += 1;
                Some(fill_value)
            }
        })
        .collect();

    Ok((Filled { values, count }, fill_value))
}

/// Отбрасывание дробной части
fn truncate_to_int(column: &str, values: &[Option<f64>]) -> Result<Vec<i64>> {
    values
        .iter()
        .map(|v| match v {
            Some(x) if x.is_finite() && x.abs() < i64::MAX as f64 => Ok(x.trunc() as i64),
            other => Err(PrepError::Computation(format!(
                "cannot convert {:?} in `{}` to integer",
                other, column
            ))),
        })
        .collect()
}
