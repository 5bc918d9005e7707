//! Feature engineering: категории пробега и отношение кредитного рейтинга к пробегу

use ndarray::Array1;

use crate::config::MILEAGE_LABELS;
use crate::error::Result;
use crate::events::{EventSink, PipelineEvent};
use crate::statistics;
use crate::types::{Column, ColumnData, Table};

use super::{ANNUAL_MILEAGE, CREDIT_SCORE};

pub const MILEAGE_CATEGORY: &str = "Mileage_Category";
pub const CREDIT_TO_MILEAGE_RATIO: &str = "Credit_to_Mileage_Ratio";

/// Квантили, задающие границы трех корзин
pub const MILEAGE_QUANTILES: [f64; 4] = [0.0, 0.33, 0.66, 1.0];

pub struct FeatureEngineer {
    mileage_labels: [String; 3],
}

impl FeatureEngineer {
    pub fn new() -> Self {
        Self::with_labels(MILEAGE_LABELS.map(String::from))
    }

    pub fn with_labels(mileage_labels: [String; 3]) -> Self {
        Self { mileage_labels }
    }

    pub fn labels(&self) -> &[String; 3] {
        &self.mileage_labels
    }

    /// Добавляет `Mileage_Category` и `Credit_to_Mileage_Ratio`
    pub fn create_features(&self, mut table: Table, sink: &mut dyn EventSink) -> Result<Table> {
        sink.emit(PipelineEvent::FeatureEngineeringStarted);

        let mileage = table.int_values(ANNUAL_MILEAGE)?;
        let credit = table.float_values(CREDIT_SCORE)?;

        // A) Категории пробега по квантилям
        let mileage_f: Array1<f64> = mileage.iter().map(|&m| m as f64).collect();
        let edges = bucket_edges(
            &statistics::quantiles(&mileage_f, &MILEAGE_QUANTILES).unwrap_or_default(),
        );

        let categories: Vec<Option<String>> = mileage_f
            .iter()
            .map(|&m| {
                bucket_index(m, &edges).and_then(|idx| self.mileage_labels.get(idx).cloned())
            })
            .collect();

        // B) Отношение; +1 защищает от деления на ноль
        let ratio: Vec<Option<f64>> = credit
            .iter()
            .zip(mileage.iter())
            .map(|(c, &m)| c.map(|c| c / (m as f64 + 1.0)))
            .collect();

        let buckets = match edges.len() {
            0 => 0,
            1 => 1,
            n => n - 1,
        };

        table.add_column(Column::new(MILEAGE_CATEGORY, ColumnData::Text(categories)))?;
        sink.emit(PipelineEvent::BucketsCreated {
            column: MILEAGE_CATEGORY.to_string(),
            edges,
            buckets,
        });

        table.add_column(Column::new(CREDIT_TO_MILEAGE_RATIO, ColumnData::Float(ratio)))?;
        sink.emit(PipelineEvent::RatioCreated {
            column: CREDIT_TO_MILEAGE_RATIO.to_string(),
        });

        Ok(table)
    }
}

impl Default for FeatureEngineer {
    fn default() -> Self {
        Self::new()
    }
}

/// Совпадающие соседние границы отбрасываются
pub fn bucket_edges(quantiles: &[f64]) -> Vec<f64> {
    let mut edges = quantiles.to_vec();
    edges.dedup();
    edges
}

/// Номер корзины: `[e0, e1]`, `(e1, e2]`, `(e2, e3]`.
/// При единственной границе все значения попадают в первую корзину.
pub fn bucket_index(value: f64, edges: &[f64]) -> Option<usize> {
    let (first, last) = (*edges.first()?, *edges.last()?);
    if value < first || value > last {
        return None;
    }
    if edges.len() == 1 {
        return Some(0);
    }

    edges[1..].iter().position(|&upper| value <= upper)
}
