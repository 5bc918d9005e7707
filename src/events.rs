//! Диагностические события этапов конвейера
//!
//! Этапы не пишут в консоль сами: они передают события в `EventSink`.
//! Бинарник использует `TracingSink`, тесты собирают события в `Vec`.

use serde::Serialize;

use crate::types::Shape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    Median,
    Mean,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    Loaded {
        path: String,
        shape: Shape,
    },
    /// Ячейки, ставшие пропусками при приведении к числу
    ValuesCoerced {
        column: String,
        missing: usize,
    },
    ImputationStarted,
    NumericImputed {
        column: String,
        statistic: Statistic,
        value: f64,
        filled: usize,
    },
    CategoricalImputed {
        column: String,
        sentinel: String,
        filled: usize,
    },
    FeatureEngineeringStarted,
    BucketsCreated {
        column: String,
        edges: Vec<f64>,
        buckets: usize,
    },
    RatioCreated {
        column: String,
    },
    Saved {
        path: String,
        shape: Shape,
    },
}

pub trait EventSink {
    fn emit(&mut self, event: PipelineEvent);
}

impl EventSink for Vec<PipelineEvent> {
    fn emit(&mut self, event: PipelineEvent) {
        self.push(event);
    }
}

/// Отбрасывает все события
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: PipelineEvent) {}
}

/// Пишет события через `tracing`
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::Loaded { path, shape } => {
                tracing::info!("Loaded {} with shape {}", path, shape);
            }
            PipelineEvent::ValuesCoerced { column, missing } => {
                tracing::info!(
                    "  -> '{}': {} value(s) could not be parsed as numbers",
                    column,
                    missing
                );
            }
            PipelineEvent::ImputationStarted => {
                tracing::info!("Starting imputation of missing values...");
            }
            PipelineEvent::NumericImputed {
                column,
                statistic: Statistic::Median,
                value,
                filled,
            } => {
                tracing::info!(
                    "  -> '{}' imputed with median: {:.4} ({} filled)",
                    column,
                    value,
                    filled
                );
            }
            PipelineEvent::NumericImputed {
                column,
                statistic: Statistic::Mean,
                value,
                filled,
            } => {
                tracing::info!(
                    "  -> '{}' imputed with mean: {:.0} ({} filled)",
                    column,
                    value,
                    filled
                );
            }
            PipelineEvent::CategoricalImputed {
                column,
                sentinel,
                filled,
            } => {
                tracing::info!(
                    "  -> '{}' imputed with '{}' ({} filled)",
                    column,
                    sentinel,
                    filled
                );
            }
            PipelineEvent::FeatureEngineeringStarted => {
                tracing::info!("Starting Feature Engineering...");
            }
            PipelineEvent::BucketsCreated { column, edges, buckets } => {
                if buckets < 3 {
                    tracing::warn!(
                        "  -> '{}' created with only {} bin(s): quantile edges {:?} collapsed",
                        column,
                        buckets,
                        edges
                    );
                } else {
                    tracing::info!(
                        "  -> '{}' created ({} bins based on quantiles).",
                        column,
                        buckets
                    );
                }
            }
            PipelineEvent::RatioCreated { column } => {
                tracing::info!("  -> '{}' created.", column);
            }
            PipelineEvent::Saved { path, shape } => {
                tracing::info!(
                    "Saved {} rows x {} columns to {}",
                    shape.rows,
                    shape.columns,
                    path
                );
            }
        }
    }
}
