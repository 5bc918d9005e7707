//! Последовательный запуск этапов: загрузка -> импутация -> признаки -> запись

use std::path::Path;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::events::{EventSink, PipelineEvent};
use crate::io;
use crate::preprocessing::{DataNormalizer, FeatureEngineer, MissingValueImputer};
use crate::types::{Shape, Table};

/// Все три этапа над файлом, без записи результата
pub fn process_file<P: AsRef<Path>>(
    input_path: P,
    engineer: &FeatureEngineer,
    sink: &mut dyn EventSink,
) -> Result<Table> {
    let table = DataNormalizer::load(input_path, sink)?;
    let table = MissingValueImputer::impute(table, sink)?;
    engineer.create_features(table, sink)
}

/// Полный прогон. Выходной файл создается только после успешной обработки.
pub fn run_pipeline(config: &PipelineConfig, sink: &mut dyn EventSink) -> Result<Shape> {
    let engineer = FeatureEngineer::with_labels(config.mileage_labels.clone());
    let table = process_file(&config.input_path, &engineer, sink)?;

    io::write_csv(&table, &config.output_path)?;

    let shape = table.shape();
    sink.emit(PipelineEvent::Saved {
        path: config.output_path.display().to_string(),
        shape,
    });

    Ok(shape)
}
