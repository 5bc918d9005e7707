/// Запуск конвейера предобработки данных страховых полисов

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use insurance_prep::{run_pipeline, PipelineConfig, PrepError, TracingSink};

fn main() {
    // Инициализация логирования (по умолчанию info)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        match err.downcast_ref::<PrepError>() {
            Some(PrepError::FileNotFound { path }) => {
                tracing::error!(
                    "Error: Input file not found at {}. Check your file structure.",
                    path
                );
            }
            _ => {
                tracing::error!("An unexpected error occurred during preprocessing: {:#}", err);
            }
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = PipelineConfig::from_env().context("failed to load pipeline configuration")?;

    let shape = run_pipeline(&config, &mut TracingSink)?;

    tracing::info!("Final dataset shape: {}", shape);
    tracing::info!("Successfully saved clean data to {}", config.output_path.display());
    Ok(())
}
