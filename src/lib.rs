//! Insurance Prep - предобработка данных страховых полисов

pub mod config;
pub mod error;
pub mod events;
pub mod io;
pub mod pipeline;
pub mod preprocessing;
pub mod statistics;
pub mod types;

pub use config::PipelineConfig;
pub use error::{PrepError, Result};
pub use events::{EventSink, NullSink, PipelineEvent, Statistic, TracingSink};
pub use pipeline::{process_file, run_pipeline};
pub use preprocessing::*;
pub use types::*;
