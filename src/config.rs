/// Конфигурация конвейера

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

pub const DEFAULT_INPUT_PATH: &str = "./data/processed/car_insurance_claim.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "./data/processed/car_insurance_claim_clean.csv";

/// Метки категорий пробега: низкий / средний / высокий
pub const MILEAGE_LABELS: [&str; 3] = ["Nízký_Nájezd", "Střední_Nájezd", "Vysoký_Nájezd"];

/// Переменная окружения с путем к JSON-конфигу
pub const CONFIG_ENV_VAR: &str = "INSURANCE_PREP_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_mileage_labels")]
    pub mileage_labels: [String; 3],
}

fn default_input_path() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_PATH)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_mileage_labels() -> [String; 3] {
    MILEAGE_LABELS.map(String::from)
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            mileage_labels: default_mileage_labels(),
        }
    }
}

impl PipelineConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path).map_err(|e| {
            PrepError::Config(format!("cannot open {}: {}", path.as_ref().display(), e))
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Конфиг из файла, указанного в `INSURANCE_PREP_CONFIG`, иначе значения по умолчанию
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_json_file(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }
}
