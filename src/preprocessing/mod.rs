/// Этапы предобработки: загрузка/нормализация, импутация, feature engineering

pub mod feature_engineering;
pub mod imputation;
pub mod normalization;

pub use feature_engineering::FeatureEngineer;
pub use imputation::MissingValueImputer;
pub use normalization::DataNormalizer;

pub const TARGET_SOURCE_COLUMN: &str = "outcome";
pub const TARGET_COLUMN: &str = "Response";
pub const CREDIT_SCORE: &str = "credit_score";
pub const ANNUAL_MILEAGE: &str = "annual_mileage";
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["education", "income", "vehicle_type"];
