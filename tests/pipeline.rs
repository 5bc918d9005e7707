//! Integration tests: the full load -> impute -> features -> save pipeline

use std::path::Path;

use insurance_prep::config::MILEAGE_LABELS;
use insurance_prep::feature_engineering::{CREDIT_TO_MILEAGE_RATIO, MILEAGE_CATEGORY};
use insurance_prep::{
    process_file, run_pipeline, FeatureEngineer, NullSink, PipelineConfig, PipelineEvent,
    PrepError, Shape,
};
use tempfile::tempdir;

const SCENARIO: &str = "\
id,outcome,credit_score,annual_mileage,education,income,vehicle_type
1,0,700,12000,university,upper class,sedan
2,1,bad,15000,,poverty,sedan
3,0,650,NaN,high school,middle class,
";

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("car_insurance_claim.csv");
    std::fs::write(&path, contents).unwrap();
    path
}

fn read_output(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

#[test]
fn test_scenario_end_to_end() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), SCENARIO);
    let output = dir.path().join("car_insurance_claim_clean.csv");

    let config = PipelineConfig::new(&input, &output);
    let shape = run_pipeline(&config, &mut NullSink).unwrap();
    assert_eq!(shape, Shape { rows: 3, columns: 9 });

    let (headers, rows) = read_output(&output);
    assert_eq!(
        headers,
        vec![
            "id",
            "Response",
            "credit_score",
            "annual_mileage",
            "education",
            "income",
            "vehicle_type",
            "Mileage_Category",
            "Credit_to_Mileage_Ratio",
        ]
    );
    assert_eq!(rows.len(), 3);

    // credit_score: медиана(700, 650)
    assert_eq!(rows[1][2], "675.0");
    // annual_mileage: среднее(12000, 15000)
    assert_eq!(rows[2][3], "13500");
    assert_eq!(rows[1][4], "Unknown");
    assert_eq!(rows[2][6], "Unknown");

    assert_eq!(rows[0][7], MILEAGE_LABELS[0]);
    assert_eq!(rows[1][7], MILEAGE_LABELS[2]);
    assert_eq!(rows[2][7], MILEAGE_LABELS[1]);

    for row in &rows {
        let credit: f64 = row[2].parse().unwrap();
        let mileage: f64 = row[3].parse().unwrap();
        let ratio: f64 = row[8].parse().unwrap();
        assert!((ratio - credit / (mileage + 1.0)).abs() < 1e-12);
    }
}

#[test]
fn test_no_missing_after_processing() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), SCENARIO);

    let table = process_file(&input, &FeatureEngineer::new(), &mut NullSink).unwrap();
    assert_eq!(table.n_rows(), 3);
    for column in table.columns() {
        if column.name == "id" || column.name == "Response" {
            continue;
        }
        assert_eq!(column.data.missing_count(), 0, "column {}", column.name);
    }
    assert!(table.has_column(MILEAGE_CATEGORY));
    assert!(table.has_column(CREDIT_TO_MILEAGE_RATIO));
}

#[test]
fn test_events_in_stage_order() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), SCENARIO);
    let config = PipelineConfig::new(&input, dir.path().join("out.csv"));

    let mut events: Vec<PipelineEvent> = Vec::new();
    run_pipeline(&config, &mut events).unwrap();

    let kind = |e: &PipelineEvent| match e {
        PipelineEvent::Loaded { .. } => "loaded",
        PipelineEvent::ValuesCoerced { .. } => "coerced",
        PipelineEvent::ImputationStarted => "imputation",
        PipelineEvent::NumericImputed { .. } => "numeric",
        PipelineEvent::CategoricalImputed { .. } => "categorical",
        PipelineEvent::FeatureEngineeringStarted => "features",
        PipelineEvent::BucketsCreated { .. } => "buckets",
        PipelineEvent::RatioCreated { .. } => "ratio",
        PipelineEvent::Saved { .. } => "saved",
    };
    let kinds: Vec<&str> = events.iter().map(kind).collect();
    assert_eq!(
        kinds,
        vec![
            "loaded",
            "coerced",
            "imputation",
            "numeric",
            "numeric",
            "categorical",
            "categorical",
            "features",
            "buckets",
            "ratio",
            "saved",
        ]
    );
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let config = PipelineConfig::new(dir.path().join("absent.csv"), &output);

    let err = run_pipeline(&config, &mut NullSink).unwrap_err();
    assert!(matches!(err, PrepError::FileNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn test_malformed_input_is_data_load_error() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "outcome,credit_score\n1,2,3\n");
    let output = dir.path().join("out.csv");

    let err = run_pipeline(&PipelineConfig::new(&input, &output), &mut NullSink).unwrap_err();
    assert!(matches!(err, PrepError::DataLoad(_)));
    assert!(!output.exists());
}

#[test]
fn test_missing_categorical_column() {
    let dir = tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "outcome,credit_score,annual_mileage,education,income\n0,700,12000,a,b\n",
    );

    let err = process_file(&input, &FeatureEngineer::new(), &mut NullSink).unwrap_err();
    assert!(matches!(err, PrepError::MissingColumn(ref c) if c == "vehicle_type"));
}

#[test]
fn test_rerun_is_deterministic() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), SCENARIO);
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    run_pipeline(&PipelineConfig::new(&input, &first), &mut NullSink).unwrap();
    run_pipeline(&PipelineConfig::new(&input, &second), &mut NullSink).unwrap();

    assert_eq!(
        std::fs::read_to_string(&first).unwrap(),
        std::fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn test_input_already_using_response() {
    let dir = tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "Response,credit_score,annual_mileage,education,income,vehicle_type\n\
         1,700,12000,a,b,c\n\
         0,650,9000,a,b,c\n",
    );

    let table = process_file(&input, &FeatureEngineer::new(), &mut NullSink).unwrap();
    assert_eq!(table.column_names()[0], "Response");
    assert_eq!(table.n_rows(), 2);
}
