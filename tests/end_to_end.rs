use habitrisk::dataset::{read_csv, Value};
use habitrisk::model::{Classifier, LinearClassifier, LinearClassifierParams};
use habitrisk::predict::{PredictError, Predictor};
use habitrisk::preprocessing::{FittedPipeline, FittedTransformer, Pipeline, Resampler, Transformer};
use habitrisk::schema::{ObesityClass, SurveyRecord, VocabularyPolicy};

const TRAIN: &str = "\
Gender,Age,Height,Weight,family_history,FAVC,FCVC,NCP,CAEC,SMOKE,CH2O,SCC,FAF,CALC,MTRANS,Obesity
Female,21,1.62,64,Yes,No,Sometimes,3 meals,Sometimes,No,1-2L,No,0-1 days,No,Public Transport,Normal_Weight
Female,21,1.52,56,Yes,No,Always,3 meals,Sometimes,Yes,2L+,Yes,4-5 days,Sometimes,Public Transport,Normal_Weight
Male,23,1.80,77,Yes,No,Sometimes,3 meals,Sometimes,No,1-2L,No,2-3 days,Frequently,Public Transport,Normal_Weight
Male,22,1.64,53,No,No,Sometimes,3 meals,Sometimes,No,1-2L,No,0-1 days,No,Public Transport,Normal_Weight
Female,22,1.65,56,No,No,Always,3 meals,Sometimes,No,2L+,No,2-3 days,Sometimes,Walking,Normal_Weight
Male,24,1.78,64,Yes,Yes,Always,3 meals,Sometimes,No,1-2L,No,0-1 days,Sometimes,Public Transport,Normal_Weight
Male,26,1.85,105,Yes,Yes,Sometimes,3 meals,Frequently,No,2L+,No,2-3 days,Sometimes,Automobile,Obesity_Type_I
Female,41,1.60,80,Yes,Yes,Sometimes,1 meal,Sometimes,No,1-2L,No,0-1 days,Sometimes,Automobile,Obesity_Type_I
Male,35,1.75,98,Yes,Yes,Never,3 meals,Sometimes,No,Up to 1L,No,0-1 days,Frequently,Automobile,Obesity_Type_I
Female,19,1.60,42,No,No,Always,4+ meals,Frequently,No,2L+,No,4-5 days,No,Walking,Insufficient_Weight
Male,18,1.80,55,No,Yes,Sometimes,3 meals,Frequently,No,1-2L,No,5+ days,No,Bike,Insufficient_Weight
";

const N_FEATURES: usize = 13;

fn example_record() -> SurveyRecord {
    serde_json::from_str(
        r#"{
            "gender": "Female", "age": 25, "height": 1.70, "weight": 60.0,
            "family_history": "Yes", "favc": "No", "fcvc": "Sometimes", "ncp": "3 meals",
            "caec": "Sometimes", "smoke": "No", "ch2o": "1-2L", "scc": "No",
            "faf": "2-3 days", "calc": "No", "mtrans": "Public Transport"
        }"#,
    )
    .unwrap()
}

/// A classifier whose score for class `c` only depends on the bias, so `winner` always wins.
fn constant_classifier(winner: i64) -> LinearClassifier {
    let classes: Vec<i64> = (0..7).collect();
    LinearClassifier::from_params(LinearClassifierParams {
        weights: vec![vec![0.0; N_FEATURES]; classes.len()],
        bias: classes
            .iter()
            .map(|&c| if c == winner { 1.0 } else { 0.0 })
            .collect(),
        classes,
        feature_names: None,
    })
    .unwrap()
}

fn fitted_pipeline() -> FittedPipeline {
    let train = read_csv(TRAIN.as_bytes()).unwrap();
    Pipeline::standard().fit(&train).unwrap()
}

#[test]
fn example_record_yields_one_numeric_row() {
    let pipeline = fitted_pipeline();
    let frame = example_record().to_frame(Some("Normal_Weight")).unwrap();
    let out = pipeline.transform(&frame).unwrap();

    assert_eq!(out.n_rows(), 1);
    let features = out.without_columns(&["Obesity".to_string()]);
    let x = features.to_matrix().unwrap();
    assert_eq!(x.shape(), &[1, N_FEATURES]);
    assert!(x.iter().all(|v| v.is_finite()));

    // Age 25 inside the fitted [18, 41] range
    let age = out.column("Age").unwrap()[0].as_f64().unwrap();
    assert!((age - 7.0 / 23.0).abs() < 1e-9);
    assert_eq!(out.column("CH2O").unwrap()[0], Value::Number(1.0));
    assert_eq!(out.column("Gender").unwrap()[0], Value::Number(1.0));
}

#[test]
fn messages_follow_class_band() {
    let expectations = [
        (0, "risk of underweight"),
        (1, "no risk"),
        (2, "no risk"),
        (3, "no risk"),
        (4, "risk of developing obesity if habits continue"),
        (5, "risk of developing obesity if habits continue"),
        (6, "risk of developing obesity if habits continue"),
    ];
    for (class, message) in expectations {
        let predictor = Predictor::new(fitted_pipeline(), constant_classifier(class));
        let prediction = predictor.predict(&example_record()).unwrap();
        assert_eq!(prediction.class, ObesityClass::from_index(class).unwrap());
        assert_eq!(prediction.message(), message);
    }
}

#[test]
fn unmapped_class_is_an_error() {
    let classifier = LinearClassifier::from_params(LinearClassifierParams {
        classes: vec![9],
        weights: vec![vec![0.0; N_FEATURES]],
        bias: vec![0.0],
        feature_names: None,
    })
    .unwrap();
    let predictor = Predictor::new(fitted_pipeline(), classifier);
    assert!(matches!(
        predictor.predict(&example_record()),
        Err(PredictError::UnmappedClass(9))
    ));
}

#[test]
fn unknown_answers_are_tolerated_unless_strict() {
    let mut record = example_record();
    record.mtrans = "Scooter".to_string();
    record.calc = "Daily".to_string();
    record.smoke = "Maybe".to_string();

    let permissive = Predictor::new(fitted_pipeline(), constant_classifier(1));
    // SMOKE becomes missing, which the linear classifier refuses
    assert!(matches!(
        permissive.predict(&record),
        Err(PredictError::Model(_))
    ));

    record.smoke = "No".to_string();
    assert_eq!(permissive.predict(&record).unwrap().message(), "no risk");

    let strict = Predictor::new(fitted_pipeline(), constant_classifier(1))
        .with_vocabulary_policy(VocabularyPolicy::Strict);
    match strict.predict(&record) {
        Err(PredictError::Validation(errors)) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["calc", "mtrans"]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn saved_artifacts_serve_identically() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline_path = dir.path().join("pipeline.bin");
    let model_path = dir.path().join("model.json");

    let pipeline = fitted_pipeline();
    pipeline.save_to_file(&pipeline_path).unwrap();
    constant_classifier(5).save_to_file(&model_path).unwrap();

    let loaded = FittedPipeline::load_from_file(&pipeline_path).unwrap();
    assert_eq!(loaded, pipeline);
    let classifier = LinearClassifier::load_from_file(&model_path).unwrap();
    assert_eq!(classifier.n_features(), Some(N_FEATURES));

    let predictor = Predictor::new(loaded, classifier);
    let prediction = predictor.predict(&example_record()).unwrap();
    assert_eq!(prediction.class, ObesityClass::ObesityTypeII);
}

#[test]
fn resampled_training_table_is_balanced_and_reproducible() {
    let train = read_csv(TRAIN.as_bytes()).unwrap();
    let pipeline = Pipeline::standard().with_resampler(Resampler::new().with_seed(42));

    let first = pipeline.fit_transform(&train).unwrap();
    let second = pipeline.fit_transform(&train).unwrap();
    assert_eq!(first, second);

    // 6 normal, 3 obese, 2 underweight -> underweight grows to 6
    assert_eq!(first.n_rows(), 15);
    let underweight = first
        .column("Obesity")
        .unwrap()
        .iter()
        .filter(|v| **v == Value::Number(0.0))
        .count();
    assert_eq!(underweight, 6);

    let other_seed = Pipeline::standard()
        .with_resampler(Resampler::new().with_seed(7))
        .fit_transform(&train)
        .unwrap();
    assert_eq!(other_seed.n_rows(), 15);
}

#[test]
fn resampler_without_target_is_noop() {
    let train = read_csv(TRAIN.as_bytes()).unwrap();
    let features = train.without_columns(&["Obesity".to_string()]);
    assert_eq!(Resampler::new().fit_transform(&features).unwrap(), features);
}
