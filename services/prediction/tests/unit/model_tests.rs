//! Training behavior of the regression network

use approx::assert_relative_eq;
use ndarray::Array1;
use prediction_service::features::build_training_set;
use prediction_service::model::{train, TrainingConfig};
use prediction_service::PredictionError;
use test_utils::BarSeriesFactory;

fn quick_config(seed: u64) -> TrainingConfig {
    TrainingConfig {
        epochs: 30,
        seed: Some(seed),
        ..TrainingConfig::default()
    }
}

#[test]
fn training_is_deterministic_for_a_fixed_seed() {
    let series = BarSeriesFactory::new().random_walk(120, 500.0, 11);
    let set = build_training_set(&series);

    let a = train(&set, &quick_config(42)).expect("training succeeds");
    let b = train(&set, &quick_config(42)).expect("training succeeds");

    assert_relative_eq!(a.rmse, b.rmse);
    let probe = set.features.row(0).to_owned();
    let input_a = a.stats.normalize_row(&probe);
    let input_b = b.stats.normalize_row(&probe);
    assert_relative_eq!(a.network.predict(&input_a), b.network.predict(&input_b));
}

#[test]
fn different_seeds_produce_different_networks() {
    let series = BarSeriesFactory::new().random_walk(120, 500.0, 11);
    let set = build_training_set(&series);

    let a = train(&set, &quick_config(1)).expect("training succeeds");
    let b = train(&set, &quick_config(2)).expect("training succeeds");

    let probe = a.stats.normalize_row(&set.features.row(0).to_owned());
    assert_ne!(a.network.predict(&probe), b.network.predict(&probe));
}

#[test]
fn rmse_is_finite_and_nonnegative() {
    let series = BarSeriesFactory::new().linear_ramp(80, 100.0, 0.5);
    let set = build_training_set(&series);

    let model = train(&set, &quick_config(7)).expect("training succeeds");
    assert!(model.rmse.is_finite());
    assert!(model.rmse >= 0.0);
}

#[test]
fn normalization_stats_ship_with_the_model() {
    let series = BarSeriesFactory::new().random_walk(90, 250.0, 3);
    let set = build_training_set(&series);

    let model = train(&set, &quick_config(5)).expect("training succeeds");
    assert_eq!(model.stats.means.len(), set.features.ncols());
    assert_eq!(model.stats.stds.len(), set.features.ncols());
    for std in &model.stats.stds {
        assert!(*std >= 1.0);
    }
}

#[test]
fn training_refuses_an_empty_set() {
    let set = build_training_set(&[]);
    let err = train(&set, &quick_config(0)).unwrap_err();
    assert!(matches!(err, PredictionError::InsufficientData { .. }));
}

#[test]
fn predictions_are_finite_for_normalized_inputs() {
    let series = BarSeriesFactory::new().random_walk(150, 1_000.0, 21);
    let set = build_training_set(&series);

    let model = train(&set, &quick_config(9)).expect("training succeeds");
    let zeros = Array1::zeros(set.features.ncols());
    assert!(model.network.predict(&zeros).is_finite());
}
