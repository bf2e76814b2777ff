//! Model evaluation: seeded train/test split and regression error metrics.

use super::regression::{PolynomialRegression, RegressionError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use statrs::statistics::Statistics;

/// Seed used by the report for a reproducible split.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Error metrics of predictions against held-out observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    pub mae: f64,
    pub mse: f64,
    pub r2: f64,
}

impl RegressionMetrics {
    /// Compute MAE, MSE and R².
    ///
    /// R² follows the usual convention for a constant target: 1 for a perfect
    /// fit, 0 otherwise. Empty input yields NaN everywhere.
    pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Self {
        let n = actual.len().min(predicted.len());
        if n == 0 {
            return Self {
                mae: f64::NAN,
                mse: f64::NAN,
                r2: f64::NAN,
            };
        }
        let actual = &actual[..n];
        let predicted = &predicted[..n];

        let residuals: Vec<f64> = actual.iter().zip(predicted).map(|(a, p)| a - p).collect();
        let mae = residuals.iter().map(|r| r.abs()).mean();
        let ss_res: f64 = residuals.iter().map(|r| r * r).sum();
        let mse = ss_res / n as f64;

        let mean = actual.iter().mean();
        let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
        let r2 = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Self { mae, mse, r2 }
    }
}

/// Shuffle with a fixed seed, then hold out `ceil(len * test_fraction)` items.
///
/// Returns `(train, test)`.
pub fn train_test_split<T: Clone>(items: &[T], test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((items.len() as f64 * test_fraction).ceil() as usize).min(items.len());
    let (test_idx, train_idx) = indices.split_at(test_len);

    let pick = |idx: &[usize]| idx.iter().map(|&i| items[i].clone()).collect::<Vec<T>>();
    (pick(train_idx), pick(test_idx))
}

/// A model fitted on a training split and scored on the held-out rest.
#[derive(Debug, Clone)]
pub struct HoldoutEvaluation {
    pub model: PolynomialRegression,
    pub metrics: RegressionMetrics,
    /// Held-out samples, sorted by year.
    pub test: Vec<(i32, f64)>,
    /// Model output for each held-out year.
    pub test_predicted: Vec<f64>,
}

impl HoldoutEvaluation {
    /// Split `samples`, fit a polynomial of `degree` on the training part and
    /// score it on the test part.
    pub fn run(
        samples: &[(i32, f64)],
        degree: usize,
        test_fraction: f64,
        seed: u64,
    ) -> Result<Self, RegressionError> {
        let (train, mut test) = train_test_split(samples, test_fraction, seed);
        test.sort_by_key(|&(year, _)| year);

        let (x, y): (Vec<f64>, Vec<f64>) = train
            .iter()
            .map(|&(year, value)| (f64::from(year), value))
            .unzip();
        let model = PolynomialRegression::fit(&x, &y, degree)?;

        let test_years: Vec<f64> = test.iter().map(|&(year, _)| f64::from(year)).collect();
        let test_actual: Vec<f64> = test.iter().map(|&(_, value)| value).collect();
        let test_predicted = model.predict_many(&test_years);
        let metrics = RegressionMetrics::evaluate(&test_actual, &test_predicted);

        log::debug!(
            "Holdout fit on {} train / {} test samples: {:?}",
            train.len(),
            test.len(),
            metrics
        );
        Ok(Self {
            model,
            metrics,
            test,
            test_predicted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions() {
        let actual = [70.0, 71.0, 72.5];
        let metrics = RegressionMetrics::evaluate(&actual, &actual);
        assert_eq!(metrics.mae, 0.0);
        assert_eq!(metrics.mse, 0.0);
        assert_eq!(metrics.r2, 1.0);
    }

    #[test]
    fn known_errors() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [2.0, 2.0, 2.0];
        let metrics = RegressionMetrics::evaluate(&actual, &predicted);
        assert!((metrics.mae - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics.mse - 2.0 / 3.0).abs() < 1e-12);
        // Predicting the mean scores zero
        assert!(metrics.r2.abs() < 1e-12);
    }

    #[test]
    fn constant_target_with_error_scores_zero() {
        let metrics = RegressionMetrics::evaluate(&[5.0, 5.0], &[5.0, 6.0]);
        assert_eq!(metrics.r2, 0.0);
    }

    #[test]
    fn empty_input_is_nan() {
        assert!(RegressionMetrics::evaluate(&[], &[]).mae.is_nan());
    }

    #[test]
    fn split_is_deterministic_and_disjoint() {
        let items: Vec<i32> = (0..30).collect();
        let (train, test) = train_test_split(&items, 0.2, DEFAULT_SPLIT_SEED);
        assert_eq!(test.len(), 6);
        assert_eq!(train.len(), 24);

        let mut all: Vec<i32> = train.iter().chain(test.iter()).copied().collect();
        all.sort();
        assert_eq!(all, items);

        assert_eq!(train_test_split(&items, 0.2, DEFAULT_SPLIT_SEED), (train, test));
    }

    #[test]
    fn test_size_rounds_up() {
        let items: Vec<i32> = (0..7).collect();
        let (train, test) = train_test_split(&items, 0.2, 1);
        assert_eq!(test.len(), 2);
        assert_eq!(train.len(), 5);
    }

    #[test]
    fn holdout_on_a_straight_line_is_exact() {
        let samples: Vec<(i32, f64)> = (1990..2020)
            .map(|y| (y, 58.0 + 0.25 * f64::from(y - 1990)))
            .collect();
        let eval = HoldoutEvaluation::run(&samples, 1, 0.2, DEFAULT_SPLIT_SEED).unwrap();

        assert_eq!(eval.test.len(), 6);
        assert!(eval.test.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(eval.metrics.mae < 1e-9);
        assert!((eval.metrics.r2 - 1.0).abs() < 1e-9);
        assert!((eval.model.predict(2030.0) - 68.0).abs() < 1e-9);
    }

    #[test]
    fn holdout_needs_enough_training_data() {
        let samples = vec![(2000, 70.0)];
        assert!(HoldoutEvaluation::run(&samples, 1, 0.2, DEFAULT_SPLIT_SEED).is_err());
    }
}
