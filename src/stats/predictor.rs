//! Per-country future value prediction.

use super::regression::PolynomialRegression;
use crate::config::AppConfig;

/// Fits a polynomial per country on demand and evaluates it at a target year.
///
/// Countries with fewer than `min_samples` yearly samples, or whose fit is
/// degenerate, get their most recent observed value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryPredictor {
    min_samples: usize,
    degree: usize,
}

impl Default for CountryPredictor {
    fn default() -> Self {
        Self {
            min_samples: 6,
            degree: 2,
        }
    }
}

impl CountryPredictor {
    pub fn new(min_samples: usize, degree: usize) -> Self {
        Self {
            min_samples,
            degree,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.min_regression_samples, config.polynomial_degree)
    }

    /// Whether a series is long enough to be regressed rather than carried forward.
    pub fn can_regress(&self, samples: &[(i32, f64)]) -> bool {
        samples.len() >= self.min_samples
    }

    /// Fit over `samples` (ordered by year); `None` if the series is too short
    /// or degenerate.
    pub fn fit(&self, samples: &[(i32, f64)]) -> Option<PolynomialRegression> {
        if !self.can_regress(samples) {
            return None;
        }
        let (x, y): (Vec<f64>, Vec<f64>) = samples
            .iter()
            .map(|&(year, value)| (f64::from(year), value))
            .unzip();

        match PolynomialRegression::fit(&x, &y, self.degree) {
            Ok(model) => Some(model),
            Err(e) => {
                log::warn!("Regression over {} samples failed: {}", samples.len(), e);
                None
            }
        }
    }

    /// Predicted value at `target_year`, or the last observed value when no
    /// regression is possible. `None` only for an empty series.
    pub fn predict(&self, samples: &[(i32, f64)], target_year: i32) -> Option<f64> {
        match self.fit(samples) {
            Some(model) => Some(model.predict(f64::from(target_year))),
            None => samples.last().map(|&(_, value)| value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising(from: i32, count: i32) -> Vec<(i32, f64)> {
        (0..count)
            .map(|i| (from + i, 60.0 + 0.4 * f64::from(i) - 0.002 * f64::from(i * i)))
            .collect()
    }

    #[test]
    fn five_samples_return_last_value_unchanged() {
        let samples = rising(2015, 5);
        let predictor = CountryPredictor::default();
        assert!(!predictor.can_regress(&samples));
        assert_eq!(predictor.predict(&samples, 2040), Some(samples[4].1));
    }

    #[test]
    fn six_samples_use_the_regression() {
        let samples = rising(2014, 6);
        let predictor = CountryPredictor::default();
        assert!(predictor.can_regress(&samples));

        let predicted = predictor.predict(&samples, 2040).unwrap();
        let i = 2040.0 - 2014.0;
        let expected = 60.0 + 0.4 * i - 0.002 * i * i;
        assert!((predicted - expected).abs() < 1e-6);
        assert_ne!(predicted, samples[5].1);
    }

    #[test]
    fn prediction_at_observed_year_tracks_history() {
        let samples: Vec<(i32, f64)> = (1990..2020)
            .map(|y| {
                let t = f64::from(y - 1990);
                let wobble = if y % 2 == 0 { 0.3 } else { -0.3 };
                (y, 55.0 + 0.5 * t - 0.005 * t * t + wobble)
            })
            .collect();

        let predicted = CountryPredictor::default().predict(&samples, 2005).unwrap();
        let observed = samples.iter().find(|(y, _)| *y == 2005).unwrap().1;
        assert!((predicted - observed).abs() < 1.0);
    }

    #[test]
    fn unbounded_extrapolation_is_allowed() {
        let samples: Vec<(i32, f64)> = (2000..2010).map(|y| (y, f64::from(y - 1900))).collect();
        let predicted = CountryPredictor::default().predict(&samples, 2100).unwrap();
        assert!(predicted > 100.0);
    }

    #[test]
    fn empty_series_is_missing() {
        assert_eq!(CountryPredictor::default().predict(&[], 2030), None);
    }

    #[test]
    fn degenerate_fit_falls_back() {
        let samples = vec![(2000, 70.0); 6];
        assert_eq!(CountryPredictor::default().predict(&samples, 2030), Some(70.0));
    }

    #[test]
    fn config_drives_thresholds() {
        let config = AppConfig {
            min_regression_samples: 3,
            polynomial_degree: 1,
            ..AppConfig::default()
        };
        let predictor = CountryPredictor::from_config(&config);
        let samples = vec![(2000, 70.0), (2001, 71.0), (2002, 72.0)];
        assert!((predictor.predict(&samples, 2010).unwrap() - 80.0).abs() < 1e-9);
    }
}
