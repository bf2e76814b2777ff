//! Stats module - regression, prediction, ranking and evaluation

mod metrics;
mod predictor;
mod ranking;
mod regression;
mod snapshot;

pub use metrics::{train_test_split, HoldoutEvaluation, RegressionMetrics, DEFAULT_SPLIT_SEED};
pub use predictor::CountryPredictor;
pub use ranking::{rolling_mean, RankEntry, RankingSource, RankingTable};
pub use regression::{PolynomialRegression, RegressionError};
pub use snapshot::{SnapshotEntry, WorldSnapshot};
