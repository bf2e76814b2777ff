//! Dashboard view model: everything the chart viewer shows, recomputed from
//! scratch on each settings change.

use crate::charts::{StaticChart, TrendSeries};
use crate::config::AppConfig;
use crate::data::LongTable;
use crate::gui::control_panel::UserSettings;
use crate::stats::{CountryPredictor, RankingTable, WorldSnapshot};

/// Future value for the selected country, or why there is none.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Predicted { year: i32, value: f64 },
    InsufficientData { samples: usize },
}

/// Result of the ranking search box.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Idle,
    Found {
        query: String,
        year: i32,
        rank: usize,
        value: Option<f64>,
    },
    NotFound,
}

impl SearchOutcome {
    pub fn message(&self) -> Option<String> {
        match self {
            SearchOutcome::Idle => None,
            SearchOutcome::Found {
                query,
                year,
                rank,
                value,
            } => Some(match value {
                Some(v) => format!("{} Rank in {}: {} (Life Expectancy: {:.2})", query, year, rank, v),
                None => format!("{} Rank in {}: {} (Life Expectancy: n/a)", query, year, rank),
            }),
            SearchOutcome::NotFound => Some("Country not found!".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub trend: TrendSeries,
    pub prediction: PredictionOutcome,
    pub ranking: RankingTable,
    pub search: SearchOutcome,
    pub comparison: (TrendSeries, TrendSeries),
    pub snapshot: Option<WorldSnapshot>,
}

impl DashboardView {
    pub fn compute(table: &LongTable, settings: &UserSettings, config: &AppConfig) -> Self {
        let predictor = CountryPredictor::from_config(config);
        let trend = trend_for(table, &settings.country);

        let prediction = if predictor.can_regress(&trend.points) {
            match predictor.predict(&trend.points, settings.future_year) {
                Some(value) => PredictionOutcome::Predicted {
                    year: settings.future_year,
                    value,
                },
                None => PredictionOutcome::InsufficientData { samples: 0 },
            }
        } else {
            PredictionOutcome::InsufficientData {
                samples: trend.points.len(),
            }
        };

        let ranking = RankingTable::build(
            table,
            settings.ranking_year,
            config.latest_observed_year,
            &predictor,
            config.rolling_window,
        );

        let search = if settings.search_query.is_empty() {
            SearchOutcome::Idle
        } else {
            match ranking.search(&settings.search_query) {
                Some(entry) => SearchOutcome::Found {
                    query: settings.search_query.clone(),
                    year: ranking.year,
                    rank: entry.rank,
                    value: entry.value,
                },
                None => SearchOutcome::NotFound,
            }
        };

        let comparison = (
            trend_for(table, &settings.compare_first),
            trend_for(table, &settings.compare_second),
        );

        Self {
            trend,
            prediction,
            ranking,
            search,
            comparison,
            snapshot: WorldSnapshot::latest(table),
        }
    }

    /// Static version of the trend chart: history as points, the prediction as
    /// a dashed extension from the last observation.
    pub fn trend_static_chart(&self) -> StaticChart {
        let points: Vec<(f64, f64)> = self
            .trend
            .points
            .iter()
            .map(|&(year, value)| (f64::from(year), value))
            .collect();

        let line = match (&self.prediction, points.last()) {
            (PredictionOutcome::Predicted { year, value }, Some(&last)) => {
                vec![last, (f64::from(*year), *value)]
            }
            _ => Vec::new(),
        };

        StaticChart {
            title: format!("Life Expectancy Trend in {}", self.trend.country),
            points_label: "Observed".to_string(),
            points,
            line_label: "Predicted".to_string(),
            line,
        }
    }
}

fn trend_for(table: &LongTable, country: &str) -> TrendSeries {
    TrendSeries {
        country: country.to_string(),
        points: table.country_series(country),
    }
}
