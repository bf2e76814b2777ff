//! Country Ranking Module
//! Builds the per-year ranking table (observed or predicted), smooths it with
//! a trailing rolling mean and supports case-insensitive search.

use super::predictor::CountryPredictor;
use crate::data::LongTable;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Where the ranked values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingSource {
    Observed,
    Predicted,
}

/// A single row of the ranking table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    /// 1-based position after sorting.
    pub rank: usize,
    pub country: String,
    pub country_code: String,
    /// Smoothed life expectancy; `None` sorts last.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingTable {
    pub year: i32,
    pub source: RankingSource,
    pub entries: Vec<RankEntry>,
}

impl RankingTable {
    /// Rank every country for `year`.
    ///
    /// Years after `latest_observed_year` are predicted per country, one row per
    /// (country, code) in sorted key order. Other years rank every observed row
    /// of that year in table order, duplicates included.
    pub fn build(
        table: &LongTable,
        year: i32,
        latest_observed_year: i32,
        predictor: &CountryPredictor,
        window: usize,
    ) -> Self {
        if year > latest_observed_year {
            let keys: BTreeSet<(String, String)> = table
                .records()
                .iter()
                .map(|r| (r.country.clone(), r.country_code.clone()))
                .collect();

            let rows: Vec<(String, String, Option<f64>)> = keys
                .into_par_iter()
                .map(|(country, code)| {
                    let series = table.country_series(&country);
                    let value = predictor.predict(&series, year);
                    (country, code, value)
                })
                .collect();

            log::debug!("Predicted {} countries for {}", rows.len(), year);
            Self::from_rows(year, RankingSource::Predicted, rows, window)
        } else {
            let rows = table
                .records()
                .iter()
                .filter(|r| r.year == year)
                .map(|r| {
                    (
                        r.country.clone(),
                        r.country_code.clone(),
                        Some(r.life_expectancy),
                    )
                })
                .collect();
            Self::from_rows(year, RankingSource::Observed, rows, window)
        }
    }

    /// Smooth in the given order, then sort descending and assign ranks from 1.
    pub fn from_rows(
        year: i32,
        source: RankingSource,
        rows: Vec<(String, String, Option<f64>)>,
        window: usize,
    ) -> Self {
        let raw: Vec<Option<f64>> = rows.iter().map(|r| r.2).collect();
        let smoothed = rolling_mean(&raw, window, 1);

        let mut entries: Vec<RankEntry> = rows
            .into_iter()
            .zip(smoothed)
            .map(|((country, country_code, _), value)| RankEntry {
                rank: 0,
                country,
                country_code,
                value,
            })
            .collect();

        entries.sort_by(|a, b| descending(a.value, b.value));
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.rank = i + 1;
        }

        Self {
            year,
            source,
            entries,
        }
    }

    /// First entry (in rank order) whose country contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Option<&RankEntry> {
        if query.is_empty() {
            return None;
        }
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.country.to_lowercase().contains(&needle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Present values first, largest to smallest.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Trailing mean over the last `window` positions, skipping missing values.
/// A position with fewer than `min_periods` present values is `None`.
pub fn rolling_mean(values: &[Option<f64>], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let present: Vec<f64> = values[start..=i].iter().flatten().copied().collect();
            if present.is_empty() || present.len() < min_periods {
                None
            } else {
                Some(present.iter().sum::<f64>() / present.len() as f64)
            }
        })
        .collect()
}
