//! Long-format record types shared by the reshaper, predictor and charts.

use polars::prelude::*;
use std::collections::{BTreeMap, HashSet};

/// Column names of the long table, in output order.
pub const COUNTRY_COL: &str = "Country";
pub const COUNTRY_CODE_COL: &str = "Country_Code";
pub const LEVEL_COL: &str = "Level";
pub const REGION_COL: &str = "Region";
pub const YEAR_COL: &str = "Year";
pub const VALUE_COL: &str = "Life Expectancy";
pub const NORMALIZED_COL: &str = "Life Expectancy Normalized";

/// Identifier columns of the wide input; every other column is a year.
pub const ID_COLUMNS: [&str; 4] = [COUNTRY_COL, COUNTRY_CODE_COL, LEVEL_COL, REGION_COL];

/// One (country, year) observation after reshaping and cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: String,
    pub country_code: String,
    pub level: String,
    pub region: String,
    pub year: i32,
    pub life_expectancy: f64,
    /// Min-max scaled life expectancy over the whole table, in [0, 1].
    pub normalized: f64,
}

/// The cleaned long table. Row order follows the melt: year-major.
#[derive(Debug, Clone, Default)]
pub struct LongTable {
    records: Vec<Record>,
}

impl LongTable {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique country names in first-seen order.
    pub fn countries(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.country.as_str()))
            .map(|r| r.country.clone())
            .collect()
    }

    /// Yearly series for one country, duplicate years averaged, sorted by year.
    pub fn country_series(&self, country: &str) -> Vec<(i32, f64)> {
        let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
        for r in self.records.iter().filter(|r| r.country == country) {
            let entry = by_year.entry(r.year).or_insert((0.0, 0));
            entry.0 += r.life_expectancy;
            entry.1 += 1;
        }
        by_year
            .into_iter()
            .map(|(year, (sum, n))| (year, sum / n as f64))
            .collect()
    }

    /// Most recent year present in the table.
    pub fn latest_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    /// Convert to a polars DataFrame with the long-table column layout.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let text = |field: fn(&Record) -> &String| -> Vec<String> {
            self.records.iter().map(|r| field(r).clone()).collect()
        };

        DataFrame::new(vec![
            Column::new(COUNTRY_COL.into(), text(|r| &r.country)),
            Column::new(COUNTRY_CODE_COL.into(), text(|r| &r.country_code)),
            Column::new(LEVEL_COL.into(), text(|r| &r.level)),
            Column::new(REGION_COL.into(), text(|r| &r.region)),
            Column::new(
                YEAR_COL.into(),
                self.records.iter().map(|r| r.year).collect::<Vec<i32>>(),
            ),
            Column::new(
                VALUE_COL.into(),
                self.records
                    .iter()
                    .map(|r| r.life_expectancy)
                    .collect::<Vec<f64>>(),
            ),
            Column::new(
                NORMALIZED_COL.into(),
                self.records.iter().map(|r| r.normalized).collect::<Vec<f64>>(),
            ),
        ])
    }
}

#[cfg(test)]
pub(crate) fn record(country: &str, year: i32, value: f64) -> Record {
    Record {
        country: country.to_string(),
        country_code: country.chars().take(3).collect::<String>().to_uppercase(),
        level: "National".to_string(),
        region: "Test".to_string(),
        year,
        life_expectancy: value,
        normalized: 0.0,
    }
}
