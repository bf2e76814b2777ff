//! Data Reshaper Module
//! Turns the wide table (one column per year) into the cleaned long table.

use super::model::{
    LongTable, Record, COUNTRY_CODE_COL, COUNTRY_COL, ID_COLUMNS, LEVEL_COL, REGION_COL,
    VALUE_COL, YEAR_COL,
};
use polars::prelude::*;
use statrs::statistics::{Data, Median};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReshapeError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing identifier column: {0}")]
    MissingColumn(String),
}

/// A melted row before imputation; coercion failures are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeltedRow {
    pub country: String,
    pub country_code: String,
    pub level: String,
    pub region: String,
    pub year: Option<i32>,
    pub life_expectancy: Option<f64>,
}

/// Handles the wide-to-long transformation and missing-value policy.
pub struct DataReshaper;

impl DataReshaper {
    /// Full pipeline: melt, per-country median imputation, drop what is still
    /// missing, then min-max normalize.
    pub fn reshape(df: &DataFrame) -> Result<LongTable, ReshapeError> {
        let mut rows = Self::melt(df)?;
        let melted = rows.len();
        Self::impute_country_median(&mut rows);

        let mut records: Vec<Record> = rows
            .into_iter()
            .filter_map(|row| {
                Some(Record {
                    year: row.year?,
                    life_expectancy: row.life_expectancy?,
                    country: row.country,
                    country_code: row.country_code,
                    level: row.level,
                    region: row.region,
                    normalized: 0.0,
                })
            })
            .collect();

        Self::normalize(&mut records);

        log::info!(
            "Reshaped {} wide rows into {} long rows ({} dropped as missing)",
            df.height(),
            records.len(),
            melted - records.len()
        );
        Ok(LongTable::new(records))
    }

    /// Unpivot every non-identifier column into (Year, Life Expectancy) rows.
    ///
    /// Rows come out year-major: all countries for the first year column, then
    /// all countries for the next one.
    pub fn melt(df: &DataFrame) -> Result<Vec<MeltedRow>, ReshapeError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for id in ID_COLUMNS {
            if !names.iter().any(|n| n == id) {
                return Err(ReshapeError::MissingColumn(id.to_string()));
            }
        }

        let country = Self::text_column(df, COUNTRY_COL)?;
        let country_code = Self::text_column(df, COUNTRY_CODE_COL)?;
        let level = Self::text_column(df, LEVEL_COL)?;
        let region = Self::text_column(df, REGION_COL)?;

        let year_cols: Vec<&String> = names
            .iter()
            .filter(|n| !ID_COLUMNS.contains(&n.as_str()))
            .collect();

        let mut rows = Vec::with_capacity(year_cols.len() * df.height());
        for year_col in year_cols {
            let year = Self::parse_year(year_col);
            let values = Self::numeric_column(df, year_col)?;

            for (i, value) in values.into_iter().enumerate() {
                rows.push(MeltedRow {
                    country: country[i].clone(),
                    country_code: country_code[i].clone(),
                    level: level[i].clone(),
                    region: region[i].clone(),
                    year,
                    life_expectancy: value,
                });
            }
        }

        Ok(rows)
    }

    /// Fill missing values with the median of the same country's present values.
    /// Countries with no present value stay missing.
    pub fn impute_country_median(rows: &mut [MeltedRow]) {
        let mut present: HashMap<&str, Vec<f64>> = HashMap::new();
        for row in rows.iter() {
            if let Some(v) = row.life_expectancy {
                present.entry(row.country.as_str()).or_default().push(v);
            }
        }

        let medians: HashMap<String, f64> = present
            .into_iter()
            .map(|(country, values)| (country.to_string(), Data::new(values).median()))
            .collect();

        let mut filled = 0usize;
        for row in rows.iter_mut().filter(|r| r.life_expectancy.is_none()) {
            if let Some(&median) = medians.get(&row.country) {
                row.life_expectancy = Some(median);
                filled += 1;
            }
        }
        log::debug!("Imputed {} missing values with country medians", filled);
    }

    /// Min-max scale life expectancy into [0, 1]. Constant data maps to 0.
    pub fn normalize(records: &mut [Record]) {
        let (min, max) = records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), r| (lo.min(r.life_expectancy), hi.max(r.life_expectancy)),
        );
        let span = max - min;
        for r in records.iter_mut() {
            r.normalized = if span > 0.0 {
                (r.life_expectancy - min) / span
            } else {
                0.0
            };
        }
    }

    /// Filter a long-format DataFrame down to one country.
    pub fn filter_by_country(df: &DataFrame, country: &str) -> Result<DataFrame, ReshapeError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(COUNTRY_COL).eq(lit(country)))
            .collect()?;
        Ok(filtered)
    }

    /// Raw (Year, Life Expectancy) rows for one country from a long DataFrame,
    /// in table order and without collapsing duplicates.
    pub fn country_samples(df: &DataFrame, country: &str) -> Result<Vec<(i32, f64)>, ReshapeError> {
        let filtered = Self::filter_by_country(df, country)?;
        let years = filtered.column(YEAR_COL)?.cast(&DataType::Int32)?;
        let values = filtered.column(VALUE_COL)?.cast(&DataType::Float64)?;

        let samples = years
            .i32()?
            .into_iter()
            .zip(values.f64()?.into_iter())
            .filter_map(|(y, v)| Some((y?, v?)))
            .collect();
        Ok(samples)
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, ReshapeError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let values = column
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        Ok(values)
    }

    /// Coerce a year column to numbers. Surrounding whitespace is ignored;
    /// unparseable and non-finite cells become `None`.
    fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ReshapeError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let values = column
            .str()?
            .into_iter()
            .map(|v| {
                v.and_then(|s| s.trim().parse::<f64>().ok())
                    .filter(|x| x.is_finite())
            })
            .collect();
        Ok(values)
    }

    fn parse_year(header: &str) -> Option<i32> {
        let header = header.trim();
        header.parse::<i32>().ok().or_else(|| {
            header
                .parse::<f64>()
                .ok()
                .filter(|y| y.is_finite())
                .map(|y| y as i32)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_frame() -> DataFrame {
        df!(
            "Country" => ["Chad", "Peru"],
            "Country_Code" => ["TCD", "PER"],
            "Level" => ["National", "National"],
            "Region" => ["Africa", "America"],
            "1990" => [Some("47.0"), Some("66.0")],
            "1991" => [Some("n/a"), Some("66.5")],
            "1992" => [Some("49.0"), None]
        )
        .unwrap()
    }

    #[test]
    fn two_countries_by_three_years_gives_six_rows() {
        let table = DataReshaper::reshape(&wide_frame()).unwrap();
        assert_eq!(table.len(), 2 * 3);
    }

    #[test]
    fn melt_is_year_major_and_coerces_bad_cells() {
        let rows = DataReshaper::melt(&wide_frame()).unwrap();
        let order: Vec<(&str, Option<i32>)> = rows
            .iter()
            .map(|r| (r.country.as_str(), r.year))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Chad", Some(1990)),
                ("Peru", Some(1990)),
                ("Chad", Some(1991)),
                ("Peru", Some(1991)),
                ("Chad", Some(1992)),
                ("Peru", Some(1992)),
            ]
        );
        assert_eq!(rows[2].life_expectancy, None);
        assert_eq!(rows[5].life_expectancy, None);
        assert_eq!(rows[3].life_expectancy, Some(66.5));
    }

    #[test]
    fn padded_numbers_parse_and_infinities_are_missing() {
        let df = df!(
            "Country" => ["Chad", "Peru"],
            "Country_Code" => ["TCD", "PER"],
            "Level" => ["National", "National"],
            "Region" => ["Africa", "America"],
            "1990" => [" 47.0", "66.0"],
            "1991" => ["48.0 ", "-inf"],
            "1992" => ["inf", "NaN"]
        )
        .unwrap();

        let rows = DataReshaper::melt(&df).unwrap();
        assert_eq!(rows[0].life_expectancy, Some(47.0));
        assert_eq!(rows[2].life_expectancy, Some(48.0));
        assert_eq!(rows[3].life_expectancy, None);
        assert_eq!(rows[4].life_expectancy, None);
        assert_eq!(rows[5].life_expectancy, None);

        let table = DataReshaper::reshape(&df).unwrap();
        assert_eq!(
            table.country_series("Chad"),
            vec![(1990, 47.0), (1991, 48.0), (1992, 47.5)]
        );
        assert_eq!(table.country_series("Peru")[2], (1992, 66.0));
        assert!(table
            .records()
            .iter()
            .all(|r| (0.0..=1.0).contains(&r.normalized)));
    }

    #[test]
    fn identifier_cells_are_kept_as_written() {
        let df = df!(
            "Country" => [" Chad"],
            "Country_Code" => ["TCD"],
            "Level" => ["National"],
            "Region" => ["Africa"],
            "2000" => ["50.0"]
        )
        .unwrap();

        let table = DataReshaper::reshape(&df).unwrap();
        assert_eq!(table.countries(), vec![" Chad"]);
    }

    #[test]
    fn missing_values_take_country_median() {
        let table = DataReshaper::reshape(&wide_frame()).unwrap();
        // Chad: median of [47, 49] fills 1991; Peru: median of [66, 66.5] fills 1992
        assert_eq!(
            table.country_series("Chad"),
            vec![(1990, 47.0), (1991, 48.0), (1992, 49.0)]
        );
        assert_eq!(
            table.country_series("Peru"),
            vec![(1990, 66.0), (1991, 66.5), (1992, 66.25)]
        );
    }

    #[test]
    fn country_without_values_is_dropped() {
        let df = df!(
            "Country" => ["Chad", "Nowhere"],
            "Country_Code" => ["TCD", "NWH"],
            "Level" => ["National", "National"],
            "Region" => ["Africa", "None"],
            "2000" => [Some("50.0"), None],
            "2001" => [Some("51.0"), Some("x")]
        )
        .unwrap();

        let table = DataReshaper::reshape(&df).unwrap();
        assert_eq!(table.countries(), vec!["Chad"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn reshaping_recovers_original_pairs_per_country() {
        let df = df!(
            "Country" => ["Chad", "Peru", "Chad"],
            "Country_Code" => ["TCD", "PER", "TCD"],
            "Level" => ["National", "National", "National"],
            "Region" => ["Africa", "America", "Africa"],
            "2000" => ["50.0", "70.0", "52.0"],
            "2001" => ["51.0", "71.0", "53.0"]
        )
        .unwrap();

        let table = DataReshaper::reshape(&df).unwrap();
        assert_eq!(table.country_series("Peru"), vec![(2000, 70.0), (2001, 71.0)]);
        // Duplicate Chad rows collapse by averaging
        assert_eq!(table.country_series("Chad"), vec![(2000, 51.0), (2001, 52.0)]);
    }

    #[test]
    fn normalized_values_span_unit_interval() {
        let table = DataReshaper::reshape(&wide_frame()).unwrap();
        let normalized: Vec<f64> = table.records().iter().map(|r| r.normalized).collect();
        assert!(normalized.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(normalized.contains(&0.0));
        assert!(normalized.contains(&1.0));
    }

    #[test]
    fn missing_identifier_column_is_an_error() {
        let df = df!("Country" => ["Chad"], "2000" => ["50"]).unwrap();
        let err = DataReshaper::reshape(&df).unwrap_err();
        assert!(matches!(err, ReshapeError::MissingColumn(c) if c == "Country_Code"));
    }

    #[test]
    fn country_samples_come_from_the_long_frame() {
        let table = DataReshaper::reshape(&wide_frame()).unwrap();
        let df = table.to_dataframe().unwrap();

        let samples = DataReshaper::country_samples(&df, "Chad").unwrap();
        assert_eq!(samples, vec![(1990, 47.0), (1991, 48.0), (1992, 49.0)]);
        assert!(DataReshaper::country_samples(&df, "Mali").unwrap().is_empty());
    }
}
