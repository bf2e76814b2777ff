//! CSV Data Loader Module
//! Handles CSV file loading using Polars. Every cell is read as text so the
//! reshaper decides what counts as a number.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Reads the wide dataset from disk.
pub struct DataLoader;

impl DataLoader {
    /// Read a CSV file with all columns as strings.
    ///
    /// Schema inference is disabled (zero rows sampled) so that a stray
    /// "n/a" in a year column never turns a whole column into an error.
    pub fn read_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        log::info!(
            "Read {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_every_column_as_text() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Country,Country_Code,Level,Region,1990,1991").unwrap();
        writeln!(file, "Chad,TCD,National,Africa,47.2,n/a").unwrap();
        writeln!(file, "Peru,PER,National,America,66.0,66.4").unwrap();
        file.flush().unwrap();

        let df = DataLoader::read_csv(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert!(df
            .get_columns()
            .iter()
            .all(|c| c.dtype() == &DataType::String));
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Country", "Country_Code", "Level", "Region", "1990", "1991"]
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DataLoader::read_csv(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(LoaderError::CsvError(_))));
    }
}
