//! Non-interactive report: fit one country's history on a seeded 80/20 split,
//! print evaluation metrics and future predictions, and save a static plot.

use anyhow::{bail, Context, Result};
use life_expectancy::charts::{StaticChart, StaticChartRenderer};
use life_expectancy::config::AppConfig;
use life_expectancy::data::{DataLoader, DataReshaper};
use life_expectancy::stats::{HoldoutEvaluation, DEFAULT_SPLIT_SEED};

const TEST_FRACTION: f64 = 0.2;
const REPORT_DEGREE: usize = 1;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::from_env().context("loading configuration")?;

    let wide = DataLoader::read_csv(&config.dataset_path)
        .with_context(|| format!("reading {}", config.dataset_path.display()))?;
    let table = DataReshaper::reshape(&wide).context("reshaping dataset")?;
    let long = table.to_dataframe().context("building long table")?;

    let country = &config.report_country;
    let samples = DataReshaper::country_samples(&long, country)
        .with_context(|| format!("selecting {}", country))?;
    if samples.is_empty() {
        bail!("No data for country {:?}", country);
    }

    let eval = HoldoutEvaluation::run(&samples, REPORT_DEGREE, TEST_FRACTION, DEFAULT_SPLIT_SEED)
        .with_context(|| format!("fitting {} ({} samples)", country, samples.len()))?;

    println!("\nModel Performance Metrics:");
    println!("Mean Absolute Error (MAE): {:.2}", eval.metrics.mae);
    println!("Mean Squared Error (MSE): {:.2}", eval.metrics.mse);
    println!("R-squared (R2 Score): {:.2}", eval.metrics.r2);

    println!("\nPredicted Life Expectancy for Future Years:");
    for &year in &config.report_years {
        println!("Year {}: {:.2}", year, eval.model.predict(f64::from(year)));
    }

    let chart = StaticChart {
        title: format!("Life Expectancy Prediction for {}", country),
        points_label: "Actual Data".to_string(),
        points: eval
            .test
            .iter()
            .map(|&(year, value)| (f64::from(year), value))
            .collect(),
        line_label: "Predicted Data".to_string(),
        line: eval
            .test
            .iter()
            .zip(&eval.test_predicted)
            .map(|(&(year, _), &predicted)| (f64::from(year), predicted))
            .collect(),
    };

    StaticChartRenderer::render_to_file(&chart, &config.report_plot_path, 1000, 600)
        .context("rendering prediction plot")?;

    if let Err(e) = open::that(&config.report_plot_path) {
        log::warn!(
            "Could not open {}: {}",
            config.report_plot_path.display(),
            e
        );
    }

    Ok(())
}
