//! Life Expectancy Dashboard - interactive desktop viewer

use eframe::egui;
use life_expectancy::config::AppConfig;
use life_expectancy::gui::LifeExpectancyApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("{}; falling back to defaults", e);
        AppConfig::default()
    });

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Life Expectancy Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Life Expectancy Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(LifeExpectancyApp::new(cc, config)))),
    )
}
