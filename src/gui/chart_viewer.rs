//! Chart Viewer Widget
//! Right side scrollable panel with the trend, ranking, comparison and world
//! sections of the dashboard.

use crate::charts::ChartPlotter;
use crate::gui::dashboard::{DashboardView, PredictionOutcome, SearchOutcome};
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 18.0;

/// Scrollable dashboard display area.
#[derive(Default)]
pub struct ChartViewer {
    pub view: Option<DashboardView>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.view = None;
    }

    pub fn set_view(&mut self, view: DashboardView) {
        self.view = Some(view);
    }

    fn section_header(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(18.0).strong());
        ui.add_space(6.0);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Human Life Expectancy Dashboard");
                ui.add_space(SECTION_SPACING);

                // ===== Trend =====
                Self::section_header(
                    ui,
                    &format!("Life Expectancy Trend for {}", view.trend.country),
                );
                let prediction = match view.prediction {
                    PredictionOutcome::Predicted { year, value } => Some((year, value)),
                    PredictionOutcome::InsufficientData { .. } => None,
                };
                ChartPlotter::draw_trend_chart(ui, &view.trend, prediction);

                ui.add_space(6.0);
                match &view.prediction {
                    PredictionOutcome::Predicted { year, value } => {
                        ui.label(
                            RichText::new(format!(
                                "Predicted Life Expectancy in {}: {:.2} years",
                                year, value
                            ))
                            .strong(),
                        );
                    }
                    PredictionOutcome::InsufficientData { samples } => {
                        ui.label(
                            RichText::new(format!(
                                "Not enough data to predict ({} yearly samples)",
                                samples
                            ))
                            .color(Color32::GRAY),
                        );
                    }
                }
                ui.add_space(SECTION_SPACING);
                ui.separator();

                // ===== Ranking =====
                Self::section_header(ui, "Country Rankings by Life Expectancy");
                if let Some(message) = view.search.message() {
                    let color = match view.search {
                        SearchOutcome::NotFound => Color32::from_rgb(220, 53, 69),
                        _ => Color32::from_rgb(40, 167, 69),
                    };
                    ui.label(RichText::new(message).strong().color(color));
                    ui.add_space(4.0);
                }
                ChartPlotter::draw_ranking_table(ui, &view.ranking);
                ui.add_space(SECTION_SPACING);
                ui.separator();

                // ===== Comparison =====
                Self::section_header(ui, "Compare Two Countries");
                ChartPlotter::draw_comparison_chart(ui, &view.comparison.0, &view.comparison.1);
                ui.add_space(SECTION_SPACING);
                ui.separator();

                // ===== World =====
                match &view.snapshot {
                    Some(snapshot) => {
                        Self::section_header(
                            ui,
                            &format!("Life Expectancy Across the World ({})", snapshot.year),
                        );
                        ChartPlotter::draw_world_snapshot(ui, snapshot);
                    }
                    None => {
                        Self::section_header(ui, "Life Expectancy Across the World");
                        ui.label(RichText::new("No data").color(Color32::GRAY));
                    }
                }
            });
    }
}
