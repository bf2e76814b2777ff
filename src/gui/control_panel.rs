//! Control Panel Widget
//! Left side panel with the data source and every dashboard input.

use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

pub const FUTURE_YEAR_RANGE: std::ops::RangeInclusive<i32> = 2025..=2100;
pub const FUTURE_YEAR_STEP: f64 = 5.0;
pub const RANKING_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1990..=2040;

/// Widget state the dashboard view is computed from.
#[derive(Clone, Debug, PartialEq)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub country: String,
    pub future_year: i32,
    pub ranking_year: i32,
    pub search_query: String,
    pub compare_first: String,
    pub compare_second: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            country: String::new(),
            future_year: 2030,
            ranking_year: 2019,
            search_query: String::new(),
            compare_first: String::new(),
            compare_second: String::new(),
        }
    }
}

/// Left side control panel with file selection and dashboard inputs.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub countries: Vec<String>,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            countries: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the country list after a dataset load and reset selections
    /// that no longer exist (first and second country by default).
    pub fn update_countries(&mut self, countries: Vec<String>) {
        let pick = |current: &str, fallback: usize| -> String {
            if countries.iter().any(|c| c == current) {
                current.to_string()
            } else {
                countries.get(fallback).or(countries.first()).cloned().unwrap_or_default()
            }
        };
        self.settings.country = pick(&self.settings.country, 0);
        self.settings.compare_first = pick(&self.settings.compare_first, 0);
        self.settings.compare_second = pick(&self.settings.compare_second, 1);
        self.export_enabled = !countries.is_empty();
        self.countries = countries;
    }

    fn country_combo(ui: &mut egui::Ui, id: &str, label: &str, countries: &[String], selected: &mut String) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.add_sized([110.0, 20.0], egui::Label::new(label));
            ComboBox::from_id_salt(id)
                .width(170.0)
                .selected_text(selected.as_str())
                .show_ui(ui, |ui| {
                    for country in countries {
                        if ui.selectable_label(selected == country, country).clicked() && selected != country {
                            *selected = country.clone();
                            changed = true;
                        }
                    }
                });
        });
        changed
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let mut changed = false;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 Life Expectancy")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Dashboard").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Country Trend Section =====
        ui.label(RichText::new("📈 Country Trend").size(14.0).strong());
        ui.add_space(5.0);
        changed |= Self::country_combo(
            ui,
            "country",
            "Country:",
            &self.countries,
            &mut self.settings.country,
        );
        ui.horizontal(|ui| {
            ui.add_sized([110.0, 20.0], egui::Label::new("Future Year:"));
            changed |= ui
                .add(egui::Slider::new(&mut self.settings.future_year, FUTURE_YEAR_RANGE).step_by(FUTURE_YEAR_STEP))
                .changed();
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Ranking Section =====
        ui.label(RichText::new("🏆 Rankings").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add_sized([110.0, 20.0], egui::Label::new("Year:"));
            changed |= ui
                .add(egui::Slider::new(&mut self.settings.ranking_year, RANKING_YEAR_RANGE))
                .changed();
        });
        ui.horizontal(|ui| {
            ui.add_sized([110.0, 20.0], egui::Label::new("Search:"));
            changed |= ui
                .add(egui::TextEdit::singleline(&mut self.settings.search_query).hint_text("Country name"))
                .changed();
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Comparison Section =====
        ui.label(RichText::new("⚖ Compare").size(14.0).strong());
        ui.add_space(5.0);
        changed |= Self::country_combo(
            ui,
            "compare_first",
            "First Country:",
            &self.countries,
            &mut self.settings.compare_first,
        );
        changed |= Self::country_combo(
            ui,
            "compare_second",
            "Second Country:",
            &self.countries,
            &mut self.settings.compare_second,
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Trend PNG").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") || self.status.contains("exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        if changed && action == ControlPanelAction::None {
            action = ControlPanelAction::SettingsChanged;
        }
        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    SettingsChanged,
    ExportPng,
}
