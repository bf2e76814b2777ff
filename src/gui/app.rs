//! Life Expectancy Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::AppConfig;
use crate::data::{DataLoader, DataReshaper, LongTable};
use crate::gui::dashboard::DashboardView;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(f32, String),
    Complete {
        rows: usize,
        table: LongTable,
        path: PathBuf,
    },
    Error(String),
}

/// Main application window.
pub struct LifeExpectancyApp {
    config: AppConfig,
    table: Option<LongTable>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl LifeExpectancyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            config,
            table: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };

        let default_path = app.config.dataset_path.clone();
        if default_path.exists() {
            app.start_loading(default_path);
        } else {
            log::info!(
                "Default dataset {} not found, waiting for a file",
                default_path.display()
            );
        }
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Read and reshape the CSV in a background thread
    fn start_loading(&mut self, path: PathBuf) {
        self.chart_viewer.clear();
        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel.set_progress(0.0, "Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(10.0, "Reading CSV file...".to_string()));

            let df = match DataLoader::read_csv(&path) {
                Ok(df) => df,
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                    return;
                }
            };

            let _ = tx.send(LoadResult::Progress(50.0, "Reshaping data...".to_string()));

            match DataReshaper::reshape(&df) {
                Ok(table) => {
                    let _ = tx.send(LoadResult::Complete {
                        rows: df.height(),
                        table,
                        path,
                    });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    LoadResult::Complete { rows, table, path } => {
                        log::info!("Loaded {}", path.display());
                        self.control_panel.update_countries(table.countries());
                        self.control_panel.set_progress(
                            100.0,
                            &format!(
                                "Loaded {} rows, {} countries ({} long rows)",
                                rows,
                                self.control_panel.countries.len(),
                                table.len()
                            ),
                        );
                        self.table = Some(table);
                        self.refresh_view();
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::error!("Loading failed: {}", error);
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Recompute the whole dashboard from the current settings
    fn refresh_view(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        let view = DashboardView::compute(table, &self.control_panel.settings, &self.config);
        self.chart_viewer.set_view(view);
    }

    /// Save the trend chart as PNG
    fn handle_export_png(&mut self) {
        let Some(view) = &self.chart_viewer.view else {
            self.control_panel.set_progress(0.0, "No chart to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}_trend.png", view.trend.country))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::render_to_file(&view.trend_static_chart(), &output_path, 1200, 800) {
            Ok(()) => {
                self.control_panel
                    .set_progress(100.0, &format!("Chart exported: {}", output_path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for LifeExpectancyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(320.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::SettingsChanged => self.refresh_view(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
