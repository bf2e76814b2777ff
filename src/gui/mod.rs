//! GUI module - User interface components

mod app;
mod chart_viewer;
pub mod control_panel;
pub mod dashboard;

pub use app::LifeExpectancyApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction, UserSettings};
pub use dashboard::{DashboardView, PredictionOutcome, SearchOutcome};
