//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, TrendSeries};
pub use renderer::{RenderError, StaticChart, StaticChartRenderer};
