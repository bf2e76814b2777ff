//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::stats::{RankingSource, RankingTable, WorldSnapshot};
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};

pub const TREND_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const PREDICTION_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red

/// Colors for the two compared countries
pub const COMPARE_COLORS: [Color32; 2] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(243, 156, 18), // Orange
];

/// Plasma color scale stops (low to high)
const PLASMA: [(f32, [u8; 3]); 5] = [
    (0.0, [13, 8, 135]),
    (0.25, [126, 3, 168]),
    (0.5, [204, 71, 120]),
    (0.75, [248, 149, 64]),
    (1.0, [240, 249, 33]),
];

const TILE_SIZE: egui::Vec2 = egui::vec2(46.0, 28.0);

/// A named yearly series ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub country: String,
    pub points: Vec<(i32, f64)>,
}

impl TrendSeries {
    fn plot_points(&self) -> PlotPoints {
        self.points
            .iter()
            .map(|&(year, value)| [f64::from(year), value])
            .collect()
    }
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Interpolate the plasma scale at `t` in [0, 1].
    pub fn plasma_color(t: f64) -> Color32 {
        let t = t.clamp(0.0, 1.0) as f32;
        for pair in PLASMA.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let f = (t - t0) / (t1 - t0);
                let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * f).round() as u8;
                return Color32::from_rgb(mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2]));
            }
        }
        let [r, g, b] = PLASMA[PLASMA.len() - 1].1;
        Color32::from_rgb(r, g, b)
    }

    /// Line chart of one country's history, with an optional predicted point
    /// joined to the last observation by a dashed segment.
    pub fn draw_trend_chart(ui: &mut egui::Ui, trend: &TrendSeries, prediction: Option<(i32, f64)>) {
        Plot::new(format!("trend_{}", trend.country))
            .height(280.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Life Expectancy")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(trend.plot_points())
                        .color(TREND_COLOR)
                        .width(2.0)
                        .name(&trend.country),
                );

                if let (Some((year, value)), Some(&(last_year, last_value))) =
                    (prediction, trend.points.last())
                {
                    let segment: PlotPoints = vec![
                        [f64::from(last_year), last_value],
                        [f64::from(year), value],
                    ]
                    .into();
                    plot_ui.line(
                        Line::new(segment)
                            .color(PREDICTION_COLOR)
                            .style(LineStyle::dashed_loose())
                            .width(1.5)
                            .name("Prediction"),
                    );
                    plot_ui.points(
                        Points::new(vec![[f64::from(year), value]])
                            .radius(5.0)
                            .color(PREDICTION_COLOR)
                            .name(format!("{}: {:.2}", year, value)),
                    );
                }
            });
    }

    /// Two countries overlaid on one chart.
    pub fn draw_comparison_chart(ui: &mut egui::Ui, first: &TrendSeries, second: &TrendSeries) {
        Plot::new("comparison")
            .height(280.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Life Expectancy")
            .show(ui, |plot_ui| {
                for (series, color) in [first, second].into_iter().zip(COMPARE_COLORS) {
                    plot_ui.line(
                        Line::new(series.plot_points())
                            .color(color)
                            .width(2.0)
                            .name(&series.country),
                    );
                }
            });
    }

    /// Ranking table with the value column titled by year.
    pub fn draw_ranking_table(ui: &mut egui::Ui, ranking: &RankingTable) {
        let suffix = match ranking.source {
            RankingSource::Observed => "",
            RankingSource::Predicted => " (predicted)",
        };

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                if ranking.is_empty() {
                    ui.label(RichText::new("No data for this year").color(Color32::GRAY));
                    return;
                }

                ScrollArea::vertical()
                    .id_salt("ranking_scroll")
                    .max_height(320.0)
                    .show(ui, |ui| {
                        egui::Grid::new("ranking_table")
                            .striped(true)
                            .min_col_width(60.0)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                ui.label(RichText::new("Rank").strong());
                                ui.label(RichText::new("Country").strong());
                                ui.label(
                                    RichText::new(format!(
                                        "Life Expectancy in {}{}",
                                        ranking.year, suffix
                                    ))
                                    .strong(),
                                );
                                ui.end_row();

                                for entry in &ranking.entries {
                                    ui.label(entry.rank.to_string());
                                    ui.label(&entry.country);
                                    match entry.value {
                                        Some(v) => ui.label(format!("{:.2}", v)),
                                        None => ui.label("-"),
                                    };
                                    ui.end_row();
                                }
                            });
                    });
            });
    }

    /// Tile map of the snapshot: one colored tile per country code, grouped by
    /// region, with a color bar underneath.
    pub fn draw_world_snapshot(ui: &mut egui::Ui, snapshot: &WorldSnapshot) {
        for (region, entries) in snapshot.by_region() {
            ui.label(RichText::new(region).size(12.0).strong());
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(3.0, 3.0);
                for entry in entries {
                    let t = snapshot.scale(entry.value);
                    let fill = Self::plasma_color(t);
                    let text_color = if t > 0.6 {
                        Color32::BLACK
                    } else {
                        Color32::WHITE
                    };

                    let (rect, response) = ui.allocate_exact_size(TILE_SIZE, egui::Sense::hover());
                    ui.painter().rect_filled(rect, 3.0, fill);
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        &entry.country_code,
                        egui::FontId::proportional(11.0),
                        text_color,
                    );
                    response.on_hover_text(format!("{}: {:.2}", entry.country, entry.value));
                }
            });
            ui.add_space(6.0);
        }

        ui.add_space(4.0);
        Self::draw_color_bar(ui, snapshot.min, snapshot.max);
    }

    fn draw_color_bar(ui: &mut egui::Ui, min: f64, max: f64) {
        ui.horizontal(|ui| {
            ui.label(format!("{:.1}", min));
            let (rect, _) = ui.allocate_exact_size(egui::vec2(240.0, 14.0), egui::Sense::hover());
            let steps = 48;
            let step_width = rect.width() / steps as f32;
            for i in 0..steps {
                let x = rect.left() + i as f32 * step_width;
                let cell = egui::Rect::from_min_size(
                    egui::pos2(x, rect.top()),
                    egui::vec2(step_width + 0.5, rect.height()),
                );
                let t = i as f64 / (steps - 1) as f64;
                ui.painter().rect_filled(cell, 0.0, Self::plasma_color(t));
            }
            ui.label(format!("{:.1}", max));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plasma_endpoints_and_midpoint() {
        assert_eq!(ChartPlotter::plasma_color(0.0), Color32::from_rgb(13, 8, 135));
        assert_eq!(ChartPlotter::plasma_color(0.5), Color32::from_rgb(204, 71, 120));
        assert_eq!(ChartPlotter::plasma_color(1.0), Color32::from_rgb(240, 249, 33));
        assert_eq!(ChartPlotter::plasma_color(7.0), ChartPlotter::plasma_color(1.0));
        assert_eq!(ChartPlotter::plasma_color(-1.0), ChartPlotter::plasma_color(0.0));
    }
}
