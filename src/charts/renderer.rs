//! Static Chart Renderer
//! Draws "actual vs. predicted" charts with plotters and encodes them to PNG.
//!
//! Layout:
//! 1. Title centered at the top
//! 2. Actual observations as filled circles
//! 3. Model output as a dashed line
//! 4. Legend in the upper-left corner

use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("Nothing to draw")]
    Empty,
}

fn draw_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// What a static chart shows: scattered observations and a dashed model line.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticChart {
    pub title: String,
    pub points_label: String,
    pub points: Vec<(f64, f64)>,
    pub line_label: String,
    pub line: Vec<(f64, f64)>,
}

impl StaticChart {
    /// X and Y ranges covering every point, padded so markers are not clipped.
    pub fn axis_ranges(&self) -> Option<((f64, f64), (f64, f64))> {
        let all = self.points.iter().chain(self.line.iter());
        let (x_min, x_max, y_min, y_max) = all.fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
        );
        if !x_min.is_finite() || !y_min.is_finite() {
            return None;
        }

        let y_pad = ((y_max - y_min) * 0.1).max(1.0);
        Some(((x_min - 1.0, x_max + 1.0), (y_min - y_pad, y_max + y_pad)))
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render to an in-memory PNG.
    pub fn render_to_png_bytes(
        chart: &StaticChart,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(&root, chart)?;
        }

        let bitmap = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Draw("bitmap buffer size mismatch".to_string()))?;
        let mut png = Vec::new();
        bitmap.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// Render straight to a PNG file.
    pub fn render_to_file(
        chart: &StaticChart,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let png = Self::render_to_png_bytes(chart, width, height)?;
        std::fs::write(path, png)?;
        log::info!("Chart written to {}", path.display());
        Ok(())
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &StaticChart,
    ) -> Result<(), RenderError> {
        let ((x0, x1), (y0, y1)) = chart.axis_ranges().ok_or(RenderError::Empty)?;

        root.fill(&WHITE).map_err(draw_err)?;

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(draw_err)?;

        ctx.configure_mesh()
            .x_desc("Year")
            .y_desc("Life Expectancy")
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.1}", y))
            .draw()
            .map_err(draw_err)?;

        ctx.draw_series(
            chart
                .points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 5, BLUE.filled())),
        )
        .map_err(draw_err)?
        .label(chart.points_label.as_str())
        .legend(|(x, y)| Circle::new((x, y), 5, BLUE.filled()));

        if chart.line.len() > 1 {
            ctx.draw_series(DashedLineSeries::new(
                chart.line.iter().copied(),
                8,
                5,
                RED.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label(chart.line_label.as_str())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(points: Vec<(f64, f64)>, line: Vec<(f64, f64)>) -> StaticChart {
        StaticChart {
            title: "Test".to_string(),
            points_label: "Actual Data".to_string(),
            points,
            line_label: "Predicted Data".to_string(),
            line,
        }
    }

    #[test]
    fn axis_ranges_cover_points_and_line() {
        let c = chart(vec![(2000.0, 60.0), (2010.0, 70.0)], vec![(2020.0, 75.0)]);
        let ((x0, x1), (y0, y1)) = c.axis_ranges().unwrap();
        assert_eq!((x0, x1), (1999.0, 2021.0));
        assert!((y0 - 58.5).abs() < 1e-9);
        assert!((y1 - 76.5).abs() < 1e-9);
    }

    #[test]
    fn flat_data_still_gets_vertical_room() {
        let c = chart(vec![(2000.0, 70.0), (2001.0, 70.0)], vec![]);
        let (_, (y0, y1)) = c.axis_ranges().unwrap();
        assert_eq!((y0, y1), (69.0, 71.0));
    }

    #[test]
    fn empty_chart_is_rejected() {
        let c = chart(vec![], vec![]);
        assert!(c.axis_ranges().is_none());
        assert!(matches!(
            StaticChartRenderer::render_to_png_bytes(&c, 64, 48),
            Err(RenderError::Empty)
        ));
    }
}
