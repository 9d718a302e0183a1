//! SVG overlay of the display-scaled prior, likelihood and posterior.

use std::path::Path;

use dp_common::{Error, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use super::FigureLabels;
use crate::inference::DisplayCurves;
use crate::logging::event_names;

const FIGURE_SIZE: (u32, u32) = (1000, 800);
const ORANGE: RGBColor = RGBColor(230, 120, 20);

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Render the figure into an SVG document.
///
/// Each call opens a fresh backend, so figures never accumulate.
pub fn render_svg(curves: &DisplayCurves, labels: &FigureLabels) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, FIGURE_SIZE).into_drawing_area();
        draw(&root, curves, labels).map_err(|e| Error::Render(e.to_string()))?;
        root.present().map_err(|e| Error::Render(e.to_string()))?;
    }
    Ok(buffer)
}

/// Render and write the figure to `path`.
pub fn write_svg(path: &Path, curves: &DisplayCurves, labels: &FigureLabels) -> Result<()> {
    let svg = render_svg(curves, labels)?;
    std::fs::write(path, svg.as_bytes()).map_err(|e| {
        Error::Render(format!("cannot write plot to {}: {}", path.display(), e))
    })?;
    tracing::info!(
        event = event_names::RENDER_PLOT_WRITTEN,
        path = %path.display(),
        bytes = svg.len(),
        "plot written"
    );
    Ok(())
}

fn draw(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    curves: &DisplayCurves,
    labels: &FigureLabels,
) -> DrawResult {
    root.fill(&WHITE)?;
    let titled = root.titled(&labels.title, ("sans-serif", 24))?;

    let mut chart = ChartBuilder::on(&titled)
        .caption(&labels.subtitle, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..1.05f64)?;

    chart
        .configure_mesh()
        .x_desc(labels.x_label.as_str())
        .y_desc("scaled density")
        .x_labels(11)
        .draw()?;

    // Prior dashed, likelihood short-dashed, posterior thick solid.
    let prior_style = BLUE.stroke_width(2);
    chart
        .draw_series(DashedLineSeries::new(
            series_points(&curves.grid, &curves.prior),
            12,
            6,
            prior_style,
        ))?
        .label(labels.prior_label.as_str())
        .legend(move |(x, y)| {
            EmptyElement::at((x, y))
                + PathElement::new(vec![(0, 0), (9, 0)], prior_style)
                + PathElement::new(vec![(13, 0), (22, 0)], prior_style)
        });

    let likelihood_style = ORANGE.stroke_width(2);
    chart
        .draw_series(DashedLineSeries::new(
            series_points(&curves.grid, &curves.likelihood),
            4,
            4,
            likelihood_style,
        ))?
        .label("Likelihood (scaled)")
        .legend(move |(x, y)| {
            EmptyElement::at((x, y))
                + PathElement::new(vec![(0, 0), (4, 0)], likelihood_style)
                + PathElement::new(vec![(9, 0), (13, 0)], likelihood_style)
        });

    let posterior_style = RED.stroke_width(4);
    chart
        .draw_series(LineSeries::new(
            series_points(&curves.grid, &curves.posterior),
            posterior_style,
        ))?
        .label("Normalized Posterior")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 22, y)], posterior_style));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn series_points(grid: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    grid.iter().copied().zip(values.iter().copied()).collect()
}
