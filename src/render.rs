//! Rasterizes a [`Figure`] through plotters.
//!
//! Log axes are drawn in log10 space on a plain `f64` cartesian grid, with the
//! tick formatter mapping values back, so every cell shares one chart type.

use std::path::Path;

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::axes::{Axes, Line, Scale};
use crate::error::ToastError;
use crate::figure::{Figure, OutputFormat};
use crate::style::Dash;

pub fn render_file(figure: &Figure, path: &Path, format: OutputFormat) -> Result<(), ToastError> {
    let size = figure.size().pixels();
    match format {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_figure(&root, figure).map_err(render_error)?;
            root.present().map_err(render_error)?;
        }
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_figure(&root, figure).map_err(render_error)?;
            root.present().map_err(render_error)?;
        }
    }
    debug!("Figure written to {} ({:?}, {}x{})", path.display(), format, size.0, size.1);
    Ok(())
}

fn render_error<E: std::fmt::Display>(err: E) -> ToastError {
    ToastError::Render(err.to_string())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let cells = root.split_evenly(figure.shape());
    for (cell, axes) in cells.iter().zip(figure.all_axes()) {
        draw_axes(cell, axes)?;
    }
    Ok(())
}

fn draw_axes<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    axes: &Axes,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let ((x0, x1), (y0, y1)) = view_range(axes);

    let mut builder = ChartBuilder::on(area);
    builder.margin(10).x_label_area_size(35).y_label_area_size(50);
    if let Some(title) = axes.title() {
        builder.caption(title, ("sans-serif", 14).into_font());
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    let xscale = axes.xscale();
    let yscale = axes.yscale();
    let x_formatter = move |v: &f64| tick_label(*v, xscale);
    let y_formatter = move |v: &f64| tick_label(*v, yscale);

    let mut mesh = chart.configure_mesh();
    mesh.x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .label_style(("sans-serif", 12));
    if let Some(label) = axes.xlabel() {
        mesh.x_desc(label);
    }
    if let Some(label) = axes.ylabel() {
        mesh.y_desc(label);
    }
    if !axes.has_grid() {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let (width, height) = chart.plotting_area().dim_in_pixel();
    let px_per_unit = (width as f64 / (x1 - x0), height as f64 / (y1 - y0));

    for line in axes.lines() {
        let points = transformed_points(line, xscale, yscale);
        let style = line.style.rgb(line.index).stroke_width(2);
        let series = match dash_spacing(line.style.dash) {
            Some((size, spacing)) => chart.draw_series(DashedLineSeries::new(points, size, spacing, style))?,
            None => {
                let runs = dash_segments(&points, px_per_unit, line.style.dash.pattern());
                chart.draw_series(runs.into_iter().map(move |run| PathElement::new(run, style)))?
            }
        };
        if let Some(label) = axes.legend().get(line.index) {
            series
                .label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
    }

    if !axes.legend().is_empty() {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.9))
            .border_style(&BLACK)
            .label_font(("sans-serif", 12))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    Ok(())
}

/// The line's points in drawing space, skipping values the scales cannot show.
pub(crate) fn transformed_points(line: &Line, xscale: Scale, yscale: Scale) -> Vec<(f64, f64)> {
    line.xs
        .iter()
        .zip(&line.ys)
        .filter_map(|(&x, &y)| Some((xscale.apply(x)?, yscale.apply(y)?)))
        .collect()
}

/// Visible x and y ranges of the axes in drawing space.
pub(crate) fn view_range(axes: &Axes) -> ((f64, f64), (f64, f64)) {
    let points: Vec<(f64, f64)> = axes
        .lines()
        .iter()
        .flat_map(|line| transformed_points(line, axes.xscale(), axes.yscale()))
        .collect();
    let x = axis_range(axes.xlim(), axes.xscale(), points.iter().map(|p| p.0));
    let y = axis_range(axes.ylim(), axes.yscale(), points.iter().map(|p| p.1));
    (x, y)
}

fn axis_range(lim: Option<(f64, f64)>, scale: Scale, values: impl Iterator<Item = f64>) -> (f64, f64) {
    if let Some((lo, hi)) = lim {
        if let (Some(lo), Some(hi)) = (scale.apply(lo), scale.apply(hi)) {
            if lo != hi {
                return (lo.min(hi), lo.max(hi));
            }
        }
    }

    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        (0.0, 1.0)
    } else if min == max {
        (min - 0.5, max + 0.5)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}

pub(crate) fn tick_label(value: f64, scale: Scale) -> String {
    let value = scale.invert(value);
    let magnitude = value.abs();
    if magnitude == 0.0 {
        "0".to_string()
    } else if magnitude >= 1e5 || magnitude < 1e-3 {
        format!("{:.0e}", value)
    } else {
        let text = format!("{:.3}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Dash and gap lengths in pixels for patterns plotters draws natively.
/// Solid and dash-dot lines go through [`dash_segments`].
pub(crate) fn dash_spacing(dash: Dash) -> Option<(u32, u32)> {
    match (dash, dash.pattern()) {
        (Dash::Dashed | Dash::Dotted, &[on, off]) => Some((on as u32, off as u32)),
        _ => None,
    }
}

/// Splits a polyline into the "on" runs of a dash pattern measured in pixels.
/// `px_per_unit` converts data distances along each axis to pixels. A solid
/// pattern returns the polyline unchanged.
pub(crate) fn dash_segments(
    points: &[(f64, f64)],
    px_per_unit: (f64, f64),
    pattern: &[f64],
) -> Vec<Vec<(f64, f64)>> {
    let usable = px_per_unit.0.is_finite()
        && px_per_unit.1.is_finite()
        && px_per_unit.0 > 0.0
        && px_per_unit.1 > 0.0
        && pattern.iter().sum::<f64>() > 0.0;
    if points.len() < 2 || !usable {
        return if points.is_empty() { Vec::new() } else { vec![points.to_vec()] };
    }

    let mut runs = Vec::new();
    let mut current = vec![points[0]];
    let mut phase = 0;
    let mut left = pattern[0];

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = ((b.0 - a.0) * px_per_unit.0).hypot((b.1 - a.1) * px_per_unit.1);
        let mut travelled = 0.0;

        while length - travelled > left {
            travelled += left;
            let t = travelled / length;
            current.push((a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t));
            if phase % 2 == 0 {
                runs.push(std::mem::take(&mut current));
            }
            phase = (phase + 1) % pattern.len();
            left = pattern[phase];
        }

        left -= length - travelled;
        if phase % 2 == 0 {
            current.push(b);
        }
    }

    if current.len() > 1 {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::LineStyle;

    #[test]
    fn test_dashed_and_dotted_use_plotters_dashes() {
        assert_eq!(dash_spacing(Dash::Dashed), Some((7, 3)));
        assert_eq!(dash_spacing(Dash::Dotted), Some((2, 3)));
        assert_eq!(dash_spacing(Dash::DashDot), None);
        assert_eq!(dash_spacing(Dash::Solid), None);
    }

    #[test]
    fn test_dash_segments_on_straight_line() {
        let runs = dash_segments(&[(0.0, 0.0), (10.0, 0.0)], (1.0, 1.0), &[2.0, 2.0]);
        assert_eq!(
            runs,
            vec![
                vec![(0.0, 0.0), (2.0, 0.0)],
                vec![(4.0, 0.0), (6.0, 0.0)],
                vec![(8.0, 0.0), (10.0, 0.0)],
            ]
        );
    }

    #[test]
    fn test_dash_segments_carry_across_vertices() {
        let runs = dash_segments(&[(0.0, 0.0), (1.0, 0.0), (1.0, 4.0)], (1.0, 1.0), &[3.0, 1.0]);
        assert_eq!(runs[0], vec![(0.0, 0.0), (1.0, 0.0), (1.0, 2.0)]);
        assert_eq!(runs[1], vec![(1.0, 3.0), (1.0, 4.0)]);
    }

    #[test]
    fn test_dash_segments_scale_to_pixels() {
        let runs = dash_segments(&[(0.0, 0.0), (1.0, 0.0)], (10.0, 1.0), &[5.0, 5.0]);
        assert_eq!(runs, vec![vec![(0.0, 0.0), (0.5, 0.0)]]);
    }

    #[test]
    fn test_solid_pattern_keeps_polyline() {
        let points = vec![(0.0, 1.0), (1.0, 2.0), (2.0, 0.5)];
        assert_eq!(dash_segments(&points, (3.0, 3.0), &[]), vec![points]);
        assert!(dash_segments(&[], (1.0, 1.0), &[1.0, 1.0]).is_empty());
    }

    #[test]
    fn test_view_range_prefers_limits_then_data() {
        let mut axes = Axes::new();
        axes.plot(&[0.0, 10.0], &[1.0, 3.0], LineStyle::default()).unwrap();
        let ((x0, x1), (y0, y1)) = view_range(&axes);
        assert!((x0 + 0.5).abs() < 1e-12 && (x1 - 10.5).abs() < 1e-12);
        assert!((y0 - 0.9).abs() < 1e-12 && (y1 - 3.1).abs() < 1e-12);

        axes.set_xlim(Some((0.0, 4.0)));
        assert_eq!(view_range(&axes).0, (0.0, 4.0));
    }

    #[test]
    fn test_view_range_degenerate_and_empty() {
        let mut axes = Axes::new();
        assert_eq!(view_range(&axes), ((0.0, 1.0), (0.0, 1.0)));
        axes.plot(&[2.0], &[5.0], LineStyle::default()).unwrap();
        assert_eq!(view_range(&axes), ((1.5, 2.5), (4.5, 5.5)));
    }

    #[test]
    fn test_log_axis_falls_back_when_limit_not_positive() {
        let mut axes = Axes::new();
        axes.set_xscale(Scale::Log);
        axes.set_xlim(Some((0.0, 100.0)));
        axes.plot(&[1.0, 100.0], &[1.0, 1.0], LineStyle::default()).unwrap();
        let (x0, x1) = view_range(&axes).0;
        assert!((x0 + 0.1).abs() < 1e-12 && (x1 - 2.1).abs() < 1e-12);
    }

    #[test]
    fn test_transformed_points_skip_unplottable() {
        let mut axes = Axes::new();
        axes.plot(&[1.0, 2.0, 3.0], &[10.0, 0.0, f64::NAN], LineStyle::default()).unwrap();
        let points = transformed_points(&axes.lines()[0], Scale::Linear, Scale::Log);
        assert_eq!(points, vec![(1.0, 1.0)]);
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(tick_label(0.25, Scale::Linear), "0.25");
        assert_eq!(tick_label(10.0, Scale::Linear), "10");
        assert_eq!(tick_label(-0.0, Scale::Linear), "0");
        assert_eq!(tick_label(2.0, Scale::Log), "100");
        assert_eq!(tick_label(5.0, Scale::Log), "1e5");
    }
}
