use std::path::Path;

use ndarray::{Array1, Array2, Axis};

use crate::axes::{Axes, Scale};
use crate::error::ToastError;
use crate::figure::{FigSize, Figure, OutputFormat};
use crate::style::{default_styles, style_for, LineStyle};

/// Plot input: a single sequence or a list of sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    One(Vec<f64>),
    Many(Vec<Vec<f64>>),
}

impl Series {
    fn into_many(self) -> Vec<Vec<f64>> {
        match self {
            Series::One(values) => vec![values],
            Series::Many(lists) => lists,
        }
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Series::One(values)
    }
}

impl From<&[f64]> for Series {
    fn from(values: &[f64]) -> Self {
        Series::One(values.to_vec())
    }
}

impl From<Vec<Vec<f64>>> for Series {
    fn from(lists: Vec<Vec<f64>>) -> Self {
        Series::Many(lists)
    }
}

impl From<Array1<f64>> for Series {
    fn from(values: Array1<f64>) -> Self {
        Series::One(values.to_vec())
    }
}

/// Each row of the array is one series.
impl From<Array2<f64>> for Series {
    fn from(rows: Array2<f64>) -> Self {
        Series::Many(rows.axis_iter(Axis(0)).map(|row| row.to_vec()).collect())
    }
}

/// Axis settings applied after drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxesConfig {
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xscale: Scale,
    pub yscale: Scale,
    pub legend: Vec<String>,
}

impl AxesConfig {
    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    pub fn xlim(mut self, lo: f64, hi: f64) -> Self {
        self.xlim = Some((lo, hi));
        self
    }

    pub fn ylim(mut self, lo: f64, hi: f64) -> Self {
        self.ylim = Some((lo, hi));
        self
    }

    pub fn xscale(mut self, scale: Scale) -> Self {
        self.xscale = scale;
        self
    }

    pub fn yscale(mut self, scale: Scale) -> Self {
        self.yscale = scale;
        self
    }

    pub fn legend<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.legend = labels.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub axes: AxesConfig,
    pub fmts: Vec<LineStyle>,
    pub figsize: FigSize,
    pub format: OutputFormat,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            axes: AxesConfig::default(),
            fmts: default_styles(),
            figsize: FigSize::default(),
            format: OutputFormat::default(),
        }
    }
}

/// Applies labels, scales and limits, the legend when non-empty and the title
/// when given, and turns the grid on.
pub fn configure_axes(axes: &mut Axes, config: &AxesConfig, title: Option<&str>) {
    if let Some(label) = &config.xlabel {
        axes.set_xlabel(label.as_str());
    }
    if let Some(label) = &config.ylabel {
        axes.set_ylabel(label.as_str());
    }
    axes.set_xscale(config.xscale);
    axes.set_yscale(config.yscale);
    axes.set_xlim(config.xlim);
    axes.set_ylim(config.ylim);
    if !config.legend.is_empty() {
        axes.set_legend(config.legend.clone());
    }
    if let Some(title) = title {
        axes.set_title(title);
    }
    axes.grid(true);
}

/// Pairs x and y inputs into `(x, y)` series.
///
/// Without `y`, `x` holds the y-series and every x is empty (plotted against
/// positions). When the counts differ the x list is repeated `len(y)` times
/// before pairing, and pairing stops at the shorter list.
pub fn normalize(x: Series, y: Option<Series>) -> Vec<(Vec<f64>, Vec<f64>)> {
    let mut xs = x.into_many();
    let ys = match y {
        None => {
            let ys = xs;
            xs = vec![Vec::new(); ys.len()];
            ys
        }
        Some(y) => y.into_many(),
    };
    if xs.len() != ys.len() {
        xs = xs.iter().cycle().take(xs.len() * ys.len()).cloned().collect();
    }
    xs.into_iter().zip(ys).collect()
}

/// Clears `axes` and draws every series with the palette, cycling styles when
/// there are more series than styles.
pub fn plot(
    axes: &mut Axes,
    x: impl Into<Series>,
    y: Option<Series>,
    options: &PlotOptions,
) -> Result<(), ToastError> {
    axes.cla();
    for (i, (xs, ys)) in normalize(x.into(), y).into_iter().enumerate() {
        axes.plot(&xs, &ys, style_for(&options.fmts, i))?;
    }
    configure_axes(axes, &options.axes, None);
    Ok(())
}

/// Plots onto a fresh figure of `options.figsize` and saves it.
pub fn plot_to_file(
    path: impl AsRef<Path>,
    x: impl Into<Series>,
    y: Option<Series>,
    options: &PlotOptions,
) -> Result<Figure, ToastError> {
    let mut figure = Figure::new(options.figsize);
    plot(figure.main_axes_mut(), x, y, options)?;
    figure.save(path, options.format)?;
    Ok(figure)
}
