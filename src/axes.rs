use std::str::FromStr;

use crate::error::ToastError;
use crate::style::LineStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    /// Maps a data value into drawing space. `None` for values a log axis
    /// cannot show.
    pub fn apply(&self, value: f64) -> Option<f64> {
        match self {
            Scale::Linear => value.is_finite().then_some(value),
            Scale::Log => (value.is_finite() && value > 0.0).then(|| value.log10()),
        }
    }

    /// Inverse of [`Scale::apply`].
    pub fn invert(&self, value: f64) -> f64 {
        match self {
            Scale::Linear => value,
            Scale::Log => 10f64.powf(value),
        }
    }
}

impl FromStr for Scale {
    type Err = ToastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Scale::Linear),
            "log" => Ok(Scale::Log),
            other => Err(ToastError::Scale(other.to_string())),
        }
    }
}

/// One drawn series. `index` is the line's position on its axes, used to pick
/// a cycle color for uncolored styles.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub style: LineStyle,
    pub index: usize,
}

/// Retained description of one plot cell. Renderers read it, helpers and the
/// animator write it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axes {
    xlabel: Option<String>,
    ylabel: Option<String>,
    xscale: Scale,
    yscale: Scale,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    legend: Vec<String>,
    title: Option<String>,
    grid: bool,
    lines: Vec<Line>,
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears lines and every setting back to defaults.
    pub fn cla(&mut self) {
        *self = Self::default();
    }

    /// Adds a line. An empty `xs` plots `ys` against `0..ys.len()`.
    pub fn plot(&mut self, xs: &[f64], ys: &[f64], style: LineStyle) -> Result<(), ToastError> {
        let xs = if xs.is_empty() {
            (0..ys.len()).map(|i| i as f64).collect()
        } else if xs.len() != ys.len() {
            return Err(ToastError::ShapeMismatch { x: xs.len(), y: ys.len() });
        } else {
            xs.to_vec()
        };

        let index = self.lines.len();
        self.lines.push(Line {
            xs,
            ys: ys.to_vec(),
            style,
            index,
        });
        Ok(())
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    pub fn set_xscale(&mut self, scale: Scale) {
        self.xscale = scale;
    }

    pub fn set_yscale(&mut self, scale: Scale) {
        self.yscale = scale;
    }

    pub fn set_xlim(&mut self, lim: Option<(f64, f64)>) {
        self.xlim = lim;
    }

    pub fn set_ylim(&mut self, lim: Option<(f64, f64)>) {
        self.ylim = lim;
    }

    pub fn set_legend(&mut self, labels: Vec<String>) {
        self.legend = labels;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn grid(&mut self, on: bool) {
        self.grid = on;
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub fn xscale(&self) -> Scale {
        self.xscale
    }

    pub fn yscale(&self) -> Scale {
        self.yscale
    }

    pub fn xlim(&self) -> Option<(f64, f64)> {
        self.xlim
    }

    pub fn ylim(&self) -> Option<(f64, f64)> {
        self.ylim
    }

    pub fn legend(&self) -> &[String] {
        &self.legend
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn has_grid(&self) -> bool {
        self.grid
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_without_x_uses_positions() {
        let mut axes = Axes::new();
        axes.plot(&[], &[3.0, 2.0, 1.0], LineStyle::default()).unwrap();
        assert_eq!(axes.lines()[0].xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_plot_rejects_mismatched_lengths() {
        let mut axes = Axes::new();
        let err = axes.plot(&[1.0, 2.0], &[1.0], LineStyle::default()).unwrap_err();
        assert!(matches!(err, ToastError::ShapeMismatch { x: 2, y: 1 }));
        assert!(axes.lines().is_empty());
    }

    #[test]
    fn test_cla_resets_everything() {
        let mut axes = Axes::new();
        axes.set_title("loss");
        axes.set_yscale(Scale::Log);
        axes.grid(true);
        axes.plot(&[1.0], &[1.0], LineStyle::default()).unwrap();
        axes.cla();
        assert_eq!(axes, Axes::default());
    }

    #[test]
    fn test_line_indices_follow_insertion() {
        let mut axes = Axes::new();
        for _ in 0..3 {
            axes.plot(&[], &[1.0], LineStyle::default()).unwrap();
        }
        let indices: Vec<usize> = axes.lines().iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_scale_parse_and_apply() {
        assert_eq!("log".parse::<Scale>().unwrap(), Scale::Log);
        assert!(matches!("symlog".parse::<Scale>(), Err(ToastError::Scale(_))));
        assert_eq!(Scale::Log.apply(100.0), Some(2.0));
        assert_eq!(Scale::Log.apply(0.0), None);
        assert_eq!(Scale::Linear.apply(-3.0), Some(-3.0));
        assert_eq!(Scale::Linear.apply(f64::NAN), None);
        assert!((Scale::Log.invert(3.0) - 1000.0).abs() < 1e-9);
    }
}
