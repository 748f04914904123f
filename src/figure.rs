use std::path::Path;

use crate::axes::Axes;
use crate::error::ToastError;
use crate::render;

/// Pixels per inch when a figure size is turned into an image size.
pub const DPI: f64 = 100.0;

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigSize {
    pub width: f64,
    pub height: f64,
}

impl FigSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn pixels(&self) -> (u32, u32) {
        let to_px = |inches: f64| (inches * DPI).round().max(1.0) as u32;
        (to_px(self.width), to_px(self.height))
    }
}

impl Default for FigSize {
    fn default() -> Self {
        Self::new(3.5, 2.5)
    }
}

impl From<(f64, f64)> for FigSize {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

/// Image format figures are written in. SVG is the default display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    /// Picks the format from a file extension, defaulting to SVG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => OutputFormat::Png,
            _ => OutputFormat::Svg,
        }
    }
}

/// A grid of axes with a physical size. Always holds at least one axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    size: FigSize,
    nrows: usize,
    ncols: usize,
    axes: Vec<Axes>,
}

impl Figure {
    pub fn new(size: FigSize) -> Self {
        Self::subplots(1, 1, size)
    }

    /// Zero rows or columns are clamped to one.
    pub fn subplots(nrows: usize, ncols: usize, size: FigSize) -> Self {
        let nrows = nrows.max(1);
        let ncols = ncols.max(1);
        Self {
            size,
            nrows,
            ncols,
            axes: vec![Axes::new(); nrows * ncols],
        }
    }

    pub fn size(&self) -> FigSize {
        self.size
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn axes(&self, index: usize) -> Option<&Axes> {
        self.axes.get(index)
    }

    pub fn axes_mut(&mut self, index: usize) -> Option<&mut Axes> {
        self.axes.get_mut(index)
    }

    /// The top-left axes.
    pub fn main_axes(&self) -> &Axes {
        &self.axes[0]
    }

    pub fn main_axes_mut(&mut self) -> &mut Axes {
        &mut self.axes[0]
    }

    pub fn all_axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn save(&self, path: impl AsRef<Path>, format: OutputFormat) -> Result<(), ToastError> {
        render::render_file(self, path.as_ref(), format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_at_default_dpi() {
        assert_eq!(FigSize::new(7.0, 5.0).pixels(), (700, 500));
        assert_eq!(FigSize::default().pixels(), (350, 250));
    }

    #[test]
    fn test_subplots_clamps_and_allocates() {
        let figure = Figure::subplots(0, 3, FigSize::default());
        assert_eq!(figure.shape(), (1, 3));
        assert_eq!(figure.all_axes().len(), 3);
        assert!(figure.axes(3).is_none());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a/loss.PNG")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("loss.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("loss")), OutputFormat::Svg);
    }
}
