//! Where animation frames go.
//!
//! A front end receives the whole figure on every frame. `clear_previous`
//! marks the frame on screen as stale so the next `show` replaces it instead
//! of appending below it.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use textplots::{Chart, Plot, Shape};

use crate::axes::Axes;
use crate::error::ToastError;
use crate::figure::{Figure, OutputFormat};
use crate::render;

pub trait Frontend {
    fn show(&mut self, figure: &Figure) -> Result<(), ToastError>;

    fn clear_previous(&mut self) -> Result<(), ToastError> {
        Ok(())
    }

    /// Called once after the last frame.
    fn finish(&mut self) -> Result<(), ToastError> {
        Ok(())
    }
}

impl<F: Frontend + ?Sized> Frontend for Box<F> {
    fn show(&mut self, figure: &Figure) -> Result<(), ToastError> {
        (**self).show(figure)
    }

    fn clear_previous(&mut self) -> Result<(), ToastError> {
        (**self).clear_previous()
    }

    fn finish(&mut self) -> Result<(), ToastError> {
        (**self).finish()
    }
}

impl<F: Frontend + ?Sized> Frontend for &mut F {
    fn show(&mut self, figure: &Figure) -> Result<(), ToastError> {
        (**self).show(figure)
    }

    fn clear_previous(&mut self) -> Result<(), ToastError> {
        (**self).clear_previous()
    }

    fn finish(&mut self) -> Result<(), ToastError> {
        (**self).finish()
    }
}

impl<A: Frontend, B: Frontend> Frontend for (A, B) {
    fn show(&mut self, figure: &Figure) -> Result<(), ToastError> {
        self.0.show(figure)?;
        self.1.show(figure)
    }

    fn clear_previous(&mut self) -> Result<(), ToastError> {
        self.0.clear_previous()?;
        self.1.clear_previous()
    }

    fn finish(&mut self) -> Result<(), ToastError> {
        self.0.finish()?;
        self.1.finish()
    }
}

/// Draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl Frontend for Headless {
    fn show(&mut self, _figure: &Figure) -> Result<(), ToastError> {
        Ok(())
    }
}

/// Re-renders the figure into one image file per frame.
#[derive(Debug, Clone)]
pub struct FileFrontend {
    path: PathBuf,
    format: OutputFormat,
    frames: usize,
}

impl FileFrontend {
    /// The format follows the file extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = OutputFormat::from_path(&path);
        Self::with_format(path, format)
    }

    pub fn with_format(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
            frames: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Frontend for FileFrontend {
    fn show(&mut self, figure: &Figure) -> Result<(), ToastError> {
        figure.save(&self.path, self.format)?;
        self.frames += 1;
        debug!("Frame {} written to {}", self.frames, self.path.display());
        Ok(())
    }
}

/// Braille chart of the main axes, redrawn in place with ANSI cursor moves.
pub struct TerminalFrontend<W: Write = io::Stdout> {
    out: W,
    width: u32,
    height: u32,
    drawn_lines: usize,
    pending_clear: bool,
}

impl TerminalFrontend<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalFrontend<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            width: 100,
            height: 40,
            drawn_lines: 0,
            pending_clear: false,
        }
    }

    /// Canvas size in braille dots. textplots needs at least 32x3.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(32);
        self.height = height.max(3);
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Frontend for TerminalFrontend<W> {
    fn show(&mut self, figure: &Figure) -> Result<(), ToastError> {
        let frame = text_frame(figure.main_axes(), self.width, self.height);
        if self.pending_clear && self.drawn_lines > 0 {
            write!(self.out, "\x1b[{}A\x1b[J", self.drawn_lines)?;
        }
        self.pending_clear = false;
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        self.drawn_lines = frame.matches('\n').count();
        Ok(())
    }

    fn clear_previous(&mut self) -> Result<(), ToastError> {
        self.pending_clear = true;
        Ok(())
    }
}

/// Title, chart and legend of `axes` as terminal text ending in a newline.
pub fn text_frame(axes: &Axes, width: u32, height: u32) -> String {
    let mut frame = String::new();
    if let Some(title) = axes.title() {
        frame.push_str(title);
        frame.push('\n');
    }

    let ((x0, x1), (y0, y1)) = render::view_range(axes);
    let points: Vec<Vec<(f32, f32)>> = axes
        .lines()
        .iter()
        .map(|line| {
            render::transformed_points(line, axes.xscale(), axes.yscale())
                .into_iter()
                .map(|(x, y)| (x as f32, y as f32))
                .collect()
        })
        .collect();
    let shapes: Vec<Shape> = points.iter().map(|p| Shape::Lines(p.as_slice())).collect();

    let mut chart = Chart::new_with_y_range(
        width.max(32),
        height.max(3),
        x0 as f32,
        x1 as f32,
        y0 as f32,
        y1 as f32,
    );
    let mut canvas = &mut chart;
    for shape in &shapes {
        canvas = canvas.lineplot(shape);
    }
    canvas.axis();
    canvas.figures();
    frame.push_str(&canvas.to_string());
    if !frame.ends_with('\n') {
        frame.push('\n');
    }

    for (label, line) in axes.legend().iter().zip(axes.lines()) {
        frame.push_str(&format!("  {} {}\n", line.style, label));
    }
    frame
}

/// Single console line carrying the progress text of the main axes title.
pub struct ProgressLine {
    bar: ProgressBar,
}

impl ProgressLine {
    pub fn new() -> Result<Self, ToastError> {
        Self::with_bar(ProgressBar::new_spinner())
    }

    /// A line that tracks messages without drawing anything.
    pub fn hidden() -> Result<Self, ToastError> {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Result<Self, ToastError> {
        bar.set_style(ProgressStyle::with_template("{msg}")?);
        Ok(Self { bar })
    }

    pub fn message(&self) -> String {
        self.bar.message()
    }
}

impl Frontend for ProgressLine {
    fn show(&mut self, figure: &Figure) -> Result<(), ToastError> {
        if let Some(title) = figure.main_axes().title() {
            self.bar.set_message(title.to_string());
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ToastError> {
        self.bar.finish();
        Ok(())
    }
}
