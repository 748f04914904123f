//! Iteration driver that records per-series history, redraws the chart and
//! renders a progress line on every step.
//!
//! ```no_run
//! use toastool::{Animator, AnimatorConfig, Headless};
//!
//! let config = AnimatorConfig::new(100).series(2).legend(["train", "test"]);
//! let mut animator = Animator::new(config, Headless)?;
//! while let Some(point) = animator.advance()? {
//!     point.set_y(&[1.0, 2.0]);
//! }
//! # Ok::<(), toastool::ToastError>(())
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::axes::Scale;
use crate::error::ToastError;
use crate::figure::{FigSize, Figure};
use crate::frontend::Frontend;
use crate::plot::{configure_axes, AxesConfig};
use crate::progress::{progress_message, Clock, SystemClock, Timing};
use crate::style::{default_styles, style_for, LineStyle};

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    pub total: usize,
    pub series: usize,
    pub axes: AxesConfig,
    pub fmts: Vec<LineStyle>,
    pub nrows: usize,
    pub ncols: usize,
    pub figsize: FigSize,
}

impl AnimatorConfig {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            series: 1,
            axes: AxesConfig::default(),
            fmts: default_styles(),
            nrows: 1,
            ncols: 1,
            figsize: FigSize::new(7.0, 5.0),
        }
    }

    pub fn series(mut self, n: usize) -> Self {
        self.series = n;
        self
    }

    pub fn axes(mut self, axes: AxesConfig) -> Self {
        self.axes = axes;
        self
    }

    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.axes = self.axes.xlabel(label);
        self
    }

    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.axes = self.axes.ylabel(label);
        self
    }

    pub fn xlim(mut self, lo: f64, hi: f64) -> Self {
        self.axes = self.axes.xlim(lo, hi);
        self
    }

    pub fn ylim(mut self, lo: f64, hi: f64) -> Self {
        self.axes = self.axes.ylim(lo, hi);
        self
    }

    pub fn xscale(mut self, scale: Scale) -> Self {
        self.axes = self.axes.xscale(scale);
        self
    }

    pub fn yscale(mut self, scale: Scale) -> Self {
        self.axes = self.axes.yscale(scale);
        self
    }

    pub fn legend<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.axes = self.axes.legend(labels);
        self
    }

    pub fn fmts(mut self, fmts: Vec<LineStyle>) -> Self {
        self.fmts = fmts;
        self
    }

    pub fn subplots(mut self, nrows: usize, ncols: usize) -> Self {
        self.nrows = nrows;
        self.ncols = ncols;
        self
    }

    pub fn figsize(mut self, figsize: impl Into<FigSize>) -> Self {
        self.figsize = figsize.into();
        self
    }
}

/// The per-iteration record filled in by the caller. Every vector has one
/// slot per series; `None` slots are not recorded. Each y starts at 0 and
/// keeps its last value until overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    iteration: usize,
}

impl Point {
    fn new(series: usize) -> Self {
        Self {
            x: vec![None; series],
            y: vec![Some(0.0); series],
            iteration: 0,
        }
    }

    /// The iteration this point belongs to, starting at 1.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Replaces all y values. A different width than the configured series
    /// count fails on the next advance.
    pub fn set_y(&mut self, values: &[f64]) {
        self.y = values.iter().copied().map(Some).collect();
    }

    /// Sets the y value of one series.
    pub fn set(&mut self, series: usize, y: f64) -> Result<(), ToastError> {
        let width = self.y.len();
        let slot = self.y.get_mut(series).ok_or(ToastError::SeriesIndex {
            index: series,
            series: width,
        })?;
        *slot = Some(y);
        Ok(())
    }

    /// Sets the same x for every series.
    pub fn set_x(&mut self, x: f64) {
        self.x.iter_mut().for_each(|slot| *slot = Some(x));
    }

    fn start_iteration(&mut self, iteration: usize) {
        self.iteration = iteration;
        self.set_x(iteration as f64);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

/// Recorded observations, one x/y pair of vectors per series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    xs: Vec<Vec<f64>>,
    ys: Vec<Vec<f64>>,
}

impl History {
    pub fn new(series: usize) -> Self {
        Self {
            xs: vec![Vec::new(); series],
            ys: vec![Vec::new(); series],
        }
    }

    /// Appends every series where both x and y are present.
    pub fn record(&mut self, point: &Point) -> Result<(), ToastError> {
        let expected = self.series();
        for found in [point.x.len(), point.y.len()] {
            if found != expected {
                return Err(ToastError::SeriesWidth { expected, found });
            }
        }

        for (i, (x, y)) in point.x.iter().zip(&point.y).enumerate() {
            if let (Some(x), Some(y)) = (x, y) {
                self.xs[i].push(*x);
                self.ys[i].push(*y);
            }
        }
        Ok(())
    }

    pub fn series(&self) -> usize {
        self.xs.len()
    }

    pub fn xs(&self, series: usize) -> &[f64] {
        &self.xs[series]
    }

    pub fn ys(&self, series: usize) -> &[f64] {
        &self.ys[series]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(x, y)| (x.as_slice(), y.as_slice()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    NotStarted,
    Running,
    Finished,
}

pub struct Animator<F = crate::frontend::Headless, C = SystemClock> {
    total: usize,
    axes_config: AxesConfig,
    fmts: Vec<LineStyle>,
    figure: Figure,
    frontend: F,
    clock: C,
    state: State,
    iteration: usize,
    start_time: Instant,
    last_start_time: Instant,
    timing: Timing,
    message: String,
    point: Point,
    history: History,
}

impl<F: Frontend> Animator<F, SystemClock> {
    pub fn new(config: AnimatorConfig, frontend: F) -> Result<Self, ToastError> {
        Self::with_clock(config, frontend, SystemClock)
    }
}

impl<F: Frontend, C: Clock> Animator<F, C> {
    /// Fails with [`ToastError::EmptyRun`] when `config.total` is zero.
    /// Without an explicit x limit the x axis spans `0..=total`.
    pub fn with_clock(config: AnimatorConfig, frontend: F, clock: C) -> Result<Self, ToastError> {
        if config.total == 0 {
            return Err(ToastError::EmptyRun);
        }

        let mut axes_config = config.axes;
        if axes_config.xlim.is_none() {
            axes_config.xlim = Some((0.0, config.total as f64));
        }
        let now = clock.now();

        Ok(Self {
            total: config.total,
            axes_config,
            fmts: config.fmts,
            figure: Figure::subplots(config.nrows, config.ncols, config.figsize),
            frontend,
            clock,
            state: State::NotStarted,
            iteration: 0,
            start_time: now,
            last_start_time: now,
            timing: Timing::default(),
            message: String::new(),
            point: Point::new(config.series),
            history: History::new(config.series),
        })
    }

    /// Moves to the next iteration.
    ///
    /// The first call only starts the clock. Every later call records the
    /// current point, redraws and refreshes the progress line. Returns
    /// `Ok(None)` once `total` iterations have been recorded, and on every
    /// call after that. A failed redraw ends the run: the error is returned
    /// once and later calls return `Ok(None)`.
    pub fn advance(&mut self) -> Result<Option<&mut Point>, ToastError> {
        match self.state {
            State::Finished => Ok(None),
            State::NotStarted => {
                let now = self.clock.now();
                self.start_time = now;
                self.last_start_time = now;
                self.iteration = 1;
                self.point.start_iteration(self.iteration);
                self.state = State::Running;
                Ok(Some(&mut self.point))
            }
            State::Running => {
                let done = self.iteration >= self.total;
                self.update_timing(done);
                self.message = progress_message(self.iteration, self.total, &self.timing);
                if let Err(err) = self.add_plot() {
                    warn!("Stopping at iteration {}: {}", self.iteration, err);
                    self.state = State::Finished;
                    return Err(err);
                }

                if done {
                    self.state = State::Finished;
                    self.frontend.finish()?;
                    info!(
                        "Finished {} iterations in {:.2}s",
                        self.total,
                        self.timing.total_elapsed.as_secs_f64()
                    );
                    return Ok(None);
                }

                self.iteration += 1;
                self.last_start_time = self.clock.now();
                self.point.start_iteration(self.iteration);
                Ok(Some(&mut self.point))
            }
        }
    }

    /// Drives the animation to the end, calling `step` with each point.
    pub fn run<G>(mut self, mut step: G) -> Result<History, ToastError>
    where
        G: FnMut(&mut Point),
    {
        while let Some(point) = self.advance()? {
            step(point);
        }
        Ok(self.history)
    }

    fn update_timing(&mut self, done: bool) {
        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(self.last_start_time);
        let estimated = if done {
            Duration::ZERO
        } else {
            elapsed.mul_f64((self.total - self.iteration) as f64)
        };
        self.timing = Timing {
            elapsed,
            total_elapsed: now.saturating_duration_since(self.start_time),
            estimated,
        };
    }

    fn add_plot(&mut self) -> Result<(), ToastError> {
        self.history.record(&self.point)?;

        let axes = self.figure.main_axes_mut();
        axes.cla();
        for (i, (xs, ys)) in self.history.iter().enumerate() {
            axes.plot(xs, ys, style_for(&self.fmts, i))?;
        }
        configure_axes(axes, &self.axes_config, Some(self.message.as_str()));

        self.frontend.show(&self.figure)?;
        self.frontend.clear_previous()?;
        debug!("Frame {}/{}: {}", self.iteration, self.total, self.message);
        Ok(())
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// The latest progress line; empty before the first redraw.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn into_history(self) -> History {
        self.history
    }
}
