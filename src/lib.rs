pub mod animator;
pub use animator::{Animator, AnimatorConfig, History, Point, State};

pub mod axes;
pub use axes::{Axes, Line, Scale};

pub mod error;
pub use error::{Result, ToastError};

pub mod figure;
pub use figure::{FigSize, Figure, OutputFormat};

pub mod frontend;
pub use frontend::{FileFrontend, Frontend, Headless, ProgressLine, TerminalFrontend};

pub mod plot;
pub use plot::{configure_axes, plot, plot_to_file, AxesConfig, PlotOptions, Series};

pub mod progress;
pub use progress::{format_time, progress_message, Clock, SystemClock, Timing};

pub mod render;

pub mod style;
pub use style::{Color, Dash, LineStyle, DEFAULT_FMTS};

pub mod workload;
