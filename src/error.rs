use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToastError {
    #[error("An animation needs at least one iteration")]
    EmptyRun,

    #[error("Expected {expected} series values, got {found}")]
    SeriesWidth { expected: usize, found: usize },

    #[error("Series {index} is out of range for {series} series")]
    SeriesIndex { index: usize, series: usize },

    #[error("x has {x} points but y has {y}")]
    ShapeMismatch { x: usize, y: usize },

    #[error("Unrecognized line format: {0:?}")]
    LineFormat(String),

    #[error("Unknown axis scale: {0:?}")]
    Scale(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Progress template error: {0}")]
    Template(#[from] indicatif::style::TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ToastError>;
