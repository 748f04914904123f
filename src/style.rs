use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;

use crate::error::ToastError;

/// Format strings of the default line palette.
pub const DEFAULT_FMTS: [&str; 4] = ["-", "m--", "g-.", "r:"];

/// Colors handed out to lines whose format string names no color.
const COLOR_CYCLE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

/// Single-letter base colors of a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Blue,
    Green,
    Red,
    Cyan,
    Magenta,
    Yellow,
    Black,
    White,
}

impl Color {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'b' => Some(Color::Blue),
            'g' => Some(Color::Green),
            'r' => Some(Color::Red),
            'c' => Some(Color::Cyan),
            'm' => Some(Color::Magenta),
            'y' => Some(Color::Yellow),
            'k' => Some(Color::Black),
            'w' => Some(Color::White),
            _ => None,
        }
    }

    fn letter(&self) -> char {
        match self {
            Color::Blue => 'b',
            Color::Green => 'g',
            Color::Red => 'r',
            Color::Cyan => 'c',
            Color::Magenta => 'm',
            Color::Yellow => 'y',
            Color::Black => 'k',
            Color::White => 'w',
        }
    }

    pub fn rgb(&self) -> RGBColor {
        match self {
            Color::Blue => RGBColor(0, 0, 255),
            Color::Green => RGBColor(0, 128, 0),
            Color::Red => RGBColor(255, 0, 0),
            Color::Cyan => RGBColor(0, 191, 191),
            Color::Magenta => RGBColor(191, 0, 191),
            Color::Yellow => RGBColor(191, 191, 0),
            Color::Black => RGBColor(0, 0, 0),
            Color::White => RGBColor(255, 255, 255),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dash {
    #[default]
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl Dash {
    /// Alternating on/off run lengths in pixels. Empty for a solid line.
    pub fn pattern(&self) -> &'static [f64] {
        match self {
            Dash::Solid => &[],
            Dash::Dashed => &[7.0, 3.0],
            Dash::DashDot => &[6.0, 3.0, 1.5, 3.0],
            Dash::Dotted => &[2.0, 3.0],
        }
    }

    fn spec(&self) -> &'static str {
        match self {
            Dash::Solid => "-",
            Dash::Dashed => "--",
            Dash::DashDot => "-.",
            Dash::Dotted => ":",
        }
    }
}

/// A parsed line format such as `"m--"` or `"r:"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineStyle {
    pub color: Option<Color>,
    pub dash: Dash,
}

impl LineStyle {
    pub const fn new(color: Option<Color>, dash: Dash) -> Self {
        Self { color, dash }
    }

    /// Resolves the drawing color, falling back to the color cycle entry for
    /// the line's position on its axes.
    pub fn rgb(&self, index: usize) -> RGBColor {
        match self.color {
            Some(color) => color.rgb(),
            None => COLOR_CYCLE[index % COLOR_CYCLE.len()],
        }
    }
}

impl FromStr for LineStyle {
    type Err = ToastError;

    fn from_str(fmt: &str) -> Result<Self, Self::Err> {
        let mut style = LineStyle::default();
        let mut dash = None;
        let mut rest = fmt;

        while let Some(c) = rest.chars().next() {
            let (found, len) = if rest.starts_with("--") {
                (dash.replace(Dash::Dashed).is_none(), 2)
            } else if rest.starts_with("-.") {
                (dash.replace(Dash::DashDot).is_none(), 2)
            } else if c == '-' {
                (dash.replace(Dash::Solid).is_none(), 1)
            } else if c == ':' {
                (dash.replace(Dash::Dotted).is_none(), 1)
            } else if let Some(color) = Color::from_letter(c) {
                (style.color.replace(color).is_none(), 1)
            } else {
                (false, 0)
            };
            if !found {
                return Err(ToastError::LineFormat(fmt.to_string()));
            }
            rest = &rest[len..];
        }

        style.dash = dash.unwrap_or_default();
        Ok(style)
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(color) = self.color {
            write!(f, "{}", color.letter())?;
        }
        write!(f, "{}", self.dash.spec())
    }
}

/// The default four-entry palette: solid, magenta dashed, green dash-dot,
/// red dotted.
pub fn default_styles() -> Vec<LineStyle> {
    vec![
        LineStyle::new(None, Dash::Solid),
        LineStyle::new(Some(Color::Magenta), Dash::Dashed),
        LineStyle::new(Some(Color::Green), Dash::DashDot),
        LineStyle::new(Some(Color::Red), Dash::Dotted),
    ]
}

/// Parses a list of format strings into a palette.
pub fn parse_styles<S: AsRef<str>>(fmts: &[S]) -> Result<Vec<LineStyle>, ToastError> {
    fmts.iter().map(|fmt| fmt.as_ref().parse()).collect()
}

/// Palette entry for series `index`; palettes cycle when there are more
/// series than styles.
pub fn style_for(palette: &[LineStyle], index: usize) -> LineStyle {
    if palette.is_empty() {
        LineStyle::default()
    } else {
        palette[index % palette.len()]
    }
}
