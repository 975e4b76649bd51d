//! Terminal text styling

use colored::{Color, ColoredString, Colorize};

/// Foreground colours used in civet's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hue {
    Red,
    Green,
    Yellow,
    Cyan,
}

impl From<Hue> for Color {
    fn from(hue: Hue) -> Self {
        match hue {
            Hue::Red => Color::Red,
            Hue::Green => Color::Green,
            Hue::Yellow => Color::Yellow,
            Hue::Cyan => Color::Cyan,
        }
    }
}

/// A combination of colour and text attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub hue: Option<Hue>,
    pub bold: bool,
    pub underline: bool,
    pub dim: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn hue(mut self, hue: Hue) -> Self {
        self.hue = Some(hue);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    #[must_use]
    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

pub fn paint(text: &str, style: Style) -> ColoredString {
    let mut painted = match style.hue {
        Some(hue) => text.color(Color::from(hue)),
        None => text.normal(),
    };
    if style.bold {
        painted = painted.bold();
    }
    if style.underline {
        painted = painted.underline();
    }
    if style.dim {
        painted = painted.dimmed();
    }
    painted
}

pub fn green(text: &str) -> ColoredString {
    paint(text, Style::new().hue(Hue::Green))
}

pub fn cyan(text: &str) -> ColoredString {
    paint(text, Style::new().hue(Hue::Cyan))
}

pub fn yellow(text: &str) -> ColoredString {
    paint(text, Style::new().hue(Hue::Yellow))
}

pub fn bold_underline(text: &str) -> ColoredString {
    paint(text, Style::new().bold().underline())
}
