//! Rendering of the style directives.
//!
//! The same template can be shown in a browser pane, a colour terminal or a
//! plain log, so style wrappers are rendered per [`StyleMode`].

use std::fmt::Write;

/// How style directives are rendered.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum StyleMode {
    /// HTML tags and `<span style=...>` wrappers.
    #[default]
    Html,
    /// ANSI escape sequences for terminals.
    Ansi,
    /// Text only; every wrapper is dropped.
    Plain,
}

/// A text style applied by a directive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Style {
    /// `{i:...}`
    Italic,
    /// `{b:...}`
    Bold,
    /// `{u:...}`
    Underline,
    /// `{s:...}`
    Strike,
    /// `{colour:COLOUR:...}`
    Colour(String),
    /// `{back:COLOUR:...}`
    Background(String),
}

impl Style {
    /// Wraps `text` in this style.
    #[must_use]
    pub fn apply(&self, mode: StyleMode, text: &str) -> String {
        match mode {
            StyleMode::Plain => text.to_string(),
            StyleMode::Html => match self {
                Self::Italic => format!("<i>{text}</i>"),
                Self::Bold => format!("<b>{text}</b>"),
                Self::Underline => format!("<u>{text}</u>"),
                Self::Strike => format!("<strike>{text}</strike>"),
                Self::Colour(c) => format!("<span style=\"color:{c}\">{text}</span>"),
                Self::Background(c) => {
                    format!("<span style=\"background-color:{c}\">{text}</span>")
                }
            },
            StyleMode::Ansi => {
                let code = match self {
                    Self::Italic => Some(3),
                    Self::Bold => Some(1),
                    Self::Underline => Some(4),
                    Self::Strike => Some(9),
                    Self::Colour(c) => ansi_colour(c).map(|n| 30 + n),
                    Self::Background(c) => ansi_colour(c).map(|n| 40 + n),
                };
                match code {
                    Some(code) => {
                        let mut out = String::with_capacity(text.len() + 9);
                        let _ = write!(out, "\u{1b}[{code}m{text}\u{1b}[0m");
                        out
                    }
                    None => text.to_string(),
                }
            }
        }
    }
}

/// Offset of a named colour in the ANSI palette.
fn ansi_colour(name: &str) -> Option<u8> {
    let offset = match name.to_ascii_lowercase().as_str() {
        "black" => 0,
        "red" => 1,
        "green" => 2,
        "yellow" => 3,
        "blue" => 4,
        "magenta" | "purple" => 5,
        "cyan" => 6,
        "white" | "grey" | "gray" => 7,
        _ => return None,
    };
    Some(offset)
}

/// Renders an image reference.
#[must_use]
pub fn image(mode: StyleMode, src: &str, title: &str, alt: &str) -> String {
    match mode {
        StyleMode::Html => format!("<img src=\"images/{src}\" title=\"{title}\" alt=\"{alt}\"/>"),
        StyleMode::Ansi | StyleMode::Plain => format!("[{alt}]"),
    }
}
