use core::fmt;

use crate::chars::{Char, SPACE};
use crate::colors::{NamedColor, RESET};

/// A single cell of the lightweight rendering path: one character, one
/// named foreground color and an opacity in `[0, 1]`.
///
/// Construction never fails; inputs are normalized instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    char: Char,
    color: NamedColor,
    opacity: f32,
}

impl Pixel {
    /// Builds a pixel from loose input: only the first character of `text`
    /// is kept (space if there is none or it is not printable), unknown
    /// color names become white and opacity is clamped (NaN becomes 1).
    pub fn new(text: &str, color_name: &str, opacity: f32) -> Self {
        Self {
            char: Char::first_or(text, SPACE),
            color: color_name.parse().unwrap_or_default(),
            opacity: if opacity.is_nan() {
                1.0
            } else {
                opacity.clamp(0.0, 1.0)
            },
        }
    }

    /// Fully opaque pixel with a named color.
    pub fn create_colored(text: &str, color_name: &str) -> Self {
        Self::new(text, color_name, 1.0)
    }

    pub const fn from_parts(char: Char, color: NamedColor) -> Self {
        Self {
            char,
            color,
            opacity: 1.0,
        }
    }

    pub fn char(&self) -> Char {
        self.char
    }

    pub fn color(&self) -> NamedColor {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// The character wrapped in its color escape and a reset.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::from_parts(SPACE, NamedColor::default())
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.color.fg_escape(), self.char, RESET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn empty_char_becomes_space() {
        assert_eq!(Pixel::new("", "RED", 1.0).char(), SPACE);
    }

    #[test]
    fn only_first_char_is_kept() {
        assert_eq!(Pixel::create_colored("♥♥", "RED").char().as_char(), '♥');
    }

    #[test_case(1.5, 1.0)]
    #[test_case(-2.0, 0.0)]
    #[test_case(0.25, 0.25)]
    #[test_case(f32::NAN, 1.0)]
    fn opacity_is_clamped(input: f32, expected: f32) {
        assert_eq!(Pixel::new("x", "RED", input).opacity(), expected);
    }

    #[test_case("PURPLE")]
    #[test_case("RESET")]
    #[test_case("")]
    fn unknown_color_becomes_white(name: &str) {
        assert_eq!(Pixel::create_colored("x", name).color(), NamedColor::White);
    }

    #[test]
    fn display_string() {
        let p = Pixel::create_colored("#", "BRIGHT_GREEN");
        assert_eq!(p.to_display_string(), "\x1b[92m#\x1b[0m");
        assert_eq!(p.to_string(), p.to_display_string());
        assert_eq!(Pixel::default().to_display_string(), "\x1b[37m \x1b[0m");
    }
}
