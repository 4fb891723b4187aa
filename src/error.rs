use core::fmt::Display;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed file content, color token or character.
    Format,
    /// Failure of the underlying file system.
    Io,
    /// Character and color grids do not have the same shape.
    Dimension,
    /// Numeric argument out of its allowed range.
    Range,
}

/// Errors that can occur when parsing, saving, rendering or computing colors.
#[derive(Debug, Clone)]
pub enum Error {
    /// First line is not the `AAFSR1|COMBINED` magic header.
    Header(String),
    /// Line is not valid UTF-8.
    Encoding(usize),
    /// Body line has no `|` separator.
    MissingSeparator(usize),
    /// Color token is not exactly 4 hex digits.
    ColorToken(String),
    /// Body line has a different number of characters and color tokens.
    SegmentMismatch {
        line: usize,
        chars: usize,
        colors: usize,
    },
    /// Character with disallowed code point.
    DisallowedChar(u32),
    /// Failed to convert string to single character (invalid length).
    StrToCharConversion(usize),
    /// Unknown color name.
    ColorName(String),

    /// Character and color grids have a different number of rows.
    HeightMismatch { chars: usize, colors: usize },
    /// A row has a different number of characters and color tokens.
    WidthMismatch {
        row: usize,
        chars: usize,
        colors: usize,
    },

    /// Gradient needs at least two steps.
    GradientSteps(usize),
    /// Blend factor outside of `[0, 1]`.
    Alpha(f64),

    /// I/O error occurred.
    Io(Arc<std::io::Error>),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Header(_)
            | Error::Encoding(_)
            | Error::MissingSeparator(_)
            | Error::ColorToken(_)
            | Error::SegmentMismatch { .. }
            | Error::DisallowedChar(_)
            | Error::StrToCharConversion(_)
            | Error::ColorName(_) => ErrorKind::Format,
            Error::HeightMismatch { .. } | Error::WidthMismatch { .. } => ErrorKind::Dimension,
            Error::GradientSteps(_) | Error::Alpha(_) => ErrorKind::Range,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Header(h) => write!(f, "invalid file header: '{}'", h),
            Error::Encoding(line) => write!(f, "line {}: not valid UTF-8", line),
            Error::MissingSeparator(line) => {
                write!(f, "line {}: missing '|' between characters and colors", line)
            }
            Error::ColorToken(t) => {
                write!(f, "'{}' is not a color token; expected 4 hex digits", t)
            }
            Error::SegmentMismatch {
                line,
                chars,
                colors,
            } => write!(
                f,
                "line {}: {} characters but {} color tokens",
                line, chars, colors
            ),
            Error::DisallowedChar(ch) => write!(f, "disallowed char with code: {}", ch),
            Error::StrToCharConversion(ln) => {
                write!(f, "cannot convert str with length {} to single Char", ln)
            }
            Error::ColorName(name) => write!(f, "'{}' is not a known color name", name),
            Error::HeightMismatch { chars, colors } => write!(
                f,
                "character grid has {} rows but color grid has {}",
                chars, colors
            ),
            Error::WidthMismatch { row, chars, colors } => write!(
                f,
                "row {}: {} characters but {} color tokens",
                row, chars, colors
            ),
            Error::GradientSteps(steps) => {
                write!(f, "gradient needs at least 2 steps, got {}", steps)
            }
            Error::Alpha(alpha) => write!(f, "blend factor {} is outside of [0, 1]", alpha),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Error::Header("x".into()).kind(), ErrorKind::Format);
        assert_eq!(Error::ColorToken("zz".into()).kind(), ErrorKind::Format);
        assert_eq!(Error::Encoding(2).kind(), ErrorKind::Format);
        assert_eq!(
            Error::WidthMismatch {
                row: 0,
                chars: 1,
                colors: 2
            }
            .kind(),
            ErrorKind::Dimension
        );
        assert_eq!(Error::GradientSteps(1).kind(), ErrorKind::Range);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(Error::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn messages_are_single_line() {
        let err = Error::SegmentMismatch {
            line: 3,
            chars: 2,
            colors: 1,
        };
        assert_eq!(err.to_string(), "line 3: 2 characters but 1 color tokens");
        assert!(!Error::Header("WRONG|HEADER".into())
            .to_string()
            .contains('\n'));
    }
}
