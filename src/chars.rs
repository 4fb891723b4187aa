use crate::error::{Error, Result};
use std::{fmt::Display, str::FromStr};

/// Space character.
pub const SPACE: Char = Char { char: ' ' };
/// Column separator of the file format; cannot be stored in a saved row.
pub const SEPARATOR: char = '|';

/// A single printable display character, as carried by a [`crate::Pixel`].
/// Document grids store raw `char`s instead, so files round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Char {
    pub(crate) char: char,
}

impl Char {
    /// Creates a new `Char` after validating the character.
    /// Returns `Err` if the character is not printable.
    pub fn new(ch: char) -> Result<Self> {
        check_char(ch).map_or(Err(Error::DisallowedChar(ch.into())), |ok| {
            Ok(Self { char: ok })
        })
    }

    /// Creates a new `Char` if the character is allowed; otherwise returns the default.
    pub fn new_or(ch: char, default: Char) -> Char {
        check_char(ch).map_or(default, |ok| Char { char: ok })
    }

    /// Takes the first character of `s`, falling back to `default` when `s`
    /// is empty or starts with a disallowed character.
    pub fn first_or(s: &str, default: Char) -> Char {
        s.chars()
            .next()
            .map_or(default, |ch| Self::new_or(ch, default))
    }

    pub fn as_char(&self) -> char {
        self.char
    }
}

impl Default for Char {
    fn default() -> Self {
        SPACE
    }
}

impl Display for Char {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.char)
    }
}

impl From<Char> for char {
    fn from(c: Char) -> char {
        c.char
    }
}

impl From<Char> for String {
    fn from(c: Char) -> String {
        c.char.to_string()
    }
}

impl TryFrom<char> for Char {
    type Error = Error;
    fn try_from(value: char) -> Result<Self> {
        Self::new(value)
    }
}

/// Parses a string slice containing exactly one character into a `Char`.
impl FromStr for Char {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::new(ch),
            _ => Err(Error::StrToCharConversion(s.chars().count())),
        }
    }
}

/// Checks whether a character may be displayed in an art cell.
/// Returns `Some(ch)` if allowed (with tabs and other separators normalized
/// to space), or `None` if the character should be rejected.
pub fn check_char(ch: char) -> Option<char> {
    let cp = ch as u32;

    // TAB, Mongolian Vowel Separator and the Zs space separators
    if cp == 0x0009
        || cp == 0x180E
        || cp == 0x00A0
        || cp == 0x1680
        || (0x2000..=0x200A).contains(&cp)
        || cp == 0x202F
        || cp == 0x205F
        || cp == 0x3000
    {
        return Some(' ');
    }

    // C0 and C1 controls
    if (0x0000..=0x001F).contains(&cp) || (0x007F..=0x009F).contains(&cp) {
        return None;
    }
    // Combining marks
    if (0x0300..=0x036F).contains(&cp) {
        return None;
    }
    // Zero-width, joiners and variation selectors
    if (0x200B..=0x200F).contains(&cp) || cp == 0xFEFF || (0xFE00..=0xFE0F).contains(&cp) {
        return None;
    }
    // Bidi controls
    if (0x202A..=0x202E).contains(&cp) || (0x2066..=0x2069).contains(&cp) {
        return None;
    }

    Some(ch)
}

/// Removes disallowed characters from a string and normalizes allowed whitespace.
pub fn normalize_text(input: &str) -> String {
    input.chars().filter_map(check_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tabs_and_spaces_normalized() {
        let s = "A\tB\u{00A0}C\u{2003}D\u{3000}E";
        assert_eq!(normalize_text(s), "A B C D E");
    }

    #[test]
    fn controls_and_zero_width_removed() {
        let s = "X\u{200B}Y\u{202A}Z\u{0301}\u{001b}Q\r";
        assert_eq!(normalize_text(s), "XYZQ");
    }

    #[test]
    fn box_drawing_and_symbols_kept() {
        assert_eq!(normalize_text("╔═♥█▶|"), "╔═♥█▶|");
    }

    #[test]
    fn new_normalizes_or_rejects() {
        assert_eq!(Char::new('\t').unwrap(), SPACE);
        assert_eq!(Char::new('\u{00A0}').unwrap(), SPACE);
        assert!(matches!(Char::new('\r'), Err(Error::DisallowedChar(13))));
        assert!(matches!(Char::new('\u{0301}'), Err(Error::DisallowedChar(0x301))));
    }

    #[test]
    fn first_or_falls_back() {
        assert_eq!(Char::first_or("", SPACE), SPACE);
        assert_eq!(Char::first_or("\u{0007}x", SPACE), SPACE);
        assert_eq!(Char::first_or("hello", SPACE).as_char(), 'h');
    }

    #[test]
    fn from_str_needs_exactly_one_char() {
        assert_eq!("♥".parse::<Char>().unwrap().as_char(), '♥');
        assert!(matches!(
            "ab".parse::<Char>(),
            Err(Error::StrToCharConversion(2))
        ));
        assert!(matches!(
            "".parse::<Char>(),
            Err(Error::StrToCharConversion(0))
        ));
        assert!(matches!(
            "\n".parse::<Char>(),
            Err(Error::DisallowedChar(10))
        ));
    }
}
