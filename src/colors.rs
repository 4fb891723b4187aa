use core::fmt;
use std::{str::FromStr, sync::LazyLock};

use crate::error::{Error, Result};

/// Resets all SGR attributes.
pub const RESET: &str = "\x1b[0m";

/// Channel maximum under which a color is considered black by
/// [`RgbColor::to_nearest_display_color`].
const DARK_THRESHOLD: u8 = 85;

/// The fixed set of named terminal colors a [`crate::Pixel`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl NamedColor {
    pub const ALL: [NamedColor; 15] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
        NamedColor::BrightRed,
        NamedColor::BrightGreen,
        NamedColor::BrightYellow,
        NamedColor::BrightBlue,
        NamedColor::BrightMagenta,
        NamedColor::BrightCyan,
        NamedColor::BrightWhite,
    ];

    /// Upper-case name as used in pixel definitions, e.g. `BRIGHT_RED`.
    pub const fn name(&self) -> &'static str {
        match self {
            NamedColor::Black => "BLACK",
            NamedColor::Red => "RED",
            NamedColor::Green => "GREEN",
            NamedColor::Yellow => "YELLOW",
            NamedColor::Blue => "BLUE",
            NamedColor::Magenta => "MAGENTA",
            NamedColor::Cyan => "CYAN",
            NamedColor::White => "WHITE",
            NamedColor::BrightRed => "BRIGHT_RED",
            NamedColor::BrightGreen => "BRIGHT_GREEN",
            NamedColor::BrightYellow => "BRIGHT_YELLOW",
            NamedColor::BrightBlue => "BRIGHT_BLUE",
            NamedColor::BrightMagenta => "BRIGHT_MAGENTA",
            NamedColor::BrightCyan => "BRIGHT_CYAN",
            NamedColor::BrightWhite => "BRIGHT_WHITE",
        }
    }

    /// Foreground SGR sequence (30–37, 91–97).
    pub const fn fg_escape(&self) -> &'static str {
        match self {
            NamedColor::Black => "\x1b[30m",
            NamedColor::Red => "\x1b[31m",
            NamedColor::Green => "\x1b[32m",
            NamedColor::Yellow => "\x1b[33m",
            NamedColor::Blue => "\x1b[34m",
            NamedColor::Magenta => "\x1b[35m",
            NamedColor::Cyan => "\x1b[36m",
            NamedColor::White => "\x1b[37m",
            NamedColor::BrightRed => "\x1b[91m",
            NamedColor::BrightGreen => "\x1b[92m",
            NamedColor::BrightYellow => "\x1b[93m",
            NamedColor::BrightBlue => "\x1b[94m",
            NamedColor::BrightMagenta => "\x1b[95m",
            NamedColor::BrightCyan => "\x1b[96m",
            NamedColor::BrightWhite => "\x1b[97m",
        }
    }
}

impl Default for NamedColor {
    fn default() -> Self {
        Self::White
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a color name case-insensitively; `bright-red` and `BRIGHT_RED` are equal.
impl FromStr for NamedColor {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::ColorName(String::from(s)))
    }
}

/// An RGB color. Construction clamps every channel to `[0, 255]`; operations
/// return new values.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    r: u8,
    g: u8,
    b: u8,
}

impl RgbColor {
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: r.clamp(0, 255) as u8,
            g: g.clamp(0, 255) as u8,
            b: b.clamp(0, 255) as u8,
        }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    /// Linear interpolation towards `other`; `alpha = 0` yields `self`,
    /// `alpha = 1` yields `other`. Fractional channels are truncated.
    pub fn blend(&self, other: &RgbColor, alpha: f64) -> Result<RgbColor> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(Error::Alpha(alpha));
        }
        let mix = |a: u8, b: u8| (a as f64 * (1.0 - alpha) + b as f64 * alpha) as i32;
        Ok(Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        ))
    }

    /// Coarse mapping onto black, red, green or blue. Dark colors become
    /// black; otherwise the strongest channel wins, ties resolved R, G, B.
    pub fn to_nearest_display_color(&self) -> NamedColor {
        let max = self.r.max(self.g).max(self.b);
        if max < DARK_THRESHOLD {
            NamedColor::Black
        } else if self.r == max {
            NamedColor::Red
        } else if self.g == max {
            NamedColor::Green
        } else {
            NamedColor::Blue
        }
    }

    /// Foreground escape of [`RgbColor::to_nearest_display_color`].
    pub fn to_ansi(&self) -> &'static str {
        self.to_nearest_display_color().fg_escape()
    }

    /// The xterm RGB value of a 256-color index.
    pub fn from_ansi256(index: u8) -> Self {
        PALETTE_256[index as usize]
    }

    /// Index of the closest xterm 256-color entry by squared distance.
    /// The first matching index wins on ties.
    pub fn to_ansi256(&self) -> u8 {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (i, c) in PALETTE_256.iter().enumerate() {
            let dist = self.distance_sq(c);
            if dist < best_dist {
                best = i;
                best_dist = dist;
                if dist == 0 {
                    break;
                }
            }
        }
        best as u8
    }

    /// Hex notation, e.g. `#ff8000`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn distance_sq(&self, other: &RgbColor) -> u32 {
        let d = |a: u8, b: u8| {
            let d = a as i32 - b as i32;
            (d * d) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Standard xterm palette, built once on first use.
static PALETTE_256: LazyLock<[RgbColor; 256]> = LazyLock::new(|| {
    const SYSTEM: [(u8, u8, u8); 16] = [
        (0x00, 0x00, 0x00),
        (0x80, 0x00, 0x00),
        (0x00, 0x80, 0x00),
        (0x80, 0x80, 0x00),
        (0x00, 0x00, 0x80),
        (0x80, 0x00, 0x80),
        (0x00, 0x80, 0x80),
        (0xc0, 0xc0, 0xc0),
        (0x80, 0x80, 0x80),
        (0xff, 0x00, 0x00),
        (0x00, 0xff, 0x00),
        (0xff, 0xff, 0x00),
        (0x00, 0x00, 0xff),
        (0xff, 0x00, 0xff),
        (0x00, 0xff, 0xff),
        (0xff, 0xff, 0xff),
    ];
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let mut table = [RgbColor::default(); 256];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = if i < 16 {
            SYSTEM[i].into()
        } else if i < 232 {
            // 6x6x6 color cube
            let idx = i - 16;
            RgbColor::from_rgb(LEVELS[idx / 36], LEVELS[(idx % 36) / 6], LEVELS[idx % 6])
        } else {
            // grayscale ramp: 232..255 -> 24 shades
            let gray = (8 + (i - 232) * 10) as u8;
            RgbColor::from_rgb(gray, gray, gray)
        };
    }
    table
});

/// Stateless color algorithms.
pub struct ColorManager;

impl ColorManager {
    /// `steps` colors evenly spaced from `start` to `end`, both included.
    pub fn create_gradient(start: RgbColor, end: RgbColor, steps: usize) -> Result<Vec<RgbColor>> {
        if steps < 2 {
            return Err(Error::GradientSteps(steps));
        }
        let last = (steps - 1) as f64;
        (0..steps)
            .map(|i| start.blend(&end, i as f64 / last))
            .collect()
    }

    /// Per-channel `255 - value` inverse.
    pub fn complementary(color: RgbColor) -> RgbColor {
        RgbColor::from_rgb(255 - color.r, 255 - color.g, 255 - color.b)
    }
}

/// A foreground/background pair of 256-color indices, stored in files as
/// four hex digits (`FFBB`).
///
/// A token remembers which of its hex letters were written in lower case,
/// so a parsed token is written back exactly as it was read. Tokens built
/// with [`ColorToken::new`] are upper case.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorToken {
    fg: u8,
    bg: u8,
    // bit i set: hex digit i is a lower-case letter
    lower: u8,
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

impl ColorToken {
    pub const fn new(fg: u8, bg: u8) -> Self {
        Self { fg, bg, lower: 0 }
    }

    pub fn fg(&self) -> u8 {
        self.fg
    }

    pub fn bg(&self) -> u8 {
        self.bg
    }

    /// Returns the token with another foreground index, keeping the letter
    /// case of the digits that are still letters.
    pub fn with_fg(&self, fg: u8) -> Self {
        let fg_mask = letter_mask(fg) << 2 | 0b0011;
        Self {
            fg,
            bg: self.bg,
            lower: self.lower & fg_mask,
        }
    }

    /// Foreground and background 256-color escape sequences.
    pub fn to_ansi(&self) -> String {
        format!("\x1b[38;5;{}m\x1b[48;5;{}m", self.fg, self.bg)
    }

    /// Returns the escape sequences only if this token selects other colors
    /// than the previous one; otherwise an empty string.
    pub fn to_ansi_rel(&self, prev: &Option<Self>) -> String {
        match prev {
            Some(prev) if (prev.fg, prev.bg) == (self.fg, self.bg) => String::new(),
            _ => self.to_ansi(),
        }
    }

    fn digits(&self) -> [u8; 4] {
        [self.fg >> 4, self.fg & 0xf, self.bg >> 4, self.bg & 0xf]
    }
}

/// Bits 1 and 0 mark which of the two hex digits of `v` are letters.
fn letter_mask(v: u8) -> u8 {
    (((v >> 4) > 9) as u8) << 1 | ((v & 0xf) > 9) as u8
}

/// Hex digits, foreground first, in the letter case the token was read with.
impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, d) in self.digits().into_iter().enumerate() {
            let mut ch = HEX_DIGITS[d as usize] as char;
            if self.lower & (0b1000 >> i) != 0 {
                ch = ch.to_ascii_lowercase();
            }
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// Parses exactly four hex digits, case-insensitive.
impl FromStr for ColorToken {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let err = || Error::ColorToken(String::from(s));
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let fg = u8::from_str_radix(&s[0..2], 16).map_err(|_| err())?;
        let bg = u8::from_str_radix(&s[2..4], 16).map_err(|_| err())?;
        let lower = s
            .bytes()
            .fold(0, |mask, b| mask << 1 | b.is_ascii_lowercase() as u8);
        Ok(Self { fg, bg, lower })
    }
}
