use core::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};
use ordermap::OrderMap;

use crate::chars::{normalize_text, SEPARATOR};
use crate::colors::{ColorManager, ColorToken, RgbColor};
use crate::error::{Error, Result};
use crate::render::{check_shape, Renderer};

/// Magic first line of every AAFSR1 file.
pub const HEADER: &str = "AAFSR1|COMBINED";

/// A colored character-grid drawing: a character grid and a parallel grid
/// of [`ColorToken`]s with the same row count and, row by row, the same
/// number of cells.
///
/// The on-disk format is line based:
///
/// ```text
/// AAFSR1|COMBINED
/// <row characters>|<space separated color tokens>
/// ```
///
/// Blank lines are skipped on load. An empty row is saved as a lone `|`,
/// so it still survives a save/load cycle.
///
/// Cells hold characters exactly as they were read, tabs and combining
/// marks included, so a loaded file saves back byte for byte. Only `|` and
/// line breaks cannot be saved.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ArtDocument {
    pub(crate) chars: Vec<Vec<char>>,
    pub(crate) colors: Vec<Vec<ColorToken>>,
}

impl ArtDocument {
    /// Creates a `width` x `height` document filled with one cell value.
    pub fn new(width: usize, height: usize, fill: char, token: ColorToken) -> Self {
        Self {
            chars: vec![vec![fill; width]; height],
            colors: vec![vec![token; width]; height],
        }
    }

    /// A small badge drawing, handy for trying out renderers.
    pub fn example() -> Self {
        let rows: [(&str, u8); 5] = [
            ("   ____   ", 0x4B),
            ("  /    \\  ", 0x35),
            (" / CGA  \\ ", 0xC7),
            (" \\      / ", 0x35),
            ("  \\____/  ", 0x4B),
        ];
        let mut art = Self::default();
        for (text, fg) in rows {
            let chars: Vec<char> = text.chars().collect();
            let colors = chars
                .iter()
                .map(|c| {
                    if *c == ' ' {
                        ColorToken::default()
                    } else {
                        ColorToken::new(fg, 0)
                    }
                })
                .collect();
            art.chars.push(chars);
            art.colors.push(colors);
        }
        art
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.chars.len()
    }

    /// Returns the number of cells in a row, or 0 if the row does not exist.
    pub fn width(&self, row: usize) -> usize {
        self.chars.get(row).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.colors.is_empty()
    }

    pub fn char_grid(&self) -> &[Vec<char>] {
        &self.chars
    }

    pub fn color_grid(&self) -> &[Vec<ColorToken>] {
        &self.colors
    }

    /// Replaces both grids at once. Nothing changes if their shapes differ.
    pub fn set_grids(&mut self, chars: Vec<Vec<char>>, colors: Vec<Vec<ColorToken>>) -> Result<()> {
        check_shape(&chars, &colors)?;
        self.chars = chars;
        self.colors = colors;
        Ok(())
    }

    /// Appends a row; `text` must hold one character per token.
    pub fn push_row(&mut self, text: &str, colors: Vec<ColorToken>) -> Result<()> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != colors.len() {
            return Err(Error::WidthMismatch {
                row: self.chars.len(),
                chars: chars.len(),
                colors: colors.len(),
            });
        }
        self.chars.push(chars);
        self.colors.push(colors);
        Ok(())
    }

    /// Returns the cell at the given position, if it exists in both grids.
    pub fn get(&self, column: usize, row: usize) -> Option<(char, ColorToken)> {
        let ch = self.chars.get(row)?.get(column)?;
        let token = self.colors.get(row)?.get(column)?;
        Some((*ch, *token))
    }

    /// Sets a cell. Out-of-range positions are ignored.
    pub fn set(&mut self, column: usize, row: usize, ch: char, token: ColorToken) {
        self.set_char(column, row, ch);
        self.set_color(column, row, token);
    }

    pub fn set_char(&mut self, column: usize, row: usize, ch: char) {
        if let Some(cell) = self.chars.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = ch;
        }
    }

    pub fn set_color(&mut self, column: usize, row: usize, token: ColorToken) {
        if let Some(cell) = self.colors.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = token;
        }
    }

    /// Writes `text` into a row starting at `column`, clipped to the row.
    /// Undisplayable characters are dropped. With `token` set, the written
    /// cells are recolored too.
    pub fn print(&mut self, column: usize, row: usize, text: &str, token: Option<ColorToken>) {
        for (i, ch) in normalize_text(text).chars().enumerate() {
            let col = column + i;
            if col >= self.width(row) {
                break;
            }
            self.set_char(col, row, ch);
            if let Some(token) = token {
                self.set_color(col, row, token);
            }
        }
    }

    /// The character grid as editable text, one line per row.
    pub fn chars_text(&self) -> String {
        self.chars
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The color grid as editable text, one line of space separated tokens per row.
    pub fn colors_text(&self) -> String {
        self.colors
            .iter()
            .map(|row| join_tokens(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replaces the character grid from text produced by an editor buffer,
    /// one row per line.
    pub fn set_chars_text(&mut self, text: &str) {
        self.chars = text.lines().map(|line| line.chars().collect()).collect();
    }

    /// Replaces the color grid from text produced by an editor buffer.
    /// The grid is left untouched if any token is malformed.
    pub fn set_colors_text(&mut self, text: &str) -> Result<()> {
        self.colors = text.lines().map(parse_tokens).collect::<Result<_>>()?;
        Ok(())
    }

    /// Checks that the document can be rendered and saved: grids of the same
    /// shape and no `|` or `\n` among the characters.
    pub fn validate(&self) -> Result<()> {
        check_shape(&self.chars, &self.colors)?;
        for row in &self.chars {
            if let Some(c) = row.iter().find(|c| **c == SEPARATOR || **c == '\n') {
                return Err(Error::DisallowedChar((*c).into()));
            }
        }
        Ok(())
    }

    /// Counts how often each color token is used, in order of first use.
    pub fn used_colors(&self) -> OrderMap<ColorToken, usize> {
        let mut used = OrderMap::new();
        for token in self.colors.iter().flatten() {
            *used.entry(*token).or_insert(0) += 1;
        }
        used
    }

    /// Recolors the foreground of each row along a vertical gradient from
    /// `start` (top row) to `end` (bottom row), mapped to the nearest
    /// 256-color index. A single row takes `start`; an empty document is
    /// left as it is.
    pub fn apply_row_gradient(&mut self, start: RgbColor, end: RgbColor) -> Result<()> {
        let gradient = match self.colors.len() {
            0 => return Ok(()),
            1 => vec![start],
            rows => ColorManager::create_gradient(start, end, rows)?,
        };
        for (row, color) in self.colors.iter_mut().zip(gradient) {
            let fg = color.to_ansi256();
            for token in row {
                *token = token.with_fg(fg);
            }
        }
        Ok(())
    }

    /// Renders the document with 256-color escapes.
    pub fn render(&self) -> Result<String> {
        self.render_with(&Renderer::default())
    }

    pub fn render_with(&self, renderer: &Renderer) -> Result<String> {
        renderer
            .render_grid(&self.chars, &self.colors)
            .inspect_err(|err| warn!("failed to render art: {}", err))
    }

    /// Replaces this document with the one stored at `path`. On any error
    /// the current grids are kept.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(art) => {
                debug!("loaded {} ({} rows)", path.display(), art.height());
                *self = art;
                Ok(())
            }
            Err(err) => {
                warn!("failed to load {}: {}", path.display(), err);
                Err(err)
            }
        }
    }

    /// Writes the document to `path` in the AAFSR1 format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let result = self.validate().and_then(|_| self.to_file(path));
        match &result {
            Ok(()) => debug!("saved {} ({} rows)", path.display(), self.height()),
            Err(err) => warn!("failed to save {}: {}", path.display(), err),
        }
        result
    }

    fn to_file(&self, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        write!(out, "{}", self)?;
        out.flush()?;
        Ok(())
    }

    /// Reads a document from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Reads a document from any reader.
    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        let mut lines = BufReader::new(r).lines();
        Self::from_lines(&mut lines)
    }

    fn from_lines<R: Read>(lines: &mut io::Lines<BufReader<R>>) -> Result<Self> {
        let header = lines
            .next()
            .transpose()
            .map_err(|err| read_error(err, 1))?
            .unwrap_or_default();
        if header.trim() != HEADER {
            return Err(Error::Header(header.trim().into()));
        }
        let mut art = Self::default();
        // the header is line 1
        for (number, line) in (2..).zip(lines) {
            let line = line.map_err(|err| read_error(err, number))?;
            if line.trim().is_empty() {
                continue;
            }
            let (text, colors) = line
                .split_once(SEPARATOR)
                .ok_or(Error::MissingSeparator(number))?;
            let chars: Vec<char> = text.chars().collect();
            let colors = parse_tokens(colors)?;
            if chars.len() != colors.len() {
                return Err(Error::SegmentMismatch {
                    line: number,
                    chars: chars.len(),
                    colors: colors.len(),
                });
            }
            art.chars.push(chars);
            art.colors.push(colors);
        }
        Ok(art)
    }
}

/// Undecodable bytes are a format problem of the given line, not an I/O one.
fn read_error(err: io::Error, line: usize) -> Error {
    if err.kind() == io::ErrorKind::InvalidData {
        Error::Encoding(line)
    } else {
        err.into()
    }
}

fn parse_tokens(s: &str) -> Result<Vec<ColorToken>> {
    s.split_whitespace().map(ColorToken::from_str).collect()
}

fn join_tokens(row: &[ColorToken]) -> String {
    row.iter()
        .map(ColorToken::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for ArtDocument {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(Cursor::new(s.as_bytes()))
    }
}

impl TryFrom<&[u8]> for ArtDocument {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(value))
    }
}

/// Writes the document in the AAFSR1 format. Rows are written as they are;
/// use [`ArtDocument::validate`] first if the result must load back.
impl fmt::Display for ArtDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER)?;
        for (chars, colors) in self.chars.iter().zip(&self.colors) {
            for c in chars {
                write!(f, "{}", c)?;
            }
            writeln!(f, "{}{}", SEPARATOR, join_tokens(colors))?;
        }
        Ok(())
    }
}
