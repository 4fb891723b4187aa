use crate::colors::{ColorToken, NamedColor, RESET};
use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// Rendering knobs.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit a color escape only when it differs from the previous cell of
    /// the same row. Off by default, which escapes every cell.
    pub compact: bool,
}

/// Turns cell grids into terminal-ready strings. Rows are separated by
/// `\n` and every row ends with a full reset.
#[derive(Default, Debug, Clone, Copy)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Renders parallel character and 256-color token grids.
    /// Fails without output if the grids differ in shape.
    pub fn render_grid(&self, chars: &[Vec<char>], colors: &[Vec<ColorToken>]) -> Result<String> {
        check_shape(chars, colors)?;
        let rows: Vec<String> = chars
            .iter()
            .zip(colors)
            .map(|(chars, colors)| {
                let mut line = String::new();
                let mut prev: Option<ColorToken> = None;
                for (ch, token) in chars.iter().zip(colors) {
                    if self.options.compact {
                        line += &token.to_ansi_rel(&prev);
                    } else {
                        line += &token.to_ansi();
                    }
                    line.push(*ch);
                    prev = Some(*token);
                }
                line + RESET
            })
            .collect();
        Ok(rows.join("\n"))
    }

    /// Renders rows of named-color pixels.
    pub fn render_pixels(&self, rows: &[Vec<Pixel>]) -> String {
        let rows: Vec<String> = rows
            .iter()
            .map(|row| {
                if !self.options.compact {
                    return row.iter().map(Pixel::to_display_string).collect::<String>();
                }
                let mut line = String::new();
                let mut prev: Option<NamedColor> = None;
                for pixel in row {
                    if prev != Some(pixel.color()) {
                        line += pixel.color().fg_escape();
                        prev = Some(pixel.color());
                    }
                    line.push(pixel.char().as_char());
                }
                line + RESET
            })
            .collect();
        rows.join("\n")
    }
}

/// Both grids must have the same number of rows, and every row as many
/// characters as color tokens. Rows may differ in width from each other.
pub(crate) fn check_shape(chars: &[Vec<char>], colors: &[Vec<ColorToken>]) -> Result<()> {
    if chars.len() != colors.len() {
        return Err(Error::HeightMismatch {
            chars: chars.len(),
            colors: colors.len(),
        });
    }
    for (row, (c, t)) in chars.iter().zip(colors).enumerate() {
        if c.len() != t.len() {
            return Err(Error::WidthMismatch {
                row,
                chars: c.len(),
                colors: t.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(rows: &[&str]) -> Vec<Vec<char>> {
        rows.iter().map(|r| r.chars().collect()).collect()
    }

    fn tokens(rows: &[&[&str]]) -> Vec<Vec<ColorToken>> {
        rows.iter()
            .map(|r| r.iter().map(|t| t.parse().unwrap()).collect())
            .collect()
    }

    #[test]
    fn single_cell() {
        let out = Renderer::default()
            .render_grid(&grid(&["X"]), &tokens(&[&["0001"]]))
            .unwrap();
        assert_eq!(out, "\x1b[38;5;0m\x1b[48;5;1mX\x1b[0m");
    }

    #[test]
    fn rows_reset_and_join() {
        let out = Renderer::default()
            .render_grid(&grid(&["AB", "C"]), &tokens(&[&["0A0B", "0A0B"], &["FF00"]]))
            .unwrap();
        assert_eq!(
            out,
            "\x1b[38;5;10m\x1b[48;5;11mA\x1b[38;5;10m\x1b[48;5;11mB\x1b[0m\n\
             \x1b[38;5;255m\x1b[48;5;0mC\x1b[0m"
        );
    }

    #[test]
    fn compact_skips_repeated_escapes() {
        let r = Renderer::new(RenderOptions { compact: true });
        let out = r
            .render_grid(&grid(&["AAB"]), &tokens(&[&["0102", "0102", "0201"]]))
            .unwrap();
        assert_eq!(
            out,
            "\x1b[38;5;1m\x1b[48;5;2mAA\x1b[38;5;2m\x1b[48;5;1mB\x1b[0m"
        );
    }

    #[test]
    fn shape_errors() {
        let r = Renderer::default();
        let err = r
            .render_grid(&grid(&["AB"]), &tokens(&[&["0001"]]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::WidthMismatch {
                row: 0,
                chars: 2,
                colors: 1
            }
        ));
        let err = r
            .render_grid(&grid(&["A", "B"]), &tokens(&[&["0001"]]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::HeightMismatch {
                chars: 2,
                colors: 1
            }
        ));
    }

    #[test]
    fn cells_render_unchanged() {
        let out = Renderer::default()
            .render_grid(&grid(&["\te\u{301}"]), &tokens(&[&["0001", "0001", "0001"]]))
            .unwrap();
        assert_eq!(
            out,
            "\x1b[38;5;0m\x1b[48;5;1m\t\x1b[38;5;0m\x1b[48;5;1me\x1b[38;5;0m\x1b[48;5;1m\u{301}\x1b[0m"
        );
    }

    #[test]
    fn empty_grid_renders_empty() {
        assert_eq!(Renderer::default().render_grid(&[], &[]).unwrap(), "");
    }

    #[test]
    fn pixels() {
        let row = vec![
            Pixel::create_colored("♥", "RED"),
            Pixel::create_colored("♥", "RED"),
            Pixel::create_colored(" ", "WHITE"),
        ];
        let plain = Renderer::default().render_pixels(&[row.clone()]);
        assert_eq!(
            plain,
            "\x1b[31m♥\x1b[0m\x1b[31m♥\x1b[0m\x1b[37m \x1b[0m"
        );
        let compact = Renderer::new(RenderOptions { compact: true }).render_pixels(&[row]);
        assert_eq!(compact, "\x1b[31m♥♥\x1b[37m \x1b[0m");
    }
}
