//! Colored ASCII art documents.
//!
//! An [`ArtDocument`] is a grid of characters with a parallel grid of
//! foreground/background 256-color tokens. It is stored in the line based
//! `AAFSR1|COMBINED` text format and rendered to ANSI escape sequences.
//! [`RgbColor`] and [`ColorManager`] provide the color math used to build
//! color data, [`Pixel`] a simpler named-color cell.

pub mod chars;
pub mod colors;
pub mod document;
pub mod error;
pub mod pixel;
pub mod render;

pub use chars::Char;
pub use colors::{ColorManager, ColorToken, NamedColor, RgbColor};
pub use document::ArtDocument;
pub use error::{Error, ErrorKind, Result};
pub use pixel::Pixel;
pub use render::{RenderOptions, Renderer};
