//! Built-in sprites standing in for the game's image files.
//!
//! Each image path is resolved by its file stem to a sprite drawn with
//! colored character cells. Display pixels map onto the terminal grid at
//! [`CELL_WIDTH`] x [`CELL_HEIGHT`] pixels per cell, so a 24 px block is two
//! columns wide and one row tall.

use std::path::Path;

use anyhow::{bail, Result};

use crate::engine::render::{AssetLoader, ImageId, Renderer};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::renderer::TerminalRenderer;
use crate::types::{DisplaySize, Rect, BLOCK_SIZE};

/// Display pixels per terminal column
pub const CELL_WIDTH: i32 = 12;

/// Display pixels per terminal row
pub const CELL_HEIGHT: i32 = 24;

const BACKDROP: Rgb = Rgb::new(10, 12, 28);
const WELL: Rgb = Rgb::new(24, 26, 40);
const WALL: Rgb = Rgb::new(120, 120, 130);

/// Block sheet tiles by color index; the last entry is the wall tile
const TILE_COLORS: [Rgb; 8] = [
    Rgb::new(0, 220, 220),
    Rgb::new(220, 40, 40),
    Rgb::new(230, 210, 0),
    Rgb::new(240, 140, 0),
    Rgb::new(40, 200, 60),
    Rgb::new(170, 60, 220),
    Rgb::new(40, 90, 230),
    WALL,
];

#[derive(Debug, Clone, PartialEq)]
enum Look {
    /// Uniform cells
    Fill { ch: char, style: CellStyle },
    /// A horizontal strip of block-sized tiles, picked by the source rect
    Tiles,
    /// A banner: background box with centered text
    Banner { text: &'static str, style: CellStyle },
}

#[derive(Debug, Clone, PartialEq)]
struct Sprite {
    width: i32,
    height: i32,
    look: Look,
}

impl Sprite {
    fn for_stem(stem: &str, display: DisplaySize) -> Option<Self> {
        let sprite = match stem {
            "bg" => Sprite {
                width: display.width,
                height: display.height,
                look: Look::Fill {
                    ch: ' ',
                    style: CellStyle::new(BACKDROP, BACKDROP),
                },
            },
            "bgBlock" => Sprite {
                width: BLOCK_SIZE,
                height: BLOCK_SIZE,
                look: Look::Fill {
                    ch: '·',
                    style: CellStyle::new(Rgb::new(60, 62, 80), WELL),
                },
            },
            "block" => Sprite {
                width: BLOCK_SIZE * TILE_COLORS.len() as i32,
                height: BLOCK_SIZE,
                look: Look::Tiles,
            },
            "press" => Sprite {
                width: CELL_WIDTH * 14,
                height: CELL_HEIGHT,
                look: Look::Banner {
                    text: "PRESS ENTER",
                    style: CellStyle::new(Rgb::new(255, 255, 255), BACKDROP).bold(),
                },
            },
            "ready" => Sprite {
                width: CELL_WIDTH * 10,
                height: CELL_HEIGHT * 2,
                look: Look::Banner {
                    text: "READY",
                    style: CellStyle::new(Rgb::new(255, 230, 80), Rgb::new(40, 40, 110)).bold(),
                },
            },
            "go" => Sprite {
                width: CELL_WIDTH * 8,
                height: CELL_HEIGHT * 2,
                look: Look::Banner {
                    text: "GO!!!",
                    style: CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(180, 30, 30)).bold(),
                },
            },
            _ => return None,
        };
        Some(sprite)
    }
}

/// Image table resolving the game's image paths to built-in sprites.
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    display: DisplaySize,
    sprites: Vec<Sprite>,
}

impl SpriteAtlas {
    pub fn new(display: DisplaySize) -> Self {
        Self {
            display,
            sprites: Vec::new(),
        }
    }

    fn get(&self, id: ImageId) -> Option<&Sprite> {
        self.sprites.get(id.0 as usize)
    }
}

impl AssetLoader for SpriteAtlas {
    fn load_image(&mut self, path: &str) -> Result<ImageId> {
        let stem = Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let Some(sprite) = Sprite::for_stem(stem, self.display) else {
            bail!("no built-in sprite for {path}");
        };
        self.sprites.push(sprite);
        Ok(ImageId((self.sprites.len() - 1) as u32))
    }

    fn image_size(&self, id: ImageId) -> Option<(i32, i32)> {
        self.get(id).map(|s| (s.width, s.height))
    }
}

/// Terminal cells `[start, end)` covered by the pixel span `[from, from + len)`.
fn cell_span(from: i32, len: i32, cell: i32) -> (i32, i32) {
    (from.div_euclid(cell), (from + len).div_euclid(cell))
}

/// [`Renderer`] that paints sprites into a [`FrameBuffer`] and optionally
/// presents every finished frame on the terminal.
pub struct SpriteRenderer {
    atlas: SpriteAtlas,
    fb: FrameBuffer,
    alpha: f32,
    terminal: Option<TerminalRenderer>,
}

impl SpriteRenderer {
    /// A renderer that keeps frames in memory only.
    pub fn headless(display: DisplaySize) -> Self {
        let cols = (display.width + CELL_WIDTH - 1) / CELL_WIDTH;
        let rows = (display.height + CELL_HEIGHT - 1) / CELL_HEIGHT;
        Self {
            atlas: SpriteAtlas::new(display),
            fb: FrameBuffer::new(
                cols.clamp(1, u16::MAX as i32) as u16,
                rows.clamp(1, u16::MAX as i32) as u16,
            ),
            alpha: 1.0,
            terminal: None,
        }
    }

    /// A renderer that presents each frame through `terminal`.
    pub fn with_terminal(display: DisplaySize, terminal: TerminalRenderer) -> Self {
        Self {
            terminal: Some(terminal),
            ..Self::headless(display)
        }
    }

    /// The frame being painted (headless renderers keep the last finished frame here).
    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn terminal_mut(&mut self) -> Option<&mut TerminalRenderer> {
        self.terminal.as_mut()
    }

    fn paint_fill(&mut self, dst: Rect, ch: char, style: CellStyle) {
        let (x0, x1) = cell_span(dst.x, dst.w, CELL_WIDTH);
        let (y0, y1) = cell_span(dst.y, dst.h, CELL_HEIGHT);
        for y in y0..y1 {
            for x in x0..x1 {
                self.fb.blend_char(x, y, ch, style, self.alpha);
            }
        }
    }

    fn paint_banner(&mut self, dst: Rect, text: &str, style: CellStyle) {
        self.paint_fill(dst, ' ', style);

        let (x0, x1) = cell_span(dst.x, dst.w, CELL_WIDTH);
        let (y0, y1) = cell_span(dst.y, dst.h, CELL_HEIGHT);
        let len = text.chars().count() as i32;
        let x = x0 + (x1 - x0 - len) / 2;
        let y = y0 + (y1 - y0 - 1) / 2;
        self.fb.blend_str(x, y, text, style, self.alpha);
    }
}

impl Renderer for SpriteRenderer {
    fn assets(&mut self) -> &mut dyn AssetLoader {
        &mut self.atlas
    }

    fn begin_frame(&mut self) -> Result<()> {
        self.fb.clear(Cell::default());
        self.alpha = 1.0;
        Ok(())
    }

    fn draw_image(&mut self, image: ImageId, dst: Rect, src: Option<Rect>) {
        let Some(look) = self.atlas.get(image).map(|s| s.look.clone()) else {
            return;
        };
        match look {
            Look::Fill { ch, style } => self.paint_fill(dst, ch, style),
            Look::Tiles => {
                let index = src.map(|r| r.x / BLOCK_SIZE).unwrap_or(0);
                let color = TILE_COLORS[index.clamp(0, TILE_COLORS.len() as i32 - 1) as usize];
                let ch = if color == WALL { '▒' } else { '█' };
                self.paint_fill(dst, ch, CellStyle::new(color, color.over(Rgb::default(), 0.6)));
            }
            Look::Banner { text, style } => self.paint_banner(dst, text, style),
        }
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn end_frame(&mut self) -> Result<()> {
        if let Some(terminal) = self.terminal.as_mut() {
            terminal.present(&mut self.fb)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> DisplaySize {
        DisplaySize::new(288, 408)
    }

    #[test]
    fn frame_covers_display_in_cells() {
        let renderer = SpriteRenderer::headless(display());
        assert_eq!(renderer.frame().width(), 24);
        assert_eq!(renderer.frame().height(), 17);
    }

    #[test]
    fn unknown_image_is_an_error() {
        let mut atlas = SpriteAtlas::new(display());
        assert!(atlas.load_image("res/image/title.png").is_err());
        let bg = atlas.load_image("res/image/bg.png").unwrap();
        assert_eq!(atlas.image_size(bg), Some((288, 408)));
    }

    #[test]
    fn block_tile_spans_two_columns() {
        let mut r = SpriteRenderer::headless(display());
        let block = r.assets().load_image("res/image/block.png").unwrap();
        r.begin_frame().unwrap();
        r.draw_image(block, Rect::square(24, 48, 24), Some(Rect::square(0, 0, 24)));
        r.end_frame().unwrap();

        let fb = r.frame();
        assert_eq!(fb.get(2, 2).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(3, 2).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(4, 2).map(|c| c.ch), Some(' '));
        assert_eq!(fb.get(2, 2).map(|c| c.style.fg), Some(TILE_COLORS[0]));
    }

    #[test]
    fn banner_text_is_centered_and_clipped() {
        let mut r = SpriteRenderer::headless(display());
        let ready = r.assets().load_image("res/image/ready.png").unwrap();
        r.begin_frame().unwrap();
        // 10 columns wide, centered horizontally: columns 7..17
        r.draw_image(ready, Rect::new(84, 180, 120, 48), None);
        r.end_frame().unwrap();

        assert!(r.frame().row_text(7).contains("READY"));
        assert_eq!(r.frame().row_text(7).find("READY"), Some(9));
    }

    #[test]
    fn alpha_fades_toward_background() {
        let mut r = SpriteRenderer::headless(display());
        let press = r.assets().load_image("res/image/press.png").unwrap();
        r.begin_frame().unwrap();
        r.set_alpha(0.0);
        r.draw_image(press, Rect::new(60, 192, 168, 24), None);
        r.end_frame().unwrap();

        // 14 columns from column 5; the 11-char text starts at column 6
        let cell = r.frame().get(6, 8).unwrap();
        assert_eq!(cell.ch, 'P');
        assert_eq!(cell.style.fg, Cell::default().style.bg);
    }
}
