//! Rendering capability consumed by scenes.
//!
//! Scenes never touch a concrete backend. They resolve images once through
//! [`AssetLoader`] while being constructed and then issue rectangular blits
//! through [`Renderer`] during the draw pass.

use anyhow::{bail, Result};

use crate::types::Rect;

/// Handle for referencing loaded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Resolves image paths to handles.
pub trait AssetLoader {
    fn load_image(&mut self, path: &str) -> Result<ImageId>;

    /// Pixel size `(width, height)` of a loaded image.
    fn image_size(&self, id: ImageId) -> Option<(i32, i32)>;
}

/// Abstraction over rendering backends.
/// Implementations: SpriteRenderer (terminal), RecordingRenderer (testing).
pub trait Renderer {
    fn assets(&mut self) -> &mut dyn AssetLoader;

    /// Start a frame. Resets the alpha to 1.0.
    fn begin_frame(&mut self) -> Result<()>;

    /// Blit `image` (or its `src` sub-rectangle) into `dst`.
    fn draw_image(&mut self, image: ImageId, dst: Rect, src: Option<Rect>);

    /// Opacity (0.0..=1.0) applied to every following draw of this frame.
    fn set_alpha(&mut self, alpha: f32);

    fn end_frame(&mut self) -> Result<()>;
}

/// One recorded `draw_image` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub image: ImageId,
    pub dst: Rect,
    pub src: Option<Rect>,
    pub alpha: f32,
}

/// Asset table that hands out sequential ids with configurable sizes.
#[derive(Debug, Clone, Default)]
pub struct RecordingAssets {
    images: Vec<(String, (i32, i32))>,
    sizes: Vec<(String, (i32, i32))>,
}

impl RecordingAssets {
    /// Size reported for images whose path ends with `suffix`.
    pub fn with_size(mut self, suffix: &str, width: i32, height: i32) -> Self {
        self.sizes.push((suffix.to_string(), (width, height)));
        self
    }

    pub fn path_of(&self, id: ImageId) -> Option<&str> {
        self.images.get(id.0 as usize).map(|(p, _)| p.as_str())
    }

    pub fn id_of(&self, suffix: &str) -> Option<ImageId> {
        self.images
            .iter()
            .position(|(p, _)| p.ends_with(suffix))
            .map(|i| ImageId(i as u32))
    }
}

impl AssetLoader for RecordingAssets {
    fn load_image(&mut self, path: &str) -> Result<ImageId> {
        if path.is_empty() {
            bail!("empty image path");
        }
        let size = self
            .sizes
            .iter()
            .find(|(suffix, _)| path.ends_with(suffix.as_str()))
            .map(|(_, size)| *size)
            .unwrap_or((24, 24));
        self.images.push((path.to_string(), size));
        Ok(ImageId((self.images.len() - 1) as u32))
    }

    fn image_size(&self, id: ImageId) -> Option<(i32, i32)> {
        self.images.get(id.0 as usize).map(|(_, s)| *s)
    }
}

/// Renderer that records draw calls instead of painting.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub assets: RecordingAssets,
    commands: Vec<DrawCommand>,
    alpha: f32,
    frames: u32,
}

impl RecordingRenderer {
    pub fn new(assets: RecordingAssets) -> Self {
        Self {
            assets,
            commands: Vec::new(),
            alpha: 1.0,
            frames: 0,
        }
    }

    /// Commands of the most recent frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Commands of the most recent frame that drew the image ending with `suffix`.
    pub fn commands_for(&self, suffix: &str) -> Vec<DrawCommand> {
        match self.assets.id_of(suffix) {
            Some(id) => self
                .commands
                .iter()
                .filter(|c| c.image == id)
                .copied()
                .collect(),
            None => Vec::new(),
        }
    }
}

impl Renderer for RecordingRenderer {
    fn assets(&mut self) -> &mut dyn AssetLoader {
        &mut self.assets
    }

    fn begin_frame(&mut self) -> Result<()> {
        self.commands.clear();
        self.alpha = 1.0;
        Ok(())
    }

    fn draw_image(&mut self, image: ImageId, dst: Rect, src: Option<Rect>) {
        self.commands.push(DrawCommand {
            image,
            dst,
            src,
            alpha: self.alpha,
        });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn end_frame(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}
