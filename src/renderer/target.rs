//! Render target abstraction
//!
//! The render pass only ever talks to a [`RenderTarget`]. The wgpu backend
//! batches the calls into vertices; [`DrawList`] records them as commands.

use super::sprites::SpriteId;
use crate::sim::Rect;

/// Linear RGBA
pub type Color = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Cap height in world pixels
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color, align: TextAlign) -> Self {
        Self { size, color, align }
    }
}

/// A 2D drawing surface in world coordinates (origin top-left, y down)
pub trait RenderTarget {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);

    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Blit a sprite into `rect`, rotated by `rotation` radians about the
    /// rect center. Unknown sprites are skipped.
    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect, rotation: f32);

    /// Draw a line of text anchored at (`x`, `y`) per the style alignment,
    /// `y` being the top of the text
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    Sprite { sprite: SpriteId, rect: Rect, rotation: f32 },
    Text { text: String, x: f32, y: f32, style: TextStyle },
}

/// Render target that records every call
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sprite draws of one kind, in draw order
    pub fn sprites(&self, id: SpriteId) -> impl Iterator<Item = (&Rect, f32)> {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Sprite {
                sprite,
                rect,
                rotation,
            } if *sprite == id => Some((rect, *rotation)),
            _ => None,
        })
    }

    /// All text drawn, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl RenderTarget for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect, rotation: f32) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            rect,
            rotation,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style,
        });
    }
}
