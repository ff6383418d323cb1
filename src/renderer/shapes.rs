//! Triangle generation for 2D primitives
//!
//! Everything is emitted in world pixels; the pipeline maps to clip space.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::glyphs;
use super::sprites::{SpriteId, SpriteSheet};
use super::target::{Color, RenderTarget, TextStyle};
use crate::sim::Rect;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Push two triangles for a quad given its corners in winding order
fn push_quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: Color) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, d, a] {
        out.push(Vertex::new(p.x, p.y, color));
    }
}

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, r: Rect, color: Color) {
    push_quad(
        out,
        [
            Vec2::new(r.left(), r.top()),
            Vec2::new(r.right(), r.top()),
            Vec2::new(r.right(), r.bottom()),
            Vec2::new(r.left(), r.bottom()),
        ],
        color,
    );
}

/// Filled rectangle rotated by `angle` radians about `pivot`
pub fn rotated_rect(out: &mut Vec<Vertex>, r: Rect, pivot: Vec2, angle: f32, color: Color) {
    if angle == 0.0 {
        rect(out, r, color);
        return;
    }
    let rot = Vec2::from_angle(angle);
    let corner = |x: f32, y: f32| pivot + rot.rotate(Vec2::new(x, y) - pivot);
    push_quad(
        out,
        [
            corner(r.left(), r.top()),
            corner(r.right(), r.top()),
            corner(r.right(), r.bottom()),
            corner(r.left(), r.bottom()),
        ],
        color,
    );
}

/// Collects draw calls into one vertex list for a single draw
pub struct VertexBatch<'a> {
    sprites: &'a SpriteSheet,
    pub clear_color: Color,
    pub vertices: Vec<Vertex>,
}

impl<'a> VertexBatch<'a> {
    pub fn new(sprites: &'a SpriteSheet) -> Self {
        Self {
            sprites,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vertices: Vec::with_capacity(4096),
        }
    }
}

impl RenderTarget for VertexBatch<'_> {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
    }

    fn fill_rect(&mut self, r: Rect, color: Color) {
        rect(&mut self.vertices, r, color);
    }

    fn draw_sprite(&mut self, id: SpriteId, dest: Rect, rotation: f32) {
        let Some(sprite) = self.sprites.get(id) else {
            return;
        };
        let pivot = dest.center();
        for (part, color) in sprite.layout(dest) {
            rotated_rect(&mut self.vertices, part, pivot, rotation, color);
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        for cell in glyphs::layout(text, x, y, style.size, style.align) {
            rect(&mut self.vertices, cell, style.color);
        }
    }
}
