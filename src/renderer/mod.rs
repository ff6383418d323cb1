//! Rendering module
//!
//! The frame is composed against the [`RenderTarget`] trait and batched into
//! a single flat-color triangle list for WebGPU.

pub mod glyphs;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod target;

pub use pipeline::RenderState;
pub use scene::{RenderOptions, render};
pub use shapes::VertexBatch;
pub use sprites::{AssetError, SpriteId, SpriteSheet};
pub use target::{Color, DrawCommand, DrawList, RenderTarget, TextAlign, TextStyle};
