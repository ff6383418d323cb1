//! Procedural sprites - no image files needed!
//!
//! Each sprite is a stack of colored rectangles in unit space (0..1 on both
//! axes) that gets stretched over the destination rect when drawn.

use thiserror::Error;

use super::target::Color;
use crate::sim::Rect;

/// Sprite handles the render pass can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    /// Scrolling scenery behind the road
    Background,
    /// The Kangoo van
    Player,
    /// A boar
    Obstacle,
    /// The cat shown when a round ends
    EndGraphic,
}

impl SpriteId {
    pub const ALL: [SpriteId; 4] = [
        SpriteId::Background,
        SpriteId::Player,
        SpriteId::Obstacle,
        SpriteId::EndGraphic,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AssetError {
    #[error("sprite {0:?} has no parts")]
    Empty(SpriteId),
    #[error("sprite {sprite:?} part {index} lies outside the unit box")]
    OutOfBounds { sprite: SpriteId, index: usize },
}

/// One colored rectangle of a sprite, in unit space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePart {
    pub rect: Rect,
    pub color: Color,
}

const fn part(x: f32, y: f32, w: f32, h: f32, color: Color) -> SpritePart {
    SpritePart {
        rect: Rect::new(x, y, w, h),
        color,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub parts: Vec<SpritePart>,
}

impl Sprite {
    pub fn new(parts: Vec<SpritePart>) -> Self {
        Self { parts }
    }

    /// Check the sprite is drawable
    pub fn validate(&self, id: SpriteId) -> Result<(), AssetError> {
        if self.parts.is_empty() {
            return Err(AssetError::Empty(id));
        }
        for (index, p) in self.parts.iter().enumerate() {
            let r = p.rect;
            let inside = r.left() >= 0.0
                && r.top() >= 0.0
                && r.right() <= 1.0 + f32::EPSILON
                && r.bottom() <= 1.0 + f32::EPSILON
                && r.w > 0.0
                && r.h > 0.0;
            if !inside {
                return Err(AssetError::OutOfBounds { sprite: id, index });
            }
        }
        Ok(())
    }

    /// Part rectangles mapped into `dest` (before rotation)
    pub fn layout(&self, dest: Rect) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.parts.iter().map(move |p| {
            (
                Rect::new(
                    dest.x + p.rect.x * dest.w,
                    dest.y + p.rect.y * dest.h,
                    p.rect.w * dest.w,
                    p.rect.h * dest.h,
                ),
                p.color,
            )
        })
    }
}

/// All loaded sprites. Missing entries are skipped at draw time.
#[derive(Debug, Clone, Default)]
pub struct SpriteSheet {
    sprites: [Option<Sprite>; 4],
}

impl SpriteSheet {
    /// Build every procedural sprite. Completes before the first frame, so
    /// the loop never runs with half-loaded assets.
    pub fn load() -> Self {
        Self::from_definitions(SpriteId::ALL.iter().map(|&id| (id, definition(id))))
    }

    /// Validate and keep the given sprites; invalid ones are logged and left
    /// out
    pub fn from_definitions(defs: impl IntoIterator<Item = (SpriteId, Sprite)>) -> Self {
        let mut sheet = Self::default();
        for (id, sprite) in defs {
            match sprite.validate(id) {
                Ok(()) => sheet.sprites[id.index()] = Some(sprite),
                Err(e) => log::warn!("Sprite not loaded: {e}"),
            }
        }
        let loaded = sheet.sprites.iter().filter(|s| s.is_some()).count();
        log::info!("Loaded {}/{} sprites", loaded, SpriteId::ALL.len());
        sheet
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites[id.index()].as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.sprites.iter().all(Option::is_some)
    }
}

mod palette {
    use super::Color;

    pub const HILL_FAR: Color = [0.55, 0.62, 0.42, 1.0];
    pub const HILL_NEAR: Color = [0.42, 0.52, 0.30, 1.0];
    pub const SUN: Color = [1.0, 0.85, 0.35, 1.0];
    pub const CYPRESS: Color = [0.18, 0.32, 0.16, 1.0];
    pub const WALL: Color = [0.93, 0.80, 0.62, 1.0];
    pub const ROOF: Color = [0.78, 0.36, 0.22, 1.0];

    pub const VAN_BODY: Color = [0.95, 0.95, 0.92, 1.0];
    pub const VAN_TRIM: Color = [0.25, 0.45, 0.75, 1.0];
    pub const GLASS: Color = [0.55, 0.78, 0.92, 1.0];
    pub const TIRE: Color = [0.08, 0.08, 0.08, 1.0];
    pub const HUB: Color = [0.6, 0.6, 0.6, 1.0];
    pub const LIGHT: Color = [1.0, 0.9, 0.4, 1.0];

    pub const BOAR: Color = [0.36, 0.24, 0.16, 1.0];
    pub const BOAR_DARK: Color = [0.24, 0.15, 0.10, 1.0];
    pub const SNOUT: Color = [0.62, 0.45, 0.38, 1.0];
    pub const TUSK: Color = [0.96, 0.94, 0.86, 1.0];
    pub const EYE: Color = [0.05, 0.05, 0.05, 1.0];

    pub const CAT: Color = [0.95, 0.62, 0.25, 1.0];
    pub const CAT_STRIPE: Color = [0.78, 0.45, 0.15, 1.0];
    pub const CAT_EYE: Color = [0.35, 0.75, 0.35, 1.0];
    pub const CAT_NOSE: Color = [0.95, 0.55, 0.6, 1.0];
}

fn definition(id: SpriteId) -> Sprite {
    use palette::*;

    let parts = match id {
        SpriteId::Background => vec![
            part(0.80, 0.10, 0.08, 0.14, SUN),
            part(0.00, 0.55, 0.30, 0.45, HILL_FAR),
            part(0.22, 0.45, 0.28, 0.55, HILL_FAR),
            part(0.48, 0.60, 0.30, 0.40, HILL_FAR),
            part(0.74, 0.50, 0.26, 0.50, HILL_FAR),
            part(0.00, 0.75, 0.18, 0.25, HILL_NEAR),
            part(0.15, 0.70, 0.25, 0.30, HILL_NEAR),
            part(0.55, 0.78, 0.30, 0.22, HILL_NEAR),
            part(0.82, 0.72, 0.18, 0.28, HILL_NEAR),
            // Village
            part(0.34, 0.62, 0.06, 0.10, WALL),
            part(0.33, 0.58, 0.08, 0.04, ROOF),
            part(0.42, 0.66, 0.05, 0.08, WALL),
            part(0.415, 0.63, 0.06, 0.03, ROOF),
            // Cypresses
            part(0.10, 0.52, 0.015, 0.23, CYPRESS),
            part(0.62, 0.58, 0.015, 0.20, CYPRESS),
            part(0.66, 0.62, 0.015, 0.16, CYPRESS),
        ],
        SpriteId::Player => vec![
            // Body and roof
            part(0.02, 0.30, 0.96, 0.45, VAN_BODY),
            part(0.10, 0.08, 0.62, 0.24, VAN_BODY),
            part(0.02, 0.58, 0.96, 0.06, VAN_TRIM),
            // Windows (facing right)
            part(0.56, 0.12, 0.14, 0.16, GLASS),
            part(0.72, 0.30, 0.20, 0.16, GLASS),
            part(0.18, 0.12, 0.30, 0.16, GLASS),
            part(0.94, 0.36, 0.05, 0.08, LIGHT),
            // Wheels
            part(0.12, 0.68, 0.20, 0.32, TIRE),
            part(0.68, 0.68, 0.20, 0.32, TIRE),
            part(0.18, 0.78, 0.08, 0.12, HUB),
            part(0.74, 0.78, 0.08, 0.12, HUB),
        ],
        SpriteId::Obstacle => vec![
            // Body (facing left, toward the player)
            part(0.25, 0.20, 0.70, 0.55, BOAR),
            part(0.30, 0.12, 0.55, 0.12, BOAR_DARK),
            part(0.00, 0.30, 0.30, 0.35, BOAR),
            part(0.00, 0.45, 0.10, 0.15, SNOUT),
            part(0.06, 0.58, 0.04, 0.12, TUSK),
            part(0.12, 0.36, 0.05, 0.07, EYE),
            part(0.18, 0.22, 0.07, 0.10, BOAR_DARK),
            // Legs
            part(0.30, 0.75, 0.10, 0.25, BOAR_DARK),
            part(0.48, 0.75, 0.10, 0.25, BOAR_DARK),
            part(0.66, 0.75, 0.10, 0.25, BOAR_DARK),
            part(0.82, 0.75, 0.10, 0.25, BOAR_DARK),
            part(0.95, 0.25, 0.05, 0.08, BOAR_DARK),
        ],
        SpriteId::EndGraphic => vec![
            // Ears
            part(0.12, 0.05, 0.18, 0.20, CAT),
            part(0.70, 0.05, 0.18, 0.20, CAT),
            // Head
            part(0.08, 0.20, 0.84, 0.62, CAT),
            part(0.40, 0.22, 0.06, 0.14, CAT_STRIPE),
            part(0.54, 0.22, 0.06, 0.14, CAT_STRIPE),
            // Eyes
            part(0.24, 0.40, 0.14, 0.12, CAT_EYE),
            part(0.62, 0.40, 0.14, 0.12, CAT_EYE),
            part(0.29, 0.42, 0.04, 0.08, EYE),
            part(0.67, 0.42, 0.04, 0.08, EYE),
            // Nose and whiskers
            part(0.46, 0.56, 0.08, 0.06, CAT_NOSE),
            part(0.00, 0.60, 0.30, 0.02, CAT_STRIPE),
            part(0.70, 0.60, 0.30, 0.02, CAT_STRIPE),
            // Body
            part(0.22, 0.82, 0.56, 0.18, CAT),
        ],
    };

    Sprite::new(parts)
}
