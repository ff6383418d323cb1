//! Frame composition
//!
//! Turns a [`GameState`] into draw calls on any [`RenderTarget`]. Nothing here
//! touches the GPU, so the whole frame can be inspected with a `DrawList`.

use super::sprites::SpriteId;
use super::target::{Color, RenderTarget, TextAlign, TextStyle};
use crate::sim::{GamePhase, GameState, LANE_MARK_PERIOD, Rect};

pub const SKY: Color = [0.53, 0.78, 0.94, 1.0];
const GROUND_LINE: Color = [0.45, 0.30, 0.16, 1.0];
const ROAD: Color = [0.40, 0.40, 0.42, 1.0];
const LANE_MARK: Color = [1.0, 1.0, 1.0, 1.0];
const DIM: Color = [0.0, 0.0, 0.0, 0.5];
const TEXT: Color = [0.08, 0.08, 0.10, 1.0];
const TEXT_LIGHT: Color = [1.0, 1.0, 1.0, 1.0];
const BRAVO: Color = [1.0, 0.6, 0.1, 1.0];

const GROUND_LINE_THICKNESS: f32 = 2.0;
const LANE_MARK_DROP: f32 = 15.0;
const LANE_MARK_SIZE: (f32, f32) = (50.0, 5.0);
const END_GRAPHIC_SIZE: f32 = 64.0;
const HUD_MARGIN: f32 = 20.0;

/// Per-frame presentation switches
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    /// Rotate the player with its vertical velocity
    pub tilt: bool,
    /// Frame rate readout, when enabled
    pub fps: Option<u32>,
}

/// Draw one frame of `state`
pub fn render(state: &GameState, options: &RenderOptions, target: &mut impl RenderTarget) {
    let world_w = state.tuning.world_width;
    let world_h = state.tuning.world_height;
    let ground = state.tuning.ground_level();

    target.clear(SKY);

    // Two copies of the backdrop tile the scroll
    let bg = state.background_offset;
    target.draw_sprite(SpriteId::Background, Rect::new(-bg, 0.0, world_w, ground), 0.0);
    target.draw_sprite(
        SpriteId::Background,
        Rect::new(world_w - bg, 0.0, world_w, ground),
        0.0,
    );

    target.fill_rect(Rect::new(0.0, ground, world_w, world_h - ground), ROAD);
    target.fill_rect(
        Rect::new(0.0, ground, world_w, GROUND_LINE_THICKNESS),
        GROUND_LINE,
    );
    for x in lane_mark_positions(state.ground_offset, world_w) {
        target.fill_rect(
            Rect::new(x, ground + LANE_MARK_DROP, LANE_MARK_SIZE.0, LANE_MARK_SIZE.1),
            LANE_MARK,
        );
    }

    for obstacle in &state.obstacles {
        target.draw_sprite(SpriteId::Obstacle, obstacle.rect(), 0.0);
    }

    let rotation = if options.tilt { state.player.tilt() } else { 0.0 };
    target.draw_sprite(SpriteId::Player, state.player.rect(), rotation);

    target.draw_text(
        &format!("SCORE: {}", state.score),
        HUD_MARGIN,
        HUD_MARGIN,
        TextStyle::new(21.0, TEXT, TextAlign::Left),
    );
    if let Some(fps) = options.fps {
        target.draw_text(
            &format!("{fps} FPS"),
            world_w - HUD_MARGIN,
            HUD_MARGIN,
            TextStyle::new(14.0, TEXT, TextAlign::Right),
        );
    }

    match state.phase {
        GamePhase::Idle => title_overlay(target, world_w, world_h),
        GamePhase::Over => round_over_overlay(target, state.score, world_w, world_h),
        GamePhase::Running => {}
    }
}

/// Left edges of the lane marks visible for a given scroll offset
fn lane_mark_positions(offset: f32, world_w: f32) -> impl Iterator<Item = f32> {
    (0..)
        .map(move |i| i as f32 * LANE_MARK_PERIOD - offset)
        .take_while(move |x| *x < world_w)
}

fn title_overlay(target: &mut impl RenderTarget, world_w: f32, world_h: f32) {
    let cx = world_w * 0.5;
    target.draw_text(
        "KANGOO JUMP",
        cx,
        world_h * 0.3,
        TextStyle::new(56.0, TEXT, TextAlign::Center),
    );
    target.draw_text(
        "PRESS SPACE OR TAP TO START",
        cx,
        world_h * 0.3 + 84.0,
        TextStyle::new(21.0, TEXT, TextAlign::Center),
    );
}

fn round_over_overlay(target: &mut impl RenderTarget, score: u64, world_w: f32, world_h: f32) {
    let cx = world_w * 0.5;
    let cy = world_h * 0.5;
    target.fill_rect(Rect::new(0.0, 0.0, world_w, world_h), DIM);
    target.draw_sprite(
        SpriteId::EndGraphic,
        Rect::new(
            cx - END_GRAPHIC_SIZE * 0.5,
            cy - END_GRAPHIC_SIZE * 2.0,
            END_GRAPHIC_SIZE,
            END_GRAPHIC_SIZE,
        ),
        0.0,
    );
    target.draw_text(
        "BRAVO!",
        cx,
        cy - 42.0,
        TextStyle::new(42.0, BRAVO, TextAlign::Center),
    );
    target.draw_text(
        &format!("FINAL SCORE: {score}"),
        cx,
        cy + 14.0,
        TextStyle::new(28.0, TEXT_LIGHT, TextAlign::Center),
    );
    target.draw_text(
        "PRESS SPACE OR TAP TO PLAY AGAIN",
        cx,
        cy + 63.0,
        TextStyle::new(21.0, TEXT_LIGHT, TextAlign::Center),
    );
}
