//! Draw list for the rendering collaborator
//!
//! Each frame the host asks for a `RenderFrame`: every visible entity as a
//! sprite instance sorted back to front, plus the score label.

pub mod sprite;

pub use sprite::{SpriteInstance, colors, sprite_kind};

use glam::Vec2;

use crate::consts::Z_SCORE;
use crate::sim::{EntityKind, GameState};

/// Font size of the score label
pub const SCORE_FONT_SIZE: f32 = 50.0;

/// Text drawn over the scene
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub pos: Vec2,
    pub text: String,
    pub font_size: f32,
    pub color: [f32; 4],
    pub z: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    /// Sorted by ascending z
    pub sprites: Vec<SpriteInstance>,
    pub text: Vec<TextItem>,
}

impl RenderFrame {
    /// Raw bytes of the sprite list, ready for an instance buffer
    pub fn sprite_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }
}

/// Build the draw list for the current state
pub fn build_frame(state: &GameState) -> RenderFrame {
    let mut sprites = Vec::with_capacity(state.registry.live_count());
    for kind in [
        EntityKind::BackgroundTile,
        EntityKind::Player,
        EntityKind::Enemy,
        EntityKind::Projectile,
    ] {
        state
            .registry
            .for_each(kind, |entity| sprites.push(SpriteInstance::from_entity(&entity)));
    }
    // Stable sort keeps id order within a layer
    sprites.sort_by(|a, b| a.z.total_cmp(&b.z));

    RenderFrame {
        sprites,
        text: vec![TextItem {
            pos: state.score_label.pos,
            text: state.score_label.text.clone(),
            font_size: SCORE_FONT_SIZE,
            color: colors::SCORE,
            z: Z_SCORE,
        }],
    }
}
