//! Sprite instance data for 2D drawing

use bytemuck::{Pod, Zeroable};

use crate::sim::{EntityKind, EntityRef};

/// One textured quad, laid out for direct upload as an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub center: [f32; 2],
    pub size: [f32; 2],
    /// Fallback color when the host has no image for this kind
    pub tint: [f32; 4],
    pub z: f32,
    pub kind: u32,
}

impl SpriteInstance {
    pub fn from_entity(entity: &EntityRef) -> Self {
        Self {
            center: entity.center.to_array(),
            size: entity.size.to_array(),
            tint: tint_for(entity.kind),
            z: entity.kind.z_order(),
            kind: sprite_kind(entity.kind),
        }
    }
}

/// Stable kind index shared with the host's texture table
pub const fn sprite_kind(kind: EntityKind) -> u32 {
    match kind {
        EntityKind::BackgroundTile => 0,
        EntityKind::Player => 1,
        EntityKind::Projectile => 2,
        EntityKind::Enemy => 3,
    }
}

fn tint_for(kind: EntityKind) -> [f32; 4] {
    match kind {
        EntityKind::BackgroundTile => colors::BACKGROUND,
        EntityKind::Player => colors::PLAYER,
        EntityKind::Projectile => colors::PROJECTILE,
        EntityKind::Enemy => colors::MONSTER,
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const PLAYER: [f32; 4] = [0.1, 0.1, 0.15, 1.0];
    pub const PROJECTILE: [f32; 4] = [0.85, 0.85, 0.9, 1.0];
    pub const MONSTER: [f32; 4] = [0.3, 0.7, 0.3, 1.0];
    pub const SCORE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
}
