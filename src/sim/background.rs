//! Endless horizontal backdrop scroll with two tiles

use super::state::BackgroundTile;

/// Shift every tile by its drift and wrap any tile that has scrolled fully
/// off the left edge to the far side of its partner.
pub fn scroll(tiles: &mut [BackgroundTile], dt: f32) {
    for tile in tiles.iter_mut() {
        tile.pos = tile.motion.advance(tile.pos, dt);
        if tile.pos.x <= -tile.size.x {
            tile.pos.x += tile.size.x * 2.0;
        }
    }
}

/// Horizontal span covered by the tiles, as (left, right)
pub fn coverage(tiles: &[BackgroundTile]) -> (f32, f32) {
    let left = tiles.iter().map(|t| t.pos.x).fold(f32::INFINITY, f32::min);
    let right = tiles
        .iter()
        .map(|t| t.pos.x + t.size.x)
        .fold(f32::NEG_INFINITY, f32::max);
    (left, right)
}
