use bevy::prelude::*;
use std::f32::consts::FRAC_PI_6;

/// Isometric projection onto the screen plane, y up.
pub fn project(x: f32, y: f32, z: f32) -> Vec2 {
    Vec2::new((x - z) * FRAC_PI_6.cos(), y + (x + z) * FRAC_PI_6.sin())
}

/// Projection origin in surface pixels (y down), for the current surface size.
pub fn screen_center(size: Vec2, drop: f32) -> Vec2 {
    Vec2::new(size.x * 0.5, size.y * 0.5 + drop)
}

/// Places a projected point relative to the screen center, in surface pixels.
pub fn to_screen(center: Vec2, iso: Vec2) -> Vec2 {
    Vec2::new(center.x + iso.x, center.y - iso.y)
}

/// Surface pixels (origin top-left, y down) to world space of a 2d camera
/// sitting at the origin with unit scale.
pub fn screen_to_world(p: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(p.x - size.x * 0.5, size.y * 0.5 - p.y)
}
