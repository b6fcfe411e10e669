use bevy::prelude::*;

pub const PATH_SAMPLES: usize = 101;

pub const CURVED_START: Vec3 = Vec3::new(-6.0, 0.0, -10.0);
pub const FLAT_START: Vec3 = Vec3::new(6.0, 0.0, -10.0);
pub const RENDEZVOUS: Vec3 = Vec3::new(0.0, 0.0, 20.0);

/// Evenly spaced waypoints on the segment `start..=end`, both ends included.
pub fn straight_path(start: Vec3, end: Vec3) -> Vec<Vec3> {
    let last = (PATH_SAMPLES - 1) as f32;
    (0..PATH_SAMPLES)
        .map(|i| start.lerp(end, i as f32 / last))
        .collect()
}

/// Fresh paths for both ships: the first through the dip, the second through flat space.
pub fn build_paths() -> (Vec<Vec3>, Vec<Vec3>) {
    (
        straight_path(CURVED_START, RENDEZVOUS),
        straight_path(FLAT_START, RENDEZVOUS),
    )
}
