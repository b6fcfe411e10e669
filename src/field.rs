use std::f32::consts::PI;

/// A circular dip in the ground plane.
///
/// Inside `radius` the strength falls off linearly from 1 at the center to 0 at
/// the rim; the vertical displacement follows a half sine over that strength so
/// the surface meets the flat plane without a step at the rim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeformationField {
    pub center_x: f32,
    pub center_z: f32,
    pub radius: f32,
    pub depth: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldSample {
    pub y_offset: f32,
    pub strength: f32,
}

impl Default for DeformationField {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_z: 5.0,
            radius: 6.0,
            depth: 8.0,
        }
    }
}

impl DeformationField {
    pub fn distance(&self, x: f32, z: f32) -> f32 {
        let dx = x - self.center_x;
        let dz = z - self.center_z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn sample(&self, x: f32, z: f32) -> FieldSample {
        let distance = self.distance(x, z);
        if distance >= self.radius {
            return FieldSample::default();
        }
        let ratio = distance / self.radius;
        // sin(s*pi) == sin((1-s)*pi); written on the ratio so the center is exactly flat.
        FieldSample {
            y_offset: -(ratio * PI).sin() * self.depth,
            strength: 1.0 - ratio,
        }
    }
}
