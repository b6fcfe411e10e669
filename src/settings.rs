use bevy::prelude::*;

use crate::field::DeformationField;

#[derive(Resource, Clone)]
pub struct VoyageSettings {
    /// Normalized path progress gained per second of wall-clock time.
    pub speed: f32,
    /// Fraction of proper time lost at the very center of the field.
    pub dilation_strength: f32,
    pub field: DeformationField,
    pub grid: GridSettings,
    /// World units per path unit when placing ships on the grid.
    pub ship_scale: f32,
    /// Pixels the projection origin sits below the middle of the window.
    pub screen_drop: f32,
    pub show_help: bool,
    pub show_diagnostics: bool,
}

impl Default for VoyageSettings {
    fn default() -> Self {
        Self {
            speed: 0.2,
            dilation_strength: 0.6,
            field: DeformationField::default(),
            grid: GridSettings::default(),
            ship_scale: 30.0,
            screen_drop: 100.0,
            show_help: true,
            show_diagnostics: false,
        }
    }
}

impl VoyageSettings {
    /// Dilation factor for a point on the ground plane, in `[1 - dilation_strength, 1]`.
    pub fn dilation_at(&self, x: f32, z: f32) -> f32 {
        let sample = self.field.sample(x, z);
        1.0 - sample.strength * self.dilation_strength
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GridSettings {
    /// Lattice cells run from `-half_extent` to `half_extent` on both axes.
    pub half_extent: i32,
    pub spacing: f32,
    pub min_opacity: f32,
    pub fade: f32,
    pub color: Color,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            half_extent: 20,
            spacing: 30.0,
            min_opacity: 0.1,
            fade: 0.7,
            color: Color::srgb_u8(100, 200, 255),
        }
    }
}
