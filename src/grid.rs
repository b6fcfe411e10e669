use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::field::DeformationField;
use crate::geometry::{project, screen_center, screen_to_world, to_screen};
use crate::settings::{GridSettings, VoyageSettings};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSegment {
    /// Surface pixels, y down.
    pub start: Vec2,
    pub end: Vec2,
    pub opacity: f32,
}

fn lattice_point(field: &DeformationField, grid: &GridSettings, x: i32, z: i32) -> Vec2 {
    let (x, z) = (x as f32, z as f32);
    let y_offset = field.sample(x, z).y_offset;
    project(x * grid.spacing, y_offset, z * grid.spacing)
}

/// Row opacity: brightest on the middle row, dimmer toward both edges.
pub fn row_opacity(grid: &GridSettings, z: i32) -> f32 {
    let fade = z.abs() as f32 / grid.half_extent as f32 * grid.fade;
    (1.0 - fade).max(grid.min_opacity)
}

/// Every edge of the deformed lattice, each cell linked to its +x and +z neighbours.
pub fn grid_segments(field: &DeformationField, grid: &GridSettings, center: Vec2) -> Vec<GridSegment> {
    let n = grid.half_extent;
    let side = (2 * n + 1) as usize;
    let mut segments = Vec::with_capacity(2 * side * side);

    for z in -n..=n {
        let opacity = row_opacity(grid, z);
        for x in -n..=n {
            let start = to_screen(center, lattice_point(field, grid, x, z));
            if x < n {
                segments.push(GridSegment {
                    start,
                    end: to_screen(center, lattice_point(field, grid, x + 1, z)),
                    opacity,
                });
            }
            if z < n {
                segments.push(GridSegment {
                    start,
                    end: to_screen(center, lattice_point(field, grid, x, z + 1)),
                    opacity,
                });
            }
        }
    }
    segments
}

pub fn draw_grid(
    mut gizmos: Gizmos,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<VoyageSettings>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let size = window.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let center = screen_center(size, settings.screen_drop);
    let grid = &settings.grid;

    for seg in grid_segments(&settings.field, grid, center) {
        gizmos.line_2d(
            screen_to_world(seg.start, size),
            screen_to_world(seg.end, size),
            grid.color.with_alpha(seg.opacity),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_edge_count() {
        let segments = grid_segments(
            &DeformationField::default(),
            &GridSettings::default(),
            Vec2::ZERO,
        );
        // 41 rows of 40 horizontal edges plus 41 columns of 40 depth edges.
        assert_eq!(segments.len(), 2 * 41 * 40);
    }

    #[test]
    fn opacity_fades_from_middle_row() {
        let grid = GridSettings::default();
        assert_eq!(row_opacity(&grid, 0), 1.0);
        assert!((row_opacity(&grid, 20) - 0.3).abs() < 1e-6);
        assert_eq!(row_opacity(&grid, -10), row_opacity(&grid, 10));
        assert!(row_opacity(&grid, 5) > row_opacity(&grid, 15));

        let steep = GridSettings {
            fade: 2.0,
            ..GridSettings::default()
        };
        assert_eq!(row_opacity(&steep, 20), 0.1);
    }

    #[test]
    fn flat_far_from_dip() {
        let field = DeformationField::default();
        let grid = GridSettings::default();
        let center = Vec2::new(400.0, 300.0);
        let segments = grid_segments(&field, &grid, center);
        // First edge runs from (-20, -20) to (-19, -20), both well outside the dip.
        let first = segments[0];
        let expected_start = to_screen(center, project(-600.0, 0.0, -600.0));
        let expected_end = to_screen(center, project(-570.0, 0.0, -600.0));
        assert_eq!(first.start, expected_start);
        assert_eq!(first.end, expected_end);
    }

    #[test]
    fn dip_pulls_vertices_down_the_screen() {
        let field = DeformationField::default();
        let grid = GridSettings::default();
        // Lattice vertex (3, 5) sits halfway to the rim: deepest point of the dip.
        let dipped = to_screen(Vec2::ZERO, lattice_point(&field, &grid, 3, 5));
        let flat = to_screen(Vec2::ZERO, project(90.0, 0.0, 150.0));
        assert_eq!(dipped.x, flat.x);
        assert!((dipped.y - flat.y - 8.0).abs() < 1e-3);
    }

    #[test]
    fn shifting_center_shifts_everything() {
        let field = DeformationField::default();
        let grid = GridSettings::default();
        let a = grid_segments(&field, &grid, Vec2::new(100.0, 100.0));
        let b = grid_segments(&field, &grid, Vec2::new(150.0, 80.0));
        for (sa, sb) in a.iter().zip(b.iter()) {
            assert!((sb.start - sa.start - Vec2::new(50.0, -20.0)).length() < 1e-3);
            assert_eq!(sa.opacity, sb.opacity);
        }
    }
}
