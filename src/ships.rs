use bevy::color::LinearRgba;
use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::sprite::MaterialMesh2dBundle;
use bevy::window::PrimaryWindow;

use crate::geometry::{project, screen_center, screen_to_world, to_screen};
use crate::sim::{Fleet, RunState, ShipId};
use crate::settings::VoyageSettings;

/// Hull outline around the anchor, surface pixels (y down), nose first.
pub const HULL: [Vec2; 6] = [
    Vec2::new(0.0, -15.0),
    Vec2::new(-8.0, 5.0),
    Vec2::new(-4.0, 8.0),
    Vec2::new(0.0, 6.0),
    Vec2::new(4.0, 8.0),
    Vec2::new(8.0, 5.0),
];

pub const COCKPIT_RADIUS: f32 = 3.0;
pub const TRAIL_TOP: f32 = 6.0;
pub const TRAIL_LENGTH: f32 = 20.0;
pub const TRAIL_HALF_WIDTH: f32 = 2.0;
const GLOW: f32 = 2.5;

#[derive(Component)]
pub struct ShipGlyph(pub ShipId);

/// Where a ship's glyph is anchored, in surface pixels.
pub fn ship_anchor(position: Vec3, center: Vec2, scale: f32) -> Vec2 {
    to_screen(center, project(position.x * scale, position.y, position.z * scale))
}

/// Ships are drawn while running, and while idle once either has moved.
pub fn glyphs_visible(state: RunState, fleet: &Fleet) -> bool {
    state == RunState::Running || fleet.any_progress()
}

fn local(p: Vec2) -> [f32; 3] {
    [p.x, -p.y, 0.0]
}

pub fn hull_mesh() -> Mesh {
    let positions: Vec<[f32; 3]> = HULL.iter().copied().map(local).collect();
    // Fan from the nose; the outline is star-shaped around it.
    let indices: Vec<u32> = (1..HULL.len() as u32 - 1)
        .flat_map(|i| [0, i, i + 1])
        .collect();
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_indices(Indices::U32(indices))
}

/// A strip behind the hull fading from `color` to fully transparent.
pub fn trail_mesh(color: Color) -> Mesh {
    let top = TRAIL_TOP;
    let bottom = TRAIL_TOP + TRAIL_LENGTH;
    let w = TRAIL_HALF_WIDTH;
    let positions = vec![
        local(Vec2::new(-w, top)),
        local(Vec2::new(w, top)),
        local(Vec2::new(w, bottom)),
        local(Vec2::new(-w, bottom)),
    ];
    let c = color.to_linear();
    let solid = [c.red, c.green, c.blue, c.alpha];
    let clear = [c.red, c.green, c.blue, 0.0];
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, vec![solid, solid, clear, clear])
        .with_inserted_indices(Indices::U32(vec![0, 3, 2, 0, 2, 1]))
}

pub fn spawn_ship_glyphs(
    mut commands: Commands,
    fleet: Option<Res<Fleet>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let Some(fleet) = fleet else {
        return;
    };
    let hull = meshes.add(hull_mesh());
    let cockpit = meshes.add(Circle::new(COCKPIT_RADIUS));
    let cockpit_material = materials.add(ColorMaterial::from(Color::srgba(1.0, 1.0, 1.0, 0.3)));
    let trail_material = materials.add(ColorMaterial::from(Color::WHITE));

    for (layer, id) in [ShipId::A, ShipId::B].into_iter().enumerate() {
        let color = fleet.ship(id).color;
        let linear: LinearRgba = color.into();
        let glowing: Color = (linear * GLOW).into();
        let hull_material = materials.add(ColorMaterial::from(glowing));
        let trail = meshes.add(trail_mesh(color));

        commands
            .spawn((
                SpatialBundle {
                    transform: Transform::from_xyz(0.0, 0.0, 1.0 + layer as f32 * 0.5),
                    visibility: Visibility::Hidden,
                    ..default()
                },
                ShipGlyph(id),
            ))
            .with_children(|parent| {
                parent.spawn(MaterialMesh2dBundle {
                    mesh: hull.clone().into(),
                    material: hull_material,
                    ..default()
                });
                parent.spawn(MaterialMesh2dBundle {
                    mesh: cockpit.clone().into(),
                    material: cockpit_material.clone(),
                    transform: Transform::from_xyz(0.0, 0.0, 0.1),
                    ..default()
                });
                parent.spawn(MaterialMesh2dBundle {
                    mesh: trail.into(),
                    material: trail_material.clone(),
                    transform: Transform::from_xyz(0.0, 0.0, 0.2),
                    ..default()
                });
            });
    }
}

pub fn sync_ship_glyphs(
    fleet: Option<Res<Fleet>>,
    state: Res<State<RunState>>,
    settings: Res<VoyageSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut glyphs: Query<(&ShipGlyph, &mut Transform, &mut Visibility)>,
) {
    let Some(fleet) = fleet else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    let size = window.size();
    let center = screen_center(size, settings.screen_drop);
    let visible = glyphs_visible(*state.get(), &fleet);

    for (glyph, mut transform, mut visibility) in &mut glyphs {
        *visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        let ship = fleet.ship(glyph.0);
        let anchor = ship_anchor(ship.position, center, settings.ship_scale);
        let world = screen_to_world(anchor, size);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}
