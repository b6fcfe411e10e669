use bevy::prelude::*;

use crate::grid::draw_grid;
use crate::sim::{spawn_fleet, SimSet};
use crate::ships::{spawn_ship_glyphs, sync_ship_glyphs};

pub struct RenderPlugin;
impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (configure_gizmos, spawn_ship_glyphs.after(spawn_fleet)))
            .add_systems(
                Update,
                (draw_grid, sync_ship_glyphs.after(SimSet::Advance)),
            );
    }
}

fn configure_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line_width = 1.0;
}
