//! The view: a camera, placeholder sprites for the current room, and text
//! panels. Everything here reads `GameSession` and never writes it.

mod hud;
mod minimap;
mod scene;

pub use hud::{inventory_line, overlay_text, status_line};
pub use minimap::{map_cell, MapCell, MINIMAP_RADIUS};
pub use scene::{to_world, y_sorted_z};

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK));

        app.add_systems(
            Startup,
            (
                setup_camera,
                scene::setup_glow_assets,
                hud::spawn_hud,
                minimap::spawn_minimap,
            ),
        );

        // ─── WORLD: runs after the fixed tick has moved things ───
        app.add_systems(
            Update,
            (scene::update_clear_color, scene::redraw_scene),
        );

        // ─── HUD ───
        app.add_systems(
            Update,
            (
                hud::update_status,
                hud::update_dialogue,
                hud::update_overlay,
                minimap::update_minimap,
            ),
        );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
