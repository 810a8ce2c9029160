use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use std::path::Path;

use kindle::config::{GameConfig, CONFIG_FILE};
use kindle::input::InputPlugin;
use kindle::session::SessionPlugin;
use kindle::shared::*;
use kindle::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Kindle".into(),
                resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        // Config must be in place before the session is built from it.
        .insert_resource(GameConfig::load_or_default(Path::new(CONFIG_FILE)))
        .add_plugins(SessionPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(UiPlugin)
        .run();
}
