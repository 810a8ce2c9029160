//! Minimap: a square of UI cells centred on the current room, shown while
//! the map toggle is on. Cells are recoloured every frame from the
//! revealed set; nothing is cached.

use bevy::prelude::*;

use crate::session::GameSession;
use crate::shared::*;
use crate::world::Biome;

/// Rooms shown on each side of the current one.
pub const MINIMAP_RADIUS: i32 = 4;
const CELL_PX: f32 = 14.0;
const CELL_GAP: f32 = 2.0;

#[derive(Component)]
pub struct MinimapRoot;

/// One cell, as an offset from the current room.
#[derive(Component)]
pub struct MinimapCell {
    pub dx: i32,
    pub dy: i32,
}

/// What a minimap cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    Unknown,
    Revealed(Biome),
    Hub,
    Current,
}

impl MapCell {
    pub fn color(self) -> Color {
        match self {
            MapCell::Unknown => Color::srgba(0.0, 0.0, 0.0, 0.5),
            MapCell::Revealed(biome) => rgb(biome.background_rgb()),
            MapCell::Hub => Color::srgb(0.9, 0.1, 0.1),
            MapCell::Current => Color::srgb(1.0, 0.9, 0.1),
        }
    }
}

/// The current room wins over the hub; unrevealed rooms stay dark.
pub fn map_cell(session: &GameSession, coord: RoomCoord) -> MapCell {
    if coord == session.current_coord() {
        MapCell::Current
    } else if coord.is_hub() {
        MapCell::Hub
    } else if session.revealed().contains(&coord) {
        MapCell::Revealed(Biome::classify(coord))
    } else {
        MapCell::Unknown
    }
}

pub fn spawn_minimap(mut commands: Commands) {
    let side = (MINIMAP_RADIUS * 2 + 1) as f32 * (CELL_PX + CELL_GAP);
    commands
        .spawn((
            MinimapRoot,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(12.0),
                bottom: Val::Px(12.0),
                width: Val::Px(side),
                height: Val::Px(side),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_children(|grid| {
            for dy in -MINIMAP_RADIUS..=MINIMAP_RADIUS {
                grid.spawn(Node {
                    flex_direction: FlexDirection::Row,
                    ..default()
                })
                .with_children(|row| {
                    for dx in -MINIMAP_RADIUS..=MINIMAP_RADIUS {
                        row.spawn((
                            MinimapCell { dx, dy },
                            Node {
                                width: Val::Px(CELL_PX),
                                height: Val::Px(CELL_PX),
                                margin: UiRect::all(Val::Px(CELL_GAP / 2.0)),
                                ..default()
                            },
                            BackgroundColor(MapCell::Unknown.color()),
                        ));
                    }
                });
            }
        });
}

pub fn update_minimap(
    session: Res<GameSession>,
    mut root: Query<&mut Visibility, With<MinimapRoot>>,
    mut cells: Query<(&MinimapCell, &mut BackgroundColor)>,
) {
    let shown = session.show_map && session.mode() == UiMode::Play;
    for mut visibility in &mut root {
        *visibility = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if !shown {
        return;
    }
    let here = session.current_coord();
    for (cell, mut color) in &mut cells {
        *color = BackgroundColor(map_cell(&session, here.offset(cell.dx, cell.dy)).color());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn cells_follow_the_revealed_set() {
        let mut s = GameSession::new(GameConfig::seeded(5, "unused-test-save.json"));
        assert_eq!(map_cell(&s, RoomCoord::HUB), MapCell::Current);
        assert_eq!(map_cell(&s, RoomCoord(1, 0)), MapCell::Unknown);

        s.load_room(RoomCoord(1, 0));
        assert_eq!(map_cell(&s, RoomCoord::HUB), MapCell::Hub);
        assert_eq!(map_cell(&s, RoomCoord(1, 0)), MapCell::Current);

        s.world.revealed.insert(RoomCoord(-3, -3));
        assert_eq!(map_cell(&s, RoomCoord(-3, -3)), MapCell::Revealed(Biome::Glacier));
    }
}
