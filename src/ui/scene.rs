//! Placeholder world drawing.
//!
//! The room is redrawn from the session every frame: everything tagged
//! `SceneSprite` is despawned and the current room's entity lists are
//! spawned again as flat coloured quads. Depth comes from the feet's screen
//! y, so whatever stands lower on screen is drawn in front.

use bevy::prelude::*;

use crate::entities::Pyre;
use crate::enemies::{AiState, ENEMY_SIZE};
use crate::player::Player;
use crate::session::{tent_spot, GameSession, FEED_RADIUS, STOCKPILE_BOUNDS};
use crate::shared::*;
use crate::world::{Biome, FragileIce, Room};

// Ground layers sit below every y-sorted body.
const Z_GROUND: f32 = 0.0;
const Z_HAZARD: f32 = 1.0;
const Z_GLOW: f32 = 2.0;
const Z_BODY_BASE: f32 = 10.0;
const Z_Y_SORT_SCALE: f32 = 0.001;
const Z_OVERHEAD: f32 = 50.0;
const BAR_HEIGHT: f32 = 4.0;

/// Marker for everything the scene pass owns.
#[derive(Component)]
pub struct SceneSprite;

/// Shared unit-circle mesh and material for light pools.
#[derive(Resource)]
pub struct GlowAssets {
    mesh: Handle<Mesh>,
    warm: Handle<ColorMaterial>,
    cold: Handle<ColorMaterial>,
}

pub fn setup_glow_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.insert_resource(GlowAssets {
        mesh: meshes.add(Circle::new(1.0)),
        warm: materials.add(Color::srgba(1.0, 0.7, 0.3, 0.18)),
        cold: materials.add(Color::srgba(0.7, 0.85, 1.0, 0.12)),
    });
}

/// Screen space (origin top-left, +y down) to world space (origin centre, +y up).
pub fn to_world(p: Vec2) -> Vec2 {
    Vec2::new(p.x - SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 - p.y)
}

/// Depth for a body whose feet are at screen `y`.
pub fn y_sorted_z(y: f32) -> f32 {
    Z_BODY_BASE + y * Z_Y_SORT_SCALE
}

pub fn update_clear_color(session: Res<GameSession>, mut clear: ResMut<ClearColor>) {
    clear.0 = rgb(session.biome().background_rgb());
}

/// Builds placeholder sprites for the room, one frame at a time.
struct Painter<'w, 's, 'a> {
    commands: &'a mut Commands<'w, 's>,
}

impl Painter<'_, '_, '_> {
    fn rect(&mut self, b: &Bounds, color: Color, z: f32) {
        let c = to_world(b.center());
        self.commands.spawn((
            SceneSprite,
            Sprite {
                color,
                custom_size: Some(Vec2::new(b.w, b.h)),
                ..default()
            },
            Transform::from_xyz(c.x, c.y, z),
        ));
    }

    fn body(&mut self, b: &Bounds, color: Color) {
        self.rect(b, color, y_sorted_z(b.bottom()));
    }

    fn glow(&mut self, glow: &GlowAssets, center: Vec2, radius: f32, warm: bool) {
        if radius <= 0.0 {
            return;
        }
        let c = to_world(center);
        let material = if warm { glow.warm.clone() } else { glow.cold.clone() };
        self.commands.spawn((
            SceneSprite,
            Mesh2d(glow.mesh.clone()),
            MeshMaterial2d(material),
            Transform::from_xyz(c.x, c.y, Z_GLOW).with_scale(Vec3::new(radius, radius, 1.0)),
        ));
    }

    fn terrain(&mut self, room: &Room) {
        for &dot in &room.decorations {
            let shade = if room.biome().is_cold() { [230, 235, 245] } else { [70, 90, 60] };
            self.rect(&Bounds::from_center(dot, Vec2::splat(3.0)), rgb(shade), Z_GROUND);
        }
        for mud in &room.mud_patches {
            self.rect(mud, Color::srgb_u8(80, 60, 40), Z_GROUND + 0.1);
        }
        for ice in &room.ice_patches {
            self.rect(ice, Color::srgba_u8(200, 230, 255, 180), Z_GROUND + 0.1);
        }
        for water in &room.water_tiles {
            self.rect(water, Color::srgb_u8(30, 60, 140), Z_HAZARD);
        }
        for ice in &room.fragile_ice {
            // Fades from white towards the water colour as it cracks.
            let t = ice.integrity as f32 / FragileIce::FULL_INTEGRITY as f32;
            let color = Color::srgb(0.5 + 0.45 * t, 0.7 + 0.25 * t, 1.0);
            self.rect(&ice.bounds, color, Z_HAZARD + 0.1);
        }
    }

    fn things(&mut self, room: &Room, glow: &GlowAssets) {
        for obstacle in &room.obstacles {
            self.body(&obstacle.bounds, rgb(obstacle.kind.placeholder_rgb()));
        }
        for item in &room.items {
            self.body(&item.bounds, rgb(item.kind.placeholder_rgb()));
        }
        for pyre in &room.pyres {
            let color = if pyre.is_lit() {
                Color::srgb_u8(255, 140, 30)
            } else {
                Color::srgb_u8(70, 55, 40)
            };
            self.body(&pyre.bounds, color);
            if pyre.is_lit() {
                self.glow(glow, pyre.bounds.center(), Pyre::LIGHT_RADIUS, true);
            }
        }
        for echo in &room.echoes {
            self.body(&echo.bounds(), Color::srgba(0.6, 0.6, 0.9, 0.6));
        }
        for enemy in &room.enemies {
            let b = enemy.bounds();
            self.body(&b, rgb(enemy.placeholder_rgb()));
            if enemy.hp < enemy.max_hp {
                self.health_bar(b.x, b.y - 6.0, ENEMY_SIZE, enemy.hp as f32 / enemy.max_hp as f32);
            }
            if enemy.state == AiState::Hit {
                self.rect(&b, Color::srgba(1.0, 1.0, 1.0, 0.5), y_sorted_z(b.bottom()) + 0.0001);
            }
        }
        if room.has_tent {
            let tent = Bounds::from_center(tent_spot(), Vec2::new(50.0, 36.0));
            self.body(&tent, Color::srgb_u8(160, 120, 70));
        }
    }

    fn hub(&mut self, session: &GameSession, glow: &GlowAssets) {
        let c = room_center();
        let level = session.fire.level() / MAX_FIRE;
        let size = 20.0 + 20.0 * level;
        self.body(
            &Bounds::from_center(c, Vec2::splat(size)),
            Color::srgb(1.0, 0.35 + 0.4 * level, 0.1),
        );
        self.glow(glow, c, session.hub_fire_light_radius(), true);
        self.glow(glow, c, FEED_RADIUS, true);
        self.body(&session.keeper.bounds, Color::srgb_u8(120, 90, 160));
        self.body(&STOCKPILE_BOUNDS, Color::srgb_u8(110, 80, 50));
    }

    fn player(&mut self, player: &Player, glow: &GlowAssets, cold: bool) {
        let feet = player.bounds();
        // Shadow stays on the ground while the body rises.
        self.rect(&feet, Color::srgba(0.0, 0.0, 0.0, 0.35), Z_HAZARD + 0.2);
        let body = Bounds::new(feet.x, feet.y - 24.0 - player.z, feet.w, 32.0);
        let color = if player.is_attacking {
            Color::srgb_u8(255, 220, 180)
        } else {
            Color::srgb_u8(220, 180, 140)
        };
        self.rect(&body, color, y_sorted_z(feet.bottom()) + player.z * Z_Y_SORT_SCALE);

        if player.is_attacking {
            self.rect(&player.attack_bounds(), Color::srgba(1.0, 1.0, 1.0, 0.4), Z_OVERHEAD);
        }
        let warm = player.has_lantern || player.carrying_torch();
        self.glow(glow, player.pos, player.light_radius(), warm && !cold);
    }

    fn health_bar(&mut self, x: f32, y: f32, width: f32, fraction: f32) {
        let back = Bounds::new(x, y, width, BAR_HEIGHT);
        self.rect(&back, Color::srgb(0.2, 0.0, 0.0), Z_OVERHEAD);
        let front = Bounds::new(x, y, width * fraction.clamp(0.0, 1.0), BAR_HEIGHT);
        self.rect(&front, Color::srgb(0.9, 0.1, 0.1), Z_OVERHEAD + 0.1);
    }
}

/// Despawns last frame's scene and draws the current room.
pub fn redraw_scene(
    mut commands: Commands,
    old: Query<Entity, With<SceneSprite>>,
    session: Res<GameSession>,
    glow: Res<GlowAssets>,
) {
    for entity in &old {
        commands.entity(entity).despawn();
    }
    let Some(room) = session.current_room() else {
        return;
    };

    let mut painter = Painter {
        commands: &mut commands,
    };
    painter.terrain(room);
    painter.things(room, &glow);
    if room.is_hub() {
        painter.hub(&session, &glow);
    }
    painter.player(&session.player, &glow, session.biome() == Biome::Glacier);
}
