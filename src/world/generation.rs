//! Procedural room generation.
//!
//! A room is generated once, the first time it is entered, from the
//! session's RNG. Terrain comes first, then the optional pyre and echo,
//! then items, then enemies. The hub only gets background decoration.

use bevy::log::info;
use bevy::math::Vec2;
use rand::prelude::*;

use super::biome::Biome;
use super::room::{FragileIce, Obstacle, ObstacleKind, Room};
use crate::enemies::Enemy;
use crate::entities::{Echo, Item, Pyre};
use crate::shared::*;

pub const DECORATION_COUNT: usize = 20;
pub const PYRE_CHANCE: f64 = 0.3;
pub const ECHO_CHANCE: f64 = 0.2;

/// Extra enemies from distance stop growing here.
pub const MAX_RING_BONUS: usize = 12;

const W: i32 = SCREEN_WIDTH as i32;
const H: i32 = SCREEN_HEIGHT as i32;

/// Builds the full content of the room at `coord`.
pub fn generate_room<R: Rng>(coord: RoomCoord, rng: &mut R) -> Room {
    let mut room = Room::empty(coord);

    room.decorations = (0..DECORATION_COUNT)
        .map(|_| random_point(rng, 0..=W, 0..=H))
        .collect();

    if room.is_hub() {
        info!("[World] Hub room ready");
        return room;
    }

    generate_terrain(&mut room, rng);
    generate_landmarks(&mut room, rng);
    generate_items(&mut room, rng);
    generate_enemies(&mut room, rng);

    info!(
        "[World] Generated {} {}: {} obstacles, {} items, {} enemies, {} pyres, {} echoes",
        room.biome(),
        coord,
        room.obstacles.len(),
        room.items.len(),
        room.enemies.len(),
        room.pyres.len(),
        room.echoes.len(),
    );
    room
}

fn random_point<R: Rng>(
    rng: &mut R,
    xs: std::ops::RangeInclusive<i32>,
    ys: std::ops::RangeInclusive<i32>,
) -> Vec2 {
    Vec2::new(rng.gen_range(xs) as f32, rng.gen_range(ys) as f32)
}

fn scatter<R: Rng>(rng: &mut R, count: usize, w: f32, h: f32) -> Vec<Bounds> {
    (0..count)
        .map(|_| {
            let p = random_point(rng, 0..=W, 0..=H);
            Bounds::new(p.x, p.y, w, h)
        })
        .collect()
}

fn solid(bounds: Vec<Bounds>, height: f32, kind: ObstacleKind) -> impl Iterator<Item = Obstacle> {
    bounds.into_iter().map(move |bounds| Obstacle { bounds, height, kind })
}

fn generate_terrain<R: Rng>(room: &mut Room, rng: &mut R) {
    match room.biome() {
        Biome::Swamp => {
            room.mud_patches = scatter(rng, 6, 120.0, 120.0);
            let trees = scatter(rng, 5, 20.0, 60.0);
            room.obstacles.extend(solid(trees, 100.0, ObstacleKind::Tree));
        }
        Biome::Glacier => {
            room.water_tiles.push(Bounds::new(0.0, 0.0, 100.0, SCREEN_HEIGHT));
            for _ in 0..8 {
                let p = random_point(rng, 100..=W, 0..=H);
                room.fragile_ice.push(FragileIce::new(Bounds::new(p.x, p.y, 80.0, 80.0)));
            }
        }
        Biome::Badlands => {
            let rocks = scatter(rng, 15, 40.0, 40.0);
            room.obstacles.extend(solid(rocks, 100.0, ObstacleKind::Rock));
        }
        Biome::Tundra => {
            let rocks = scatter(rng, 5, 30.0, 20.0);
            room.obstacles.extend(solid(rocks, 50.0, ObstacleKind::Rock));
        }
        Biome::Mountain => {
            // Height tiers: hop over 5 from standing, 12 needs a real jump,
            // 100 is a wall.
            const TIERS: [f32; 3] = [5.0, 12.0, 100.0];
            for _ in 0..10 {
                let width = rng.gen_range(50..=200) as f32;
                let height = TIERS.choose(rng).copied().unwrap_or(100.0);
                let p = random_point(rng, 0..=W, 0..=H);
                room.obstacles.push(Obstacle {
                    bounds: Bounds::new(p.x, p.y, width, 30.0),
                    height,
                    kind: ObstacleKind::Cliff,
                });
            }
        }
        Biome::Snow => {
            for _ in 0..4 {
                let p = random_point(rng, 0..=W - 200, 0..=H - 200);
                room.ice_patches.push(Bounds::new(p.x, p.y, 200.0, 150.0));
            }
            let trees = scatter(rng, 5, 30.0, 40.0);
            room.obstacles.extend(solid(trees, 100.0, ObstacleKind::Tree));
        }
        Biome::Ocean => {
            room.water_tiles.push(Bounds::new(200.0, 200.0, 600.0, 400.0));
        }
        Biome::Desert => {
            let cacti = scatter(rng, 12, 30.0, 60.0);
            room.obstacles.extend(solid(cacti, 100.0, ObstacleKind::Cactus));
        }
        Biome::Forest => {
            let trees = scatter(rng, 8, 30.0, 40.0);
            room.obstacles.extend(solid(trees, 100.0, ObstacleKind::Tree));
        }
    }
}

fn generate_landmarks<R: Rng>(room: &mut Room, rng: &mut R) {
    if rng.gen_bool(PYRE_CHANCE) {
        room.pyres.push(Pyre::new(random_point(rng, 100..=W - 100, 100..=H - 100)));
    }
    if rng.gen_bool(ECHO_CHANCE) {
        room.echoes.push(Echo::new(random_point(rng, 0..=W, 0..=H)));
    }
}

/// 2..=4 draws from the biome pool. A draw landing in water is dropped,
/// not re-rolled.
fn generate_items<R: Rng>(room: &mut Room, rng: &mut R) {
    let pool = room.biome().resource_pool();
    let draws = rng.gen_range(2..=4);
    for _ in 0..draws {
        let kind = pool.choose(rng).copied().unwrap_or(ItemKind::Wood);
        let pos = random_point(rng, 50..=W - 50, 50..=H - 50);
        if !room.is_in_water(pos) {
            room.items.push(Item::new(kind, pos));
        }
    }
}

fn generate_enemies<R: Rng>(room: &mut Room, rng: &mut R) {
    let bonus = (room.coord().ring() / 2).min(MAX_RING_BONUS as u32) as usize;
    let count = rng.gen_range(1..=2) + bonus;
    let biome = room.biome();
    for _ in 0..count {
        let pos = random_point(rng, 50..=W - 50, 50..=H - 50);
        room.enemies.push(Enemy::spawn(pos, biome, rng));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn hub_is_bare() {
        let mut rng = StdRng::seed_from_u64(7);
        let hub = generate_room(RoomCoord::HUB, &mut rng);
        assert_eq!(hub.biome(), Biome::Forest);
        assert_eq!(hub.entity_count(), 0);
        assert!(hub.water_tiles.is_empty() && hub.mud_patches.is_empty());
        assert_eq!(hub.decorations.len(), DECORATION_COUNT);
    }

    #[test]
    fn enemy_count_scales_with_ring() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let near = generate_room(RoomCoord(1, 0), &mut rng);
            assert!((1..=2).contains(&near.enemies.len()));
            let far = generate_room(RoomCoord(6, -1), &mut rng);
            assert!((4..=5).contains(&far.enemies.len()));
            assert!(far.enemies.iter().all(|e| e.species == Biome::Mountain.species()));
        }
    }

    #[test]
    fn rooms_at_the_edge_of_the_grid_stay_bounded() {
        let mut rng = StdRng::seed_from_u64(17);
        let room = generate_room(RoomCoord(i32::MIN, 0), &mut rng);
        assert_eq!(room.biome(), Biome::Ocean);
        assert!((1 + MAX_RING_BONUS..=2 + MAX_RING_BONUS).contains(&room.enemies.len()));
    }

    #[test]
    fn items_come_from_the_biome_pool_and_avoid_water() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let room = generate_room(RoomCoord(-4, 0), &mut rng);
            assert_eq!(room.biome(), Biome::Ocean);
            assert!(room.items.len() <= 4);
            for item in &room.items {
                assert_eq!(item.kind, ItemKind::Reeds);
                assert!(!room.is_in_water(item.bounds.center() - Vec2::splat(10.0)));
            }
        }
    }

    #[test]
    fn glacier_has_water_strip_and_fresh_ice() {
        let mut rng = StdRng::seed_from_u64(9);
        let room = generate_room(RoomCoord(-3, -3), &mut rng);
        assert_eq!(room.water_tiles, vec![Bounds::new(0.0, 0.0, 100.0, SCREEN_HEIGHT)]);
        assert_eq!(room.fragile_ice.len(), 8);
        assert!(room
            .fragile_ice
            .iter()
            .all(|ice| ice.integrity == FragileIce::FULL_INTEGRITY && ice.bounds.x >= 100.0));
    }

    #[test]
    fn mountain_cliffs_use_height_tiers() {
        let mut rng = StdRng::seed_from_u64(13);
        let room = generate_room(RoomCoord(3, 0), &mut rng);
        assert_eq!(room.obstacles.len(), 10);
        for cliff in &room.obstacles {
            assert_eq!(cliff.kind, ObstacleKind::Cliff);
            assert!([5.0, 12.0, 100.0].contains(&cliff.height));
            assert!((50.0..=200.0).contains(&cliff.bounds.w));
        }
    }
}
