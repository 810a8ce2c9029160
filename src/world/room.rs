//! Room model: the generated content of one grid cell.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use super::biome::Biome;
use crate::enemies::Enemy;
use crate::entities::{Echo, Item, Pyre};
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Rock,
    Cliff,
    Cactus,
}

impl ObstacleKind {
    pub fn placeholder_rgb(self) -> [u8; 3] {
        match self {
            ObstacleKind::Tree => [30, 80, 40],
            ObstacleKind::Rock => [110, 105, 100],
            ObstacleKind::Cliff => [50, 45, 40],
            ObstacleKind::Cactus => [60, 140, 60],
        }
    }
}

/// A solid block. The player can hop over it while airborne above `height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub bounds: Bounds,
    pub height: f32,
    pub kind: ObstacleKind,
}

/// Ice that cracks while the player stands on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FragileIce {
    pub bounds: Bounds,
    pub integrity: i32,
}

impl FragileIce {
    pub const FULL_INTEGRITY: i32 = 100;

    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            integrity: Self::FULL_INTEGRITY,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.integrity <= 0
    }
}

/// One room of the world. Coordinate and biome are fixed at creation;
/// the entity lists and `has_tent` change as the player plays.
#[derive(Debug, Clone)]
pub struct Room {
    coord: RoomCoord,
    biome: Biome,
    pub obstacles: Vec<Obstacle>,
    pub items: Vec<Item>,
    pub enemies: Vec<Enemy>,
    pub echoes: Vec<Echo>,
    pub pyres: Vec<Pyre>,
    pub mud_patches: Vec<Bounds>,
    pub ice_patches: Vec<Bounds>,
    pub water_tiles: Vec<Bounds>,
    pub fragile_ice: Vec<FragileIce>,
    /// Cosmetic only.
    pub decorations: Vec<Vec2>,
    pub has_tent: bool,
}

impl Room {
    /// An empty room of the biome its coordinate classifies to.
    pub fn empty(coord: RoomCoord) -> Self {
        Self {
            coord,
            biome: Biome::classify(coord),
            obstacles: Vec::new(),
            items: Vec::new(),
            enemies: Vec::new(),
            echoes: Vec::new(),
            pyres: Vec::new(),
            mud_patches: Vec::new(),
            ice_patches: Vec::new(),
            water_tiles: Vec::new(),
            fragile_ice: Vec::new(),
            decorations: Vec::new(),
            has_tent: false,
        }
    }

    pub fn coord(&self) -> RoomCoord {
        self.coord
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub fn is_hub(&self) -> bool {
        self.coord.is_hub()
    }

    pub fn is_in_water(&self, point: Vec2) -> bool {
        self.water_tiles.iter().any(|w| w.contains(point))
    }

    pub fn overlaps_mud(&self, bounds: &Bounds) -> usize {
        self.mud_patches.iter().filter(|m| m.overlaps(bounds)).count()
    }

    pub fn overlaps_ice(&self, bounds: &Bounds) -> bool {
        self.ice_patches.iter().any(|i| i.overlaps(bounds))
    }

    pub fn overlaps_water(&self, bounds: &Bounds) -> bool {
        self.water_tiles.iter().any(|w| w.overlaps(bounds))
    }

    /// Drops every enemy whose HP has run out.
    pub fn remove_dead_enemies(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.is_dead());
        before - self.enemies.len()
    }

    pub fn entity_count(&self) -> usize {
        self.obstacles.len() + self.items.len() + self.enemies.len() + self.echoes.len() + self.pyres.len()
    }
}
