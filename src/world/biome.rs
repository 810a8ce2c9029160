//! Biome classification and the per-biome lookup tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enemies::Species;
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Forest,
    Tundra,
    Glacier,
    Badlands,
    Swamp,
    Snow,
    Desert,
    Mountain,
    Ocean,
}

impl Biome {
    pub const ALL: [Biome; 9] = [
        Biome::Forest,
        Biome::Tundra,
        Biome::Glacier,
        Biome::Badlands,
        Biome::Swamp,
        Biome::Snow,
        Biome::Desert,
        Biome::Mountain,
        Biome::Ocean,
    ];

    /// Classifies a room coordinate. Diagonal quadrants win over the axis
    /// bands, bands over the single-axis east/west check; everything within
    /// one room of the hub is forest.
    pub fn classify(coord: RoomCoord) -> Biome {
        let RoomCoord(x, y) = coord;
        if x > 1 && y < -1 {
            Biome::Tundra
        } else if x < -1 && y < -1 {
            Biome::Glacier
        } else if x > 1 && y > 1 {
            Biome::Badlands
        } else if x < -1 && y > 1 {
            Biome::Swamp
        } else if y < -1 {
            Biome::Snow
        } else if y > 1 {
            Biome::Desert
        } else if x > 1 {
            Biome::Mountain
        } else if x < -1 {
            Biome::Ocean
        } else {
            Biome::Forest
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Forest => "forest",
            Biome::Tundra => "tundra",
            Biome::Glacier => "glacier",
            Biome::Badlands => "badlands",
            Biome::Swamp => "swamp",
            Biome::Snow => "snow",
            Biome::Desert => "desert",
            Biome::Mountain => "mountain",
            Biome::Ocean => "ocean",
        }
    }

    /// Resources that can be lying around in a room of this biome.
    pub fn resource_pool(self) -> &'static [ItemKind] {
        match self {
            Biome::Forest => &[ItemKind::Wood, ItemKind::Branch],
            Biome::Swamp => &[ItemKind::Reeds, ItemKind::Wood],
            Biome::Badlands => &[ItemKind::Flint],
            Biome::Tundra => &[ItemKind::Fur],
            Biome::Glacier => &[ItemKind::Oil],
            Biome::Mountain => &[ItemKind::Iron],
            Biome::Desert => &[ItemKind::Flint, ItemKind::Wood],
            Biome::Ocean => &[ItemKind::Reeds],
            Biome::Snow => &[ItemKind::Branch],
        }
    }

    pub fn species(self) -> Species {
        match self {
            Biome::Forest | Biome::Snow => Species::Wolf,
            Biome::Swamp => Species::Serpent,
            Biome::Badlands => Species::Raider,
            Biome::Tundra => Species::Spirit,
            Biome::Glacier => Species::Yeti,
            Biome::Ocean => Species::Crab,
            Biome::Mountain => Species::Golem,
            Biome::Desert => Species::Scorpion,
        }
    }

    /// Cold biomes burn torches faster and chill the player on entry.
    pub fn is_cold(self) -> bool {
        matches!(self, Biome::Snow | Biome::Glacier)
    }

    pub fn background_rgb(self) -> [u8; 3] {
        match self {
            Biome::Forest => [22, 20, 25],
            Biome::Snow => [240, 245, 255],
            Biome::Desert => [235, 215, 160],
            Biome::Mountain => [60, 55, 50],
            Biome::Ocean => [20, 40, 100],
            Biome::Glacier => [180, 255, 255],
            Biome::Tundra => [200, 200, 210],
            Biome::Swamp => [25, 35, 20],
            Biome::Badlands => [160, 80, 40],
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
