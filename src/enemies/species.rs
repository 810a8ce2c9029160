//! Enemy species table and the wolf coat roll.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Wolf,
    Serpent,
    Raider,
    Spirit,
    Yeti,
    Crab,
    Golem,
    Scorpion,
}

/// Base numbers for a species before any variant is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesStats {
    pub hp: i32,
    pub speed: f32,
    pub damage: i32,
    pub detection_range: f32,
    pub color: [u8; 3],
}

impl Species {
    pub fn stats(self) -> SpeciesStats {
        let (hp, speed, damage, detection_range, color) = match self {
            Species::Wolf => (50, 2.5, 10, 200.0, [100, 100, 100]),
            Species::Serpent => (40, 3.0, 15, 100.0, [50, 200, 50]),
            Species::Raider => (80, 2.0, 20, 250.0, [200, 100, 100]),
            Species::Spirit => (30, 1.5, 15, 300.0, [200, 255, 255]),
            Species::Yeti => (150, 1.0, 30, 150.0, [240, 240, 255]),
            Species::Crab => (60, 2.0, 10, 150.0, [255, 100, 50]),
            Species::Golem => (200, 0.5, 40, 100.0, [80, 80, 80]),
            Species::Scorpion => (45, 3.5, 12, 180.0, [200, 200, 50]),
        };
        SpeciesStats {
            hp,
            speed,
            damage,
            detection_range,
            color,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Wolf => "Wolf",
            Species::Serpent => "Serpent",
            Species::Raider => "Raider",
            Species::Spirit => "Spirit",
            Species::Yeti => "Yeti",
            Species::Crab => "Crab",
            Species::Golem => "Golem",
            Species::Scorpion => "Scorpion",
        }
    }
}

/// Coat rolled once when a wolf spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WolfVariant {
    Grey,
    Brown,
    Black,
}

impl WolfVariant {
    /// Black wolves hit for exactly half a full-health player.
    pub const BLACK_DAMAGE: i32 = 50;

    /// Uniform 1..=100: 1-60 grey, 61-90 brown, 91-100 black.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self::from_roll(rng.gen_range(1..=100))
    }

    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..=60 => WolfVariant::Grey,
            61..=90 => WolfVariant::Brown,
            _ => WolfVariant::Black,
        }
    }

    /// Applies this coat's deltas to base wolf stats.
    pub fn apply(self, stats: SpeciesStats) -> SpeciesStats {
        match self {
            WolfVariant::Grey => SpeciesStats {
                color: [128, 128, 128],
                ..stats
            },
            WolfVariant::Brown => SpeciesStats {
                hp: stats.hp + 20,
                speed: stats.speed + 0.5,
                color: [139, 69, 19],
                ..stats
            },
            WolfVariant::Black => SpeciesStats {
                hp: stats.hp + 50,
                speed: stats.speed + 0.2,
                damage: Self::BLACK_DAMAGE,
                detection_range: stats.detection_range + 100.0,
                color: [50, 50, 50],
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WolfVariant::Grey => "Grey",
            WolfVariant::Brown => "Brown",
            WolfVariant::Black => "Black",
        }
    }
}
