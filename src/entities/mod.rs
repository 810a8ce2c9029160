//! Room entities that are not enemies: pickups, pyres, echoes, the keeper.

mod echo;
mod keeper;

pub use echo::Echo;
pub use keeper::Keeper;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::shared::*;

/// Pickup radius, measured from the item's centre to the player.
pub const PICKUP_RADIUS: f32 = 50.0;
/// Reach needed to light a pyre.
pub const PYRE_LIGHT_RADIUS: f32 = 60.0;

pub const ITEM_SIZE: f32 = 20.0;
pub const PYRE_SIZE: Vec2 = Vec2::new(30.0, 40.0);

/// A resource lying on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub bounds: Bounds,
}

impl Item {
    /// Item whose top-left corner sits at `pos`.
    pub fn new(kind: ItemKind, pos: Vec2) -> Self {
        Self {
            kind,
            bounds: Bounds::new(pos.x, pos.y, ITEM_SIZE, ITEM_SIZE),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn in_reach(&self, player_pos: Vec2) -> bool {
        self.center().distance(player_pos) < PICKUP_RADIUS
    }
}

/// A signal beacon. Once lit it stays lit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pyre {
    pub bounds: Bounds,
    lit: bool,
}

impl Pyre {
    pub const LIGHT_RADIUS: f32 = 100.0;

    pub fn new(pos: Vec2) -> Self {
        Self {
            bounds: Bounds::new(pos.x, pos.y, PYRE_SIZE.x, PYRE_SIZE.y),
            lit: false,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Lights the pyre. Returns false if it was already burning.
    pub fn light(&mut self) -> bool {
        let changed = !self.lit;
        self.lit = true;
        changed
    }

    pub fn in_reach(&self, player_pos: Vec2) -> bool {
        self.bounds.center().distance(player_pos) < PYRE_LIGHT_RADIUS
    }
}
