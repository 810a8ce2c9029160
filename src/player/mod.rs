//! Player domain: the survivor's body, bag and gear.
//!
//! - `inventory`: the multiset of carried resource tokens
//! - `movement`: input resolution, terrain modifiers, jump arc, collision
//! - `combat`: melee swing, hitbox, taking hits, animation timers

mod combat;
mod inventory;
mod movement;

pub use combat::{ATTACK_COOLDOWN, ATTACK_DAMAGE, ATTACK_REACH, HIT_KNOCKBACK};
pub use inventory::Inventory;
pub use movement::{resolve_move_axis, GRAVITY, JUMP_FORCE, MOVE_SPEED, STICK_DEADZONE};

use bevy::math::Vec2;

use crate::shared::*;

pub const MAX_HP: i32 = 100;

pub const LANTERN_LIGHT_RADIUS: f32 = 150.0;
pub const TORCH_LIGHT_RADIUS: f32 = 120.0;
pub const BARE_LIGHT_RADIUS: f32 = 60.0;

/// What the body is doing, for animation selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerAction {
    #[default]
    Idle,
    Walk,
}

/// A lit torch. Only one is carried at a time; taking a new one resets it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torch {
    pub health: f32,
}

impl Torch {
    pub const FULL: f32 = 100.0;
    pub const DECAY: f32 = 0.1;
    /// Extra burn per tick in cold biomes.
    pub const COLD_DECAY: f32 = 0.15;

    pub fn fresh() -> Self {
        Self { health: Self::FULL }
    }

    /// Burns one tick. Returns true once the torch has gone out.
    pub fn burn(&mut self, cold: bool) -> bool {
        self.health -= Self::DECAY;
        if cold {
            self.health -= Self::COLD_DECAY;
        }
        self.health <= 0.0
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Feet position in screen space.
    pub pos: Vec2,
    /// Height above the ground.
    pub z: f32,
    pub vel_z: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub inventory: Inventory,
    pub has_lantern: bool,
    pub torch: Option<Torch>,
    pub facing: Facing,
    pub action: PlayerAction,
    /// Magnitude of the last movement input after normalisation.
    pub velocity_mag: f32,
    pub frame_index: u32,
    pub anim_timer: u32,
    pub attack_cooldown: u32,
    pub is_attacking: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            z: 0.0,
            vel_z: 0.0,
            hp: MAX_HP,
            max_hp: MAX_HP,
            inventory: Inventory::new(),
            has_lantern: false,
            torch: None,
            facing: Facing::Down,
            action: PlayerAction::Idle,
            velocity_mag: 0.0,
            frame_index: 0,
            anim_timer: 0,
            attack_cooldown: 0,
            is_attacking: false,
        }
    }

    /// Feet hitbox used for terrain, hazards and pickups.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos.x - 10.0, self.pos.y - 8.0, 20.0, 16.0)
    }

    pub fn is_airborne(&self) -> bool {
        self.z > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn is_overloaded(&self) -> bool {
        self.inventory.len() > CARRY_THRESHOLD
    }

    pub fn carrying_torch(&self) -> bool {
        self.torch.is_some()
    }

    pub fn has_light(&self) -> bool {
        self.has_lantern || self.carrying_torch()
    }

    /// Takes a fresh torch from the hub fire.
    pub fn light_torch(&mut self) {
        self.torch = Some(Torch::fresh());
    }

    /// Burns the torch one tick. Returns true if it just went out.
    pub fn burn_torch(&mut self, cold: bool) -> bool {
        let went_out = match self.torch.as_mut() {
            Some(torch) => torch.burn(cold),
            None => false,
        };
        if went_out {
            self.torch = None;
        }
        went_out
    }

    pub fn light_radius(&self) -> f32 {
        if self.has_lantern {
            LANTERN_LIGHT_RADIUS
        } else if self.carrying_torch() {
            TORCH_LIGHT_RADIUS
        } else {
            BARE_LIGHT_RADIUS
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(room_center())
    }
}
