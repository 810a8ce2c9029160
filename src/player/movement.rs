//! Walking, sliding, jumping and bumping into things.

use bevy::math::Vec2;

use super::{Player, PlayerAction};
use crate::shared::*;
use crate::world::{Biome, Room};

pub const MOVE_SPEED: f32 = 3.0;
pub const JUMP_FORCE: f32 = 10.0;
pub const GRAVITY: f32 = 0.8;
/// Jump strength lost while carrying more than the threshold.
pub const OVERLOAD_JUMP_PENALTY: f32 = 4.0;
pub const MIN_JUMP: f32 = 5.0;
pub const STICK_DEADZONE: f32 = 0.2;

const MUD_FACTOR: f32 = 0.4;
const TUNDRA_WIND: Vec2 = Vec2::new(0.5, 0.1);
const ICE_GRIP: f32 = 0.3;
const ICE_SLIDE: f32 = 1.5;
const BUMP: f32 = 5.0;

/// Combines digital keys and the analog stick into one movement axis.
///
/// Both inputs are screen space (+y down). Each stick axis past the
/// deadzone overrides that keyboard axis.
pub fn resolve_move_axis(keys: Vec2, stick: Vec2) -> Vec2 {
    let mut axis = keys;
    if stick.x.abs() > STICK_DEADZONE {
        axis.x = stick.x;
    }
    if stick.y.abs() > STICK_DEADZONE {
        axis.y = stick.y;
    }
    axis
}

impl Player {
    /// Current ground speed before terrain is applied.
    pub fn base_speed(&self) -> f32 {
        if self.is_overloaded() {
            (MOVE_SPEED - 1.0).max(1.0)
        } else {
            MOVE_SPEED
        }
    }

    /// Starts a jump if standing on the ground.
    pub fn jump(&mut self) {
        if self.z != 0.0 {
            return;
        }
        let penalty = if self.is_overloaded() {
            OVERLOAD_JUMP_PENALTY
        } else {
            0.0
        };
        self.vel_z = (JUMP_FORCE - penalty).max(MIN_JUMP);
    }

    /// One tick of movement through `room` with input `axis`.
    pub fn step(&mut self, axis: Vec2, room: &Room) {
        let mut d = axis;
        if d != Vec2::ZERO {
            let mag = d.length();
            if mag > 1.0 {
                d /= mag;
            }
            self.action = PlayerAction::Walk;
            self.facing = Facing::from_vector(d);
        } else {
            self.action = PlayerAction::Idle;
        }

        let mut speed = self.base_speed();
        let feet = self.bounds();

        if room.biome() == Biome::Swamp {
            speed *= MUD_FACTOR.powi(room.overlaps_mud(&feet) as i32);
        }

        if room.overlaps_ice(&feet) || room.biome() == Biome::Glacier {
            self.pos += d * (speed * ICE_GRIP) + d * ICE_SLIDE;
        } else {
            self.pos += d * speed;
        }

        if room.biome() == Biome::Tundra {
            self.pos += TUNDRA_WIND;
        }
        self.velocity_mag = d.length();

        self.apply_gravity();
        self.resolve_collisions(d, room);
    }

    fn apply_gravity(&mut self) {
        if self.z > 0.0 || self.vel_z > 0.0 {
            self.z += self.vel_z;
            self.vel_z -= GRAVITY;
            if self.z <= 0.0 {
                self.z = 0.0;
                self.vel_z = 0.0;
            }
        }
    }

    /// Pushes back a fixed step against each moving axis for every solid
    /// obstacle still above the player's feet.
    fn resolve_collisions(&mut self, d: Vec2, room: &Room) {
        let feet = self.bounds();
        for obstacle in &room.obstacles {
            if !feet.overlaps(&obstacle.bounds) || self.z >= obstacle.height {
                continue;
            }
            if d.x > 0.0 {
                self.pos.x -= BUMP;
            } else if d.x < 0.0 {
                self.pos.x += BUMP;
            }
            if d.y > 0.0 {
                self.pos.y -= BUMP;
            } else if d.y < 0.0 {
                self.pos.y += BUMP;
            }
        }
    }
}
