//! Melee for the player.
//!
//! - `attack` arms a swing when the cooldown has run out
//! - `attack_bounds` is the 30x30 box in front of the player
//! - `strike` lands the swing on every overlapping enemy
//! - `take_damage` shoves the player back against their facing

use bevy::math::Vec2;
use rand::Rng;

use super::Player;
use crate::enemies::Enemy;
use crate::shared::*;

pub const ATTACK_COOLDOWN: u32 = 30;
pub const ATTACK_DAMAGE: i32 = 25;
/// Side of the square hitbox.
pub const ATTACK_REACH: f32 = 30.0;
pub const HIT_KNOCKBACK: f32 = 10.0;
/// The swing animation and hitbox end when the cooldown drops below this.
const SWING_TAIL: u32 = 10;
const TICKS_PER_FRAME: u32 = 10;

/// What one swing did to one enemy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrikeReport {
    pub target: String,
    pub killed: bool,
}

impl Player {
    /// Starts a swing. Fails while the previous one is cooling down.
    pub fn attack(&mut self) -> bool {
        if self.attack_cooldown != 0 {
            return false;
        }
        self.is_attacking = true;
        self.attack_cooldown = ATTACK_COOLDOWN;
        true
    }

    pub fn attack_bounds(&self) -> Bounds {
        let Vec2 { x, y } = self.pos;
        let (left, top) = match self.facing {
            Facing::Up => (x - 15.0, y - 30.0),
            Facing::Down => (x - 15.0, y + 10.0),
            Facing::Left => (x - 30.0, y - 15.0),
            Facing::Right => (x + 10.0, y - 15.0),
        };
        Bounds::new(left, top, ATTACK_REACH, ATTACK_REACH)
    }

    /// Hits every enemy inside the swing box for a flat amount.
    /// Dead enemies stay in the slice; the room sweeps them.
    pub fn strike<R: Rng>(&self, enemies: &mut [Enemy], rng: &mut R) -> Vec<StrikeReport> {
        let hitbox = self.attack_bounds();
        enemies
            .iter_mut()
            .filter(|enemy| enemy.bounds().overlaps(&hitbox))
            .map(|enemy| {
                enemy.take_damage(ATTACK_DAMAGE, rng);
                StrikeReport {
                    target: enemy.display_name(),
                    killed: enemy.is_dead(),
                }
            })
            .collect()
    }

    /// Loses HP (never below zero) and is knocked back against facing.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
        self.pos += self.facing.opposite_unit() * HIT_KNOCKBACK;
    }

    /// Per-tick animation and cooldown bookkeeping.
    pub fn tick_animation(&mut self) {
        self.anim_timer += 1;
        if self.anim_timer >= TICKS_PER_FRAME {
            self.anim_timer = 0;
            self.frame_index += 1;
        }
        if self.attack_cooldown > 0 {
            self.attack_cooldown -= 1;
            if self.attack_cooldown < SWING_TAIL {
                self.is_attacking = false;
            }
        }
    }
}
