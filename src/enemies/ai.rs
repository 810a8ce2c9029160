//! Per-tick enemy behaviour.
//!
//! Enemies are updated one after another in room-list order. Separation
//! reads whatever positions the neighbours have at that moment, so an enemy
//! sees the post-move positions of those updated before it this tick and
//! the pre-move positions of those after it.

use bevy::math::Vec2;

use super::{Clip, Enemy};
use crate::shared::*;

/// Melee reach, both for starting an attack and for it to connect.
pub const ATTACK_RANGE: f32 = 40.0;
/// Neighbours closer than this push each other apart.
pub const SEPARATION_RADIUS: f32 = 30.0;
pub const SEPARATION_WEIGHT: f32 = 0.5;
pub const STUN_TICKS: u32 = 20;
/// Chasers give up beyond this multiple of their detection range.
pub const LEASH_FACTOR: f32 = 1.5;
const TICKS_PER_FRAME: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiState {
    Idle,
    Chase,
    Attack,
    Howl,
    Hit,
}

impl Enemy {
    /// Advances the state machine one tick.
    ///
    /// `neighbours` are the positions of every other enemy in the room.
    /// Returns the damage to apply to the player if an attack landed.
    ///
    /// Separation impulses are summed without renormalising, so an enemy
    /// caught in a crowd can briefly move faster than its nominal speed.
    pub fn update(&mut self, player: Vec2, neighbours: &[Vec2]) -> Option<i32> {
        let dist = self.pos.distance(player);

        self.anim_timer += 1;
        if self.anim_timer > TICKS_PER_FRAME {
            self.anim_timer = 0;
            self.frame_index += 1;
        }

        if self.state == AiState::Hit {
            self.stun_timer = self.stun_timer.saturating_sub(1);
            if self.stun_timer == 0 {
                self.state = AiState::Chase;
                self.frame_index = 0;
            }
            return None;
        }

        let mut step = Vec2::ZERO;
        let mut landed = None;

        match self.state {
            AiState::Idle => {
                if dist < self.detection_range {
                    self.state = AiState::Chase;
                }
            }
            AiState::Chase => {
                if dist < ATTACK_RANGE {
                    self.state = AiState::Attack;
                    self.frame_index = 0;
                } else if dist > self.detection_range * LEASH_FACTOR {
                    self.state = AiState::Idle;
                } else {
                    step = heading(self.pos, player) + self.separation(neighbours);
                    self.pos += step * self.speed;
                }
            }
            AiState::Attack => {
                if self.clip_elapsed(Clip::Attack) {
                    if dist < ATTACK_RANGE {
                        landed = Some(self.damage);
                    }
                    self.state = AiState::Howl;
                    self.frame_index = 0;
                }
            }
            AiState::Howl => {
                if self.clip_elapsed(Clip::Howl) {
                    self.state = AiState::Chase;
                }
            }
            AiState::Hit => {}
        }

        if step != Vec2::ZERO {
            self.facing = Facing::from_vector(step);
        } else if matches!(self.state, AiState::Attack | AiState::Howl) {
            self.facing = Facing::from_vector(player - self.pos);
        }

        landed
    }

    fn clip_elapsed(&self, clip: Clip) -> bool {
        self.frame_index * TICKS_PER_FRAME >= self.clip_duration(clip)
    }

    fn separation(&self, neighbours: &[Vec2]) -> Vec2 {
        neighbours
            .iter()
            .filter(|other| other.distance(self.pos) < SEPARATION_RADIUS)
            .map(|other| heading(*other, self.pos) * SEPARATION_WEIGHT)
            .sum()
    }
}

/// Unit vector from `from` toward `to`. Coincident points head along +x.
fn heading(from: Vec2, to: Vec2) -> Vec2 {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    Vec2::new(angle.cos(), angle.sin())
}

/// Steps every enemy in `enemies` once, in list order, and returns each
/// hit that landed on the player this tick.
pub fn update_pack(enemies: &mut [Enemy], player: Vec2) -> Vec<i32> {
    let mut hits = Vec::new();
    for i in 0..enemies.len() {
        let neighbours: Vec<Vec2> = enemies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, e)| e.pos)
            .collect();
        if let Some(damage) = enemies[i].update(player, &neighbours) {
            hits.push(damage);
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::{Species, WolfVariant};

    fn grey_wolf(pos: Vec2) -> Enemy {
        Enemy::with_variant(pos, Species::Wolf, Some(WolfVariant::Grey))
    }

    #[test]
    fn idle_wakes_inside_detection_range() {
        let mut wolf = grey_wolf(Vec2::new(0.0, 0.0));
        wolf.update(Vec2::new(250.0, 0.0), &[]);
        assert_eq!(wolf.state, AiState::Idle);
        wolf.update(Vec2::new(150.0, 0.0), &[]);
        assert_eq!(wolf.state, AiState::Chase);
    }

    #[test]
    fn chase_moves_toward_player_and_faces_travel() {
        let mut wolf = grey_wolf(Vec2::new(0.0, 0.0));
        wolf.state = AiState::Chase;
        wolf.update(Vec2::new(0.0, 100.0), &[]);
        assert!((wolf.pos.y - 2.5).abs() < 1e-4);
        assert!(wolf.pos.x.abs() < 1e-4);
        assert_eq!(wolf.facing, Facing::Down);
    }

    #[test]
    fn chase_gives_up_past_the_leash() {
        let mut wolf = grey_wolf(Vec2::new(0.0, 0.0));
        wolf.state = AiState::Chase;
        wolf.update(Vec2::new(301.0, 0.0), &[]);
        assert_eq!(wolf.state, AiState::Idle);
        assert_eq!(wolf.pos, Vec2::ZERO);
    }

    #[test]
    fn close_chase_starts_attack_with_fresh_frames() {
        let mut wolf = grey_wolf(Vec2::new(0.0, 0.0));
        wolf.state = AiState::Chase;
        wolf.frame_index = 7;
        wolf.update(Vec2::new(-30.0, 0.0), &[]);
        assert_eq!(wolf.state, AiState::Attack);
        assert_eq!(wolf.frame_index, 0);
        assert_eq!(wolf.facing, Facing::Left);
    }

    fn run_attack(player_after_windup: Vec2) -> (Option<i32>, u32) {
        let mut wolf = grey_wolf(Vec2::new(0.0, 0.0));
        wolf.state = AiState::Chase;
        wolf.update(Vec2::new(20.0, 0.0), &[]);
        assert_eq!(wolf.state, AiState::Attack);

        for tick in 1..200 {
            let landed = wolf.update(player_after_windup, &[]);
            if wolf.state != AiState::Attack {
                assert_eq!(wolf.state, AiState::Howl);
                return (landed, tick);
            }
        }
        panic!("attack never resolved");
    }

    #[test]
    fn attack_lands_only_if_player_still_in_reach() {
        let (landed, ticks) = run_attack(Vec2::new(20.0, 0.0));
        assert_eq!(landed, Some(10));
        assert!(ticks >= 30, "wind-up must last at least 30 ticks, took {ticks}");

        let (missed, _) = run_attack(Vec2::new(45.0, 0.0));
        assert_eq!(missed, None);
    }

    #[test]
    fn howl_returns_to_chase() {
        let mut wolf = grey_wolf(Vec2::ZERO);
        wolf.state = AiState::Howl;
        wolf.frame_index = 0;
        let mut ticks = 0;
        while wolf.state == AiState::Howl {
            wolf.update(Vec2::new(20.0, 0.0), &[]);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(wolf.state, AiState::Chase);
        assert!(ticks >= 30);
    }

    #[test]
    fn stun_freezes_then_forces_chase() {
        let mut wolf = grey_wolf(Vec2::ZERO);
        wolf.state = AiState::Hit;
        wolf.stun_timer = STUN_TICKS;
        for _ in 0..STUN_TICKS - 1 {
            wolf.update(Vec2::new(500.0, 0.0), &[]);
            assert_eq!(wolf.state, AiState::Hit);
            assert_eq!(wolf.pos, Vec2::ZERO);
        }
        wolf.update(Vec2::new(500.0, 0.0), &[]);
        assert_eq!(wolf.state, AiState::Chase);
        assert_eq!(wolf.frame_index, 0);
    }

    #[test]
    fn separation_is_additive_and_unnormalised() {
        let mut lone = grey_wolf(Vec2::new(100.0, 100.0));
        lone.state = AiState::Chase;
        lone.update(Vec2::new(100.0, 250.0), &[]);
        let lone_step = lone.pos - Vec2::new(100.0, 100.0);

        let mut crowded = grey_wolf(Vec2::new(100.0, 100.0));
        crowded.state = AiState::Chase;
        // Two neighbours directly above push it further down the same way.
        let neighbours = [Vec2::new(100.0, 90.0), Vec2::new(100.0, 80.0)];
        crowded.update(Vec2::new(100.0, 250.0), &neighbours);
        let crowded_step = crowded.pos - Vec2::new(100.0, 100.0);

        assert!((lone_step.length() - 2.5).abs() < 1e-4);
        assert!((crowded_step.length() - 2.5 * 2.0).abs() < 1e-3);
    }

    #[test]
    fn pack_update_reports_each_hit() {
        let player = Vec2::new(20.0, 0.0);
        let mut pack = vec![grey_wolf(Vec2::ZERO), grey_wolf(Vec2::new(0.0, 10.0))];
        for wolf in &mut pack {
            wolf.state = AiState::Attack;
            wolf.frame_index = 3;
        }
        assert_eq!(update_pack(&mut pack, player), vec![10, 10]);
    }
}
