//! Enemy domain.
//!
//! Provides:
//! - Species stats keyed by biome, plus the wolf coat roll
//! - The `Enemy` entity and its reactive state machine
//!   (IDLE -> CHASE -> ATTACK -> HOWL -> CHASE, HIT from anywhere)
//! - Flock separation so chasing packs do not stack on one pixel

mod ai;
mod species;

pub use ai::{
    update_pack, AiState, ATTACK_RANGE, LEASH_FACTOR, SEPARATION_RADIUS, SEPARATION_WEIGHT,
    STUN_TICKS,
};
pub use species::{Species, SpeciesStats, WolfVariant};

use bevy::math::Vec2;
use rand::Rng;

use crate::shared::*;
use crate::world::Biome;

pub const ENEMY_SIZE: f32 = 30.0;
/// Largest random shove applied on each axis when an enemy is hit.
pub const HIT_JITTER: i32 = 15;

/// Animation clips an enemy can be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    Idle,
    Walk,
    Attack,
    Howl,
}

/// Frames per clip. Placeholder art has a single frame for everything;
/// a renderer that loads real sheets can overwrite these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipFrames {
    pub idle: u32,
    pub walk: u32,
    pub attack: u32,
    pub howl: u32,
}

impl Default for ClipFrames {
    fn default() -> Self {
        Self {
            idle: 1,
            walk: 1,
            attack: 1,
            howl: 1,
        }
    }
}

impl ClipFrames {
    pub fn get(&self, clip: Clip) -> u32 {
        match clip {
            Clip::Idle => self.idle,
            Clip::Walk => self.walk,
            Clip::Attack => self.attack,
            Clip::Howl => self.howl,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Top-left corner of the body box; AI distances are measured from here.
    pub pos: Vec2,
    pub species: Species,
    pub variant: Option<WolfVariant>,
    pub hp: i32,
    pub max_hp: i32,
    pub speed: f32,
    pub damage: i32,
    pub detection_range: f32,
    pub color: [u8; 3],
    pub state: AiState,
    pub stun_timer: u32,
    pub facing: Facing,
    pub frame_index: u32,
    pub anim_timer: u32,
    pub frames: ClipFrames,
}

impl Enemy {
    /// Spawns the species native to `biome`. Wolves roll their coat here,
    /// once, for the lifetime of the entity.
    pub fn spawn<R: Rng>(pos: Vec2, biome: Biome, rng: &mut R) -> Self {
        let species = biome.species();
        let variant = match species {
            Species::Wolf => Some(WolfVariant::roll(rng)),
            _ => None,
        };
        Self::with_variant(pos, species, variant)
    }

    pub fn with_variant(pos: Vec2, species: Species, variant: Option<WolfVariant>) -> Self {
        let base = species.stats();
        let stats = match variant {
            Some(v) => v.apply(base),
            None => base,
        };
        Self {
            pos,
            species,
            variant,
            hp: stats.hp,
            max_hp: stats.hp,
            speed: stats.speed,
            damage: stats.damage,
            detection_range: stats.detection_range,
            color: stats.color,
            state: AiState::Idle,
            stun_timer: 0,
            facing: Facing::Down,
            frame_index: 0,
            anim_timer: 0,
            frames: ClipFrames::default(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos.x, self.pos.y, ENEMY_SIZE, ENEMY_SIZE)
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Takes a hit: loses HP (never below zero), is stunned, and gets
    /// jostled a little on both axes.
    pub fn take_damage<R: Rng>(&mut self, amount: i32, rng: &mut R) {
        self.hp = (self.hp - amount).max(0);
        self.state = AiState::Hit;
        self.stun_timer = STUN_TICKS;
        self.pos.x += rng.gen_range(-HIT_JITTER..=HIT_JITTER) as f32;
        self.pos.y += rng.gen_range(-HIT_JITTER..=HIT_JITTER) as f32;
    }

    /// "Grey Wolf", "Serpent", ...
    pub fn display_name(&self) -> String {
        match self.variant {
            Some(v) => format!("{} {}", v.name(), self.species.name()),
            None => self.species.name().to_string(),
        }
    }

    pub fn clip(&self) -> Clip {
        match self.state {
            AiState::Attack => Clip::Attack,
            AiState::Howl => Clip::Howl,
            AiState::Chase => Clip::Walk,
            AiState::Idle | AiState::Hit => Clip::Idle,
        }
    }

    /// Ticks a clip needs to play out, never shorter than 30.
    pub fn clip_duration(&self, clip: Clip) -> u32 {
        (self.frames.get(clip) * 10).max(30)
    }

    pub fn placeholder_rgb(&self) -> [u8; 3] {
        match self.state {
            AiState::Attack => [255, 0, 0],
            AiState::Howl => [0, 0, 255],
            _ => self.color,
        }
    }
}
