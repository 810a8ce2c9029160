use crate::shared::*;

/// The hub fire. Every change is clamped to `0..=MAX_FIRE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fire {
    level: f32,
}

impl Fire {
    /// Fuel gained from feeding one item, by hand or by the keeper.
    pub const FEED: f32 = 15.0;
    pub const CAMPFIRE: f32 = 20.0;
    /// Below this level the keeper may burn from the stockpile.
    pub const AUTOMATION_BELOW: f32 = 30.0;
    pub const AUTOMATION_CHANCE: f64 = 0.02;
    /// Light radius of the hub fire at full strength.
    pub const MAX_LIGHT_RADIUS: f32 = 300.0;

    pub fn new(level: f32) -> Self {
        Self {
            level: level.clamp(0.0, MAX_FIRE),
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn set(&mut self, level: f32) {
        self.level = level.clamp(0.0, MAX_FIRE);
    }

    pub fn add(&mut self, amount: f32) {
        self.set(self.level + amount);
    }

    pub fn drain(&mut self, amount: f32) {
        self.set(self.level - amount);
    }

    pub fn is_out(&self) -> bool {
        self.level <= 0.0
    }

    /// Percentage shown on the HUD.
    pub fn percent(&self) -> u32 {
        (self.level / MAX_FIRE * 100.0).round() as u32
    }

    pub fn light_radius(&self) -> f32 {
        self.level / MAX_FIRE * Self::MAX_LIGHT_RADIUS
    }
}

impl Default for Fire {
    fn default() -> Self {
        Self::new(MAX_FIRE)
    }
}
