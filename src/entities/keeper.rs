use bevy::math::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::shared::*;

/// The hub's fire keeper. Stands still and talks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keeper {
    pub bounds: Bounds,
}

impl Keeper {
    /// Stockpile size at which the keeper offers to tend the fire.
    pub const AUTOMATION_THRESHOLD: usize = 5;

    pub const LINES: [&'static str; 7] = [
        "You are doing well.",
        "Stack 5 items in the pile, and I can help you.",
        "The fire keeps the cold away.",
        "The North West glacier is treacherous.",
        "Keep the fire lit.",
        "Don't let the light fade.",
        "Did you find anything?",
    ];

    pub fn at_hub() -> Self {
        let c = room_center();
        Self {
            bounds: Bounds::new(c.x + 90.0, c.y - 20.0, 20.0, 30.0),
        }
    }

    pub fn random_line<R: Rng>(&self, rng: &mut R) -> &'static str {
        Self::LINES.choose(rng).copied().unwrap_or(Self::LINES[0])
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }
}

impl Default for Keeper {
    fn default() -> Self {
        Self::at_hub()
    }
}
