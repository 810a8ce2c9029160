use bevy::math::Vec2;

use crate::shared::*;

/// A wandering hazard that homes straight at the player.
///
/// There is no path memory: the heading is recomputed from scratch every
/// tick, so obstacles are simply ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Echo {
    pub pos: Vec2,
    pub speed: f32,
}

impl Echo {
    pub const SPEED: f32 = 1.5;
    pub const SIZE: Vec2 = Vec2::new(20.0, 30.0);
    /// The player is safe from echoes while this high in a jump.
    pub const CONTACT_MAX_Z: f32 = 10.0;
    pub const KNOCKBACK: f32 = 80.0;
    pub const FIRE_DAMAGE: f32 = 5.0;

    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            speed: Self::SPEED,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.pos, Self::SIZE)
    }

    pub fn step_toward(&mut self, target: Vec2) {
        let angle = (target.y - self.pos.y).atan2(target.x - self.pos.x);
        self.pos += Vec2::new(angle.cos(), angle.sin()) * self.speed;
    }

    /// Where a player at `player_pos` lands after being shoved away.
    pub fn knockback_from(&self, player_pos: Vec2) -> Vec2 {
        let angle = (player_pos.y - self.pos.y).atan2(player_pos.x - self.pos.x);
        player_pos + Vec2::new(angle.cos(), angle.sin()) * Self::KNOCKBACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homes_at_fixed_speed() {
        let mut echo = Echo::new(Vec2::new(0.0, 0.0));
        echo.step_toward(Vec2::new(100.0, 0.0));
        assert!((echo.pos.x - 1.5).abs() < 1e-5);
        assert!(echo.pos.y.abs() < 1e-5);

        // Target moved behind it: the heading flips immediately.
        echo.step_toward(Vec2::new(-100.0, 0.0));
        assert!(echo.pos.x.abs() < 1e-5);
    }

    #[test]
    fn knockback_pushes_directly_away() {
        let echo = Echo::new(Vec2::new(100.0, 100.0));
        let landed = echo.knockback_from(Vec2::new(100.0, 110.0));
        assert!((landed.x - 100.0).abs() < 1e-3);
        assert!((landed.y - 190.0).abs() < 1e-3);
    }
}
