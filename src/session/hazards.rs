use bevy::math::Vec2;

use super::{Dialogue, GameSession};
use crate::entities::Echo;
use crate::shared::*;
use crate::world::{Biome, Room};

pub const ICE_BREAK_COST: f32 = 15.0;
pub const WATER_COST: f32 = 10.0;
/// Fragile ice only cracks under a player moving slower than this.
pub const ICE_STILL_SPEED: f32 = 0.2;
/// Gap kept below a water tile when the centre itself is flooded.
const SHORE_GAP: f32 = 20.0;

/// Where a player lands after a hazard sends them back.
///
/// That is the room centre, unless the centre is under water; then it is
/// just below the flooded tile, so the player is not dropped straight back in.
pub fn respawn_point(room: &Room) -> Vec2 {
    let center = room_center();
    match room.water_tiles.iter().find(|w| w.contains(center)) {
        Some(water) => Vec2::new(center.x, (water.bottom() + SHORE_GAP).min(SCREEN_HEIGHT - SHORE_GAP)),
        None => center,
    }
}

impl GameSession {
    /// Fragile ice and open water, checked after the player has moved.
    pub(super) fn apply_hazards(&mut self) {
        let room = self.world.get_or_generate(self.current, &mut self.rng);
        let respawn = respawn_point(room);

        if room.biome() == Biome::Glacier && self.player.velocity_mag < ICE_STILL_SPEED {
            let feet = self.player.bounds();
            let mut broke = false;
            for ice in room.fragile_ice.iter_mut().filter(|i| i.bounds.overlaps(&feet)) {
                ice.integrity -= 1;
                broke |= ice.is_broken();
            }
            if broke {
                room.fragile_ice.retain(|ice| !ice.is_broken());
                self.fire.drain(ICE_BREAK_COST);
                self.player.pos = respawn;
                self.dialogue.say("Ice broke! -15 Fire", Dialogue::LONG);
            }
        }

        if !self.player.is_airborne() && room.overlaps_water(&self.player.bounds()) {
            self.fire.drain(WATER_COST);
            self.player.pos = respawn;
            self.dialogue.say("Fell in water.", Dialogue::NORMAL);
        }
    }

    /// Echoes home in; a grounded player they touch loses an item, or fire
    /// if the bag is empty, and is thrown clear.
    pub(super) fn update_echoes(&mut self) {
        let room = self.world.get_or_generate(self.current, &mut self.rng);
        for echo in room.echoes.iter_mut() {
            echo.step_toward(self.player.pos);
            let touching = echo.bounds().overlaps(&self.player.bounds());
            if !touching || self.player.z >= Echo::CONTACT_MAX_Z {
                continue;
            }
            if self.player.inventory.pop().is_none() {
                self.fire.drain(Echo::FIRE_DAMAGE);
            }
            self.player.pos = echo.knockback_from(self.player.pos);
        }
    }
}
