use bevy::log::info;

use super::{Dialogue, GameSession};
use crate::shared::*;

/// Distance from the far edge the player appears at in the next room.
pub const EDGE_INSET: f32 = 20.0;

impl GameSession {
    /// Makes `coord` the current room, generating it on first visit.
    pub fn load_room(&mut self, coord: RoomCoord) {
        let room = self.world.get_or_generate(coord, &mut self.rng);
        room.has_tent = self.tents.contains(&coord);
        let cold = room.biome().is_cold();

        self.current = coord;
        self.world.visited.insert(coord);
        self.world.revealed.insert(coord);
        info!("[Session] Entered {} ({})", coord, self.biome());

        if cold {
            self.dialogue.say("It is freezing here...", Dialogue::NORMAL);
        }
    }

    /// Walking off an edge loads the neighbour and wraps the player to the
    /// opposite side. Only one edge is handled per tick.
    pub(super) fn check_room_exit(&mut self) {
        let pos = self.player.pos;
        let (step, wrapped) = if pos.x > SCREEN_WIDTH {
            ((1, 0), pos.with_x(EDGE_INSET))
        } else if pos.x < 0.0 {
            ((-1, 0), pos.with_x(SCREEN_WIDTH - EDGE_INSET))
        } else if pos.y > SCREEN_HEIGHT {
            ((0, 1), pos.with_y(EDGE_INSET))
        } else if pos.y < 0.0 {
            ((0, -1), pos.with_y(SCREEN_HEIGHT - EDGE_INSET))
        } else {
            return;
        };
        self.load_room(self.current.offset(step.0, step.1));
        self.player.pos = wrapped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::session_in_play;
    use bevy::math::Vec2;

    #[test]
    fn walking_east_enters_the_next_room() {
        let mut s = session_in_play();
        s.player.pos = Vec2::new(SCREEN_WIDTH - 1.0, 360.0);
        s.advance(Vec2::new(1.0, 0.0), &[]);
        assert_eq!(s.current_coord(), RoomCoord(1, 0));
        assert_eq!(s.player.pos, Vec2::new(EDGE_INSET, 360.0));
        assert!(s.visited().contains(&RoomCoord(1, 0)));
    }

    #[test]
    fn walking_north_uses_negative_y() {
        let mut s = session_in_play();
        s.player.pos = Vec2::new(640.0, 1.0);
        s.advance(Vec2::new(0.0, -1.0), &[]);
        assert_eq!(s.current_coord(), RoomCoord(0, -1));
        assert_eq!(s.player.pos.y, SCREEN_HEIGHT - EDGE_INSET);
    }

    #[test]
    fn rooms_keep_their_state_between_visits() {
        let mut s = session_in_play();
        s.load_room(RoomCoord(1, 0));
        let room = s.world.get_mut(RoomCoord(1, 0)).unwrap();
        room.items.clear();
        let enemies = room.enemies.len();
        room.enemies[0].hp = 3;

        s.load_room(RoomCoord::HUB);
        s.load_room(RoomCoord(1, 0));
        let room = s.current_room().unwrap();
        assert!(room.items.is_empty());
        assert_eq!(room.enemies.len(), enemies);
        assert_eq!(room.enemies[0].hp, 3);
    }

    #[test]
    fn tents_are_restored_on_entry() {
        let mut s = session_in_play();
        s.tents.push(RoomCoord(0, 1));
        s.load_room(RoomCoord(0, 1));
        assert!(s.current_room().unwrap().has_tent);
    }

    #[test]
    fn cold_rooms_announce_themselves() {
        let mut s = session_in_play();
        s.load_room(RoomCoord(0, -2));
        assert_eq!(s.dialogue.text(), Some("It is freezing here..."));
    }
}
