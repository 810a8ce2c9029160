use std::collections::{BTreeSet, HashMap};

use rand::Rng;

use super::generation::generate_room;
use super::room::Room;
use crate::shared::*;

/// Every room the session has generated, keyed by coordinate.
///
/// A room is generated on first request and then kept for the rest of the
/// session, so enemy HP, picked-up items and lit pyres survive leaving and
/// coming back. Map progress (`visited`, `revealed`) lives alongside.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomCoord, Room>,
    /// Rooms shown on the minimap.
    pub revealed: BTreeSet<RoomCoord>,
    pub visited: BTreeSet<RoomCoord>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_generate<R: Rng>(&mut self, coord: RoomCoord, rng: &mut R) -> &mut Room {
        self.rooms
            .entry(coord)
            .or_insert_with(|| generate_room(coord, rng))
    }

    pub fn get(&self, coord: RoomCoord) -> Option<&Room> {
        self.rooms.get(&coord)
    }

    pub fn get_mut(&mut self, coord: RoomCoord) -> Option<&mut Room> {
        self.rooms.get_mut(&coord)
    }

    pub fn contains(&self, coord: RoomCoord) -> bool {
        self.rooms.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Forgets every room and all map progress.
    pub fn clear(&mut self) {
        self.rooms.clear();
        self.revealed.clear();
        self.visited.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rooms_are_generated_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut registry = RoomRegistry::new();
        let coord = RoomCoord(2, 0);

        let first = registry.get_or_generate(coord, &mut rng);
        let enemies = first.enemies.len();
        first.enemies[0].hp = 1;
        first.items.clear();

        let again = registry.get_or_generate(coord, &mut rng);
        assert_eq!(again.enemies.len(), enemies);
        assert_eq!(again.enemies[0].hp, 1);
        assert!(again.items.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn clear_forgets_progress() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut registry = RoomRegistry::new();
        registry.get_or_generate(RoomCoord::HUB, &mut rng);
        registry.revealed.insert(RoomCoord::HUB);
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.revealed.is_empty());
        assert!(!registry.contains(RoomCoord::HUB));
    }
}
