//! The interact button. Checks run in a fixed order and the first one that
//! applies consumes the press:
//!
//! 1. pick up an item in reach
//! 2. light an unlit pyre in reach
//! 3. open the save menu at a pitched tent
//! 4. at the hub: feed the fire (or take a torch), talk to the keeper,
//!    then use the stockpile

use bevy::log::info;
use bevy::math::Vec2;
use rand::seq::SliceRandom;

use super::{Dialogue, Fire, GameSession};
use crate::entities::Keeper;
use crate::shared::*;

/// Reach of the hub fire, from the room centre.
pub const FEED_RADIUS: f32 = 70.0;
pub const TENT_RADIUS: f32 = 60.0;
/// Where a tent is pitched, relative to the room centre.
pub const TENT_OFFSET: Vec2 = Vec2::new(0.0, -80.0);
pub const STOCKPILE_BOUNDS: Bounds = Bounds::new(
    SCREEN_WIDTH / 2.0 - 100.0,
    SCREEN_HEIGHT / 2.0 - 20.0,
    40.0,
    40.0,
);

pub fn tent_spot() -> Vec2 {
    room_center() + TENT_OFFSET
}

impl GameSession {
    pub fn interact(&mut self) {
        if self.try_pickup() || self.try_light_pyre() || self.try_open_tent() {
            return;
        }
        if self.current.is_hub() {
            self.interact_hub();
        }
    }

    fn try_pickup(&mut self) -> bool {
        let pos = self.player.pos;
        let room = self.world.get_or_generate(self.current, &mut self.rng);
        let Some(index) = room.items.iter().position(|item| item.in_reach(pos)) else {
            return false;
        };
        let item = room.items.remove(index);
        self.player.inventory.push(item.kind);
        self.dialogue.say(format!("Got {}", item.kind), Dialogue::NORMAL);
        true
    }

    fn try_light_pyre(&mut self) -> bool {
        let pos = self.player.pos;
        let can_light = self.player.has_light() || self.current.is_hub();
        let room = self.world.get_or_generate(self.current, &mut self.rng);

        let nearest = room
            .pyres
            .iter_mut()
            .filter(|pyre| !pyre.is_lit() && pyre.in_reach(pos))
            .min_by(|a, b| {
                let da = a.bounds.center().distance(pos);
                let db = b.bounds.center().distance(pos);
                da.total_cmp(&db)
            });
        let Some(pyre) = nearest else {
            return false;
        };

        if can_light {
            pyre.light();
            self.world.revealed.insert(self.current);
            self.dialogue.say("Signal lit.", Dialogue::NORMAL);
            info!("[Session] Pyre lit in {}", self.current);
        } else {
            self.dialogue.say("Need a light source!", Dialogue::NORMAL);
        }
        true
    }

    fn try_open_tent(&mut self) -> bool {
        let has_tent = self.current_room().is_some_and(|room| room.has_tent);
        if !has_tent || self.player.pos.distance(tent_spot()) >= TENT_RADIUS {
            return false;
        }
        self.open_slot_menu(SlotPurpose::Save);
        true
    }

    fn interact_hub(&mut self) {
        if self.player.pos.distance(room_center()) < FEED_RADIUS {
            self.feed_fire();
            return;
        }

        let feet = self.player.bounds();
        if feet.overlaps(&self.keeper.bounds) {
            self.talk_to_keeper();
        } else if feet.overlaps(&STOCKPILE_BOUNDS) {
            self.use_stockpile();
        }
    }

    fn feed_fire(&mut self) {
        match self.player.inventory.pop() {
            Some(item) => {
                self.fire.add(Fire::FEED);
                let line = item
                    .flavor_lines()
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or("It burns.");
                self.dialogue
                    .say(format!("Keeper: \"{}\"", line), Dialogue::LONG);
            }
            None => {
                self.player.light_torch();
                self.dialogue.say("Torch Lit.", Dialogue::LONG);
            }
        }
    }

    /// Unlocks automation the first time the stockpile is big enough;
    /// afterwards the keeper just chats.
    fn talk_to_keeper(&mut self) {
        if self.automation_unlocked {
            let line = self.keeper.random_line(&mut self.rng);
            self.dialogue
                .say(format!("Keeper: \"{}\"", line), Dialogue::LONG);
        } else if self.stockpile.len() >= Keeper::AUTOMATION_THRESHOLD {
            self.automation_unlocked = true;
            info!("[Session] Automation unlocked with {} stockpiled", self.stockpile.len());
            self.dialogue.say(
                "Keeper: \"Good stockpile. I will keep the fire alive.\"",
                Dialogue::LINGER,
            );
        } else {
            self.dialogue.say(
                "Keeper: \"Stack 5 items in the pile, and I will help.\"",
                Dialogue::LONG,
            );
        }
    }

    /// Moves one token: into the pile if carrying anything, else out.
    fn use_stockpile(&mut self) {
        if let Some(item) = self.player.inventory.pop() {
            self.stockpile.push(item);
            self.dialogue.say(format!("Stored {}", item), Dialogue::NORMAL);
        } else if let Some(item) = self.stockpile.pop() {
            self.player.inventory.push(item);
            self.dialogue.say(format!("Took {}", item), Dialogue::NORMAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Item, Pyre};
    use crate::player::Inventory;
    use crate::session::tests::session_in_play;

    fn press(s: &mut GameSession) {
        s.advance(Vec2::ZERO, &[Intent::Interact]);
    }

    #[test]
    fn empty_handed_at_the_fire_takes_a_torch() {
        let mut s = session_in_play();
        let fire_before = s.fire.level();
        s.interact();
        assert_eq!(s.player.torch.map(|t| t.health), Some(100.0));
        assert!(s.player.inventory.is_empty());
        assert_eq!(s.fire.level(), fire_before);
    }

    #[test]
    fn feeding_pops_one_item_for_fuel() {
        let mut s = session_in_play();
        s.player.inventory = Inventory::from(vec![ItemKind::Wood, ItemKind::Oil]);
        s.fire.set(50.0);
        s.interact();
        assert_eq!(s.fire.level(), 65.0);
        assert_eq!(s.player.inventory.iter().collect::<Vec<_>>(), vec![ItemKind::Wood]);
        let line = s.dialogue.text().unwrap();
        assert!(ItemKind::Oil.flavor_lines().iter().any(|l| line.contains(l)));
    }

    #[test]
    fn pickup_beats_everything_else() {
        let mut s = session_in_play();
        let room = s.world.get_mut(RoomCoord::HUB).unwrap();
        room.items.push(Item::new(ItemKind::Flint, room_center() - Vec2::splat(10.0)));
        press(&mut s);
        assert_eq!(s.player.inventory.count(ItemKind::Flint), 1);
        assert!(s.player.torch.is_none());
        assert!(s.current_room().unwrap().items.is_empty());
    }

    #[test]
    fn pyres_need_light_outside_the_hub() {
        let mut s = session_in_play();
        s.player.pos = Vec2::new(300.0, 300.0);
        let coord = RoomCoord(1, 0);
        s.load_room(coord);
        let room = s.world.get_mut(coord).unwrap();
        room.items.clear();
        room.pyres = vec![Pyre::new(Vec2::new(290.0, 290.0))];
        s.world.revealed.remove(&coord);

        s.interact();
        assert_eq!(s.dialogue.text(), Some("Need a light source!"));
        assert!(!s.current_room().unwrap().pyres[0].is_lit());

        s.player.light_torch();
        s.interact();
        assert!(s.current_room().unwrap().pyres[0].is_lit());
        assert!(s.revealed().contains(&coord));

        // A lit pyre no longer claims the press.
        s.interact();
        assert_eq!(s.dialogue.text(), Some("Signal lit."));
    }

    #[test]
    fn keeper_unlocks_automation_from_the_stockpile() {
        let mut s = session_in_play();
        s.player.pos = s.keeper.center();
        s.interact();
        assert!(!s.automation_unlocked);

        s.stockpile = Inventory::from(vec![ItemKind::Branch; 5]);
        s.interact();
        assert!(s.automation_unlocked);
        assert_eq!(s.stockpile.len(), 5);
    }

    #[test]
    fn stockpile_prefers_depositing() {
        let mut s = session_in_play();
        s.player.pos = STOCKPILE_BOUNDS.center();
        s.player.inventory = Inventory::from(vec![ItemKind::Fur]);
        s.stockpile = Inventory::from(vec![ItemKind::Wood]);

        s.interact();
        assert!(s.player.inventory.is_empty());
        assert_eq!(s.stockpile.len(), 2);

        s.interact();
        assert_eq!(s.player.inventory.iter().collect::<Vec<_>>(), vec![ItemKind::Fur]);
        assert_eq!(s.dialogue.text(), Some("Took Fur"));
    }

    #[test]
    fn tent_reopens_the_save_menu() {
        let mut s = session_in_play();
        s.world.get_mut(RoomCoord::HUB).unwrap().has_tent = true;
        s.player.pos = tent_spot();
        s.interact();
        assert_eq!(s.mode(), UiMode::SlotSelect(SlotPurpose::Save));
    }
}
