//! Slot menu, name entry, and moving a run in and out of `SaveSlot`s.

use bevy::log::{debug, info, warn};
use bevy::math::Vec2;

use super::{Dialogue, Fire, GameSession};
use crate::player::{Inventory, Player};
use crate::save::{self, SaveSlot, NUM_SAVE_SLOTS};
use crate::shared::*;

pub const MAX_NAME_LEN: usize = 15;

impl GameSession {
    /// Re-reads the slot file and shows the slot menu.
    pub(super) fn open_slot_menu(&mut self, purpose: SlotPurpose) {
        self.slots = save::read_slots(&self.config.save_path);
        self.mode = UiMode::SlotSelect(purpose);
    }

    pub(super) fn apply_slot_select(&mut self, purpose: SlotPurpose, intent: Intent) {
        match intent {
            Intent::SelectSlot(n) if (1..=NUM_SAVE_SLOTS).contains(&n) => {
                self.selected_slot = n;
            }
            Intent::Confirm => match purpose {
                SlotPurpose::Load => self.perform_load(self.selected_slot),
                SlotPurpose::Save => {
                    self.input_text.clear();
                    self.mode = UiMode::Typing;
                }
            },
            Intent::Cancel => {
                self.mode = match purpose {
                    SlotPurpose::Load => UiMode::Menu,
                    SlotPurpose::Save => UiMode::Play,
                };
            }
            _ => {}
        }
    }

    pub(super) fn apply_typing(&mut self, intent: Intent) {
        match intent {
            Intent::TypeChar(c) => {
                if !c.is_control() && self.input_text.chars().count() < MAX_NAME_LEN {
                    self.input_text.push(c);
                }
            }
            Intent::Backspace => {
                self.input_text.pop();
            }
            Intent::Confirm if !self.input_text.is_empty() => {
                let name = self.input_text.clone();
                // The tent goes up even when the write fails; only the slots stay as they were.
                if let Err(e) = self.perform_save(self.selected_slot, &name) {
                    debug!("[Save] Tent pitched without a save: {}", e);
                }
                self.mode = UiMode::Play;
                self.pitch_tent();
            }
            Intent::Cancel => self.mode = UiMode::Play,
            _ => {}
        }
    }

    fn pitch_tent(&mut self) {
        if self.tents.contains(&self.current) {
            return;
        }
        self.tents.push(self.current);
        if let Some(room) = self.world.get_mut(self.current) {
            room.has_tent = true;
        }
    }

    /// The current run as a save record.
    pub fn snapshot(&self, name: &str) -> SaveSlot {
        SaveSlot {
            name: name.to_string(),
            fire: self.fire.level(),
            inventory: self.player.inventory.iter().collect(),
            stockpile: self.stockpile.iter().collect(),
            room: self.current,
            pos: self.player.pos.to_array(),
            revealed: self.world.revealed.iter().copied().collect(),
            tents: self.tents.clone(),
            automation: self.automation_unlocked,
            hp: self.player.hp,
            lantern: self.player.has_lantern,
        }
    }

    /// Writes the run into `slot` and the whole slot file to disk.
    pub fn perform_save(&mut self, slot: u8, name: &str) -> Result<(), String> {
        let data = self.snapshot(name);
        let mut slots = self.slots.clone();
        let result = slots
            .set(slot, data)
            .and_then(|()| save::write_slots(&self.config.save_path, &slots));
        match &result {
            Ok(()) => {
                self.slots = slots;
                info!("[Save] Saved \"{}\" to slot {}", name, slot);
                self.dialogue
                    .say(format!("Saved to Slot {}", slot), Dialogue::LONG);
            }
            Err(e) => {
                warn!("[Save] Save to slot {} FAILED: {}", slot, e);
                self.dialogue.say("Save failed", Dialogue::LONG);
            }
        }
        result
    }

    /// Restores the run in `slot`. An empty slot changes nothing.
    pub fn perform_load(&mut self, slot: u8) {
        let Some(data) = self.slots.get(slot).cloned() else {
            self.dialogue.say("Empty Slot", Dialogue::NORMAL);
            return;
        };

        self.reset_run();
        self.fire = Fire::new(data.fire);
        self.stockpile = Inventory::from(data.stockpile);
        self.automation_unlocked = data.automation;
        self.player = Player::new(Vec2::from_array(data.pos));
        self.player.inventory = Inventory::from(data.inventory);
        self.player.hp = data.hp;
        self.player.has_lantern = data.lantern;
        self.tents = data.tents;
        self.world.revealed = data.revealed.into_iter().collect();

        self.load_room(data.room);
        self.mode = UiMode::Play;
        info!("[Save] Loaded \"{}\" from slot {}", data.name, slot);
        self.dialogue
            .say(format!("Loaded: {}", data.name), Dialogue::LONG);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn session_with_save_file() -> (tempfile::TempDir, GameSession) {
        let dir = tempfile::tempdir().unwrap();
        let mut s = GameSession::new(GameConfig::seeded(8, dir.path().join("savegame.json")));
        s.advance(Vec2::ZERO, &[Intent::NewGame]);
        (dir, s)
    }

    fn type_name(s: &mut GameSession, name: &str) {
        let intents: Vec<Intent> = name.chars().map(Intent::TypeChar).collect();
        s.advance(Vec2::ZERO, &intents);
    }

    #[test]
    fn save_then_load_restores_the_run() {
        let (_dir, mut s) = session_with_save_file();
        s.load_room(RoomCoord(2, -1));
        s.player.pos = Vec2::new(123.5, 456.25);
        s.player.inventory = Inventory::from(vec![ItemKind::Iron, ItemKind::Oil, ItemKind::Iron]);
        s.stockpile = Inventory::from(vec![ItemKind::Wood]);
        s.fire.set(61.25);
        s.player.hp = 40;
        s.player.has_lantern = true;
        s.automation_unlocked = true;
        s.world.revealed.insert(RoomCoord(5, 5));
        s.perform_save(2, "ridge").unwrap();

        let (revealed, inventory) = (s.world.revealed.clone(), s.player.inventory.clone());

        s.load_room(RoomCoord::HUB);
        s.player = Player::default();
        s.fire.set(5.0);
        s.stockpile.clear();
        s.world.revealed.clear();

        s.open_slot_menu(SlotPurpose::Load);
        s.advance(Vec2::ZERO, &[Intent::SelectSlot(2)]);
        s.perform_load(2);

        assert_eq!(s.mode(), UiMode::Play);
        assert_eq!(s.current_coord(), RoomCoord(2, -1));
        assert_eq!(s.player.pos, Vec2::new(123.5, 456.25));
        assert_eq!(s.player.inventory, inventory);
        assert_eq!(s.stockpile.iter().collect::<Vec<_>>(), vec![ItemKind::Wood]);
        assert_eq!(s.fire.level(), 61.25);
        assert_eq!(s.player.hp, 40);
        assert!(s.player.has_lantern);
        assert!(s.automation_unlocked);
        assert_eq!(s.world.revealed, revealed);
        assert_eq!(s.dialogue.text(), Some("Loaded: ridge"));
    }

    #[test]
    fn typing_flow_saves_and_pitches_a_tent() {
        let (dir, mut s) = session_with_save_file();
        s.open_slot_menu(SlotPurpose::Save);
        s.advance(Vec2::ZERO, &[Intent::SelectSlot(3), Intent::Confirm]);
        assert_eq!(s.mode(), UiMode::Typing);

        // Empty names are not accepted.
        s.advance(Vec2::ZERO, &[Intent::Confirm]);
        assert_eq!(s.mode(), UiMode::Typing);

        type_name(&mut s, "a very long camp name indeed");
        assert_eq!(s.input_text.chars().count(), MAX_NAME_LEN);
        s.advance(Vec2::ZERO, &[Intent::Backspace, Intent::TypeChar('\n'), Intent::Confirm]);

        assert_eq!(s.mode(), UiMode::Play);
        assert!(s.tents.contains(&RoomCoord::HUB));
        assert!(s.current_room().unwrap().has_tent);
        let on_disk = save::read_slots(&dir.path().join("savegame.json"));
        assert_eq!(on_disk.get(3).map(|slot| slot.name.as_str()), Some("a very long ca"));
    }

    #[test]
    fn loading_an_empty_slot_changes_nothing() {
        let (_dir, mut s) = session_with_save_file();
        s.fire.set(0.0);
        s.advance(Vec2::ZERO, &[]);
        s.advance(Vec2::ZERO, &[Intent::Restart]);
        assert_eq!(s.mode(), UiMode::Menu);

        s.advance(Vec2::ZERO, &[Intent::OpenLoadMenu]);
        assert_eq!(s.mode(), UiMode::SlotSelect(SlotPurpose::Load));
        s.advance(Vec2::ZERO, &[Intent::Confirm]);
        assert_eq!(s.mode(), UiMode::SlotSelect(SlotPurpose::Load));
        assert_eq!(s.dialogue.text(), Some("Empty Slot"));

        s.advance(Vec2::ZERO, &[Intent::Cancel]);
        assert_eq!(s.mode(), UiMode::Menu);
    }

    #[test]
    fn unwritable_save_path_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let mut s = GameSession::new(GameConfig::seeded(8, blocker.join("savegame.json")));
        s.advance(Vec2::ZERO, &[Intent::NewGame]);
        assert!(s.perform_save(1, "doomed").is_err());
        assert_eq!(s.dialogue.text(), Some("Save failed"));
        assert_eq!(s.mode(), UiMode::Play);
        assert!(s.slots().get(1).is_none());
    }

    #[test]
    fn failed_save_from_the_name_prompt_still_pitches_the_tent() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let mut s = GameSession::new(GameConfig::seeded(8, blocker.join("savegame.json")));
        s.advance(Vec2::ZERO, &[Intent::NewGame]);
        s.mode = UiMode::Typing;
        s.selected_slot = 3;
        s.input_text = "camp".to_string();

        s.advance(Vec2::ZERO, &[Intent::Confirm]);
        assert_eq!(s.mode(), UiMode::Play);
        assert_eq!(s.dialogue.text(), Some("Save failed"));
        assert!(s.tents.contains(&RoomCoord::HUB));
        assert!(s.slots().get(3).is_none());
    }
}
