use bevy::log::info;

use super::{Dialogue, Fire, GameSession};
use crate::shared::*;

/// What a craft attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftOutcome {
    /// A new token went into the bag.
    Crafted(ItemKind),
    FireStoked,
    LanternEquipped,
    /// Paid for a tent; the save slot menu is open.
    TentPitched,
    /// This room already has a tent. Nothing was paid.
    TentAlreadyHere,
    Insufficient,
}

impl Recipe {
    pub const ALL: [Recipe; 4] = [Recipe::Fabric, Recipe::Campfire, Recipe::Tent, Recipe::Lantern];

    pub fn name(self) -> &'static str {
        match self {
            Recipe::Fabric => "Fabric",
            Recipe::Campfire => "Campfire",
            Recipe::Tent => "Tent",
            Recipe::Lantern => "Lantern",
        }
    }

    pub fn costs(self) -> &'static [(ItemKind, usize)] {
        match self {
            Recipe::Fabric => &[(ItemKind::Reeds, 3)],
            Recipe::Campfire => &[(ItemKind::Wood, 2), (ItemKind::Flint, 1)],
            Recipe::Tent => &[(ItemKind::Wood, 5), (ItemKind::Fabric, 2), (ItemKind::Fur, 1)],
            Recipe::Lantern => &[(ItemKind::Iron, 2), (ItemKind::Oil, 1)],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Recipe::Fabric => "Woven plant fiber.",
            Recipe::Campfire => "Portable heat (+20 Fire).",
            Recipe::Tent => "Shelter. SAVES GAME.",
            Recipe::Lantern => "Permanent light source.",
        }
    }

    /// Key shown in the crafting overlay.
    pub fn hotkey(self) -> u8 {
        match self {
            Recipe::Fabric => 1,
            Recipe::Campfire => 2,
            Recipe::Tent => 3,
            Recipe::Lantern => 4,
        }
    }
}

impl GameSession {
    pub fn craft(&mut self, recipe: Recipe) -> CraftOutcome {
        if recipe == Recipe::Tent && self.current_room().is_some_and(|r| r.has_tent) {
            self.dialogue.say("Tent already here.", Dialogue::NORMAL);
            return CraftOutcome::TentAlreadyHere;
        }

        if !self.free_crafting && !self.player.inventory.try_consume(recipe.costs()) {
            self.dialogue.say("Not enough materials.", Dialogue::NORMAL);
            return CraftOutcome::Insufficient;
        }

        info!("[Session] Crafted {}", recipe.name());
        match recipe {
            Recipe::Fabric => {
                self.player.inventory.push(ItemKind::Fabric);
                self.dialogue.say("Crafted Fabric", Dialogue::NORMAL);
                CraftOutcome::Crafted(ItemKind::Fabric)
            }
            Recipe::Campfire => {
                self.fire.add(Fire::CAMPFIRE);
                self.dialogue.say("Fire stoked.", Dialogue::NORMAL);
                CraftOutcome::FireStoked
            }
            Recipe::Lantern => {
                self.player.has_lantern = true;
                self.dialogue.say("Lantern equipped!", Dialogue::NORMAL);
                CraftOutcome::LanternEquipped
            }
            Recipe::Tent => {
                self.crafting_open = false;
                self.open_slot_menu(SlotPurpose::Save);
                CraftOutcome::TentPitched
            }
        }
    }
}
