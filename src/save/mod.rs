//! Three named save slots in one JSON file.
//!
//! The file is an object keyed `"1"`, `"2"`, `"3"`; an empty slot is
//! `null`. Reading never fails hard: a missing or unreadable file is three
//! empty slots. Writing goes through a temp file and a rename.

use bevy::log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::shared::*;

pub const NUM_SAVE_SLOTS: u8 = 3;

fn default_hp() -> i32 {
    100
}

// ═══════════════════════════════════════════════════════════════════════
// SCHEMA
// ═══════════════════════════════════════════════════════════════════════

/// One saved run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSlot {
    pub name: String,
    pub fire: f32,
    pub inventory: Vec<ItemKind>,
    pub stockpile: Vec<ItemKind>,
    pub room: RoomCoord,
    pub pos: [f32; 2],
    pub revealed: Vec<RoomCoord>,
    pub tents: Vec<RoomCoord>,
    pub automation: bool,
    #[serde(default = "default_hp")]
    pub hp: i32,
    #[serde(default)]
    pub lantern: bool,
}

/// The whole save file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveSlots {
    #[serde(rename = "1", default)]
    pub one: Option<SaveSlot>,
    #[serde(rename = "2", default)]
    pub two: Option<SaveSlot>,
    #[serde(rename = "3", default)]
    pub three: Option<SaveSlot>,
}

impl SaveSlots {
    /// Slot by its 1-based number.
    pub fn get(&self, slot: u8) -> Option<&SaveSlot> {
        match slot {
            1 => self.one.as_ref(),
            2 => self.two.as_ref(),
            3 => self.three.as_ref(),
            _ => None,
        }
    }

    pub fn set(&mut self, slot: u8, data: SaveSlot) -> Result<(), String> {
        let target = match slot {
            1 => &mut self.one,
            2 => &mut self.two,
            3 => &mut self.three,
            _ => return Err(format!("No save slot {}", slot)),
        };
        *target = Some(data);
        Ok(())
    }

    /// `(slot number, label)` for the slot menu.
    pub fn labels(&self) -> Vec<(u8, String)> {
        (1..=NUM_SAVE_SLOTS)
            .map(|n| {
                let label = match self.get(n) {
                    Some(slot) => slot.name.clone(),
                    None => "Empty".to_string(),
                };
                (n, label)
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FILE I/O
// ═══════════════════════════════════════════════════════════════════════

pub fn parse_slots(json: &str) -> Result<SaveSlots, String> {
    serde_json::from_str(json).map_err(|e| format!("Deserialization failed: {}", e))
}

/// Reads all slots. Missing or broken files yield three empty slots.
pub fn read_slots(path: &Path) -> SaveSlots {
    if !path.exists() {
        return SaveSlots::default();
    }
    let parsed = fs::read_to_string(path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))
        .and_then(|json| parse_slots(&json));
    match parsed {
        Ok(slots) => slots,
        Err(e) => {
            warn!("[Save] {}. Treating all slots as empty.", e);
            SaveSlots::default()
        }
    }
}

pub fn write_slots(path: &Path, slots: &SaveSlots) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(slots).map_err(|e| format!("Serialization failed: {}", e))?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Could not create {}: {}", dir.display(), e))?;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, path).map_err(|e| format!("Rename failed: {}", e))?;

    info!("[Save] Wrote {}", path.display());
    Ok(())
}
