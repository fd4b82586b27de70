//! Row types for the three save tables.

use serde::{Deserialize, Serialize};

use horde_core::enums::CharacterClass;

/// One save slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub save_data_id: u32,
    pub save_data_title: String,
}

/// Progress of the character in a save slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub save_data_id: u32,
    pub character_class: CharacterClass,
    pub character_exp: u32,
    pub character_level: u32,
    /// Highest wave reached.
    pub character_wave: u32,
}

/// Equipment carried by the character in a save slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInventory {
    pub save_data_id: u32,
    pub character_weapons: String,
    pub character_armors: String,
    pub character_accessories: String,
    pub character_consumables: String,
}

/// Everything needed to create a save across all three tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSave {
    pub title: String,
    pub class: CharacterClass,
    pub experience: u32,
    pub level: u32,
    pub wave: u32,
    pub weapons: String,
    pub armors: String,
    pub accessories: String,
    pub consumables: String,
}

impl NewSave {
    /// A fresh level-1 save with an empty inventory.
    pub fn fresh(title: impl Into<String>, class: CharacterClass) -> Self {
        Self {
            title: title.into(),
            class,
            experience: 0,
            level: 1,
            wave: 1,
            weapons: String::new(),
            armors: String::new(),
            accessories: String::new(),
            consumables: String::new(),
        }
    }
}
