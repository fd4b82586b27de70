//! File-backed save store.
//!
//! Every mutating operation loads the tables, applies its change to that
//! in-memory copy, and commits by writing a temp file and renaming it over
//! the original. Any error before the rename discards the copy, which is
//! the rollback.
//!
//! `try_*` methods return typed errors; the plain methods are the UI
//! boundary and report success as a `bool` after logging the failure.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use horde_core::enums::CharacterClass;

use crate::error::StoreError;
use crate::records::{CharacterInventory, CharacterStats, NewSave, SaveRecord};

const SAVE_FILE: &str = "player_data.json";
const MAX_TITLE_LEN: usize = 64;
const MAX_INVENTORY_FIELD_LEN: usize = 4096;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Tables {
    next_id: u32,
    save_data: Vec<SaveRecord>,
    character_stats: Vec<CharacterStats>,
    character_inventory: Vec<CharacterInventory>,
}

impl Tables {
    fn contains(&self, id: u32) -> bool {
        self.save_data.iter().any(|s| s.save_data_id == id)
    }
}

/// Save tables stored under a directory.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    /// Store rooted at `dir`. Nothing is created until the first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SAVE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Tables, StoreError> {
        if !self.path.exists() {
            return Ok(Tables::default());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn commit(&self, tables: &Tables) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(tables)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    // --- Reads ---

    /// Every save slot, in creation order.
    pub fn fetch_all_save_state(&self) -> Result<Vec<SaveRecord>, StoreError> {
        Ok(self.load()?.save_data)
    }

    pub fn fetch_character_stats(&self, save_data_id: u32) -> Result<Vec<CharacterStats>, StoreError> {
        Ok(self
            .load()?
            .character_stats
            .into_iter()
            .filter(|s| s.save_data_id == save_data_id)
            .collect())
    }

    pub fn fetch_character_inventory(
        &self,
        save_data_id: u32,
    ) -> Result<Vec<CharacterInventory>, StoreError> {
        Ok(self
            .load()?
            .character_inventory
            .into_iter()
            .filter(|i| i.save_data_id == save_data_id)
            .collect())
    }

    // --- Writes ---

    /// Insert one row into each table under a new id.
    pub fn try_add_save_state(&self, save: &NewSave) -> Result<u32, StoreError> {
        let mut tables = self.load()?;
        let id = tables.next_id + 1;

        check_title(&save.title)?;
        tables.save_data.push(SaveRecord {
            save_data_id: id,
            save_data_title: save.title.clone(),
        });

        let stats = CharacterStats {
            save_data_id: id,
            character_class: save.class,
            character_exp: save.experience,
            character_level: save.level,
            character_wave: save.wave,
        };
        check_stats(&stats)?;
        tables.character_stats.push(stats);

        let inventory = CharacterInventory {
            save_data_id: id,
            character_weapons: save.weapons.clone(),
            character_armors: save.armors.clone(),
            character_accessories: save.accessories.clone(),
            character_consumables: save.consumables.clone(),
        };
        check_inventory(&inventory)?;
        tables.character_inventory.push(inventory);

        tables.next_id = id;
        self.commit(&tables)?;
        debug!(id, title = %save.title, "save created");
        Ok(id)
    }

    pub fn try_update_save_state(&self, save_data_id: u32, title: &str) -> Result<(), StoreError> {
        check_title(title)?;
        let mut tables = self.load()?;
        let record = tables
            .save_data
            .iter_mut()
            .find(|s| s.save_data_id == save_data_id)
            .ok_or(StoreError::NotFound(save_data_id))?;
        record.save_data_title = title.to_string();
        self.commit(&tables)
    }

    pub fn try_update_character_stats(
        &self,
        save_data_id: u32,
        class: CharacterClass,
        experience: u32,
        level: u32,
        wave: u32,
    ) -> Result<(), StoreError> {
        let updated = CharacterStats {
            save_data_id,
            character_class: class,
            character_exp: experience,
            character_level: level,
            character_wave: wave,
        };
        check_stats(&updated)?;
        let mut tables = self.load()?;
        let row = tables
            .character_stats
            .iter_mut()
            .find(|s| s.save_data_id == save_data_id)
            .ok_or(StoreError::NotFound(save_data_id))?;
        *row = updated;
        self.commit(&tables)
    }

    pub fn try_update_character_inventory(
        &self,
        inventory: &CharacterInventory,
    ) -> Result<(), StoreError> {
        check_inventory(inventory)?;
        let mut tables = self.load()?;
        let row = tables
            .character_inventory
            .iter_mut()
            .find(|i| i.save_data_id == inventory.save_data_id)
            .ok_or(StoreError::NotFound(inventory.save_data_id))?;
        *row = inventory.clone();
        self.commit(&tables)
    }

    /// Remove a save and its rows from every table.
    pub fn try_delete_save(&self, save_data_id: u32) -> Result<(), StoreError> {
        let mut tables = self.load()?;
        if !tables.contains(save_data_id) {
            return Err(StoreError::NotFound(save_data_id));
        }
        tables.save_data.retain(|s| s.save_data_id != save_data_id);
        tables.character_stats.retain(|s| s.save_data_id != save_data_id);
        tables
            .character_inventory
            .retain(|i| i.save_data_id != save_data_id);
        self.commit(&tables)
    }

    // --- UI boundary ---

    pub fn add_save_state(&self, save: &NewSave) -> bool {
        report("add_save_state", self.try_add_save_state(save).map(|_| ()))
    }

    pub fn update_save_state(&self, save_data_id: u32, title: &str) -> bool {
        report("update_save_state", self.try_update_save_state(save_data_id, title))
    }

    pub fn update_character_stats(
        &self,
        save_data_id: u32,
        class: CharacterClass,
        experience: u32,
        level: u32,
        wave: u32,
    ) -> bool {
        report(
            "update_character_stats",
            self.try_update_character_stats(save_data_id, class, experience, level, wave),
        )
    }

    pub fn update_character_inventory(&self, inventory: &CharacterInventory) -> bool {
        report(
            "update_character_inventory",
            self.try_update_character_inventory(inventory),
        )
    }

    pub fn delete_save(&self, save_data_id: u32) -> bool {
        report("delete_save", self.try_delete_save(save_data_id))
    }
}

fn report(operation: &str, result: Result<(), StoreError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(operation, error = %e, "save store operation failed");
            false
        }
    }
}

fn check_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::Constraint("save title is empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(StoreError::Constraint(format!(
            "save title longer than {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

fn check_stats(stats: &CharacterStats) -> Result<(), StoreError> {
    if stats.character_level == 0 {
        return Err(StoreError::Constraint("character level must be at least 1".into()));
    }
    if stats.character_wave == 0 {
        return Err(StoreError::Constraint("character wave must be at least 1".into()));
    }
    Ok(())
}

fn check_inventory(inventory: &CharacterInventory) -> Result<(), StoreError> {
    let fields = [
        &inventory.character_weapons,
        &inventory.character_armors,
        &inventory.character_accessories,
        &inventory.character_consumables,
    ];
    if fields.iter().any(|f| f.len() > MAX_INVENTORY_FIELD_LEN) {
        return Err(StoreError::Constraint(format!(
            "inventory field longer than {MAX_INVENTORY_FIELD_LEN} bytes"
        )));
    }
    Ok(())
}
