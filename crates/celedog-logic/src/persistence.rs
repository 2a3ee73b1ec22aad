//! Save/Load for the game state.
//!
//! The save is a versioned envelope around plain records. JSON is the
//! interchange text a browser store or a file holds; bincode is the compact
//! form. Where the bytes live is the caller's business: everything here
//! works over `Read`/`Write`.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::dog::{Dog, DogError, DogId, DogRecord};
use crate::lineage::Pedigree;
use crate::state::{GameState, Player, Settings, Stats};

/// Save format version. Loads require an exact match.
pub const SAVE_VERSION: &str = "1.0.0";

/// Largest JSON save accepted for writing.
pub const MAX_SAVE_BYTES: usize = 5_000_000;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid save data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Incompatible save version: {found}")]
    VersionMismatch { found: String },
    #[error("Save data missing required fields ({0})")]
    MissingData(&'static str),
    #[error("Save data too large ({0} bytes). Consider clearing old data.")]
    TooLarge(usize),
    #[error("Invalid dog {id} in save: {source}")]
    InvalidDog { id: DogId, source: DogError },
}

/// Versioned envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: String,
    /// Unix millis at save time.
    pub timestamp: u64,
    pub data: SaveData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub player: Player,
    pub dogs: Vec<DogRecord>,
    #[serde(default)]
    pub lineage: Pedigree,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub settings: Settings,
}

/// Summary of a save, read without rebuilding the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMetadata {
    pub version: String,
    pub timestamp: u64,
    pub dog_count: usize,
    pub gold: u64,
    pub highest_generation: u32,
}

/// A rebuilt state plus when it was saved.
#[derive(Debug, Clone)]
pub struct LoadedGame {
    pub state: GameState,
    pub timestamp: u64,
}

impl SaveFile {
    pub fn from_state(state: &GameState, timestamp: u64) -> Self {
        Self {
            version: SAVE_VERSION.to_string(),
            timestamp,
            data: SaveData {
                player: state.player.clone(),
                dogs: state.dogs().into_iter().map(Dog::to_record).collect(),
                lineage: state.lineage.clone(),
                stats: state.stats.clone(),
                settings: state.settings.clone(),
            },
        }
    }

    pub fn metadata(&self) -> SaveMetadata {
        SaveMetadata {
            version: self.version.clone(),
            timestamp: self.timestamp,
            dog_count: self.data.dogs.len(),
            gold: self.data.player.gold,
            highest_generation: self.data.stats.highest_generation,
        }
    }

    /// Check the version and rebuild every dog. Runtime tuning comes from
    /// `config`, not the save.
    pub fn into_state(self, config: GameConfig) -> Result<LoadedGame, SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                found: self.version,
            });
        }

        let data = self.data;
        let dogs = data
            .dogs
            .into_iter()
            .map(|record| {
                let id = record.id;
                Dog::from_record(record).map_err(|source| SaveError::InvalidDog { id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let state = GameState::from_parts(
            config,
            data.player,
            dogs,
            data.lineage,
            data.stats,
            data.settings,
        );
        Ok(LoadedGame {
            state,
            timestamp: self.timestamp,
        })
    }
}

// ── JSON ────────────────────────────────────────────────────────────────

/// Write the state as JSON. Returns the byte count written.
pub fn save_json<W: Write>(
    mut writer: W,
    state: &GameState,
    timestamp: u64,
) -> Result<usize, SaveError> {
    let bytes = serde_json::to_vec(&SaveFile::from_state(state, timestamp))?;
    if bytes.len() > MAX_SAVE_BYTES {
        return Err(SaveError::TooLarge(bytes.len()));
    }
    writer.write_all(&bytes)?;
    log::info!(
        "saved {} dogs ({} bytes, json)",
        state.dog_count(),
        bytes.len()
    );
    Ok(bytes.len())
}

pub fn load_json<R: Read>(reader: R, config: GameConfig) -> Result<LoadedGame, SaveError> {
    let loaded = parse_json(reader)?.into_state(config)?;
    log::info!("loaded {} dogs (json)", loaded.state.dog_count());
    Ok(loaded)
}

/// Version, timestamp, dog count, gold and highest generation from a JSON
/// save; dogs are not validated.
pub fn read_metadata_json<R: Read>(reader: R) -> Result<SaveMetadata, SaveError> {
    Ok(parse_json(reader)?.metadata())
}

/// Structural checks first so a truncated save reports what is missing
/// rather than a serde path.
fn parse_json<R: Read>(reader: R) -> Result<SaveFile, SaveError> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    if value.get("version").is_none() {
        return Err(SaveError::MissingData("version"));
    }
    let Some(data) = value.get("data") else {
        return Err(SaveError::MissingData("data"));
    };
    for field in ["player", "dogs"] {
        if data.get(field).is_none() {
            return Err(SaveError::MissingData(field));
        }
    }
    Ok(serde_json::from_value(value)?)
}

// ── Binary ──────────────────────────────────────────────────────────────

pub fn save_binary<W: Write>(writer: W, state: &GameState, timestamp: u64) -> Result<(), SaveError> {
    bincode::serialize_into(writer, &SaveFile::from_state(state, timestamp))?;
    log::info!("saved {} dogs (binary)", state.dog_count());
    Ok(())
}

pub fn load_binary<R: Read>(reader: R, config: GameConfig) -> Result<LoadedGame, SaveError> {
    let file: SaveFile = bincode::deserialize_from(reader)?;
    let loaded = file.into_state(config)?;
    log::info!("loaded {} dogs (binary)", loaded.state.dog_count());
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breeding;
    use crate::fixtures::{founder, genes_a, genes_b, rng};
    use crate::lineage::DEFAULT_ANCESTRY_DEPTH;

    fn played_state() -> GameState {
        let mut state = GameState::default();
        let a = founder("Bark Wahlberg", 1, genes_a(), 1);
        let b = founder("Taylor Swift", 2, genes_b(), 2);
        state.add_dog(a.clone()).unwrap();
        state.add_dog(b.clone()).unwrap();
        let mut r = rng(9);
        let (pup, _) = breeding::try_breed(&mut state, &a.id(), &b.id(), &mut r, 5_000).unwrap();
        assert_eq!(pup.generation(), 1);
        state.settings.tutorial_completed = true;
        state
    }

    fn assert_same(a: &GameState, b: &GameState) {
        assert_eq!(a.player, b.player);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.settings, b.settings);
        assert_eq!(a.lineage, b.lineage);
        assert_eq!(a.dogs(), b.dogs());
    }

    #[test]
    fn json_roundtrip() {
        let state = played_state();
        let mut buf = Vec::new();
        let written = save_json(&mut buf, &state, 1_700_000_000_000).unwrap();
        assert_eq!(written, buf.len());

        let loaded = load_json(&buf[..], GameConfig::default()).unwrap();
        assert_eq!(loaded.timestamp, 1_700_000_000_000);
        assert_same(&state, &loaded.state);

        let pup = loaded.state.dogs_in_generation(1)[0];
        assert_eq!(
            loaded.state.lineage.ancestry(pup.id(), DEFAULT_ANCESTRY_DEPTH).len(),
            3
        );
    }

    #[test]
    fn binary_roundtrip() {
        let state = played_state();
        let mut buf = Vec::new();
        save_binary(&mut buf, &state, 42).unwrap();
        let loaded = load_binary(&buf[..], GameConfig::default()).unwrap();
        assert_eq!(loaded.timestamp, 42);
        assert_same(&state, &loaded.state);
    }

    #[test]
    fn json_uses_wire_names() {
        let mut buf = Vec::new();
        save_json(&mut buf, &played_state(), 0).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"version\":\"1.0.0\""));
        assert!(text.contains("\"kennelCapacity\":10"));
        assert!(text.contains("\"coatColor\":\"#8B4513\""));
        assert!(text.contains("\"highestGeneration\":1"));
    }

    #[test]
    fn version_must_match_exactly() {
        let mut file = SaveFile::from_state(&played_state(), 0);
        file.version = "0.9.0".into();
        let json = serde_json::to_vec(&file).unwrap();
        let err = load_json(&json[..], GameConfig::default()).unwrap_err();
        assert!(matches!(err, SaveError::VersionMismatch { ref found } if found == "0.9.0"));
        assert_eq!(err.to_string(), "Incompatible save version: 0.9.0");
    }

    #[test]
    fn missing_fields_are_reported() {
        let cases = [
            (r#"{"timestamp":0,"data":{}}"#, "version"),
            (r#"{"version":"1.0.0","timestamp":0}"#, "data"),
            (r#"{"version":"1.0.0","timestamp":0,"data":{"dogs":[]}}"#, "player"),
            (
                r#"{"version":"1.0.0","timestamp":0,"data":{"player":{"gold":1,"kennelCapacity":10,"expansionLevel":0}}}"#,
                "dogs",
            ),
        ];
        for (json, field) in cases {
            match load_json(json.as_bytes(), GameConfig::default()) {
                Err(SaveError::MissingData(f)) => assert_eq!(f, field),
                other => panic!("expected missing {field}, got {other:?}"),
            }
        }
        assert!(matches!(
            load_json(&b"not json"[..], GameConfig::default()),
            Err(SaveError::Json(_))
        ));
    }

    #[test]
    fn bad_dog_record_fails_the_load() {
        let mut file = SaveFile::from_state(&played_state(), 0);
        file.data.dogs[0].rarity = 9;
        let id = file.data.dogs[0].id;
        let json = serde_json::to_vec(&file).unwrap();
        match load_json(&json[..], GameConfig::default()) {
            Err(SaveError::InvalidDog { id: bad, .. }) => assert_eq!(bad, id),
            other => panic!("expected invalid dog, got {other:?}"),
        }
    }

    #[test]
    fn metadata_without_loading() {
        let state = played_state();
        let mut buf = Vec::new();
        save_json(&mut buf, &state, 77).unwrap();
        let meta = read_metadata_json(&buf[..]).unwrap();
        assert_eq!(
            meta,
            SaveMetadata {
                version: SAVE_VERSION.into(),
                timestamp: 77,
                dog_count: 3,
                gold: state.player.gold,
                highest_generation: 1,
            }
        );
    }

    #[test]
    fn minimal_save_defaults_the_rest() {
        let json = r#"{"version":"1.0.0","timestamp":5,"data":{"player":{"gold":12,"kennelCapacity":4,"expansionLevel":0},"dogs":[]}}"#;
        let loaded = load_json(json.as_bytes(), GameConfig::default()).unwrap();
        assert_eq!(loaded.state.player.gold, 12);
        assert_eq!(loaded.state.kennel_usage(), (0, 4));
        assert!(loaded.state.lineage.is_empty());
        assert_eq!(loaded.state.settings, Settings::default());
    }
}
