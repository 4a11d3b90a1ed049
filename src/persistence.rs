// File: src/persistence.rs
use crate::core::fix_table::FixTable;
use crate::error::PersistenceError;
use crate::speller::FrequencySpeller;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const SPELLER_FILE: &str = "speller.bin";
pub const FIX_TABLE_FILE: &str = "perma_fix.json";
pub const NEW_WORDS_FILE: &str = "new_words.json";

/// The files that carry a review from one run to the next.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn speller_path(&self) -> PathBuf {
        self.dir.join(SPELLER_FILE)
    }

    pub fn fix_table_path(&self) -> PathBuf {
        self.dir.join(FIX_TABLE_FILE)
    }

    pub fn new_words_path(&self) -> PathBuf {
        self.dir.join(NEW_WORDS_FILE)
    }

    pub fn load_speller(&self) -> Result<Option<FrequencySpeller>, PersistenceError> {
        load_speller(&self.speller_path())
    }

    pub fn load_fix_table(&self) -> Result<Option<FixTable>, PersistenceError> {
        load_fix_table(&self.fix_table_path())
    }

    pub fn load_new_words(&self) -> Result<Vec<String>, PersistenceError> {
        Ok(read_json(&self.new_words_path())?.unwrap_or_default())
    }

    /// Saves the dictionary and fix table, and appends this run's new words
    /// to the ones already on disk.
    pub fn save(
        &self,
        speller: &FrequencySpeller,
        fix_table: &FixTable,
        new_additions: &[String],
    ) -> Result<(), PersistenceError> {
        save_speller(speller, &self.speller_path())?;
        save_fix_table(fix_table, &self.fix_table_path())?;

        let mut words = self.load_new_words()?;
        for word in new_additions {
            if !words.contains(word) {
                words.push(word.clone());
            }
        }
        write_atomically(&self.new_words_path(), |writer| {
            serde_json::to_writer_pretty(writer, &words)
                .map_err(|e| PersistenceError::Encode(e.to_string()))
        })?;

        log::info!("Session state saved to {:?}", self.dir);
        Ok(())
    }
}

pub fn save_speller(speller: &FrequencySpeller, path: &Path) -> Result<(), PersistenceError> {
    write_atomically(path, |writer| {
        bincode::serialize_into(writer, speller)
            .map_err(|e| PersistenceError::Encode(e.to_string()))
    })
}

/// `Ok(None)` when there is no saved dictionary yet.
pub fn load_speller(path: &Path) -> Result<Option<FrequencySpeller>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let reader = BufReader::new(File::open(path)?);
    let speller = bincode::deserialize_from(reader).map_err(|e| PersistenceError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::info!("Restored dictionary from {:?}", path);
    Ok(Some(speller))
}

pub fn save_fix_table(fix_table: &FixTable, path: &Path) -> Result<(), PersistenceError> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(writer, fix_table)
            .map_err(|e| PersistenceError::Encode(e.to_string()))
    })
}

pub fn load_fix_table(path: &Path) -> Result<Option<FixTable>, PersistenceError> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| PersistenceError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Writes through a temp file in the target directory, then renames it into place.
fn write_atomically<F>(path: &Path, write: F) -> Result<(), PersistenceError>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<(), PersistenceError>,
{
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }

    temp_file
        .persist(path)
        .map_err(|e| PersistenceError::Io(e.error))?;
    Ok(())
}
