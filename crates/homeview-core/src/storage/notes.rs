use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::{Error, Result};

/// A short text pinned to the notes panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// First eight hex digits of the id, enough to address a note from the CLI
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct NoteFile {
    #[serde(default)]
    notes: Vec<Note>,
}

/// JSON-file backed list of notes, newest last
#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let notes = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str::<NoteFile>(&content)?.notes
            }
        } else {
            Vec::new()
        };
        tracing::debug!("Loaded {} notes from {}", notes.len(), path.display());
        Ok(Self { path, notes })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Append a note and persist
    pub fn add(&mut self, text: &str) -> Result<Note> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Other("note text is empty".to_string()));
        }
        let note = Note {
            id: Uuid::new_v4(),
            text: text.to_string(),
            created_at: Utc::now(),
        };
        self.notes.push(note.clone());
        self.save()?;
        Ok(note)
    }

    /// Remove the note whose id starts with `id_prefix` and persist.
    ///
    /// The prefix must identify exactly one note.
    pub fn remove(&mut self, id_prefix: &str) -> Result<Note> {
        let prefix = id_prefix.trim().to_lowercase().replace('-', "");
        if prefix.is_empty() {
            return Err(Error::NoteNotFound(id_prefix.to_string()));
        }
        let matches: Vec<usize> = self
            .notes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.id.simple().to_string().starts_with(&prefix))
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [index] => {
                let note = self.notes.remove(*index);
                self.save()?;
                Ok(note)
            }
            [] => Err(Error::NoteNotFound(id_prefix.to_string())),
            _ => Err(Error::Other(format!("note id '{}' is ambiguous", id_prefix))),
        }
    }

    /// Written to a temporary file, then renamed into place
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = NoteFile {
            notes: self.notes.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("homeview-notes-{}-{}", name, Uuid::new_v4()))
            .join("notes.json")
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = NoteStore::load(temp_path("missing")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_persists() {
        let path = temp_path("add");
        let mut store = NoteStore::load(&path).unwrap();
        store.add("  Buy milk ").unwrap();
        store.add("Call the plumber").unwrap();

        let reloaded = NoteStore::load(&path).unwrap();
        let texts: Vec<_> = reloaded.list().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, ["Buy milk", "Call the plumber"]);
    }

    #[test]
    fn test_empty_text_rejected() {
        let mut store = NoteStore::load(temp_path("empty")).unwrap();
        assert!(store.add("   ").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_by_prefix() {
        let path = temp_path("remove");
        let mut store = NoteStore::load(&path).unwrap();
        let note = store.add("Recycling on Thursday").unwrap();

        let removed = store.remove(&note.short_id()).unwrap();
        assert_eq!(removed.id, note.id);
        assert!(NoteStore::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut store = NoteStore::load(temp_path("unknown")).unwrap();
        store.add("x").unwrap();
        assert!(matches!(store.remove("zzzz"), Err(Error::NoteNotFound(_))));
    }
}
